//! Whole-file line I/O for record files.
//!
//! Files are read in one pass at startup and replaced in one pass at
//! shutdown; no handle outlives the function that opened it.
//!
//! # Atomic Writes
//!
//! When requested, a file is replaced using write-to-temp-then-rename:
//! 1. Write to `<name>.tmp` beside the target
//! 2. fsync the temp file
//! 3. Rename over the target
//! 4. fsync the parent directory
//!
//! A crash mid-save leaves either the old or the new file, never a partial one.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read every line of a file as raw bytes.
///
/// Both `\n` and `\r\n` terminators are removed. Lines are not decoded
/// here, so a bad byte only affects the line it sits on.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_lines(path: &Path) -> io::Result<Vec<Vec<u8>>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    loop {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(lines);
        }
        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        lines.push(line);
    }
}

/// Replace a file with the given lines, each followed by `\n`.
///
/// # Errors
///
/// Returns an error if any write, sync or rename fails. On failure of an
/// atomic write the target is left untouched.
pub fn write_lines(path: &Path, lines: &[String], atomic: bool) -> io::Result<()> {
    if !atomic {
        let file = File::create(path)?;
        return write_to(file, lines).map(drop);
    }

    let tmp_path = temp_path(path);
    let result = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)
        .and_then(|file| write_to(file, lines))
        .and_then(|file| file.sync_all())
        .and_then(|()| std::fs::rename(&tmp_path, path));

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
        return result;
    }

    fsync_dir(parent_dir(path))
}

fn write_to(file: File, lines: &[String]) -> io::Result<File> {
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.into_inner().map_err(io::IntoInnerError::into_error)
}

/// Sibling temp path used by atomic writes.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Sync a directory so a rename inside it survives power loss.
#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
