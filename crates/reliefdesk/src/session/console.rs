//! Line-based terminal I/O.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Prompt/response wrapper around an input and an output stream.
///
/// Generic over its streams so sessions can be driven from a script in tests.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Print `label` without a newline and read one line of input.
    ///
    /// Returns `None` once the input is exhausted. The line terminator is
    /// removed; other whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the prompt or reading the input fails.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Consume the console and return the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}
