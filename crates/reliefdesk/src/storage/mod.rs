//! Record store for reliefdesk.
//!
//! This module holds the in-memory user and disaster event collections and
//! moves them to and from their flat text files. Files are read once when the
//! store is opened and rewritten wholesale when it is saved; nothing is
//! persisted in between.
//!
//! Loading is forgiving: a missing or unreadable file yields an empty
//! collection, and a line that fails to decode (including one that is not
//! valid UTF-8) is skipped and reported with its line number while the rest
//! of the file still loads. A file that exists but could not be read is
//! never overwritten by the store that failed to read it.

pub mod file;
pub mod ids;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::codec::{check_field, CodecError, LineRecord};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{DisasterEvent, User};

pub use ids::EventIdGenerator;

/// A line that was dropped while loading a record file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// One-based line number within the file.
    pub line_number: usize,
    /// Why the line could not be decoded.
    pub reason: String,
}

/// Records decoded from one file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    /// Successfully decoded records.
    pub records: Vec<T>,
    /// Lines that failed to decode.
    pub skipped: Vec<SkippedLine>,
}

/// Load every record from a line file.
///
/// Blank lines are ignored. Lines that are not valid UTF-8 or fail to decode
/// are collected in [`Loaded::skipped`].
///
/// # Errors
///
/// Returns [`Error::StoreRead`] if the file cannot be read, including when it
/// does not exist (see [`Error::is_not_found`]).
pub fn load_records<T: LineRecord>(path: &Path) -> Result<Loaded<T>> {
    let lines = file::read_lines(path).map_err(|source| Error::StoreRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::with_capacity(lines.len());
    let mut skipped = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let decoded = std::str::from_utf8(raw)
            .map_err(|_| CodecError::InvalidUtf8)
            .and_then(|line| {
                if line.trim().is_empty() {
                    Ok(None)
                } else {
                    T::from_line(line).map(Some)
                }
            });
        match decoded {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(err) => {
                warn!(
                    "Skipping {} at {}:{}: {}",
                    T::KIND,
                    path.display(),
                    index + 1,
                    err
                );
                skipped.push(SkippedLine {
                    line_number: index + 1,
                    reason: err.to_string(),
                });
            }
        }
    }

    debug!(
        "Loaded {} {} records from {}",
        records.len(),
        T::KIND,
        path.display()
    );
    Ok(Loaded { records, skipped })
}

/// Load the user file.
///
/// # Errors
///
/// See [`load_records`].
pub fn load_users(path: &Path) -> Result<Loaded<User>> {
    load_records(path)
}

/// Load the disaster event file.
///
/// # Errors
///
/// See [`load_records`].
pub fn load_disaster_events(path: &Path) -> Result<Loaded<DisasterEvent>> {
    load_records(path)
}

/// Overwrite a line file with one line per record, in order.
///
/// Every record is encoded before the file is touched, so an encoding
/// failure leaves the previous contents in place.
///
/// # Errors
///
/// Returns [`Error::Encode`] if a record cannot be represented,
/// [`Error::DirectoryCreate`] if the parent directory cannot be created, or
/// [`Error::StoreWrite`] if writing fails.
pub fn save_records<T: LineRecord>(path: &Path, records: &[T], atomic: bool) -> Result<()> {
    let lines = records
        .iter()
        .map(T::to_line)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| Error::Encode {
            kind: T::KIND,
            source,
        })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    file::write_lines(path, &lines, atomic).map_err(|source| Error::StoreWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Saved {} {} records to {}",
        records.len(),
        T::KIND,
        path.display()
    );
    Ok(())
}

/// Save the user file.
///
/// # Errors
///
/// See [`save_records`].
pub fn save_users(path: &Path, users: &[User], atomic: bool) -> Result<()> {
    save_records(path, users, atomic)
}

/// Save the disaster event file.
///
/// # Errors
///
/// See [`save_records`].
pub fn save_disaster_events(path: &Path, events: &[DisasterEvent], atomic: bool) -> Result<()> {
    save_records(path, events, atomic)
}

/// Outcome of loading one record file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The file that was read.
    pub path: PathBuf,
    /// Number of records loaded.
    pub loaded: usize,
    /// Lines that were dropped.
    pub skipped: Vec<SkippedLine>,
    /// The file did not exist.
    pub missing: bool,
    /// Why the file could not be read, if it could not.
    pub failure: Option<String>,
}

impl FileReport {
    /// Whether every line loaded and the file was readable.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failure.is_none()
    }

    /// Whether the file exists but could not be read.
    #[must_use]
    pub fn is_unreadable(&self) -> bool {
        self.failure.is_some() && !self.missing
    }
}

/// Outcome of opening a [`RecordStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// The user file.
    pub users: FileReport,
    /// The disaster event file.
    pub events: FileReport,
}

impl LoadReport {
    /// Total number of skipped lines across both files.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.users.skipped.len() + self.events.skipped.len()
    }
}

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// Another user already has this id.
    #[error("User ID is already registered. Try logging in.")]
    DuplicateId,

    /// Another user already has this email.
    #[error("Email is already registered. Try logging in.")]
    DuplicateEmail,

    /// A field cannot be stored in the record file.
    #[error("{0}")]
    InvalidField(#[from] CodecError),
}

/// In-memory holder of all users and disaster events.
#[derive(Debug)]
pub struct RecordStore {
    users_path: PathBuf,
    events_path: PathBuf,
    atomic_writes: bool,
    /// Set when the user file exists but could not be read.
    users_unread: bool,
    /// Set when the event file exists but could not be read.
    events_unread: bool,
    ids: EventIdGenerator,
    users: Vec<User>,
    events: Vec<DisasterEvent>,
}

impl RecordStore {
    /// Create an empty store backed by the files named in `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            users_path: config.users_path(),
            events_path: config.events_path(),
            atomic_writes: config.storage.atomic_writes,
            users_unread: false,
            events_unread: false,
            ids: EventIdGenerator::from_config(&config.events),
            users: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Create a store and load both record files.
    ///
    /// Never fails: unreadable files leave the matching collection empty and
    /// are described in the returned [`LoadReport`].
    #[must_use]
    pub fn open(config: &Config) -> (Self, LoadReport) {
        let mut store = Self::new(config);

        let (users, users_report) = load_or_empty::<User>(&store.users_path);
        let (events, events_report) = load_or_empty::<DisasterEvent>(&store.events_path);
        store.users = users;
        store.events = events;
        store.users_unread = users_report.is_unreadable();
        store.events_unread = events_report.is_unreadable();
        store.warn_duplicate_ids();

        info!(
            "Opened store with {} users and {} disaster events",
            store.users.len(),
            store.events.len()
        );
        (
            store,
            LoadReport {
                users: users_report,
                events: events_report,
            },
        )
    }

    /// Path of the user file.
    #[must_use]
    pub fn users_path(&self) -> &Path {
        &self.users_path
    }

    /// Path of the disaster event file.
    #[must_use]
    pub fn events_path(&self) -> &Path {
        &self.events_path
    }

    /// All users, in registration order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All disaster events, in reporting order.
    #[must_use]
    pub fn events(&self) -> &[DisasterEvent] {
        &self.events
    }

    /// Find the first user with the given id.
    #[must_use]
    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.user_id == user_id)
    }

    /// Whether any user has registered with this email.
    #[must_use]
    pub fn email_registered(&self, email: &str) -> bool {
        self.users.iter().any(|user| user.email == email)
    }

    /// Find the first user whose id and password both match exactly.
    #[must_use]
    pub fn authenticate(&self, user_id: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.matches_credentials(user_id, password))
    }

    /// Append a new user.
    ///
    /// # Errors
    ///
    /// Refuses the user if its id or email is already registered, or if a
    /// field cannot be stored. The collection is unchanged on refusal.
    pub fn register(&mut self, user: User) -> std::result::Result<(), RegisterError> {
        if self.find_user(&user.user_id).is_some() {
            return Err(RegisterError::DuplicateId);
        }
        if self.email_registered(&user.email) {
            return Err(RegisterError::DuplicateEmail);
        }
        user.to_line()?;

        info!("Registered user {} as {}", user.user_id, user.role);
        self.users.push(user);
        Ok(())
    }

    /// Record a new disaster event under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ForbiddenCharacter`] if a field cannot be
    /// stored. The collection is unchanged on error.
    pub fn add_event(
        &mut self,
        disaster_type: &str,
        location: &str,
        description: &str,
    ) -> std::result::Result<&DisasterEvent, CodecError> {
        check_field("disaster type", disaster_type)?;
        check_field("location", location)?;
        check_field("description", description)?;

        let event_id = self.ids.next_id(&self.events);
        info!("Recorded disaster event {}", event_id);
        self.events.push(DisasterEvent::new(
            event_id,
            disaster_type,
            location,
            description,
        ));
        Ok(&self.events[self.events.len() - 1])
    }

    /// Flush the user collection to its file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnread`] if the file exists but could not be
    /// read when the store was opened. Otherwise see [`save_records`].
    pub fn save_users(&self) -> Result<()> {
        if self.users_unread {
            return Err(Error::StoreUnread {
                path: self.users_path.clone(),
            });
        }
        save_users(&self.users_path, &self.users, self.atomic_writes)
    }

    /// Flush the disaster event collection to its file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnread`] if the file exists but could not be
    /// read when the store was opened. Otherwise see [`save_records`].
    pub fn save_events(&self) -> Result<()> {
        if self.events_unread {
            return Err(Error::StoreUnread {
                path: self.events_path.clone(),
            });
        }
        save_disaster_events(&self.events_path, &self.events, self.atomic_writes)
    }

    fn warn_duplicate_ids(&self) {
        for (index, user) in self.users.iter().enumerate() {
            if self.users[..index]
                .iter()
                .any(|earlier| earlier.user_id == user.user_id)
            {
                warn!(
                    "Duplicate user id {} in {}; the first entry wins at login",
                    user.user_id,
                    self.users_path.display()
                );
            }
        }
    }
}

fn load_or_empty<T: LineRecord>(path: &Path) -> (Vec<T>, FileReport) {
    match load_records::<T>(path) {
        Ok(loaded) => {
            let report = FileReport {
                path: path.to_path_buf(),
                loaded: loaded.records.len(),
                skipped: loaded.skipped,
                missing: false,
                failure: None,
            };
            (loaded.records, report)
        }
        Err(err) => {
            let missing = err.is_not_found();
            if missing {
                warn!("No {} file at {}; starting empty", T::KIND, path.display());
            } else {
                error!("{}", err);
            }
            let report = FileReport {
                path: path.to_path_buf(),
                loaded: 0,
                skipped: Vec::new(),
                missing,
                failure: Some(err.to_string()),
            };
            (Vec::new(), report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdStrategy;
    use crate::record::Role;
    use tempfile::{tempdir, TempDir};

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        config
    }

    fn alice() -> User {
        User::new("u1", "Alice", "a@x.com", "pw", Role::Admin)
    }

    #[test]
    fn test_open_missing_files_is_empty() {
        let dir = tempdir().unwrap();
        let (store, report) = RecordStore::open(&test_config(&dir));

        assert!(store.users().is_empty());
        assert!(store.events().is_empty());
        assert!(report.users.missing);
        assert!(report.events.missing);
        assert!(report.users.failure.is_some());
        assert!(!report.users.is_clean());
    }

    #[test]
    fn test_register_and_find() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::new(&test_config(&dir));

        store.register(alice()).unwrap();
        assert_eq!(store.find_user("u1"), Some(&alice()));
        assert!(store.find_user("U1").is_none());
        assert!(store.email_registered("a@x.com"));
        assert!(!store.email_registered("A@X.COM"));
    }

    #[test]
    fn test_register_duplicate_id_keeps_first() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::new(&test_config(&dir));
        store.register(alice()).unwrap();

        let imposter = User::new("u1", "Mallory", "m@x.com", "pw2", Role::Victim);
        assert_eq!(store.register(imposter), Err(RegisterError::DuplicateId));
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.users()[0], alice());
    }

    #[test]
    fn test_register_duplicate_email_rejected() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::new(&test_config(&dir));
        store.register(alice()).unwrap();

        let other = User::new("u2", "Alicia", "a@x.com", "pw", Role::Volunteer);
        assert_eq!(store.register(other), Err(RegisterError::DuplicateEmail));
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn test_register_rejects_comma() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::new(&test_config(&dir));

        let user = User::new("u1", "Smith, Al", "a@x.com", "pw", Role::Admin);
        assert!(matches!(
            store.register(user),
            Err(RegisterError::InvalidField(_))
        ));
        assert!(store.users().is_empty());
    }

    #[test]
    fn test_authenticate() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::new(&test_config(&dir));
        store.register(alice()).unwrap();

        assert_eq!(store.authenticate("u1", "pw").map(|u| u.role), Some(Role::Admin));
        assert!(store.authenticate("u1", "wrong").is_none());
        assert!(store.authenticate("u2", "pw").is_none());
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn test_add_event() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::new(&test_config(&dir));

        let event = store.add_event("Flood", "Riverside", "Heavy flooding").unwrap();
        assert!((0..1000).contains(&event.event_id));
        assert_eq!(event.disaster_type, "Flood");
        assert_eq!(store.events().len(), 1);
    }

    #[test]
    fn test_add_event_rejects_comma() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::new(&test_config(&dir));

        let err = store.add_event("Flood", "Riverside, East", "water").unwrap_err();
        assert_eq!(err, CodecError::ForbiddenCharacter { field: "location" });
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_add_event_sequential_ids() {
        let dir = tempdir().unwrap();
        let mut config = test_config(&dir);
        config.events.id_strategy = IdStrategy::Sequential;
        let mut store = RecordStore::new(&config);

        assert_eq!(store.add_event("A", "B", "C").unwrap().event_id, 0);
        assert_eq!(store.add_event("A", "B", "C").unwrap().event_id, 1);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        let mut store = RecordStore::new(&config);
        store.register(alice()).unwrap();
        store
            .register(User::new("u2", "Bob", "b@x.com", "pw", Role::Victim))
            .unwrap();
        store.add_event("Fire", "Hills", "Spreading fast").unwrap();

        store.save_users().unwrap();
        store.save_events().unwrap();

        let (reopened, report) = RecordStore::open(&config);
        assert_eq!(reopened.users(), store.users());
        assert_eq!(reopened.events(), store.events());
        assert!(report.users.is_clean());
        assert!(report.events.is_clean());
        assert_eq!(report.users.loaded, 2);
    }

    #[test]
    fn test_load_skips_unknown_role() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.txt");
        std::fs::write(
            &path,
            "u1,Alice,a@x.com,pw,Admin\nu2,Bob,b@x.com,pw,Manager\nu3,Cara,c@x.com,pw,Victim\n",
        )
        .unwrap();

        let loaded = load_users(&path).unwrap();
        let ids: Vec<_> = loaded.records.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, ["u1", "u3"]);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].line_number, 2);
        assert!(loaded.skipped[0].reason.contains("Manager"));
    }

    #[test]
    fn test_load_skips_bad_event_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("disasters.txt");
        std::fs::write(
            &path,
            "12,Flood,Riverside,Rising\nxx,Fire,Hills,Smoke\n\n40,Quake,City,Shaking\n",
        )
        .unwrap();

        let loaded = load_disaster_events(&path).unwrap();
        let ids: Vec<_> = loaded.records.iter().map(|e| e.event_id).collect();
        assert_eq!(ids, [12, 40]);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].line_number, 2);
    }

    #[test]
    fn test_load_skips_extra_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("disasters.txt");
        std::fs::write(&path, "1,Flood,Riverside,Heavy, widespread flooding\n").unwrap();

        let loaded = load_disaster_events(&path).unwrap();
        assert!(loaded.records.is_empty());
        assert!(loaded.skipped[0].reason.contains("expected 4 fields"));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_users(&dir.path().join("users.txt")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_open_reports_skipped_lines() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        std::fs::write(config.users_path(), "u1,Alice,a@x.com,pw,Admin\nbad line\n").unwrap();
        std::fs::write(config.events_path(), "").unwrap();

        let (store, report) = RecordStore::open(&config);
        assert_eq!(store.users().len(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(!report.users.is_clean());
        assert!(report.events.is_clean());
        assert!(!report.events.missing);
    }

    #[test]
    fn test_save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().join("nested").join("data"));
        let mut store = RecordStore::new(&config);
        store.register(alice()).unwrap();

        store.save_users().unwrap();
        assert!(config.users_path().exists());
    }

    #[test]
    fn test_save_empty_truncates() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        std::fs::write(config.events_path(), "1,Flood,Riverside,Rising\n").unwrap();

        RecordStore::new(&config).save_events().unwrap();
        assert_eq!(std::fs::read_to_string(config.events_path()).unwrap(), "");
    }

    #[test]
    fn test_save_records_encode_failure_leaves_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.txt");
        std::fs::write(&path, "u1,Alice,a@x.com,pw,Admin\n").unwrap();

        let bad = [User::new("u2", "B,ob", "b@x.com", "pw", Role::Victim)];
        let err = save_users(&path, &bad, true).unwrap_err();
        assert!(matches!(err, Error::Encode { kind: "user", .. }));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "u1,Alice,a@x.com,pw,Admin\n"
        );
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped_and_the_rest_survive_a_save() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        std::fs::write(
            config.users_path(),
            b"u1,Alice,a@x.com,pw,Admin\nu2,Jos\xE9,j@x.com,pw,Victim\nu3,Carl,c@x.com,pw,Volunteer\n",
        )
        .unwrap();

        let (store, report) = RecordStore::open(&config);
        assert!(report.users.failure.is_none());
        assert_eq!(report.users.loaded, 2);
        assert_eq!(
            report.users.skipped,
            [SkippedLine {
                line_number: 2,
                reason: "line is not valid UTF-8".to_string(),
            }]
        );

        store.save_users().unwrap();
        assert_eq!(
            std::fs::read_to_string(config.users_path()).unwrap(),
            "u1,Alice,a@x.com,pw,Admin\nu3,Carl,c@x.com,pw,Volunteer\n"
        );
    }

    #[test]
    fn test_unreadable_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let mut config = test_config(&dir);
        // A directory in place of the user file opens but cannot be read.
        config.storage.users_file = "users_dir".to_string();
        std::fs::create_dir(config.users_path()).unwrap();
        std::fs::write(config.users_path().join("keep.txt"), "kept").unwrap();

        let (mut store, report) = RecordStore::open(&config);
        assert!(report.users.is_unreadable());
        assert!(!report.events.is_unreadable());
        store.register(alice()).unwrap();

        let err = store.save_users().unwrap_err();
        assert!(matches!(err, Error::StoreUnread { ref path } if *path == config.users_path()));
        assert_eq!(
            std::fs::read_to_string(config.users_path().join("keep.txt")).unwrap(),
            "kept"
        );

        // The readable file is still flushed.
        store.save_events().unwrap();
        assert!(config.events_path().exists());
    }

    #[test]
    fn test_missing_file_is_still_created_on_save() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        let (mut store, report) = RecordStore::open(&config);
        assert!(!report.users.is_unreadable());

        store.register(alice()).unwrap();
        store.save_users().unwrap();
        assert_eq!(
            std::fs::read_to_string(config.users_path()).unwrap(),
            "u1,Alice,a@x.com,pw,Admin\n"
        );
    }

    #[test]
    fn test_line_that_cannot_be_saved_again_is_skipped() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        std::fs::write(config.users_path(), "u1,Al\rice,a@x.com,pw,Admin\n").unwrap();

        let (mut store, report) = RecordStore::open(&config);
        assert_eq!(report.users.loaded, 0);
        assert_eq!(report.users.skipped.len(), 1);
        assert!(report.users.skipped[0].reason.contains("'name'"));

        store
            .register(User::new("u2", "Bob", "b@x.com", "pw", Role::Volunteer))
            .unwrap();
        store.save_users().unwrap();
        assert_eq!(
            std::fs::read_to_string(config.users_path()).unwrap(),
            "u2,Bob,b@x.com,pw,Volunteer\n"
        );
    }

    #[test]
    fn test_load_report_serializes() {
        let dir = tempdir().unwrap();
        let (_, report) = RecordStore::open(&test_config(&dir));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"missing\":true"));
    }
}
