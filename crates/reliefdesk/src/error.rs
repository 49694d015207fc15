//! Error types for reliefdesk.
//!
//! This module defines the error type shared by the store, configuration and
//! session layers. User mistakes at the console (duplicate ids, bad
//! credentials, out-of-range menu choices) are not errors; they are reported
//! as messages by the session and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecError;

/// The main error type for reliefdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to read a record file.
    #[error("failed to read {path}: {source}")]
    StoreRead {
        /// Path to the record file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a record file.
    #[error("failed to write {path}: {source}")]
    StoreWrite {
        /// Path to the record file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A record file that could not be read when the store was opened is
    /// left as it is rather than replaced.
    #[error("not overwriting {path}: it could not be read when the records were loaded")]
    StoreUnread {
        /// Path to the record file.
        path: PathBuf,
    },

    /// A record could not be encoded for saving.
    #[error("cannot save {kind} record: {source}")]
    Encode {
        /// Kind of record being saved.
        kind: &'static str,
        /// The codec failure.
        #[source]
        source: CodecError,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Console Errors ===
    /// Reading from or writing to the terminal failed.
    #[error("console I/O error: {0}")]
    Console(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for reliefdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error means a record file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StoreRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
