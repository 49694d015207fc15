//! `reliefdesk` - Console record keeping for disaster-response coordination
//!
//! This library provides the record types, the line codec, the file-backed
//! record store and the interactive session behind the `reliefdesk` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod session;
pub mod storage;

pub use codec::{CodecError, LineRecord};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{DisasterEvent, Role, User};
pub use session::{Console, Session, SessionState};
pub use storage::{LoadReport, RecordStore, RegisterError};
