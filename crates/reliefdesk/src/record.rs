//! Core record types for reliefdesk.
//!
//! This module defines the two kinds of record the desk keeps: registered
//! [`User`]s, each tagged with a closed [`Role`], and reported
//! [`DisasterEvent`]s.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

/// The role a user registered with.
///
/// The role decides which menu a session enters after login and is persisted
/// by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Coordinates the response: records events and reviews users.
    Admin,
    /// Views events and (eventually) responds to them.
    Volunteer,
    /// Reports disasters affecting them.
    Victim,
}

impl Role {
    /// All roles, in the order they are offered at registration.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Volunteer, Role::Victim];

    /// The persisted and displayed label for this role.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Volunteer => "Volunteer",
            Self::Victim => "Victim",
        }
    }

    /// Whether this role may add disaster events.
    #[must_use]
    pub fn can_report(self) -> bool {
        matches!(self, Self::Admin | Self::Victim)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = CodecError;

    /// Parse a role label. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.label() == s)
            .ok_or_else(|| CodecError::UnknownRole(s.to_string()))
    }
}

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique login identifier.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Contact email, expected to be unique.
    pub email: String,
    /// Password, stored verbatim.
    pub password: String,
    /// The role this user registered with.
    pub role: Role,
}

impl User {
    /// Create a new user.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Whether the given credentials match this user exactly.
    #[must_use]
    pub fn matches_credentials(&self, user_id: &str, password: &str) -> bool {
        self.user_id == user_id && self.password == password
    }
}

/// One-line summary used by the admin user listing. The password is never shown.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Email: {}, Role: {}",
            self.user_id, self.name, self.email, self.role
        )
    }
}

/// A reported incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisasterEvent {
    /// Event identifier. Not guaranteed unique across files written by other tools.
    pub event_id: i64,
    /// Kind of disaster, e.g. "Flood".
    pub disaster_type: String,
    /// Where it happened.
    pub location: String,
    /// Free-text description.
    pub description: String,
}

impl DisasterEvent {
    /// Create a new disaster event.
    #[must_use]
    pub fn new(
        event_id: i64,
        disaster_type: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            event_id,
            disaster_type: disaster_type.into(),
            location: location.into(),
            description: description.into(),
        }
    }

    /// Multi-line detail block shown by the event listing.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "Event ID: {}\nDisaster Type: {}\nLocation: {}\nDescription: {}",
            self.event_id, self.disaster_type, self.location, self.description
        )
    }
}
