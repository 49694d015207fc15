//! Line-oriented text codec for persisted records.
//!
//! Every record is stored as one line of comma-separated fields:
//!
//! ```text
//! users.txt      user_id,name,email,password,role
//! disasters.txt  event_id,disaster_type,location,description
//! ```
//!
//! The format has no quoting or escaping. A field containing a comma or a
//! line break cannot be represented, so encoding such a field fails with
//! [`CodecError::ForbiddenCharacter`] and decoding a line with the wrong
//! number of fields fails with [`CodecError::FieldCount`]. Decoding applies
//! the same field check as encoding, so every record that loads can be saved
//! again. Empty fields, including a trailing one, are preserved.

use thiserror::Error;

use crate::record::{DisasterEvent, Role, User};

/// The field separator.
pub const DELIMITER: char = ',';

/// Errors produced while encoding or decoding a record line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The line split into the wrong number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Number of fields the record kind requires.
        expected: usize,
        /// Number of fields present on the line.
        found: usize,
    },

    /// The event id field is not a decimal integer.
    #[error("invalid event id '{0}'")]
    InvalidId(String),

    /// The role field is not one of the known role labels.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// A field holds a character the format cannot represent.
    #[error("field '{field}' must not contain commas or line breaks")]
    ForbiddenCharacter {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// A record that round-trips through a single delimited line.
pub trait LineRecord: Sized {
    /// Human-readable name of the record kind, used in logs.
    const KIND: &'static str;

    /// Number of fields on a line.
    const FIELD_COUNT: usize;

    /// Encode the record as one line, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ForbiddenCharacter`] if a field cannot be
    /// represented.
    fn to_line(&self) -> Result<String, CodecError>;

    /// Decode a record from one line, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the line has the wrong shape or a field is invalid.
    fn from_line(line: &str) -> Result<Self, CodecError>;
}

/// Check that a free-text field can be stored in the line format.
///
/// # Errors
///
/// Returns [`CodecError::ForbiddenCharacter`] naming `field` when `value`
/// contains the delimiter or a line break.
pub fn check_field(field: &'static str, value: &str) -> Result<(), CodecError> {
    if value.contains([DELIMITER, '\n', '\r']) {
        Err(CodecError::ForbiddenCharacter { field })
    } else {
        Ok(())
    }
}

/// Split a line into exactly `expected` fields.
fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, CodecError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() == expected {
        Ok(fields)
    } else {
        Err(CodecError::FieldCount {
            expected,
            found: fields.len(),
        })
    }
}

impl LineRecord for User {
    const KIND: &'static str = "user";
    const FIELD_COUNT: usize = 5;

    fn to_line(&self) -> Result<String, CodecError> {
        check_field("user id", &self.user_id)?;
        check_field("name", &self.name)?;
        check_field("email", &self.email)?;
        check_field("password", &self.password)?;
        Ok(format!(
            "{},{},{},{},{}",
            self.user_id, self.name, self.email, self.password, self.role
        ))
    }

    fn from_line(line: &str) -> Result<Self, CodecError> {
        let fields = split_fields(line, Self::FIELD_COUNT)?;
        check_field("user id", fields[0])?;
        check_field("name", fields[1])?;
        check_field("email", fields[2])?;
        check_field("password", fields[3])?;
        let role: Role = fields[4].parse()?;
        Ok(User::new(fields[0], fields[1], fields[2], fields[3], role))
    }
}

impl LineRecord for DisasterEvent {
    const KIND: &'static str = "disaster event";
    const FIELD_COUNT: usize = 4;

    fn to_line(&self) -> Result<String, CodecError> {
        check_field("disaster type", &self.disaster_type)?;
        check_field("location", &self.location)?;
        check_field("description", &self.description)?;
        Ok(format!(
            "{},{},{},{}",
            self.event_id, self.disaster_type, self.location, self.description
        ))
    }

    fn from_line(line: &str) -> Result<Self, CodecError> {
        let fields = split_fields(line, Self::FIELD_COUNT)?;
        let event_id = fields[0]
            .parse::<i64>()
            .map_err(|_| CodecError::InvalidId(fields[0].to_string()))?;
        check_field("disaster type", fields[1])?;
        check_field("location", fields[2])?;
        check_field("description", fields[3])?;
        Ok(DisasterEvent::new(event_id, fields[1], fields[2], fields[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_user_to_line() {
        let user = User::new("u1", "Alice", "a@x.com", "pw", Role::Admin);
        assert_eq!(user.to_line().unwrap(), "u1,Alice,a@x.com,pw,Admin");
    }

    #[test]
    fn test_user_from_line() {
        let user = User::from_line("u2,Bob,b@x.com,hunter2,Volunteer").unwrap();
        assert_eq!(
            user,
            User::new("u2", "Bob", "b@x.com", "hunter2", Role::Volunteer)
        );
    }

    #[test]
    fn test_user_from_line_unknown_role() {
        let err = User::from_line("u3,Carol,c@x.com,pw,Manager").unwrap_err();
        assert_eq!(err, CodecError::UnknownRole("Manager".to_string()));
    }

    #[test]
    fn test_user_from_line_wrong_field_count() {
        assert_eq!(
            User::from_line("u1,Alice,a@x.com,Admin").unwrap_err(),
            CodecError::FieldCount {
                expected: 5,
                found: 4
            }
        );
        assert_eq!(
            User::from_line("u1,Alice,Smith,a@x.com,pw,Admin").unwrap_err(),
            CodecError::FieldCount {
                expected: 5,
                found: 6
            }
        );
    }

    #[test]
    fn test_user_with_comma_is_rejected_on_encode() {
        let user = User::new("u1", "Smith, Alice", "a@x.com", "pw", Role::Victim);
        assert_eq!(
            user.to_line().unwrap_err(),
            CodecError::ForbiddenCharacter { field: "name" }
        );
    }

    #[test]
    fn test_event_to_line() {
        let event = DisasterEvent::new(42, "Flood", "Riverside", "Heavy flooding");
        assert_eq!(event.to_line().unwrap(), "42,Flood,Riverside,Heavy flooding");
    }

    #[test]
    fn test_event_from_line_invalid_id() {
        assert_eq!(
            DisasterEvent::from_line("abc,Fire,Hills,Spreading").unwrap_err(),
            CodecError::InvalidId("abc".to_string())
        );
        assert!(DisasterEvent::from_line(",Fire,Hills,Spreading").is_err());
    }

    #[test]
    fn test_event_preserves_trailing_empty_field() {
        let event = DisasterEvent::from_line("5,Storm,Coast,").unwrap();
        assert_eq!(event.description, "");
        assert_eq!(event.to_line().unwrap(), "5,Storm,Coast,");
    }

    #[test]
    fn test_event_negative_id_round_trips() {
        let event = DisasterEvent::from_line("-3,Quake,City,Aftershocks").unwrap();
        assert_eq!(event.event_id, -3);
    }

    #[test]
    fn test_event_with_newline_is_rejected_on_encode() {
        let event = DisasterEvent::new(1, "Flood", "Riverside", "line one\nline two");
        assert_eq!(
            event.to_line().unwrap_err(),
            CodecError::ForbiddenCharacter {
                field: "description"
            }
        );
    }

    #[test]
    fn test_user_from_line_rejects_carriage_return() {
        assert_eq!(
            User::from_line("u1,Al\rice,a@x.com,pw,Admin").unwrap_err(),
            CodecError::ForbiddenCharacter { field: "name" }
        );
    }

    #[test]
    fn test_event_from_line_rejects_carriage_return() {
        assert_eq!(
            DisasterEvent::from_line("7,Flood,River\rside,Rising").unwrap_err(),
            CodecError::ForbiddenCharacter { field: "location" }
        );
    }

    #[test]
    fn test_check_field() {
        assert!(check_field("name", "Alice").is_ok());
        assert!(check_field("name", "").is_ok());
        assert!(check_field("name", "a,b").is_err());
        assert!(check_field("name", "a\rb").is_err());
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::FieldCount {
            expected: 4,
            found: 2,
        };
        assert_eq!(err.to_string(), "expected 4 fields, found 2");
        assert_eq!(
            CodecError::UnknownRole("Boss".to_string()).to_string(),
            "unknown role 'Boss'"
        );
    }

    fn field() -> impl Strategy<Value = String> {
        "[^,\r\n]{0,24}"
    }

    /// Fields that may carry a stray carriage return.
    fn loose_field() -> impl Strategy<Value = String> {
        "[a-z\r ]{0,6}"
    }

    fn role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Admin), Just(Role::Volunteer), Just(Role::Victim)]
    }

    proptest! {
        #[test]
        fn prop_user_round_trip(
            id in field(),
            name in field(),
            email in field(),
            password in field(),
            role in role(),
        ) {
            let user = User::new(id, name, email, password, role);
            let line = user.to_line().unwrap();
            prop_assert_eq!(User::from_line(&line).unwrap(), user);
        }

        #[test]
        fn prop_event_round_trip(
            event_id in any::<i64>(),
            disaster_type in field(),
            location in field(),
            description in field(),
        ) {
            let event = DisasterEvent::new(event_id, disaster_type, location, description);
            let line = event.to_line().unwrap();
            prop_assert_eq!(DisasterEvent::from_line(&line).unwrap(), event);
        }

        #[test]
        fn prop_decoded_user_encodes_to_same_line(
            id in loose_field(),
            name in loose_field(),
            email in loose_field(),
            password in loose_field(),
            role in "Admin|Volunteer|Victim|[a-z]{0,5}",
        ) {
            let line = format!("{id},{name},{email},{password},{role}");
            if let Ok(user) = User::from_line(&line) {
                prop_assert_eq!(user.to_line().unwrap(), line);
            }
        }

        #[test]
        fn prop_decoded_event_encodes(
            event_id in "-?[0-9]{1,4}|[a-z]{1,3}",
            disaster_type in loose_field(),
            location in loose_field(),
            description in loose_field(),
        ) {
            let line = format!("{event_id},{disaster_type},{location},{description}");
            if let Ok(event) = DisasterEvent::from_line(&line) {
                prop_assert!(event.to_line().is_ok());
            }
        }

        #[test]
        fn prop_comma_in_field_never_encodes(
            prefix in field(),
            suffix in field(),
        ) {
            let user = User::new("u1", format!("{prefix},{suffix}"), "e", "p", Role::Admin);
            prop_assert!(user.to_line().is_err());
        }
    }
}
