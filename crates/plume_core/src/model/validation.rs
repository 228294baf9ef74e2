//! Field-level validation results.
//!
//! # Responsibility
//! - Represent validation failures as values tagged by field name.
//! - Host the pure display-name rule shared by model and services.
//!
//! # Invariants
//! - Validation never panics and never touches storage.
//! - An empty `ValidationErrors` means the record is valid.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Display name rejected by account validation.
pub const RESERVED_DISPLAY_NAME: &str = "bad_man";

/// Field tag used for display-name failures.
pub const DISPLAY_NAME_FIELD: &str = "displayName";

/// Field tag used for identifier failures.
pub const IDENTIFIER_FIELD: &str = "identifier";

/// Field tag used for content owner failures.
pub const OWNER_FIELD: &str = "ownerId";

const INVALID_DISPLAY_NAME_MESSAGE: &str = "Invalid username";

/// One failed rule attached to a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collected validation failures for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure for `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns `true` when no rule failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns messages recorded for one field, in insertion order.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message.as_str())
            .collect()
    }

    /// Appends every failure from `other`.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Converts into `Err(self)` when any rule failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no validation errors");
        }
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

impl Error for ValidationErrors {}

/// Checks a display name against the reserved value.
///
/// Exact, case-sensitive comparison. No trimming or normalization.
pub fn validate_display_name(name: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if name == RESERVED_DISPLAY_NAME {
        errors.add(DISPLAY_NAME_FIELD, INVALID_DISPLAY_NAME_MESSAGE);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::{validate_display_name, ValidationErrors, DISPLAY_NAME_FIELD};

    #[test]
    fn reserved_name_is_tagged_on_display_name() {
        let result = validate_display_name("bad_man");
        assert!(!result.is_valid());
        assert_eq!(
            result.messages_for(DISPLAY_NAME_FIELD),
            vec!["Invalid username"]
        );
    }

    #[test]
    fn comparison_is_exact() {
        for name in ["Bad_Man", " bad_man", "bad_man ", "bad_mania", "", "ünïcødé"] {
            assert!(validate_display_name(name).is_valid(), "{name:?} should pass");
        }
    }

    #[test]
    fn into_result_reflects_state() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("title", "too long");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "validation failed: title: too long");
    }
}
