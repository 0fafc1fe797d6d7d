//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is shorter than its minimum length
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric field is not below its exclusive upper bound
    OutOfRange { field: &'static str, limit: i64 },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Value could not be parsed at all (e.g. a non-numeric path id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidVariant { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::OutOfRange { field, limit } => {
                write!(f, "{} must be less than {}", field, limit)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check that `value` has between `min` and `max` characters (inclusive).
///
/// Length is counted in characters, not bytes, so "Jörg" is four long.
pub(crate) fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 15,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 15 characters"
        );

        let err = ValidationError::OutOfRange {
            field: "age",
            limit: 100,
        };
        assert_eq!(err.to_string(), "age must be less than 100");
    }

    #[test]
    fn field_accessor() {
        let err = ValidationError::InvalidVariant {
            field: "relationship_status",
            value: "complicated".into(),
        };
        assert_eq!(err.field(), "relationship_status");
    }

    #[test]
    fn length_counts_characters() {
        assert!(check_length("name", "Jö", 2, 15).is_ok());
        assert_eq!(
            check_length("name", "J", 2, 15),
            Err(ValidationError::TooShort { field: "name", min: 2 })
        );
        assert_eq!(
            check_length("name", &"ж".repeat(16), 2, 15),
            Err(ValidationError::TooLong { field: "name", max: 15 })
        );
    }
}
