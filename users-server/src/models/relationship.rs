//! Relationship status enumeration
//!
//! Stored in a PostgreSQL enum type and transmitted as the literal string,
//! never as an ordinal.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Closed set of relationship states a user may be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "relationship_status")]
pub enum RelationshipStatus {
    #[serde(rename = "single")]
    #[sqlx(rename = "single")]
    Single,
    #[serde(rename = "in relationship")]
    #[sqlx(rename = "in relationship")]
    InRelationship,
    #[serde(rename = "married")]
    #[sqlx(rename = "married")]
    Married,
}

impl RelationshipStatus {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::Single, Self::InRelationship, Self::Married];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::InRelationship => "in relationship",
            Self::Married => "married",
        }
    }

    /// Parse the literal form, reporting the offending value on failure.
    ///
    /// # Example
    /// ```
    /// use users_server::models::RelationshipStatus;
    ///
    /// assert_eq!(
    ///     RelationshipStatus::parse("in relationship").unwrap(),
    ///     RelationshipStatus::InRelationship
    /// );
    /// assert!(RelationshipStatus::parse("Married").is_err()); // case-sensitive
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "relationship_status",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_literal() {
        for status in RelationshipStatus::ALL {
            assert_eq!(RelationshipStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn rejects_unknown_values() {
        for value in ["", "divorced", "in_relationship", "SINGLE", "1"] {
            let err = RelationshipStatus::parse(value).unwrap_err();
            assert!(matches!(
                err,
                ValidationError::InvalidVariant { field: "relationship_status", .. }
            ));
        }
    }

    #[test]
    fn serializes_as_literal() {
        let json = serde_json::to_string(&RelationshipStatus::InRelationship).unwrap();
        assert_eq!(json, r#""in relationship""#);
    }
}
