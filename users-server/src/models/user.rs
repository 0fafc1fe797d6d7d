//! User entity and its boundary views
//!
//! Raw payloads deserialize straight from JSON; the validated views can only
//! be obtained through [`Validate::validate`], so anything reaching the
//! repository already satisfies the field constraints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::check_length;
use super::{RelationshipStatus, ValidationError};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 15;
pub const HOBBIES_MAX_LEN: usize = 100;
/// Exclusive upper bound, mirrored by the `age < 100` check constraint
pub const AGE_LIMIT: i32 = 100;

/// Validate-and-construct from a raw request payload.
pub trait Validate: Sized {
    type Payload: DeserializeOwned;

    fn validate(payload: Self::Payload) -> Result<Self, ValidationError>;
}

/// Stored user, as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub hobbies: String,
    pub relationship_status: RelationshipStatus,
}

/// Raw body of a create request
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreatePayload {
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub hobbies: String,
    pub relationship_status: String,
}

/// Raw body of an update request; absent and null both mean "leave as is"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdatePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub hobbies: Option<String>,
    #[serde(default)]
    pub relationship_status: Option<String>,
}

/// Validated input for creating a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreate {
    name: String,
    surname: String,
    age: i32,
    hobbies: String,
    relationship_status: RelationshipStatus,
}

impl UserCreate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn hobbies(&self) -> &str {
        &self.hobbies
    }

    pub fn relationship_status(&self) -> RelationshipStatus {
        self.relationship_status
    }
}

impl Validate for UserCreate {
    type Payload = UserCreatePayload;

    /// # Example
    /// ```
    /// use users_server::models::{UserCreate, UserCreatePayload, Validate};
    ///
    /// let payload = UserCreatePayload {
    ///     name: "Jo".into(),
    ///     surname: "Ann".into(),
    ///     age: 30,
    ///     hobbies: "chess".into(),
    ///     relationship_status: "single".into(),
    /// };
    /// assert!(UserCreate::validate(payload.clone()).is_ok());
    /// assert!(UserCreate::validate(UserCreatePayload { age: 150, ..payload }).is_err());
    /// ```
    fn validate(payload: UserCreatePayload) -> Result<Self, ValidationError> {
        check_length("name", &payload.name, NAME_MIN_LEN, NAME_MAX_LEN)?;
        check_length("surname", &payload.surname, NAME_MIN_LEN, NAME_MAX_LEN)?;
        check_age(payload.age)?;
        check_length("hobbies", &payload.hobbies, 0, HOBBIES_MAX_LEN)?;
        let relationship_status = RelationshipStatus::parse(&payload.relationship_status)?;

        Ok(Self {
            name: payload.name,
            surname: payload.surname,
            age: payload.age,
            hobbies: payload.hobbies,
            relationship_status,
        })
    }
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    name: Option<String>,
    surname: Option<String>,
    age: Option<i32>,
    hobbies: Option<String>,
    relationship_status: Option<RelationshipStatus>,
}

impl UserUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.age.is_none()
            && self.hobbies.is_none()
            && self.relationship_status.is_none()
    }

    /// Overwrite the fields present in this update, leaving the rest alone.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(surname) = &self.surname {
            user.surname.clone_from(surname);
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(hobbies) = &self.hobbies {
            user.hobbies.clone_from(hobbies);
        }
        if let Some(status) = self.relationship_status {
            user.relationship_status = status;
        }
    }
}

impl Validate for UserUpdate {
    type Payload = UserUpdatePayload;

    fn validate(payload: UserUpdatePayload) -> Result<Self, ValidationError> {
        if let Some(name) = &payload.name {
            check_length("name", name, NAME_MIN_LEN, NAME_MAX_LEN)?;
        }
        if let Some(surname) = &payload.surname {
            check_length("surname", surname, NAME_MIN_LEN, NAME_MAX_LEN)?;
        }
        if let Some(age) = payload.age {
            check_age(age)?;
        }
        if let Some(hobbies) = &payload.hobbies {
            check_length("hobbies", hobbies, 0, HOBBIES_MAX_LEN)?;
        }
        let relationship_status = payload
            .relationship_status
            .as_deref()
            .map(RelationshipStatus::parse)
            .transpose()?;

        Ok(Self {
            name: payload.name,
            surname: payload.surname,
            age: payload.age,
            hobbies: payload.hobbies,
            relationship_status,
        })
    }
}

fn check_age(age: i32) -> Result<(), ValidationError> {
    if age >= AGE_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "age",
            limit: i64::from(AGE_LIMIT),
        });
    }
    Ok(())
}
