//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod relationship;
pub mod user;
pub mod validation;

pub use relationship::RelationshipStatus;
pub use user::{User, UserCreate, UserCreatePayload, UserUpdate, UserUpdatePayload, Validate};
pub use validation::ValidationError;
