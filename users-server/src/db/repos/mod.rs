//! Repository implementations for database access
//!
//! Repositories borrow the shared pool and hold no state of their own;
//! construct one per request.

pub mod users;

pub use users::{DbError, UserRepo};
