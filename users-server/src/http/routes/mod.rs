//! Route handlers organized by resource

pub mod service;
pub mod users;
