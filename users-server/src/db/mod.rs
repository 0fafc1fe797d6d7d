//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - Bounded connection pool, no Arc<Mutex<Connection>>
//! - Rely on DB constraints as the final authority on writes
//! - One transaction per write, rolled back on any failure

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, PoolSettings};
pub use repos::*;
