//! Shared helpers for database-backed tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p users-server -- --ignored

#![allow(dead_code)]

use sqlx::PgPool;
use users_server::db::{self, migrations, PoolSettings};
use users_server::models::{UserCreate, UserCreatePayload, UserUpdate, UserUpdatePayload, Validate};

/// Connect to `DATABASE_URL` and make sure the schema exists.
pub async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = db::create_pool_with_options(&url, PoolSettings::with_max_connections(2))
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    pool
}

pub fn create_payload() -> UserCreatePayload {
    UserCreatePayload {
        name: "Jo".into(),
        surname: "Ann".into(),
        age: 30,
        hobbies: "chess".into(),
        relationship_status: "single".into(),
    }
}

pub fn new_user() -> UserCreate {
    UserCreate::validate(create_payload()).expect("valid payload")
}

pub fn update(payload: UserUpdatePayload) -> UserUpdate {
    UserUpdate::validate(payload).expect("valid update")
}

/// An id no row can have: identity columns start at 1.
pub const MISSING_ID: i32 = -1;
