//! User endpoints
//!
//! | Route              | Success          | Failure               |
//! |--------------------|------------------|-----------------------|
//! | GET /users/        | 200, `[User]`    |                       |
//! | GET /users/{id}    | 200, `User`      | 404                   |
//! | POST /users/       | 201, `User`      | 400 on constraint     |
//! | PUT /users/{id}    | 200, `User`      | 404, 400 on constraint|
//! | DELETE /users/{id} | 204, empty       | 404                   |
//!
//! Bodies and ids are validated by the extractors (422) before any handler runs.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::UserRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{UserId, ValidJson};
use crate::http::server::AppState;
use crate::models::{User, UserCreate, UserUpdate};

/// GET /users/ - list all users in id order
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(users))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    UserRepo::new(&state.pool)
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::user_not_found)
}

/// POST /users/ - create a new user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(data): ValidJson<UserCreate>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = UserRepo::new(&state.pool).create(&data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id} - apply a partial update
async fn update_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
    ValidJson(data): ValidJson<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    UserRepo::new(&state.pool)
        .update(id, &data)
        .await?
        .map(Json)
        .ok_or_else(ApiError::user_not_found)
}

/// DELETE /users/{id} - delete a user
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> Result<StatusCode, ApiError> {
    if UserRepo::new(&state.pool).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::user_not_found())
    }
}

/// User routes; `/users` is accepted as an alias of `/users/`
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
