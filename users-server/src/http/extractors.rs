//! Custom Axum extractors
//!
//! Validation happens here, so handler bodies only ever see valid input.

use std::num::IntErrorKind;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::models::{Validate, ValidationError};

/// Extract a JSON body and validate it into `T`
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T::Payload>::from_request(req, state).await?;
        Ok(Self(T::validate(payload)?))
    }
}

/// Extract a numeric user id from path
///
/// Text that is not an integer is a validation error. An integer outside the
/// id column's range names no row, so it is reported as not found without a
/// query.
pub struct UserId(pub i32);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_id())?;

        match id.parse::<i32>() {
            Ok(id) => Ok(Self(id)),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Err(ApiError::user_not_found())
            }
            Err(_) => Err(invalid_id()),
        }
    }
}

fn invalid_id() -> ApiError {
    ApiError::Validation(ValidationError::InvalidFormat {
        field: "id",
        reason: "must be an integer",
    })
}
