//! Caller identity extraction.
//!
//! Authentication happens upstream; the gateway forwards the verified user
//! id in `x-user-id` and, for staff, `x-user-role: admin`. Handlers take
//! `Actor` when identity is required and `Option<Actor>` when it is not.

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{HeaderMap, HeaderName, request::Parts},
};
use uuid::Uuid;

use crate::core::Actor;
use crate::errors::ApiError;

pub static X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");
pub static X_USER_ROLE: HeaderName = HeaderName::from_static("x-user-role");

/// `Ok(None)` when no identity was sent; a present but malformed id is an
/// error rather than an anonymous request.
fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Actor>, ApiError> {
    let Some(raw) = headers.get(&X_USER_ID) else {
        return Ok(None);
    };
    let user_id = raw
        .to_str()
        .ok()
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or_else(|| ApiError::unauthorized("Invalid user identity"))?;
    let is_admin = headers
        .get(&X_USER_ROLE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|role| role.trim().eq_ignore_ascii_case("admin"));
    Ok(Some(Actor { user_id, is_admin }))
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers)?
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

impl<S> OptionalFromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        actor_from_headers(&parts.headers)
    }
}
