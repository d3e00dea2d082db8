//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

/// Marker inserted into request extensions by the auth middleware once the
/// bearer token has been verified.
#[derive(Debug, Clone, Copy)]
pub struct Moderator;

/// Authenticated moderator extractor.
#[derive(Debug, Clone, Copy)]
pub struct AuthModerator;

impl<S> FromRequestParts<S> for AuthModerator
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Moderator>()
            .map(|_| Self)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}
