//! API response types.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

/// A page of results with the total row count.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Empty success response.
#[must_use]
pub fn ok() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Success response for newly created resources.
pub fn created<T: Serialize>(body: T) -> impl IntoResponse {
    (StatusCode::CREATED, axum::Json(body))
}
