//! API middleware.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use lokamap_common::LinkSigner;
use lokamap_core::{
    CategoryService, DepartmentService, FacultyService, LocationService, ModerationService,
    ProfileService, SubmissionService,
};

use crate::extractors::Moderator;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub category_service: CategoryService,
    pub faculty_service: FacultyService,
    pub department_service: DepartmentService,
    pub location_service: LocationService,
    pub submission_service: SubmissionService,
    pub moderation_service: ModerationService,
    pub profile_service: ProfileService,
    pub signer: LinkSigner,
    pub moderator_token: String,
}

/// Bearer-token check for the moderator routes.
///
/// A constant secret compared against the `Authorization` header; on match a
/// [`Moderator`] marker lands in the request extensions for the extractor.
pub async fn require_moderator(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if !state.moderator_token.is_empty() && token == state.moderator_token => {
            req.extensions_mut().insert(Moderator);
            next.run(req).await
        }
        _ => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    }
}
