//! Location endpoints: public map data and the moderator surface.

use axum::extract::{Multipart, Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use lokamap_common::AppResult;
use lokamap_core::{LocationDetail, LocationSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::endpoints::submissions::parse_submission_multipart;
use crate::extractors::AuthModerator;
use crate::middleware::AppState;
use crate::response::{Paginated, created, ok};

/// Public location routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(public_list))
        .route("/{id}", get(detail))
}

/// Moderator location routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_list))
        .route("/", post(create_location))
        .route("/generate-link", post(generate_link))
        .route("/{id}/approve", post(approve_location))
        .route("/{id}", delete(delete_location))
}

/// All approved locations for the public map.
async fn public_list(State(state): State<AppState>) -> AppResult<Json<Vec<LocationSummary>>> {
    let locations = state.location_service.public_list().await?;
    Ok(Json(locations))
}

/// Full detail for one published location.
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LocationDetail>> {
    let location = state.location_service.detail(id).await?;
    Ok(Json(location))
}

/// Pagination query.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    50
}

/// All non-deleted locations for the admin table.
async fn admin_list(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Paginated<LocationDetail>>> {
    let (items, total) = state
        .location_service
        .admin_list(query.limit, query.offset)
        .await?;
    Ok(Json(Paginated { items, total }))
}

/// Staff-created location, published immediately.
async fn create_location(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl axum::response::IntoResponse> {
    let (input, images) = parse_submission_multipart(multipart).await?;
    let location = state.location_service.create_direct(input, images).await?;
    info!(location_id = location.id, "Location created by moderator");
    Ok(created(location))
}

/// Signed submission link response.
#[derive(Debug, Serialize)]
pub struct GeneratedLink {
    pub url: String,
}

/// Generate a signed submission link, valid for the configured TTL.
async fn generate_link(
    _moderator: AuthModerator,
    State(state): State<AppState>,
) -> AppResult<Json<GeneratedLink>> {
    let url = state
        .signer
        .generate("/api/submissions/new", chrono::Utc::now());
    Ok(Json(GeneratedLink { url }))
}

/// Refresh the approval timestamp on a location.
async fn approve_location(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.location_service.approve(id).await?;
    Ok(ok())
}

/// Soft-delete a location.
async fn delete_location(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.location_service.delete(id).await?;
    info!(location_id = id, "Location deleted");
    Ok(ok())
}
