//! Faculty endpoints (moderator only).

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use lokamap_common::AppResult;
use lokamap_db::entities::faculty;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::endpoints::locations::PaginationQuery;
use crate::extractors::AuthModerator;
use crate::middleware::AppState;
use crate::response::{Paginated, created, ok};

/// Create faculty router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faculties))
        .route("/", post(create_faculty))
        .route("/{id}", put(update_faculty))
        .route("/{id}", delete(delete_faculty))
}

/// Faculty response.
#[derive(Debug, Serialize)]
pub struct FacultyResponse {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<faculty::Model> for FacultyResponse {
    fn from(faculty: faculty::Model) -> Self {
        Self {
            id: faculty.id,
            name: faculty.name,
            created_at: faculty.created_at,
            updated_at: faculty.updated_at,
        }
    }
}

/// Name payload for create and rename.
#[derive(Debug, Deserialize)]
pub struct FacultyInput {
    pub name: String,
}

/// One page of faculties with the total count.
async fn list_faculties(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Paginated<FacultyResponse>>> {
    let (faculties, total) = state
        .faculty_service
        .list_paginated(query.limit, query.offset)
        .await?;
    Ok(Json(Paginated {
        items: faculties.into_iter().map(FacultyResponse::from).collect(),
        total,
    }))
}

/// Create a faculty.
async fn create_faculty(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Json(input): Json<FacultyInput>,
) -> AppResult<impl axum::response::IntoResponse> {
    let faculty = state.faculty_service.create(input.name).await?;
    info!(faculty_id = faculty.id, "Faculty created");
    Ok(created(FacultyResponse::from(faculty)))
}

/// Rename a faculty.
async fn update_faculty(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<FacultyInput>,
) -> AppResult<Json<FacultyResponse>> {
    let faculty = state.faculty_service.update(id, input.name).await?;
    Ok(Json(FacultyResponse::from(faculty)))
}

/// Delete a faculty; its departments cascade.
async fn delete_faculty(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.faculty_service.delete(id).await?;
    info!(faculty_id = id, "Faculty deleted");
    Ok(ok())
}
