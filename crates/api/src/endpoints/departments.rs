//! Department endpoints (moderator only).

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use lokamap_common::AppResult;
use lokamap_core::DepartmentInput;
use lokamap_db::entities::{department, faculty};
use serde::Serialize;
use tracing::info;

use crate::endpoints::locations::PaginationQuery;
use crate::extractors::AuthModerator;
use crate::middleware::AppState;
use crate::response::{Paginated, created, ok};

/// Create department router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments))
        .route("/", post(create_department))
        .route("/{id}", put(update_department))
        .route("/{id}", delete(delete_department))
}

/// Department response with its faculty label.
#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub degree_level: String,
    pub faculty_id: i64,
    pub faculty_name: Option<String>,
}

impl DepartmentResponse {
    fn from_pair(department: department::Model, faculty: Option<faculty::Model>) -> Self {
        Self {
            id: department.id,
            name: department.name,
            degree_level: department.degree_level,
            faculty_id: department.faculty_id,
            faculty_name: faculty.map(|f| f.name),
        }
    }
}

impl From<department::Model> for DepartmentResponse {
    fn from(department: department::Model) -> Self {
        Self::from_pair(department, None)
    }
}

/// One page of departments with faculty labels and the total count.
async fn list_departments(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Paginated<DepartmentResponse>>> {
    let (departments, total) = state
        .department_service
        .list_paginated(query.limit, query.offset)
        .await?;
    Ok(Json(Paginated {
        items: departments
            .into_iter()
            .map(|(d, f)| DepartmentResponse::from_pair(d, f))
            .collect(),
        total,
    }))
}

/// Create a department.
async fn create_department(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Json(input): Json<DepartmentInput>,
) -> AppResult<impl axum::response::IntoResponse> {
    let department = state.department_service.create(input).await?;
    info!(department_id = department.id, "Department created");
    Ok(created(DepartmentResponse::from(department)))
}

/// Update a department.
async fn update_department(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<DepartmentInput>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = state.department_service.update(id, input).await?;
    Ok(Json(DepartmentResponse::from(department)))
}

/// Delete a department.
async fn delete_department(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.department_service.delete(id).await?;
    info!(department_id = id, "Department deleted");
    Ok(ok())
}
