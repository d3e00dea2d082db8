//! Category endpoints (moderator only).

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use lokamap_common::AppResult;
use lokamap_db::entities::category;
use lokamap_db::repositories::CategoryStat;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::endpoints::locations::PaginationQuery;
use crate::extractors::AuthModerator;
use crate::middleware::AppState;
use crate::response::{Paginated, created, ok};

/// Create category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/stats", get(category_stats))
        .route("/{id}", put(update_category))
        .route("/{id}", delete(delete_category))
}

/// Category response.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<category::Model> for CategoryResponse {
    fn from(category: category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Name payload for create and rename.
#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

/// One page of categories with the total count.
async fn list_categories(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Paginated<CategoryResponse>>> {
    let (categories, total) = state
        .category_service
        .list_paginated(query.limit, query.offset)
        .await?;
    Ok(Json(Paginated {
        items: categories.into_iter().map(CategoryResponse::from).collect(),
        total,
    }))
}

/// Categories with their published-location counts.
async fn category_stats(
    _moderator: AuthModerator,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryStat>>> {
    let stats = state.category_service.stats().await?;
    Ok(Json(stats))
}

/// Create a category.
async fn create_category(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl axum::response::IntoResponse> {
    let category = state.category_service.create(input.name).await?;
    info!(category_id = category.id, "Category created");
    Ok(created(CategoryResponse::from(category)))
}

/// Rename a category.
async fn update_category(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.category_service.update(id, input.name).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// Delete a category and everything under it.
async fn delete_category(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.category_service.delete(id).await?;
    info!(category_id = id, "Category deleted");
    Ok(ok())
}
