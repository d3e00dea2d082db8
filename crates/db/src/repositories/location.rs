//! Location repository.

use std::sync::Arc;

use crate::entities::{Location, location};
use crate::repositories::map_db_err;
use lokamap_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Repository for published-location operations.
#[derive(Clone)]
pub struct LocationRepository {
    db: Arc<DatabaseConnection>,
}

impl LocationRepository {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a non-deleted location by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<location::Model>> {
        Location::find_by_id(id)
            .filter(location::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a non-deleted location by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<location::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location: {id}")))
    }

    /// List approved, non-deleted locations for the public map.
    pub async fn list_public(&self) -> AppResult<Vec<location::Model>> {
        Location::find()
            .filter(location::Column::ApprovedAt.is_not_null())
            .filter(location::Column::DeletedAt.is_null())
            .order_by_desc(location::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List non-deleted locations for moderation, newest first.
    pub async fn list_admin(&self, limit: u64, offset: u64) -> AppResult<Vec<location::Model>> {
        Location::find()
            .filter(location::Column::DeletedAt.is_null())
            .order_by_desc(location::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Count non-deleted locations.
    pub async fn count_admin(&self) -> AppResult<u64> {
        Location::find()
            .filter(location::Column::DeletedAt.is_null())
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find a published row colliding with the given location name or
    /// student id. Soft-deleted rows participate: the unique indexes still
    /// cover them.
    pub async fn find_conflicting(
        &self,
        location_name: &str,
        student_id: &str,
    ) -> AppResult<Option<location::Model>> {
        Location::find()
            .filter(
                Condition::any()
                    .add(location::Column::LocationName.eq(location_name))
                    .add(location::Column::StudentId.eq(student_id)),
            )
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a new location.
    pub async fn create(&self, model: location::ActiveModel) -> AppResult<location::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update a location.
    pub async fn update(&self, model: location::ActiveModel) -> AppResult<location::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }
}
