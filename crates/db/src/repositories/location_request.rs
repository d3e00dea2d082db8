//! Location request repository.

use std::sync::Arc;

use crate::entities::{LocationRequest, location_request};
use crate::repositories::map_db_err;
use lokamap_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Repository for submission (location request) operations.
///
/// The promotion path does not live here: marking a request approved is part
/// of the moderation transaction and uses a conditional update there.
#[derive(Clone)]
pub struct LocationRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl LocationRequestRepository {
    /// Create a new location request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<location_request::Model>> {
        LocationRequest::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a request by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<location_request::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("LocationRequest: {id}")))
    }

    /// List pending requests, newest first.
    pub async fn list_pending(&self) -> AppResult<Vec<location_request::Model>> {
        LocationRequest::find()
            .filter(location_request::Column::ApprovedAt.is_null())
            .order_by_desc(location_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List approved requests, newest first.
    pub async fn list_approved(&self) -> AppResult<Vec<location_request::Model>> {
        LocationRequest::find()
            .filter(location_request::Column::ApprovedAt.is_not_null())
            .order_by_desc(location_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a new request.
    pub async fn create(
        &self,
        model: location_request::ActiveModel,
    ) -> AppResult<location_request::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a request only while it is still pending. Attached image rows
    /// cascade. Returns the number of rows removed; zero means the request
    /// was missing or approved in the meantime.
    pub async fn delete_pending(&self, id: i64) -> AppResult<u64> {
        let res = LocationRequest::delete_many()
            .filter(location_request::Column::Id.eq(id))
            .filter(location_request::Column::ApprovedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected)
    }
}
