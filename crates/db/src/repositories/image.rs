//! Image repository.

use std::sync::Arc;

use crate::entities::{Image, image};
use crate::repositories::map_db_err;
use lokamap_common::AppResult;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Repository for image rows.
#[derive(Clone)]
pub struct ImageRepository {
    db: Arc<DatabaseConnection>,
}

impl ImageRepository {
    /// Create a new image repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find images attached to any of the given locations.
    pub async fn find_by_location_ids(&self, ids: &[i64]) -> AppResult<Vec<image::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Image::find()
            .filter(image::Column::LocationId.is_in(ids.to_vec()))
            .order_by_asc(image::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find images attached to a single location.
    pub async fn find_by_location(&self, location_id: i64) -> AppResult<Vec<image::Model>> {
        self.find_by_location_ids(&[location_id]).await
    }

    /// Find images attached to a pending request.
    pub async fn find_by_request(&self, request_id: i64) -> AppResult<Vec<image::Model>> {
        Image::find()
            .filter(image::Column::RequestId.eq(request_id))
            .order_by_asc(image::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}
