//! Faculty repository.

use std::sync::Arc;

use crate::entities::{Faculty, faculty};
use crate::repositories::map_db_err;
use lokamap_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Repository for faculty operations.
#[derive(Clone)]
pub struct FacultyRepository {
    db: Arc<DatabaseConnection>,
}

impl FacultyRepository {
    /// Create a new faculty repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a faculty by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<faculty::Model>> {
        Faculty::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a faculty by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<faculty::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty: {id}")))
    }

    /// Find a faculty by exact name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<faculty::Model>> {
        Faculty::find()
            .filter(faculty::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List faculties, ordered by name.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<faculty::Model>> {
        Faculty::find()
            .order_by_asc(faculty::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List all faculties.
    pub async fn list_all(&self) -> AppResult<Vec<faculty::Model>> {
        Faculty::find()
            .order_by_asc(faculty::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Count all faculties.
    pub async fn count(&self) -> AppResult<u64> {
        Faculty::find()
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a new faculty.
    pub async fn create(&self, model: faculty::ActiveModel) -> AppResult<faculty::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update a faculty.
    pub async fn update(&self, model: faculty::ActiveModel) -> AppResult<faculty::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a faculty. Dependent departments cascade, and transitively
    /// their locations and requests.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = Faculty::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Faculty: {id}")));
        }
        Ok(())
    }
}
