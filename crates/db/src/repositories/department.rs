//! Department repository.

use std::sync::Arc;

use crate::entities::{Department, department, faculty};
use crate::repositories::map_db_err;
use lokamap_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Repository for department operations.
#[derive(Clone)]
pub struct DepartmentRepository {
    db: Arc<DatabaseConnection>,
}

impl DepartmentRepository {
    /// Create a new department repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a department by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<department::Model>> {
        Department::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a department by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<department::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department: {id}")))
    }

    /// Find a department by exact name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<department::Model>> {
        Department::find()
            .filter(department::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Check whether a department exists.
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// List one page of departments with their owning faculty, ordered by name.
    pub async fn list_with_faculty(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<(department::Model, Option<faculty::Model>)>> {
        Department::find()
            .find_also_related(faculty::Entity)
            .order_by_asc(department::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List all departments.
    pub async fn list_all(&self) -> AppResult<Vec<department::Model>> {
        Department::find()
            .order_by_asc(department::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Count all departments.
    pub async fn count(&self) -> AppResult<u64> {
        Department::find()
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a new department.
    pub async fn create(&self, model: department::ActiveModel) -> AppResult<department::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update a department.
    pub async fn update(&self, model: department::ActiveModel) -> AppResult<department::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a department. Dependent locations and requests cascade.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = Department::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Department: {id}")));
        }
        Ok(())
    }
}
