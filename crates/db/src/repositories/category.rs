//! Category repository.

use std::sync::Arc;

use crate::entities::{Category, category, location};
use crate::repositories::map_db_err;
use lokamap_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

/// Category with its published-location count, for the stats endpoint.
#[derive(Debug, Clone, FromQueryResult, serde::Serialize)]
pub struct CategoryStat {
    pub id: i64,
    pub name: String,
    pub location_count: i64,
}

/// Repository for category operations.
#[derive(Clone)]
pub struct CategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepository {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<category::Model>> {
        Category::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a category by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<category::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category: {id}")))
    }

    /// Find a category by exact name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<category::Model>> {
        Category::find()
            .filter(category::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List categories, ordered by name.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<category::Model>> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List all categories (form data for the submission page).
    pub async fn list_all(&self) -> AppResult<Vec<category::Model>> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Count all categories.
    pub async fn count(&self) -> AppResult<u64> {
        Category::find()
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// List categories with their published-location counts.
    pub async fn list_with_location_counts(&self) -> AppResult<Vec<CategoryStat>> {
        Category::find()
            .select_only()
            .column(category::Column::Id)
            .column(category::Column::Name)
            .column_as(location::Column::Id.count(), "location_count")
            .join(JoinType::LeftJoin, category::Relation::Location.def())
            .group_by(category::Column::Id)
            .group_by(category::Column::Name)
            .order_by_asc(category::Column::Name)
            .into_model::<CategoryStat>()
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a new category.
    pub async fn create(&self, model: category::ActiveModel) -> AppResult<category::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update a category.
    pub async fn update(&self, model: category::ActiveModel) -> AppResult<category::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a category. Dependent locations and requests cascade.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = Category::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Category: {id}")));
        }
        Ok(())
    }
}
