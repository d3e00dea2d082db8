//! Category service.

use lokamap_common::{AppError, AppResult};
use lokamap_db::entities::category;
use lokamap_db::repositories::{CategoryRepository, CategoryStat};
use sea_orm::Set;

/// Service for category operations.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository) -> Self {
        Self { category_repo }
    }

    /// List all categories, ordered by name.
    pub async fn list(&self) -> AppResult<Vec<category::Model>> {
        self.category_repo.list_all().await
    }

    /// List one page of categories with the total row count.
    pub async fn list_paginated(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<category::Model>, u64)> {
        let total = self.category_repo.count().await?;
        let page = self.category_repo.list(limit, offset).await?;
        Ok((page, total))
    }

    /// List categories with their published-location counts.
    pub async fn stats(&self) -> AppResult<Vec<CategoryStat>> {
        self.category_repo.list_with_location_counts().await
    }

    /// Create a new category. The name must not already exist.
    pub async fn create(&self, name: String) -> AppResult<category::Model> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name", "required", "name is required"));
        }
        if self.category_repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "category '{name}' already exists"
            )));
        }

        let now = chrono::Utc::now().fixed_offset();
        self.category_repo
            .create(category::ActiveModel {
                name: Set(name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .await
    }

    /// Rename a category.
    pub async fn update(&self, id: i64, name: String) -> AppResult<category::Model> {
        let existing = self.category_repo.get_by_id(id).await?;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name", "required", "name is required"));
        }
        if let Some(other) = self.category_repo.find_by_name(&name).await? {
            if other.id != existing.id {
                return Err(AppError::Conflict(format!(
                    "category '{name}' already exists"
                )));
            }
        }

        self.category_repo
            .update(category::ActiveModel {
                id: Set(id),
                name: Set(name),
                updated_at: Set(chrono::Utc::now().fixed_offset()),
                ..Default::default()
            })
            .await
    }

    /// Delete a category. Published locations and pending submissions in the
    /// category are removed by the cascade.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.category_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn mock_category(id: i64, name: &str) -> category::Model {
        category::Model {
            id,
            name: name.to_string(),
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn test_list_returns_categories() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    mock_category(1, "Software House"),
                    mock_category(2, "Startup"),
                ]])
                .into_connection(),
        );

        let service = CategoryService::new(CategoryRepository::new(db));
        let results = service.list().await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Software House");
    }

    #[tokio::test]
    async fn test_list_paginated_returns_page_and_total() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .append_query_results([[mock_category(1, "Software House")]])
                .into_connection(),
        );

        let service = CategoryService::new(CategoryRepository::new(db));
        let (page, total) = service.list_paginated(1, 0).await.unwrap();

        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Software House");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_category(1, "Startup")]])
                .into_connection(),
        );

        let service = CategoryService::new(CategoryRepository::new(db));
        let result = service.create("Startup".to_string()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = CategoryService::new(CategoryRepository::new(db));
        let result = service.create("   ".to_string()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<category::Model>::new()])
                .into_connection(),
        );

        let service = CategoryService::new(CategoryRepository::new(db));
        let result = service.update(42, "Renamed".to_string()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let service = CategoryService::new(CategoryRepository::new(db));
        let result = service.delete(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
