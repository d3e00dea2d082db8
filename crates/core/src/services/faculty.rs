//! Faculty service.

use lokamap_common::{AppError, AppResult};
use lokamap_db::entities::faculty;
use lokamap_db::repositories::FacultyRepository;
use sea_orm::Set;

/// Service for faculty operations.
#[derive(Clone)]
pub struct FacultyService {
    faculty_repo: FacultyRepository,
}

impl FacultyService {
    /// Create a new faculty service.
    #[must_use]
    pub const fn new(faculty_repo: FacultyRepository) -> Self {
        Self { faculty_repo }
    }

    /// List all faculties, ordered by name.
    pub async fn list(&self) -> AppResult<Vec<faculty::Model>> {
        self.faculty_repo.list_all().await
    }

    /// List one page of faculties with the total row count.
    pub async fn list_paginated(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<faculty::Model>, u64)> {
        let total = self.faculty_repo.count().await?;
        let page = self.faculty_repo.list(limit, offset).await?;
        Ok((page, total))
    }

    /// Create a new faculty. The name must not already exist.
    pub async fn create(&self, name: String) -> AppResult<faculty::Model> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name", "required", "name is required"));
        }
        if self.faculty_repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "faculty '{name}' already exists"
            )));
        }

        let now = chrono::Utc::now().fixed_offset();
        self.faculty_repo
            .create(faculty::ActiveModel {
                name: Set(name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .await
    }

    /// Rename a faculty.
    pub async fn update(&self, id: i64, name: String) -> AppResult<faculty::Model> {
        let existing = self.faculty_repo.get_by_id(id).await?;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name", "required", "name is required"));
        }
        if let Some(other) = self.faculty_repo.find_by_name(&name).await? {
            if other.id != existing.id {
                return Err(AppError::Conflict(format!(
                    "faculty '{name}' already exists"
                )));
            }
        }

        self.faculty_repo
            .update(faculty::ActiveModel {
                id: Set(id),
                name: Set(name),
                updated_at: Set(chrono::Utc::now().fixed_offset()),
                ..Default::default()
            })
            .await
    }

    /// Delete a faculty. Its departments cascade.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.faculty_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn mock_faculty(id: i64, name: &str) -> faculty::Model {
        faculty::Model {
            id,
            name: name.to_string(),
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn test_list_returns_faculties() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_faculty(1, "Engineering")]])
                .into_connection(),
        );

        let service = FacultyService::new(FacultyRepository::new(db));
        let results = service.list().await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Engineering");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_faculty(1, "Engineering")]])
                .into_connection(),
        );

        let service = FacultyService::new(FacultyRepository::new(db));
        let result = service.create("Engineering".to_string()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
