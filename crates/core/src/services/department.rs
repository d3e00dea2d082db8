//! Department service.

use lokamap_common::{AppError, AppResult};
use lokamap_db::entities::{department, faculty};
use lokamap_db::repositories::{DepartmentRepository, FacultyRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating or updating a department.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DepartmentInput {
    /// Department name.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    /// Degree level offered (e.g. "S1", "D3").
    #[validate(length(min = 1, max = 50, message = "degree level must be 1-50 characters"))]
    pub degree_level: String,
    /// Owning faculty.
    pub faculty_id: i64,
}

/// Service for department operations.
#[derive(Clone)]
pub struct DepartmentService {
    department_repo: DepartmentRepository,
    faculty_repo: FacultyRepository,
}

impl DepartmentService {
    /// Create a new department service.
    #[must_use]
    pub const fn new(department_repo: DepartmentRepository, faculty_repo: FacultyRepository) -> Self {
        Self {
            department_repo,
            faculty_repo,
        }
    }

    /// List one page of departments with their faculties and the total count.
    pub async fn list_paginated(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<(department::Model, Option<faculty::Model>)>, u64)> {
        let total = self.department_repo.count().await?;
        let page = self.department_repo.list_with_faculty(limit, offset).await?;
        Ok((page, total))
    }

    /// List all departments without the faculty join (form data).
    pub async fn list_plain(&self) -> AppResult<Vec<department::Model>> {
        self.department_repo.list_all().await
    }

    /// Create a new department under an existing faculty.
    pub async fn create(&self, input: DepartmentInput) -> AppResult<department::Model> {
        input.validate()?;

        if self.faculty_repo.find_by_id(input.faculty_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "faculty {} does not exist",
                input.faculty_id
            )));
        }
        if self
            .department_repo
            .find_by_name(input.name.trim())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "department '{}' already exists",
                input.name.trim()
            )));
        }

        let now = chrono::Utc::now().fixed_offset();
        self.department_repo
            .create(department::ActiveModel {
                name: Set(input.name.trim().to_string()),
                degree_level: Set(input.degree_level.trim().to_string()),
                faculty_id: Set(input.faculty_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .await
    }

    /// Update a department.
    pub async fn update(&self, id: i64, input: DepartmentInput) -> AppResult<department::Model> {
        input.validate()?;

        let existing = self.department_repo.get_by_id(id).await?;
        if self.faculty_repo.find_by_id(input.faculty_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "faculty {} does not exist",
                input.faculty_id
            )));
        }
        if let Some(other) = self.department_repo.find_by_name(input.name.trim()).await? {
            if other.id != existing.id {
                return Err(AppError::Conflict(format!(
                    "department '{}' already exists",
                    input.name.trim()
                )));
            }
        }

        self.department_repo
            .update(department::ActiveModel {
                id: Set(id),
                name: Set(input.name.trim().to_string()),
                degree_level: Set(input.degree_level.trim().to_string()),
                faculty_id: Set(input.faculty_id),
                updated_at: Set(chrono::Utc::now().fixed_offset()),
                ..Default::default()
            })
            .await
    }

    /// Delete a department. Locations and submissions tagged with it cascade.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.department_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn mock_faculty(id: i64) -> faculty::Model {
        faculty::Model {
            id,
            name: "Engineering".to_string(),
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_faculty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<faculty::Model>::new()])
                .into_connection(),
        );

        let service = DepartmentService::new(
            DepartmentRepository::new(Arc::clone(&db)),
            FacultyRepository::new(db),
        );
        let result = service
            .create(DepartmentInput {
                name: "Informatics".to_string(),
                degree_level: "S1".to_string(),
                faculty_id: 99,
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = DepartmentService::new(
            DepartmentRepository::new(Arc::clone(&db)),
            FacultyRepository::new(db),
        );
        let result = service
            .create(DepartmentInput {
                name: String::new(),
                degree_level: "S1".to_string(),
                faculty_id: 1,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let dept = department::Model {
            id: 1,
            name: "Informatics".to_string(),
            degree_level: "S1".to_string(),
            faculty_id: 1,
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_faculty(1)]])
                .append_query_results([[dept]])
                .into_connection(),
        );

        let service = DepartmentService::new(
            DepartmentRepository::new(Arc::clone(&db)),
            FacultyRepository::new(db),
        );
        let result = service
            .create(DepartmentInput {
                name: "Informatics".to_string(),
                degree_level: "S1".to_string(),
                faculty_id: 1,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
