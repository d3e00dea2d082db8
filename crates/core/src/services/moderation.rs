//! Moderation workflow: promote or reject pending submissions.

use std::sync::Arc;

use crate::services::submission::discard_blobs;
use lokamap_common::{AppError, AppResult, BlobStorage};
use lokamap_db::entities::{Image, LocationRequest, image, location, location_request};
use lokamap_db::repositories::{ImageRepository, LocationRequestRepository, map_db_err};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::info;

/// Service for approving and rejecting location submissions.
#[derive(Clone)]
pub struct ModerationService {
    db: Arc<DatabaseConnection>,
    request_repo: LocationRequestRepository,
    image_repo: ImageRepository,
    storage: Arc<dyn BlobStorage>,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        request_repo: LocationRequestRepository,
        image_repo: ImageRepository,
        storage: Arc<dyn BlobStorage>,
    ) -> Self {
        Self {
            db,
            request_repo,
            image_repo,
            storage,
        }
    }

    /// Promote a pending submission to a published location.
    ///
    /// Runs in one transaction: the location row is inserted, the
    /// submission's image rows are re-pointed at it, and the request is
    /// marked approved with a conditional update. Zero affected rows means a
    /// concurrent approval already won; the transaction rolls back and the
    /// call fails with `Conflict`, so exactly one location row ever exists.
    pub async fn approve(&self, request_id: i64) -> AppResult<location::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let request = LocationRequest::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| AppError::NotFound(format!("LocationRequest: {request_id}")))?;

        if request.approved_at.is_some() {
            return Err(AppError::Conflict(format!(
                "submission {request_id} is already approved"
            )));
        }

        let now = chrono::Utc::now().fixed_offset();
        let published = location::ActiveModel {
            student_name: Set(request.student_name),
            student_id: Set(request.student_id),
            location_name: Set(request.location_name),
            description: Set(request.description),
            contact: Set(request.contact),
            latitude: Set(request.latitude),
            longitude: Set(request.longitude),
            category_id: Set(request.category_id),
            department_id: Set(request.department_id),
            approved_at: Set(Some(now)),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        // Promotion moves the image rows; the blobs are shared, not copied.
        Image::update_many()
            .col_expr(image::Column::LocationId, Expr::value(Some(published.id)))
            .col_expr(image::Column::RequestId, Expr::value(Option::<i64>::None))
            .filter(image::Column::RequestId.eq(request_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let marked = LocationRequest::update_many()
            .col_expr(
                location_request::Column::ApprovedAt,
                Expr::value(Some(now)),
            )
            .col_expr(location_request::Column::UpdatedAt, Expr::value(now))
            .filter(location_request::Column::Id.eq(request_id))
            .filter(location_request::Column::ApprovedAt.is_null())
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if marked.rows_affected == 0 {
            return Err(AppError::Conflict(format!(
                "submission {request_id} was approved concurrently"
            )));
        }

        txn.commit().await.map_err(map_db_err)?;
        info!(request_id, location_id = published.id, "Submission approved");
        Ok(published)
    }

    /// Reject a pending submission: delete the row (image rows cascade),
    /// then remove the blobs best-effort.
    ///
    /// The delete is conditional on the request still being pending, so a
    /// concurrent approval cannot have its request erased from under it.
    pub async fn reject(&self, request_id: i64) -> AppResult<()> {
        let request = self.request_repo.get_by_id(request_id).await?;
        if request.approved_at.is_some() {
            return Err(AppError::Conflict(format!(
                "submission {request_id} is already approved"
            )));
        }

        let blob_keys: Vec<String> = self
            .image_repo
            .find_by_request(request_id)
            .await?
            .into_iter()
            .map(|img| img.path)
            .collect();

        if self.request_repo.delete_pending(request_id).await? == 0 {
            return Err(AppError::Conflict(format!(
                "submission {request_id} was approved concurrently"
            )));
        }
        discard_blobs(self.storage.as_ref(), &blob_keys).await;

        info!(request_id, "Submission rejected");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn mock_request(id: i64, approved: bool) -> location_request::Model {
        let now = Utc::now().fixed_offset();
        location_request::Model {
            id,
            student_name: "Budi Santoso".to_string(),
            student_id: "2110512034".to_string(),
            location_name: "PT Maju Jaya".to_string(),
            description: "Backend internship".to_string(),
            contact: "081234567890".to_string(),
            latitude: Decimal::new(-620_150_000, 8),
            longitude: Decimal::new(10_681_660_000, 8),
            category_id: 1,
            department_id: 1,
            approved_at: approved.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> ModerationService {
        let db = Arc::new(db);
        ModerationService::new(
            Arc::clone(&db),
            LocationRequestRepository::new(Arc::clone(&db)),
            ImageRepository::new(Arc::clone(&db)),
            Arc::new(lokamap_common::LocalStorage::new(
                "/tmp/lokamap-test".into(),
                "/storage".to_string(),
            )),
        )
    }

    #[tokio::test]
    async fn test_approve_missing_request_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<location_request::Model>::new()])
            .into_connection();

        let result = service(db).approve(42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_approve_already_approved_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_request(1, true)]])
            .into_connection();

        let result = service(db).approve(1).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_reject_already_approved_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_request(1, true)]])
            .into_connection();

        let result = service(db).reject(1).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_reject_deletes_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_request(1, false)]])
            .append_query_results([Vec::<image::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let result = service(db).reject(1).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reject_losing_race_to_approval_is_conflict() {
        // Pending at read time, but approved before the delete runs: the
        // conditional delete touches no rows and the blobs stay.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_request(1, false)]])
            .append_query_results([Vec::<image::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = service(db).reject(1).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
