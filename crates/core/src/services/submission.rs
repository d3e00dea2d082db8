//! Submission intake service.

use std::sync::Arc;

use crate::services::media::{UploadedImage, validate_photo};
use lokamap_common::{AppError, AppResult, BlobStorage, generate_blob_key};
use lokamap_db::entities::{image, location_request};
use lokamap_db::repositories::{
    CategoryRepository, DepartmentRepository, LocationRepository, LocationRequestRepository,
    map_db_err,
};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use tracing::warn;
use validator::{Validate, ValidationError, ValidationErrors};

/// Indonesian mobile numbers: +62/62/0 prefix followed by an 8xx block.
static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+62|62|0)8[0-9]{7,11}$").expect("valid contact regex"));

/// Queue selector for the admin submission list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Awaiting moderation.
    #[default]
    Pending,
    /// Already promoted to a published location.
    Approved,
}

/// Fields of a location submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitLocationInput {
    /// Submitting student's full name.
    #[validate(length(min = 1, max = 255, message = "student name is required"))]
    pub student_name: String,

    /// Student identification number.
    #[validate(length(min = 1, max = 10, message = "student id must be at most 10 characters"))]
    pub student_id: String,

    /// Internship site name.
    #[validate(length(min = 1, max = 255, message = "location name is required"))]
    pub location_name: String,

    /// Free-form description of the internship.
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    /// Contact phone number.
    #[validate(regex(path = *CONTACT_RE, message = "contact must be an Indonesian mobile number"))]
    pub contact: String,

    /// Latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: f64,

    /// Longitude in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: f64,

    /// Category of the internship site.
    pub category_id: i64,

    /// Student's department.
    pub department_id: i64,
}

/// Convert boundary coordinates to the stored fixed-point representation.
pub(crate) fn to_coordinates(latitude: f64, longitude: f64) -> AppResult<(Decimal, Decimal)> {
    let lat = Decimal::from_f64_retain(latitude)
        .ok_or_else(|| AppError::validation("latitude", "numeric", "latitude is not a number"))?
        .round_dp(8);
    let long = Decimal::from_f64_retain(longitude)
        .ok_or_else(|| AppError::validation("longitude", "numeric", "longitude is not a number"))?
        .round_dp(8);
    Ok((lat, long))
}

/// Best-effort removal of blobs written before a failed row write.
pub(crate) async fn discard_blobs(storage: &dyn BlobStorage, keys: &[String]) {
    for key in keys {
        if let Err(e) = storage.delete(key).await {
            warn!(key = %key, error = %e, "Failed to remove orphaned blob");
        }
    }
}

/// Service for public location submissions.
#[derive(Clone)]
pub struct SubmissionService {
    db: Arc<DatabaseConnection>,
    request_repo: LocationRequestRepository,
    location_repo: LocationRepository,
    category_repo: CategoryRepository,
    department_repo: DepartmentRepository,
    storage: Arc<dyn BlobStorage>,
}

impl SubmissionService {
    /// Create a new submission service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        request_repo: LocationRequestRepository,
        location_repo: LocationRepository,
        category_repo: CategoryRepository,
        department_repo: DepartmentRepository,
        storage: Arc<dyn BlobStorage>,
    ) -> Self {
        Self {
            db,
            request_repo,
            location_repo,
            category_repo,
            department_repo,
            storage,
        }
    }

    /// Accept a submission: validate, store image blobs, then write the
    /// request and image rows in one transaction.
    pub async fn submit(
        &self,
        input: SubmitLocationInput,
        images: Vec<UploadedImage>,
    ) -> AppResult<location_request::Model> {
        input.validate()?;
        let (latitude, longitude) = to_coordinates(input.latitude, input.longitude)?;

        if self
            .category_repo
            .find_by_id(input.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation(
                "category_id",
                "exists",
                "selected category does not exist",
            ));
        }
        if !self.department_repo.exists(input.department_id).await? {
            return Err(AppError::validation(
                "department_id",
                "exists",
                "selected department does not exist",
            ));
        }

        // Advisory check against the published store; the unique indexes on
        // location are the authoritative guard at approval time.
        if let Some(published) = self
            .location_repo
            .find_conflicting(&input.location_name, &input.student_id)
            .await?
        {
            let mut errors = ValidationErrors::new();
            if published.location_name == input.location_name {
                let mut error = ValidationError::new("unique");
                error.message = Some("location name is already registered".into());
                errors.add("location_name".into(), error);
            }
            if published.student_id == input.student_id {
                let mut error = ValidationError::new("unique");
                error.message = Some("student id has already submitted a location".into());
                errors.add("student_id".into(), error);
            }
            return Err(AppError::Validation(errors));
        }

        if images.is_empty() {
            return Err(AppError::validation(
                "images",
                "required",
                "at least one photo is required",
            ));
        }
        for upload in &images {
            validate_photo("images", upload)?;
        }

        let mut stored_keys = Vec::with_capacity(images.len());
        for upload in &images {
            let key = generate_blob_key("submissions", &upload.file_name);
            self.storage.put(&key, &upload.data).await?;
            stored_keys.push(key);
        }

        let now = chrono::Utc::now().fixed_offset();
        let result = async {
            let txn = self.db.begin().await.map_err(map_db_err)?;

            let request = location_request::ActiveModel {
                student_name: Set(input.student_name.trim().to_string()),
                student_id: Set(input.student_id.trim().to_string()),
                location_name: Set(input.location_name.trim().to_string()),
                description: Set(input.description.trim().to_string()),
                contact: Set(input.contact.clone()),
                latitude: Set(latitude),
                longitude: Set(longitude),
                category_id: Set(input.category_id),
                department_id: Set(input.department_id),
                approved_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?;

            for key in &stored_keys {
                image::ActiveModel {
                    path: Set(key.clone()),
                    alt_text: Set(Some(request.location_name.clone())),
                    location_id: Set(None),
                    request_id: Set(Some(request.id)),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(map_db_err)?;
            }

            txn.commit().await.map_err(map_db_err)?;
            Ok(request)
        }
        .await;

        if result.is_err() {
            discard_blobs(self.storage.as_ref(), &stored_keys).await;
        }
        result
    }

    /// List the moderation queue.
    pub async fn list(&self, status: SubmissionStatus) -> AppResult<Vec<location_request::Model>> {
        match status {
            SubmissionStatus::Pending => self.request_repo.list_pending().await,
            SubmissionStatus::Approved => self.request_repo.list_approved().await,
        }
    }
}
