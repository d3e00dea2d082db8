//! Submission endpoints: signed public intake and the moderation queue.

use axum::extract::{Multipart, Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use lokamap_common::{AppError, AppResult, SignedQuery};
use lokamap_core::{SubmissionStatus, SubmitLocationInput, UploadedImage};
use lokamap_db::entities::location_request;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extractors::AuthModerator;
use crate::middleware::AppState;
use crate::response::{created, ok};

/// Public submission routes. The form-data route is guarded by the link
/// signature, not by authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", get(form_data))
        .route("/", post(submit))
}

/// Moderator submission routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions))
        .route("/{id}/approve", post(approve_submission))
        .route("/{id}", delete(reject_submission))
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DepartmentOption {
    pub id: i64,
    pub name: String,
    pub degree_level: String,
}

#[derive(Debug, Serialize)]
pub struct FacultyWithDepartments {
    pub id: i64,
    pub name: String,
    pub departments: Vec<DepartmentOption>,
}

/// Reference data for the submission form.
#[derive(Debug, Serialize)]
pub struct SubmissionFormData {
    pub categories: Vec<CategoryOption>,
    pub faculties: Vec<FacultyWithDepartments>,
}

/// Submission-form data, reachable only through a valid signed link.
async fn form_data(
    State(state): State<AppState>,
    Query(query): Query<SignedQuery>,
) -> AppResult<Json<SubmissionFormData>> {
    state
        .signer
        .verify("/api/submissions/new", &query, chrono::Utc::now())?;

    let categories = state
        .category_service
        .list()
        .await?
        .into_iter()
        .map(|c| CategoryOption {
            id: c.id,
            name: c.name,
        })
        .collect();

    let departments = state.department_service.list_plain().await?;
    let faculties = state
        .faculty_service
        .list()
        .await?
        .into_iter()
        .map(|f| FacultyWithDepartments {
            departments: departments
                .iter()
                .filter(|d| d.faculty_id == f.id)
                .map(|d| DepartmentOption {
                    id: d.id,
                    name: d.name.clone(),
                    degree_level: d.degree_level.clone(),
                })
                .collect(),
            id: f.id,
            name: f.name,
        })
        .collect();

    Ok(Json(SubmissionFormData {
        categories,
        faculties,
    }))
}

/// Parse the shared multipart shape of submissions and staff-created
/// locations: text fields plus one or more `images` parts.
pub(crate) async fn parse_submission_multipart(
    mut multipart: Multipart,
) -> AppResult<(SubmitLocationInput, Vec<UploadedImage>)> {
    let mut student_name = None;
    let mut student_id = None;
    let mut location_name = None;
    let mut description = None;
    let mut contact = None;
    let mut latitude = None;
    let mut longitude = None;
    let mut category_id = None;
    let mut department_id = None;
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "images" || name == "images[]" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(std::string::ToString::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();
            images.push(UploadedImage {
                data,
                file_name,
                content_type,
            });
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match name.as_str() {
            "student_name" => student_name = Some(text),
            "student_id" => student_id = Some(text),
            "location_name" => location_name = Some(text),
            "description" => description = Some(text),
            "contact" => contact = Some(text),
            "latitude" => {
                latitude = Some(text.parse::<f64>().map_err(|_| {
                    AppError::validation("latitude", "numeric", "latitude must be a number")
                })?);
            }
            "longitude" => {
                longitude = Some(text.parse::<f64>().map_err(|_| {
                    AppError::validation("longitude", "numeric", "longitude must be a number")
                })?);
            }
            "category_id" => {
                category_id = Some(text.parse::<i64>().map_err(|_| {
                    AppError::validation("category_id", "numeric", "category id must be a number")
                })?);
            }
            "department_id" => {
                department_id = Some(text.parse::<i64>().map_err(|_| {
                    AppError::validation(
                        "department_id",
                        "numeric",
                        "department id must be a number",
                    )
                })?);
            }
            _ => {}
        }
    }

    let require = |field: &'static str| AppError::validation(field, "required", "field is required");

    let input = SubmitLocationInput {
        student_name: student_name.ok_or_else(|| require("student_name"))?,
        student_id: student_id.ok_or_else(|| require("student_id"))?,
        location_name: location_name.ok_or_else(|| require("location_name"))?,
        description: description.ok_or_else(|| require("description"))?,
        contact: contact.ok_or_else(|| require("contact"))?,
        latitude: latitude.ok_or_else(|| require("latitude"))?,
        longitude: longitude.ok_or_else(|| require("longitude"))?,
        category_id: category_id.ok_or_else(|| require("category_id"))?,
        department_id: department_id.ok_or_else(|| require("department_id"))?,
    };

    Ok((input, images))
}

/// Submitted location view for the moderation queue.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub student_name: String,
    pub student_id: String,
    pub location_name: String,
    pub description: String,
    pub contact: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category_id: i64,
    pub department_id: i64,
    pub approved_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<location_request::Model> for SubmissionResponse {
    fn from(request: location_request::Model) -> Self {
        Self {
            id: request.id,
            student_name: request.student_name,
            student_id: request.student_id,
            location_name: request.location_name,
            description: request.description,
            contact: request.contact,
            latitude: request.latitude.to_f64().unwrap_or_default(),
            longitude: request.longitude.to_f64().unwrap_or_default(),
            category_id: request.category_id,
            department_id: request.department_id,
            approved_at: request.approved_at,
            created_at: request.created_at,
        }
    }
}

/// Accept a public submission.
async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl axum::response::IntoResponse> {
    let (input, images) = parse_submission_multipart(multipart).await?;
    let request = state.submission_service.submit(input, images).await?;
    info!(request_id = request.id, "Submission received");
    Ok(created(SubmissionResponse::from(request)))
}

/// Queue filter query.
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    #[serde(default)]
    pub status: SubmissionStatus,
}

/// Moderation queue, newest first.
async fn list_submissions(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<Vec<SubmissionResponse>>> {
    let submissions = state.submission_service.list(query.status).await?;
    Ok(Json(
        submissions.into_iter().map(SubmissionResponse::from).collect(),
    ))
}

/// Promote a submission to a published location.
async fn approve_submission(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    let location = state.moderation_service.approve(id).await?;
    Ok(created(location))
}

/// Reject and delete a submission.
async fn reject_submission(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.moderation_service.reject(id).await?;
    Ok(ok())
}
