//! Site profile endpoints (moderator only).

use axum::extract::{Multipart, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use lokamap_common::{AppError, AppResult};
use lokamap_core::{UpdateProfileInput, UploadedImage};
use serde::Serialize;
use tracing::info;

use crate::extractors::AuthModerator;
use crate::middleware::AppState;

/// Create profile router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/", patch(update_profile))
}

/// Site profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub app_name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Current site profile.
async fn get_profile(
    _moderator: AuthModerator,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state.profile_service.get().await?;
    let logo_url = state.profile_service.logo_url().await?;
    Ok(Json(ProfileResponse {
        app_name: profile.app_name,
        description: profile.description,
        logo_url,
        updated_at: profile.updated_at,
    }))
}

/// Update the site profile; multipart so the logo can ride along.
async fn update_profile(
    _moderator: AuthModerator,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProfileResponse>> {
    let mut app_name = None;
    let mut description = None;
    let mut logo: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "app_name" => {
                app_name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "description" => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "logo" => {
                let file_name = field.file_name().unwrap_or("logo").to_string();
                let content_type = field.content_type().map(std::string::ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                logo = Some(UploadedImage {
                    data,
                    file_name,
                    content_type,
                });
            }
            _ => {}
        }
    }

    let input = UpdateProfileInput {
        app_name: app_name
            .ok_or_else(|| AppError::validation("app_name", "required", "app name is required"))?,
        description: description.ok_or_else(|| {
            AppError::validation("description", "required", "description is required")
        })?,
    };

    let profile = state.profile_service.update(input, logo).await?;
    let logo_url = state.profile_service.logo_url().await?;
    info!("Site profile updated");

    Ok(Json(ProfileResponse {
        app_name: profile.app_name,
        description: profile.description,
        logo_url,
        updated_at: profile.updated_at,
    }))
}
