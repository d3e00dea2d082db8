//! Site profile service with an in-process cache.

use std::sync::Arc;

use crate::services::media::{UploadedImage, validate_logo};
use lokamap_common::{AppResult, BlobStorage, generate_blob_key};
use lokamap_db::entities::site_profile;
use lokamap_db::entities::site_profile::SITE_PROFILE_ID;
use lokamap_db::repositories::SiteProfileRepository;
use sea_orm::Set;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::warn;
use validator::Validate;

/// Input for updating the site profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileInput {
    /// Application name shown in the frontend header.
    #[validate(length(min = 1, max = 255, message = "app name is required"))]
    pub app_name: String,

    /// Site description.
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

/// Service for the site-profile singleton.
///
/// The row changes rarely and is read on every page, so reads are served
/// from a cache behind a `RwLock` after the first hit. Updates refresh the
/// cache synchronously before returning.
#[derive(Clone)]
pub struct ProfileService {
    profile_repo: SiteProfileRepository,
    storage: Arc<dyn BlobStorage>,
    cache: Arc<RwLock<Option<site_profile::Model>>>,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub fn new(profile_repo: SiteProfileRepository, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            profile_repo,
            storage,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the site profile, from cache when warm.
    pub async fn get(&self) -> AppResult<site_profile::Model> {
        if let Some(cached) = self.cache.read().await.clone() {
            return Ok(cached);
        }

        let profile = self.profile_repo.get().await?;
        *self.cache.write().await = Some(profile.clone());
        Ok(profile)
    }

    /// Public URL of the current logo, if one is set.
    pub async fn logo_url(&self) -> AppResult<Option<String>> {
        let profile = self.get().await?;
        Ok(profile.logo_path.map(|path| self.storage.public_url(&path)))
    }

    /// Update the profile, optionally replacing the logo.
    pub async fn update(
        &self,
        input: UpdateProfileInput,
        logo: Option<UploadedImage>,
    ) -> AppResult<site_profile::Model> {
        input.validate()?;
        let current = self.profile_repo.get().await?;

        let mut new_logo_path: Option<String> = None;
        if let Some(upload) = &logo {
            validate_logo("logo", upload)?;

            // The old blob goes first; a stale file is worse than a brief
            // window with no logo.
            if let Some(old_path) = &current.logo_path {
                if let Err(e) = self.storage.delete(old_path).await {
                    warn!(path = %old_path, error = %e, "Failed to remove previous logo");
                }
            }

            let key = generate_blob_key("profile", &upload.file_name);
            self.storage.put(&key, &upload.data).await?;
            new_logo_path = Some(key);
        }

        let mut model = site_profile::ActiveModel {
            id: Set(SITE_PROFILE_ID),
            app_name: Set(input.app_name.trim().to_string()),
            description: Set(input.description.trim().to_string()),
            updated_at: Set(Some(chrono::Utc::now().fixed_offset())),
            ..Default::default()
        };
        if let Some(path) = &new_logo_path {
            model.logo_path = Set(Some(path.clone()));
        }

        let updated = match self.profile_repo.update(model).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(path) = &new_logo_path {
                    if let Err(del) = self.storage.delete(path).await {
                        warn!(path = %path, error = %del, "Failed to roll back new logo blob");
                    }
                }
                return Err(e);
            }
        };

        *self.cache.write().await = Some(updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lokamap_common::{AppError, LocalStorage};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn mock_profile(app_name: &str) -> site_profile::Model {
        site_profile::Model {
            id: SITE_PROFILE_ID,
            app_name: app_name.to_string(),
            description: "Campus internship directory".to_string(),
            logo_path: None,
            created_at: Utc::now().fixed_offset(),
            updated_at: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> ProfileService {
        ProfileService::new(
            SiteProfileRepository::new(Arc::new(db)),
            Arc::new(LocalStorage::new(
                "/tmp/lokamap-test".into(),
                "/storage".to_string(),
            )),
        )
    }

    #[tokio::test]
    async fn test_get_caches_after_first_read() {
        // Only one query result queued: the second get must hit the cache.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_profile("Lokamap")]])
            .into_connection();

        let service = service(db);
        let first = service.get().await.unwrap();
        let second = service.get().await.unwrap();

        assert_eq!(first.app_name, "Lokamap");
        assert_eq!(second.app_name, "Lokamap");
    }

    #[tokio::test]
    async fn test_missing_row_is_config_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<site_profile::Model>::new()])
            .into_connection();

        let result = service(db).get().await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db)
            .update(
                UpdateProfileInput {
                    app_name: String::new(),
                    description: "desc".to_string(),
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_refreshes_cache() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_profile("Lokamap")]])
            .append_query_results([[mock_profile("Lokamap Renamed")]])
            .into_connection();

        let service = service(db);
        let updated = service
            .update(
                UpdateProfileInput {
                    app_name: "Lokamap Renamed".to_string(),
                    description: "Campus internship directory".to_string(),
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.app_name, "Lokamap Renamed");

        // No more queued results; this read must come from the cache.
        let cached = service.get().await.unwrap();
        assert_eq!(cached.app_name, "Lokamap Renamed");
    }
}
