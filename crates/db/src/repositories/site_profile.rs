//! Site profile repository (singleton).

use std::sync::Arc;

use crate::entities::{SiteProfile, site_profile, site_profile::SITE_PROFILE_ID};
use crate::repositories::map_db_err;
use lokamap_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

/// Repository for the site-profile singleton.
#[derive(Clone)]
pub struct SiteProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl SiteProfileRepository {
    /// Create a new site profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get the singleton profile row.
    ///
    /// The migration provisions the row at setup time; its absence is a
    /// fatal configuration error, not a runtime-recoverable case.
    pub async fn get(&self) -> AppResult<site_profile::Model> {
        SiteProfile::find_by_id(SITE_PROFILE_ID)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| {
                AppError::Config("site_profile row missing; run migrations".to_string())
            })
    }

    /// Update the singleton profile row.
    pub async fn update(&self, model: site_profile::ActiveModel) -> AppResult<site_profile::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }
}
