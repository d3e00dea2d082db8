//! Site profile entity (singleton).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site-wide profile surfaced on every page.
///
/// Exactly one row exists at all times; the migration provisions it and
/// updates replace it in place.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,

    /// Application name shown in the frontend header.
    pub app_name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Blob storage key of the current logo.
    #[sea_orm(column_type = "Text", nullable)]
    pub logo_path: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fixed primary key of the singleton row.
pub const SITE_PROFILE_ID: i64 = 1;
