//! Image entity (uploaded site photo).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An uploaded image attached to a published location or a pending request.
///
/// Exactly one of `location_id` / `request_id` is set. Promotion re-points
/// the row from the request to the new location; the blob itself is never
/// copied.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Blob storage key.
    #[sea_orm(column_type = "Text")]
    pub path: String,

    /// Alt text for accessibility.
    #[sea_orm(column_type = "Text", nullable)]
    pub alt_text: Option<String>,

    /// Owning published location, if promoted or staff-created.
    #[sea_orm(nullable)]
    pub location_id: Option<i64>,

    /// Owning pending request, if still in the intake queue.
    #[sea_orm(nullable)]
    pub request_id: Option<i64>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_delete = "Cascade"
    )]
    Location,

    #[sea_orm(
        belongs_to = "super::location_request::Entity",
        from = "Column::RequestId",
        to = "super::location_request::Column::Id",
        on_delete = "Cascade"
    )]
    LocationRequest,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::location_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
