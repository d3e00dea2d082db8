//! Category entity (internship site classification).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A category groups published locations and pending submissions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Category name, unique across all rows.
    #[sea_orm(unique)]
    pub name: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::location::Entity")]
    Location,

    #[sea_orm(has_many = "super::location_request::Entity")]
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
