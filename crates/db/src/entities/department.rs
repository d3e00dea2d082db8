//! Department entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A department belongs to a faculty and tags locations and submissions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Department name, unique across all rows.
    #[sea_orm(unique)]
    pub name: String,

    /// Degree level offered (e.g. "S1", "D3").
    pub degree_level: String,

    /// Owning faculty.
    pub faculty_id: i64,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::FacultyId",
        to = "super::faculty::Column::Id",
        on_delete = "Cascade"
    )]
    Faculty,

    #[sea_orm(has_many = "super::location::Entity")]
    Location,

    #[sea_orm(has_many = "super::location_request::Entity")]
    LocationRequest,
}

impl Related<super::faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
