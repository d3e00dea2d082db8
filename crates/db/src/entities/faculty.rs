//! Faculty entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A faculty owns departments.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faculty")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Faculty name, unique across all rows.
    #[sea_orm(unique)]
    pub name: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::department::Entity")]
    Department,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
