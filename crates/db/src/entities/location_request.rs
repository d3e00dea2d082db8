//! Location request entity (unapproved submission).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student-submitted candidate location awaiting moderation.
///
/// `approved_at` is null while the request is pending. Once set it is an
/// immutable publication marker; rejected requests are deleted outright.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub student_name: String,

    /// Student identification number, at most 10 characters.
    #[sea_orm(column_type = "String(StringLen::N(10))")]
    pub student_id: String,

    pub location_name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Local mobile number.
    #[sea_orm(column_type = "String(StringLen::N(15))")]
    pub contact: String,

    #[sea_orm(column_type = "Decimal(Some((10, 8)))")]
    pub latitude: Decimal,

    #[sea_orm(column_type = "Decimal(Some((11, 8)))")]
    pub longitude: Decimal,

    pub category_id: i64,

    pub department_id: i64,

    /// Set exactly once, when the request is promoted.
    #[sea_orm(nullable)]
    pub approved_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "Cascade"
    )]
    Department,

    #[sea_orm(has_many = "super::image::Entity")]
    Image,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
