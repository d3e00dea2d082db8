//! Create location_request and location tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LocationRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LocationRequest::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::StudentName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::StudentId)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::LocationName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LocationRequest::Description).text().not_null())
                    .col(
                        ColumnDef::new(LocationRequest::Contact)
                            .string_len(15)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::Latitude)
                            .decimal_len(10, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::Longitude)
                            .decimal_len(11, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LocationRequest::ApprovedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(LocationRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(LocationRequest::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_location_request_category")
                            .from(LocationRequest::Table, LocationRequest::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_location_request_department")
                            .from(LocationRequest::Table, LocationRequest::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Moderation queues filter on approval state.
        manager
            .create_index(
                Index::create()
                    .name("idx_location_request_approved_at")
                    .table(LocationRequest::Table)
                    .col(LocationRequest::ApprovedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Location::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Location::StudentName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Location::StudentId)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Location::LocationName)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Location::Description).text().not_null())
                    .col(ColumnDef::new(Location::Contact).string_len(15).not_null())
                    .col(
                        ColumnDef::new(Location::Latitude)
                            .decimal_len(10, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Location::Longitude)
                            .decimal_len(11, 8)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Location::CategoryId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Location::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Location::ApprovedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Location::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Location::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Location::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_location_category")
                            .from(Location::Table, Location::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_location_department")
                            .from(Location::Table, Location::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The public map reads approved, non-deleted rows.
        manager
            .create_index(
                Index::create()
                    .name("idx_location_approved_at")
                    .table(Location::Table)
                    .col(Location::ApprovedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_location_deleted_at")
                    .table(Location::Table)
                    .col(Location::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Location::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LocationRequest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LocationRequest {
    Table,
    Id,
    StudentName,
    StudentId,
    LocationName,
    Description,
    Contact,
    Latitude,
    Longitude,
    CategoryId,
    DepartmentId,
    ApprovedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Location {
    Table,
    Id,
    StudentName,
    StudentId,
    LocationName,
    Description,
    Contact,
    Latitude,
    Longitude,
    CategoryId,
    DepartmentId,
    ApprovedAt,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
}

#[derive(Iden)]
enum Department {
    Table,
    Id,
}
