//! Create image table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Image::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Image::Path).text().not_null())
                    .col(ColumnDef::new(Image::AltText).text())
                    .col(ColumnDef::new(Image::LocationId).big_integer())
                    .col(ColumnDef::new(Image::RequestId).big_integer())
                    .col(
                        ColumnDef::new(Image::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_location")
                            .from(Image::Table, Image::LocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_location_request")
                            .from(Image::Table, Image::RequestId)
                            .to(LocationRequest::Table, LocationRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_image_location_id")
                    .table(Image::Table)
                    .col(Image::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_image_request_id")
                    .table(Image::Table)
                    .col(Image::RequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Image::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Image {
    Table,
    Id,
    Path,
    AltText,
    LocationId,
    RequestId,
    CreatedAt,
}

#[derive(Iden)]
enum Location {
    Table,
    Id,
}

#[derive(Iden)]
enum LocationRequest {
    Table,
    Id,
}
