//! Create site_profile table and provision the singleton row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteProfile::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SiteProfile::AppName).string_len(255).not_null())
                    .col(ColumnDef::new(SiteProfile::Description).text().not_null())
                    .col(ColumnDef::new(SiteProfile::LogoPath).text())
                    .col(
                        ColumnDef::new(SiteProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SiteProfile::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // The profile is a singleton; the application treats a missing row as
        // a fatal configuration error, so provision it here.
        let insert = Query::insert()
            .into_table(SiteProfile::Table)
            .columns([
                SiteProfile::Id,
                SiteProfile::AppName,
                SiteProfile::Description,
            ])
            .values_panic([
                1_i64.into(),
                "Lokamap".into(),
                "Campus internship location directory".into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SiteProfile {
    Table,
    Id,
    AppName,
    Description,
    LogoPath,
    CreatedAt,
    UpdatedAt,
}
