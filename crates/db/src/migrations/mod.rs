//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_reference_tables;
mod m20250601_000002_create_location_tables;
mod m20250601_000003_create_image_table;
mod m20250601_000004_create_site_profile_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_reference_tables::Migration),
            Box::new(m20250601_000002_create_location_tables::Migration),
            Box::new(m20250601_000003_create_image_table::Migration),
            Box::new(m20250601_000004_create_site_profile_table::Migration),
        ]
    }
}
