//! Database repositories.
//!
//! Plain data access over the entities; business rules live in
//! `lokamap-core`. Every repository maps [`sea_orm::DbErr`] into
//! [`AppError`], turning unique-constraint violations into conflicts so the
//! database remains the authoritative duplicate guard.

pub mod category;
pub mod department;
pub mod faculty;
pub mod image;
pub mod location;
pub mod location_request;
pub mod site_profile;

pub use category::{CategoryRepository, CategoryStat};
pub use department::DepartmentRepository;
pub use faculty::FacultyRepository;
pub use image::ImageRepository;
pub use location::LocationRepository;
pub use location_request::LocationRequestRepository;
pub use site_profile::SiteProfileRepository;

use lokamap_common::AppError;
use sea_orm::{DbErr, SqlErr};

/// Map a database error to the application taxonomy.
///
/// Unique violations become [`AppError::Conflict`]: concurrent writers racing
/// an advisory pre-check lose here, not with a 500.
pub fn map_db_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => AppError::BadRequest(msg),
        _ => AppError::Database(err.to_string()),
    }
}
