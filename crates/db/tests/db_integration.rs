//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `lokamap_test`)
//!   `TEST_DB_PASSWORD` (default: `lokamap_test`)
//!   `TEST_DB_NAME` (default: `lokamap_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use lokamap_db::entities::{category, department, faculty, location, location_request};
use lokamap_db::repositories::{
    CategoryRepository, DepartmentRepository, FacultyRepository, LocationRepository,
    LocationRequestRepository,
};
use lokamap_db::test_utils::{TestDatabase, TestDbConfig};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue::Set, Related};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_cleanup() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    let result = db.cleanup().await;
    assert!(result.is_ok(), "Cleanup failed: {:?}", result.err());
}

#[test]
fn test_request_entity_joins_to_its_references() {
    // Every FK on location_request must be navigable for joined queries.
    let _ = <location_request::Entity as Related<category::Entity>>::to();
    let _ = <location_request::Entity as Related<department::Entity>>::to();
    let _ = <location_request::Entity as Related<lokamap_db::entities::image::Entity>>::to();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_category_create_and_duplicate_conflict() {
    let db = TestDatabase::create_unique().await.unwrap();
    let repo = CategoryRepository::new(db.connection());

    let created = repo
        .create(category::ActiveModel {
            name: Set("Software House".to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Software House");

    let duplicate = repo
        .create(category::ActiveModel {
            name: Set("Software House".to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(lokamap_common::AppError::Conflict(_))
    ));

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_faculty_cascade_deletes_departments() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();
    let faculties = FacultyRepository::new(Arc::clone(&conn));
    let departments = DepartmentRepository::new(Arc::clone(&conn));

    let faculty = faculties
        .create(faculty::ActiveModel {
            name: Set("Engineering".to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let dept = departments
        .create(department::ActiveModel {
            name: Set("Informatics".to_string()),
            degree_level: Set("S1".to_string()),
            faculty_id: Set(faculty.id),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .await
        .unwrap();

    faculties.delete(faculty.id).await.unwrap();

    let remaining = departments.find_by_id(dept.id).await.unwrap();
    assert!(remaining.is_none(), "department should cascade on delete");

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_request_and_published_location_queries() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();
    let categories = CategoryRepository::new(Arc::clone(&conn));
    let faculties = FacultyRepository::new(Arc::clone(&conn));
    let departments = DepartmentRepository::new(Arc::clone(&conn));
    let requests = LocationRequestRepository::new(Arc::clone(&conn));
    let locations = LocationRepository::new(Arc::clone(&conn));

    let now = Utc::now().fixed_offset();
    let category = categories
        .create(category::ActiveModel {
            name: Set("Startup".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await
        .unwrap();
    let faculty = faculties
        .create(faculty::ActiveModel {
            name: Set("Computer Science".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await
        .unwrap();
    let department = departments
        .create(department::ActiveModel {
            name: Set("Information Systems".to_string()),
            degree_level: Set("S1".to_string()),
            faculty_id: Set(faculty.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await
        .unwrap();

    let request = requests
        .create(location_request::ActiveModel {
            student_name: Set("Budi Santoso".to_string()),
            student_id: Set("2110512034".to_string()),
            location_name: Set("PT Maju Jaya".to_string()),
            description: Set("Backend internship".to_string()),
            contact: Set("081234567890".to_string()),
            latitude: Set(Decimal::new(-620_151_234, 8)),
            longitude: Set(Decimal::new(10_681_512_345, 8)),
            category_id: Set(category.id),
            department_id: Set(department.id),
            approved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await
        .unwrap();

    let pending = requests.list_pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, request.id);

    // Pending requests are not published locations.
    let public = locations.list_public().await.unwrap();
    assert!(public.is_empty());

    let published = locations
        .create(location::ActiveModel {
            student_name: Set(request.student_name.clone()),
            student_id: Set(request.student_id.clone()),
            location_name: Set(request.location_name.clone()),
            description: Set(request.description.clone()),
            contact: Set(request.contact.clone()),
            latitude: Set(request.latitude),
            longitude: Set(request.longitude),
            category_id: Set(request.category_id),
            department_id: Set(request.department_id),
            approved_at: Set(Some(now)),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await
        .unwrap();

    let public = locations.list_public().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, published.id);

    let conflict = locations
        .find_conflicting(&request.location_name, &request.student_id)
        .await
        .unwrap();
    assert!(conflict.is_some());

    db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
