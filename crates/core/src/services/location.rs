//! Published location service.

use std::collections::HashMap;
use std::sync::Arc;

use crate::services::media::{UploadedImage, validate_photo};
use crate::services::submission::{SubmitLocationInput, discard_blobs, to_coordinates};
use lokamap_common::{AppError, AppResult, BlobStorage, generate_blob_key};
use lokamap_db::entities::{image, location};
use lokamap_db::repositories::{
    CategoryRepository, DepartmentRepository, FacultyRepository, ImageRepository,
    LocationRepository, map_db_err,
};
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::Serialize;
use validator::Validate;

/// Map-facing view of a published location.
#[derive(Debug, Clone, Serialize)]
pub struct LocationSummary {
    pub id: i64,
    pub name: String,
    pub category_name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Full view of a published location.
#[derive(Debug, Clone, Serialize)]
pub struct LocationDetail {
    pub id: i64,
    pub student_name: String,
    pub student_id: String,
    pub location_name: String,
    pub description: String,
    pub contact: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category_name: String,
    pub department_name: String,
    pub faculty_name: String,
    pub approved_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub image_urls: Vec<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Service for published location records.
#[derive(Clone)]
pub struct LocationService {
    db: Arc<DatabaseConnection>,
    location_repo: LocationRepository,
    image_repo: ImageRepository,
    category_repo: CategoryRepository,
    department_repo: DepartmentRepository,
    faculty_repo: FacultyRepository,
    storage: Arc<dyn BlobStorage>,
}

impl LocationService {
    /// Create a new location service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        location_repo: LocationRepository,
        image_repo: ImageRepository,
        category_repo: CategoryRepository,
        department_repo: DepartmentRepository,
        faculty_repo: FacultyRepository,
        storage: Arc<dyn BlobStorage>,
    ) -> Self {
        Self {
            db,
            location_repo,
            image_repo,
            category_repo,
            department_repo,
            faculty_repo,
            storage,
        }
    }

    /// Approved, non-deleted locations for the public map.
    pub async fn public_list(&self) -> AppResult<Vec<LocationSummary>> {
        let locations = self.location_repo.list_public().await?;
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let category_names: HashMap<i64, String> = self
            .category_repo
            .list_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let ids: Vec<i64> = locations.iter().map(|l| l.id).collect();
        let mut first_image: HashMap<i64, String> = HashMap::new();
        for img in self.image_repo.find_by_location_ids(&ids).await? {
            if let Some(location_id) = img.location_id {
                first_image
                    .entry(location_id)
                    .or_insert_with(|| self.storage.public_url(&img.path));
            }
        }

        Ok(locations
            .into_iter()
            .map(|l| LocationSummary {
                id: l.id,
                name: l.location_name,
                category_name: category_names.get(&l.category_id).cloned().unwrap_or_default(),
                description: l.description,
                latitude: l.latitude.to_f64().unwrap_or_default(),
                longitude: l.longitude.to_f64().unwrap_or_default(),
                image_url: first_image.remove(&l.id),
                created_at: l.created_at,
                updated_at: l.updated_at,
            })
            .collect())
    }

    /// Full record for one published location.
    pub async fn detail(&self, id: i64) -> AppResult<LocationDetail> {
        let location = self.location_repo.get_by_id(id).await?;
        if location.approved_at.is_none() {
            return Err(AppError::NotFound(format!("Location: {id}")));
        }
        self.assemble_detail(location).await
    }

    /// All non-deleted locations for the admin table, with labels and images.
    pub async fn admin_list(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<LocationDetail>, u64)> {
        let total = self.location_repo.count_admin().await?;
        let locations = self.location_repo.list_admin(limit, offset).await?;
        if locations.is_empty() {
            return Ok((Vec::new(), total));
        }

        // Batched label lookups, same shape as the public map query.
        let category_names: HashMap<i64, String> = self
            .category_repo
            .list_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let departments: HashMap<i64, (String, i64)> = self
            .department_repo
            .list_all()
            .await?
            .into_iter()
            .map(|d| (d.id, (d.name, d.faculty_id)))
            .collect();
        let faculty_names: HashMap<i64, String> = self
            .faculty_repo
            .list_all()
            .await?
            .into_iter()
            .map(|f| (f.id, f.name))
            .collect();

        let ids: Vec<i64> = locations.iter().map(|l| l.id).collect();
        let mut image_urls: HashMap<i64, Vec<String>> = HashMap::new();
        for img in self.image_repo.find_by_location_ids(&ids).await? {
            if let Some(location_id) = img.location_id {
                image_urls
                    .entry(location_id)
                    .or_default()
                    .push(self.storage.public_url(&img.path));
            }
        }

        let details = locations
            .into_iter()
            .map(|l| {
                let (department_name, faculty_id) = departments
                    .get(&l.department_id)
                    .cloned()
                    .unwrap_or_default();
                LocationDetail {
                    id: l.id,
                    student_name: l.student_name,
                    student_id: l.student_id,
                    location_name: l.location_name,
                    description: l.description,
                    contact: l.contact,
                    latitude: l.latitude.to_f64().unwrap_or_default(),
                    longitude: l.longitude.to_f64().unwrap_or_default(),
                    category_name: category_names.get(&l.category_id).cloned().unwrap_or_default(),
                    department_name,
                    faculty_name: faculty_names.get(&faculty_id).cloned().unwrap_or_default(),
                    approved_at: l.approved_at,
                    image_urls: image_urls.remove(&l.id).unwrap_or_default(),
                    created_at: l.created_at,
                    updated_at: l.updated_at,
                }
            })
            .collect();
        Ok((details, total))
    }

    /// Staff-created location, published immediately.
    pub async fn create_direct(
        &self,
        input: SubmitLocationInput,
        images: Vec<UploadedImage>,
    ) -> AppResult<location::Model> {
        input.validate()?;
        let (latitude, longitude) = to_coordinates(input.latitude, input.longitude)?;

        self.category_repo.get_by_id(input.category_id).await?;
        self.department_repo.get_by_id(input.department_id).await?;

        if self
            .location_repo
            .find_conflicting(&input.location_name, &input.student_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "a location with this name or student id already exists".to_string(),
            ));
        }

        for upload in &images {
            validate_photo("images", upload)?;
        }

        let mut stored_keys = Vec::with_capacity(images.len());
        for upload in &images {
            let key = generate_blob_key("locations", &upload.file_name);
            self.storage.put(&key, &upload.data).await?;
            stored_keys.push(key);
        }

        let now = chrono::Utc::now().fixed_offset();
        let result = async {
            let txn = self.db.begin().await.map_err(map_db_err)?;

            let created = location::ActiveModel {
                student_name: Set(input.student_name.trim().to_string()),
                student_id: Set(input.student_id.trim().to_string()),
                location_name: Set(input.location_name.trim().to_string()),
                description: Set(input.description.trim().to_string()),
                contact: Set(input.contact.clone()),
                latitude: Set(latitude),
                longitude: Set(longitude),
                category_id: Set(input.category_id),
                department_id: Set(input.department_id),
                approved_at: Set(Some(now)),
                deleted_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?;

            for key in &stored_keys {
                image::ActiveModel {
                    path: Set(key.clone()),
                    alt_text: Set(Some(created.location_name.clone())),
                    location_id: Set(Some(created.id)),
                    request_id: Set(None),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(map_db_err)?;
            }

            txn.commit().await.map_err(map_db_err)?;
            Ok(created)
        }
        .await;

        if result.is_err() {
            discard_blobs(self.storage.as_ref(), &stored_keys).await;
        }
        result
    }

    /// Mark a location approved. Re-approving refreshes the timestamp.
    pub async fn approve(&self, id: i64) -> AppResult<location::Model> {
        let location = self.location_repo.get_by_id(id).await?;
        let now = chrono::Utc::now().fixed_offset();
        self.location_repo
            .update(location::ActiveModel {
                id: Set(location.id),
                approved_at: Set(Some(now)),
                updated_at: Set(now),
                ..Default::default()
            })
            .await
    }

    /// Soft-delete a location. Image blobs stay on disk, so this is
    /// reversible by clearing `deleted_at`.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let location = self.location_repo.get_by_id(id).await?;
        let now = chrono::Utc::now().fixed_offset();
        self.location_repo
            .update(location::ActiveModel {
                id: Set(location.id),
                deleted_at: Set(Some(now)),
                updated_at: Set(now),
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    async fn assemble_detail(&self, location: location::Model) -> AppResult<LocationDetail> {
        let category = self.category_repo.get_by_id(location.category_id).await?;
        let department = self.department_repo.get_by_id(location.department_id).await?;
        let faculty = self.faculty_repo.get_by_id(department.faculty_id).await?;
        let image_urls = self
            .image_repo
            .find_by_location(location.id)
            .await?
            .into_iter()
            .map(|img| self.storage.public_url(&img.path))
            .collect();

        Ok(LocationDetail {
            id: location.id,
            student_name: location.student_name,
            student_id: location.student_id,
            location_name: location.location_name,
            description: location.description,
            contact: location.contact,
            latitude: location.latitude.to_f64().unwrap_or_default(),
            longitude: location.longitude.to_f64().unwrap_or_default(),
            category_name: category.name,
            department_name: department.name,
            faculty_name: faculty.name,
            approved_at: location.approved_at,
            image_urls,
            created_at: location.created_at,
            updated_at: location.updated_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lokamap_db::entities::category;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn mock_location(id: i64, name: &str, approved: bool) -> location::Model {
        let now = Utc::now().fixed_offset();
        location::Model {
            id,
            student_name: "Budi Santoso".to_string(),
            student_id: format!("21105{id:05}"),
            location_name: name.to_string(),
            description: "Backend internship".to_string(),
            contact: "081234567890".to_string(),
            latitude: Decimal::new(-620_150_000, 8),
            longitude: Decimal::new(10_681_660_000, 8),
            category_id: 1,
            department_id: 1,
            approved_at: approved.then_some(now),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> LocationService {
        let db = Arc::new(db);
        LocationService::new(
            Arc::clone(&db),
            LocationRepository::new(Arc::clone(&db)),
            ImageRepository::new(Arc::clone(&db)),
            CategoryRepository::new(Arc::clone(&db)),
            DepartmentRepository::new(Arc::clone(&db)),
            FacultyRepository::new(Arc::clone(&db)),
            Arc::new(lokamap_common::LocalStorage::new(
                "/tmp/lokamap-test".into(),
                "/storage".to_string(),
            )),
        )
    }

    #[tokio::test]
    async fn test_public_list_empty_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<location::Model>::new()])
            .into_connection();

        let results = service(db).public_list().await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_public_list_converts_coordinates() {
        let now = Utc::now().fixed_offset();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_location(1, "PT Maju Jaya", true)]])
            .append_query_results([[category::Model {
                id: 1,
                name: "Startup".to_string(),
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([Vec::<image::Model>::new()])
            .into_connection();

        let results = service(db).public_list().await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category_name, "Startup");
        assert!((results[0].latitude - (-6.2015)).abs() < 1e-6);
        assert!((results[0].longitude - 106.8166).abs() < 1e-6);
        assert!(results[0].image_url.is_none());
    }

    #[tokio::test]
    async fn test_admin_list_resolves_labels_from_batched_lookups() {
        use lokamap_db::entities::{department, faculty};
        use maplit::btreemap;

        let now = Utc::now().fixed_offset();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[btreemap! {
                "num_items" => sea_orm::Value::BigInt(Some(2))
            }]])
            .append_query_results([[
                mock_location(1, "PT Maju Jaya", true),
                mock_location(2, "CV Karya Abadi", false),
            ]])
            .append_query_results([[category::Model {
                id: 1,
                name: "Startup".to_string(),
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([[department::Model {
                id: 1,
                name: "Informatics".to_string(),
                degree_level: "S1".to_string(),
                faculty_id: 3,
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([[faculty::Model {
                id: 3,
                name: "Engineering".to_string(),
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([Vec::<image::Model>::new()])
            .into_connection();

        let (details, total) = service(db).admin_list(50, 0).await.unwrap();

        assert_eq!(total, 2);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].category_name, "Startup");
        assert_eq!(details[0].department_name, "Informatics");
        assert_eq!(details[0].faculty_name, "Engineering");
        assert_eq!(details[1].location_name, "CV Karya Abadi");
        assert!(details[1].approved_at.is_none());
        assert!(details[1].image_urls.is_empty());
    }

    #[tokio::test]
    async fn test_detail_hides_unapproved_location() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_location(1, "PT Maju Jaya", false)]])
            .into_connection();

        let result = service(db).detail(1).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
