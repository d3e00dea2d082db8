//! Test utilities for database operations.
//!
//! Provides helpers for setting up and tearing down test databases.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use tracing::info;

/// Test database configuration.
#[derive(Debug, Clone)]
pub struct TestDbConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Database name.
    pub database: String,
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("TEST_DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5433),
            username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "lokamap_test".to_string()),
            password: std::env::var("TEST_DB_PASSWORD")
                .unwrap_or_else(|_| "lokamap_test".to_string()),
            database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "lokamap_test".to_string()),
        }
    }
}

impl TestDbConfig {
    /// Get the database URL.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }

    /// Get URL for connecting to the postgres database (for creating test DBs).
    #[must_use]
    pub fn postgres_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/postgres",
            self.username, self.password, self.host, self.port
        )
    }
}

/// A test database context that manages the lifecycle of a test database.
pub struct TestDatabase {
    conn: Arc<DatabaseConnection>,
    config: TestDbConfig,
}

impl TestDatabase {
    /// Connect to the configured test database and run migrations.
    pub async fn new() -> Result<Self, DbErr> {
        Self::with_config(TestDbConfig::default()).await
    }

    /// Connect with custom configuration and run migrations.
    pub async fn with_config(config: TestDbConfig) -> Result<Self, DbErr> {
        let conn = Database::connect(&config.database_url()).await?;

        use sea_orm_migration::MigratorTrait;
        crate::migrations::Migrator::up(&conn, None).await?;

        info!(database = %config.database, "Connected to test database");

        Ok(Self {
            conn: Arc::new(conn),
            config,
        })
    }

    /// Create a uniquely named test database (for parallel tests), with
    /// migrations applied.
    pub async fn create_unique() -> Result<Self, DbErr> {
        let mut config = TestDbConfig::default();
        let unique_suffix = uuid::Uuid::new_v4().to_string().replace('-', "_");
        config.database = format!(
            "lokamap_test_{}",
            unique_suffix.get(..8).unwrap_or("fallback")
        );

        let postgres_conn = Database::connect(&config.postgres_url()).await?;
        let create_db = format!("CREATE DATABASE \"{}\"", config.database);
        postgres_conn
            .execute(Statement::from_string(DatabaseBackend::Postgres, create_db))
            .await?;
        postgres_conn.close().await?;

        Self::with_config(config).await
    }

    /// Get a shared handle to the database connection.
    #[must_use]
    pub fn connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.conn)
    }

    /// Clean up all data in the test database (truncate all tables).
    pub async fn cleanup(&self) -> Result<(), DbErr> {
        let tables = self
            .conn
            .query_all(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT tablename FROM pg_tables WHERE schemaname = 'public'".to_string(),
            ))
            .await?;

        for row in tables {
            if let Ok(table_name) = row.try_get::<String>("", "tablename") {
                if table_name == "seaql_migrations" {
                    continue;
                }
                let truncate = format!("TRUNCATE TABLE \"{table_name}\" CASCADE");
                self.conn
                    .execute(Statement::from_string(DatabaseBackend::Postgres, truncate))
                    .await?;
            }
        }

        info!("Cleaned up test database");
        Ok(())
    }

    /// Drop the test database. Consumes self to close the connection first.
    pub async fn drop_database(self) -> Result<(), DbErr> {
        self.conn.close_by_ref().await?;

        let postgres_conn = Database::connect(&self.config.postgres_url()).await?;

        let terminate = format!(
            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}'",
            self.config.database
        );
        postgres_conn
            .execute(Statement::from_string(DatabaseBackend::Postgres, terminate))
            .await
            .ok();

        let drop_db = format!("DROP DATABASE IF EXISTS \"{}\"", self.config.database);
        postgres_conn
            .execute(Statement::from_string(DatabaseBackend::Postgres, drop_db))
            .await?;

        postgres_conn.close().await?;

        info!(database = %self.config.database, "Dropped test database");
        Ok(())
    }
}
