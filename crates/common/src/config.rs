//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Blob storage configuration.
    pub storage: StorageConfig,
    /// Moderator authentication configuration.
    pub auth: AuthConfig,
    /// Signed submission-link configuration.
    pub signing: SigningConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Blob storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base path for stored files.
    #[serde(default = "default_storage_path")]
    pub base_path: PathBuf,
    /// Base URL for serving stored files.
    #[serde(default = "default_storage_url")]
    pub base_url: String,
}

/// Moderator authentication configuration.
///
/// Moderation routes are gated by a single shared bearer token. Identity
/// management lives outside this service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Bearer token required on moderator routes.
    pub moderator_token: String,
}

/// Signed submission-link configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    /// HMAC secret for signing submission links.
    pub secret: String,
    /// Link validity in seconds.
    #[serde(default = "default_link_ttl")]
    pub link_ttl_secs: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./storage")
}

fn default_storage_url() -> String {
    "/storage".to_string()
}

/// 24 hours, matching the submission-link lifetime.
const fn default_link_ttl() -> i64 {
    24 * 60 * 60
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `LOKAMAP_ENV`)
    /// 3. Environment variables with `LOKAMAP_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("LOKAMAP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LOKAMAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("LOKAMAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        assert_eq!(default_port(), 3000);
        assert_eq!(default_link_ttl(), 86_400);
        assert_eq!(default_storage_url(), "/storage");
        assert!(default_max_connections() >= default_min_connections());
    }
}
