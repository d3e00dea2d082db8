//! Common utilities and shared types for lokamap.
//!
//! This crate provides foundational components used across all lokamap crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Signed links**: Time-limited submission URLs via [`LinkSigner`]
//! - **Storage**: Blob storage backends for uploaded images and logos

pub mod config;
pub mod error;
pub mod signed_url;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use signed_url::{LinkSigner, SignedQuery};
pub use storage::{BlobStorage, LocalStorage, StoredBlob, generate_blob_key};
