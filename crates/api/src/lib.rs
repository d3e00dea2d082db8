//! HTTP API layer for lokamap.
//!
//! - **Endpoints**: public map/detail, signed submission intake, and the
//!   moderator surface under `/admin`
//! - **Extractors**: moderator authentication
//! - **Middleware**: bearer-token check for the moderator routes
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::{MAX_BODY_BYTES, router};
pub use middleware::AppState;
