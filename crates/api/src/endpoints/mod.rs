//! API endpoints.

mod categories;
mod departments;
mod faculties;
mod locations;
mod profile;
mod submissions;

use axum::Router;
use axum::extract::DefaultBodyLimit;

use crate::middleware::{AppState, require_moderator};

/// Multipart bodies carry up to five photos at 2 MiB each plus form text.
pub const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// Create the API router.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .nest("/locations", locations::admin_router())
        .nest("/submissions", submissions::admin_router())
        .nest("/categories", categories::router())
        .nest("/faculties", faculties::router())
        .nest("/departments", departments::router())
        .nest("/profile", profile::router())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_moderator,
        ));

    Router::new()
        .nest("/locations", locations::router())
        .nest("/submissions", submissions::router())
        .nest("/admin", admin)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
