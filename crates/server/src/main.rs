//! Lokamap server entry point.

use std::sync::Arc;

use axum::Router;
use lokamap_api::{AppState, MAX_BODY_BYTES, router as api_router};
use lokamap_common::{BlobStorage, Config, LinkSigner, LocalStorage};
use lokamap_core::{
    CategoryService, DepartmentService, FacultyService, LocationService, ModerationService,
    ProfileService, SubmissionService,
};
use lokamap_db::repositories::{
    CategoryRepository, DepartmentRepository, FacultyRepository, ImageRepository,
    LocationRepository, LocationRequestRepository, SiteProfileRepository,
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lokamap=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting lokamap server...");

    let config = Config::load()?;

    let db = Arc::new(lokamap_db::init(&config).await?);
    info!("Connected to database");

    info!("Running database migrations...");
    lokamap_db::migrate(&db).await?;
    info!("Migrations completed");

    let storage_root = config.storage.base_path.clone();
    let storage: Arc<dyn BlobStorage> = Arc::new(LocalStorage::new(
        storage_root.clone(),
        config.storage.base_url.clone(),
    ));

    let signer = LinkSigner::new(
        config.signing.secret.clone(),
        config.server.url.clone(),
        config.signing.link_ttl_secs,
    );

    let state = AppState {
        category_service: CategoryService::new(CategoryRepository::new(Arc::clone(&db))),
        faculty_service: FacultyService::new(FacultyRepository::new(Arc::clone(&db))),
        department_service: DepartmentService::new(
            DepartmentRepository::new(Arc::clone(&db)),
            FacultyRepository::new(Arc::clone(&db)),
        ),
        location_service: LocationService::new(
            Arc::clone(&db),
            LocationRepository::new(Arc::clone(&db)),
            ImageRepository::new(Arc::clone(&db)),
            CategoryRepository::new(Arc::clone(&db)),
            DepartmentRepository::new(Arc::clone(&db)),
            FacultyRepository::new(Arc::clone(&db)),
            Arc::clone(&storage),
        ),
        submission_service: SubmissionService::new(
            Arc::clone(&db),
            LocationRequestRepository::new(Arc::clone(&db)),
            LocationRepository::new(Arc::clone(&db)),
            CategoryRepository::new(Arc::clone(&db)),
            DepartmentRepository::new(Arc::clone(&db)),
            Arc::clone(&storage),
        ),
        moderation_service: ModerationService::new(
            Arc::clone(&db),
            LocationRequestRepository::new(Arc::clone(&db)),
            ImageRepository::new(Arc::clone(&db)),
            Arc::clone(&storage),
        ),
        profile_service: ProfileService::new(
            SiteProfileRepository::new(Arc::clone(&db)),
            Arc::clone(&storage),
        ),
        signer,
        moderator_token: config.auth.moderator_token.clone(),
    };

    let app = Router::new()
        .nest("/api", api_router(state))
        .nest_service("/storage", ServeDir::new(storage_root))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
