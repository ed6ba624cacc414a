use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::health_service::HealthContext;
use service::upload::{S3ObjectStore, UploadService};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// S3-backed uploads when a bucket is configured, otherwise none.
async fn build_uploads(cfg: &AppConfig) -> Option<Arc<UploadService>> {
    if !cfg.storage.is_enabled() {
        warn!("no storage bucket configured; image uploads are disabled");
        return None;
    }
    let store = S3ObjectStore::connect(&cfg.storage).await;
    info!(bucket = %cfg.storage.bucket, region = %cfg.storage.region, "object storage ready");
    Some(Arc::new(UploadService::new(Arc::new(store), cfg.storage.max_upload_bytes)))
}

/// Connects to the database and brings the schema up to date.
pub async fn connect_and_migrate(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("database connection failed: {e}")))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Any(anyhow::anyhow!("migrations failed: {e}")))?;
    info!("database migrations applied");
    Ok(db)
}

/// Assemble the router from an already connected database.
pub async fn build_app(cfg: &AppConfig, db: DatabaseConnection) -> Router {
    let uploads = build_uploads(cfg).await;
    let state = ServerState::new(
        db,
        service::auth::AuthConfig::from(&cfg.auth),
        uploads,
        HealthContext::new(cfg.server.environment.clone()),
    );
    routes::build_router(state, build_cors())
}

/// Public entry: connect, migrate and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_and_migrate(&cfg).await?;
    let app = build_app(&cfg, db).await;

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {addr}: {e}")))?;
    info!(%addr, environment = %cfg.server.environment, "catastro server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
