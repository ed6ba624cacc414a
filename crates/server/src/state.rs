use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::AuthService;
use service::health_service::HealthContext;
use service::upload::UploadService;

pub type OperatorAuth = AuthService<SeaOrmAuthRepository>;

/// Handles shared by every request. Built once in `startup::run`.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<OperatorAuth>,
    /// `None` when no bucket is configured; the upload route answers 503.
    pub uploads: Option<Arc<UploadService>>,
    pub health: Arc<HealthContext>,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        auth: service::auth::AuthConfig,
        uploads: Option<Arc<UploadService>>,
        health: HealthContext,
    ) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        Self {
            auth: Arc::new(AuthService::new(repo, auth)),
            db,
            uploads,
            health: Arc::new(health),
        }
    }
}
