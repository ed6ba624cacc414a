#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use server::routes;
use server::ServerState;
use service::auth::AuthConfig;
use service::health_service::HealthContext;
use service::upload::{InMemoryObjectStore, UploadService};
use tower_http::cors::CorsLayer;

pub const TEST_SECRET: &str = "test-secret";
pub const UPLOAD_BASE_URL: &str = "https://cdn.test.local";
pub const UPLOAD_LIMIT: usize = 1024 * 1024;

pub fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok()
}

pub async fn test_db() -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn test_state(db: DatabaseConnection, uploads: Option<Arc<UploadService>>) -> ServerState {
    ServerState::new(db, AuthConfig::new(TEST_SECRET, 12), uploads, HealthContext::new("test"))
}

pub fn memory_uploads() -> Arc<UploadService> {
    let store = Arc::new(InMemoryObjectStore::new(UPLOAD_BASE_URL));
    Arc::new(UploadService::new(store, UPLOAD_LIMIT))
}

/// Router over a fresh database with in-memory image storage.
pub async fn build_app() -> anyhow::Result<Router> {
    let db = test_db().await?;
    Ok(routes::build_router(test_state(db, Some(memory_uploads())), CorsLayer::very_permissive()))
}

pub async fn build_app_without_storage() -> anyhow::Result<Router> {
    let db = test_db().await?;
    Ok(routes::build_router(test_state(db, None), CorsLayer::very_permissive()))
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

pub fn empty_request(method: &str, uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method(method).uri(uri).body(Body::empty())?)
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?)
}

pub async fn body_json(resp: Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Multipart body with one part per `(name, filename, content_type, data)`.
pub fn multipart_request(
    uri: &str,
    parts: &[(&str, Option<&str>, Option<&str>, &[u8])],
) -> anyhow::Result<Request<Body>> {
    let boundary = "catastro-test-boundary";
    let mut body = Vec::new();
    for (name, filename, content_type, data) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match filename {
            Some(f) => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n").as_bytes(),
            ),
            None => body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes()),
        }
        if let Some(ct) = content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))?)
}
