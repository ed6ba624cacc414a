mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{
    body_json, build_app, build_app_without_storage, empty_request, json_request, multipart_request,
    skip_db_tests, UPLOAD_BASE_URL, UPLOAD_LIMIT,
};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

#[tokio::test]
async fn upload_stores_image_under_subfolder() -> anyhow::Result<()> {
    if skip_db_tests() { return Ok(()); }
    let app = build_app().await?;

    let req = multipart_request(
        "/upload/image",
        &[
            ("subfolder", None, None, &b"restaurants"[..]),
            ("file", Some("Fachada.PNG"), Some("image/png"), PNG_BYTES),
        ],
    )?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await?;
    let url = body["url"].as_str().unwrap_or_default();
    assert!(url.starts_with(&format!("{UPLOAD_BASE_URL}/restaurants/")), "unexpected url {url}");
    assert!(url.ends_with(".png"));
    assert!(body.get("key").is_none());
    Ok(())
}

#[tokio::test]
async fn upload_rejects_bad_requests() -> anyhow::Result<()> {
    if skip_db_tests() { return Ok(()); }
    let app = build_app().await?;

    let req = multipart_request("/upload/image", &[("file", Some("notes.txt"), Some("text/plain"), &b"hello"[..])])?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await?["message"],
        "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed."
    );

    let req = multipart_request("/upload/image", &[("subfolder", None, None, &b"menus"[..])])?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await?["message"], "No file provided");

    let oversized = vec![0u8; UPLOAD_LIMIT + 1];
    let req = multipart_request("/upload/image", &[("file", Some("big.jpg"), Some("image/jpeg"), oversized.as_slice())])?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await?["message"], "File size too large. Maximum size is 1MB.");
    Ok(())
}

#[tokio::test]
async fn upload_without_storage_is_unavailable() -> anyhow::Result<()> {
    if skip_db_tests() { return Ok(()); }
    let app = build_app_without_storage().await?;

    let req = multipart_request("/upload/image", &[("file", Some("a.png"), Some("image/png"), PNG_BYTES)])?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(resp).await?["statusCode"], 503);
    Ok(())
}

#[tokio::test]
async fn health_endpoints_report_database() -> anyhow::Result<()> {
    if skip_db_tests() { return Ok(()); }
    let app = build_app().await?;
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/owners", &json!({"name": "Ana", "email": "ana@example.com"}))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.clone().oneshot(empty_request("GET", "/health")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let basic = body_json(resp).await?;
    assert_eq!(basic["status"], "healthy");
    assert_eq!(basic["database"]["status"], "connected");
    assert_eq!(basic["environment"], "test");
    assert!(basic["database"].get("stats").is_none());
    assert!(basic["memory"]["used"].is_u64());
    assert!(basic["memory"].get("virtual").is_none());

    let resp = app.clone().oneshot(empty_request("GET", "/health/detailed")?).await?;
    let detailed = body_json(resp).await?;
    assert_eq!(detailed["database"]["stats"]["owners"], 1);
    assert_eq!(detailed["database"]["stats"]["restaurants"], 0);
    assert!(detailed["system"]["pid"].is_u64());
    assert!(detailed["memory"]["virtual"].is_u64());

    let resp = app.clone().oneshot(empty_request("GET", "/health/ready")?).await?;
    assert_eq!(body_json(resp).await?["ready"], true);

    let resp = app.clone().oneshot(empty_request("GET", "/health/live")?).await?;
    let live = body_json(resp).await?;
    assert_eq!(live["alive"], true);
    assert!(live["uptime"].is_f64());
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    if skip_db_tests() { return Ok(()); }
    let app = build_app().await?;

    let resp = app.oneshot(empty_request("GET", "/api-docs/openapi.json")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await?;
    assert!(doc["paths"]["/restaurants/complete"]["post"].is_object());
    Ok(())
}
