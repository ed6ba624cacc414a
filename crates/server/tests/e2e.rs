mod common;

use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use common::{build_app, skip_db_tests};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = build_app().await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(TestApp { base_url: format!("http://{}", addr) })
}

#[tokio::test]
async fn e2e_cookie_session_and_catalog() -> anyhow::Result<()> {
    if skip_db_tests() { return Ok(()); }
    let app = start_server().await?;
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let resp = client
        .post(format!("{}/auth/register", app.base_url))
        .json(&json!({
            "name": "Marta Cedeno",
            "email": "marta@example.com",
            "identification": "1309998887",
            "password": "S3curePass!"
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);

    let resp = client
        .post(format!("{}/auth/login", app.base_url))
        .json(&json!({"email": "marta@example.com", "password": "S3curePass!"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    // the cookie store now carries auth_token
    let resp = client.get(format!("{}/auth/profile", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let profile: Value = resp.json().await?;
    assert_eq!(profile["identification"], "1309998887");

    let resp = client.post(format!("{}/auth/logout", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let resp = client.get(format!("{}/auth/profile", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::UNAUTHORIZED);

    for (id, name) in [("r1", "Viche"), ("r2", "Bolon de verde")] {
        let resp = client
            .post(format!("{}/recipes", app.base_url))
            .json(&json!({"id": id, "name": name}))
            .send()
            .await?;
        assert_eq!(resp.status(), HttpStatusCode::CREATED);
    }

    let resp = client
        .post(format!("{}/restaurants/complete", app.base_url))
        .json(&json!({
            "restaurant": {
                "name": "Don Pepe",
                "address": "Calle 13, Manta",
                "latitude": -0.94,
                "longitude": -80.72
            },
            "owner": {"name": "Pepe", "email": "pepe@example.com"},
            "recipeIds": ["r1", "r2"]
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created: Value = resp.json().await?;
    assert_eq!(created["restaurantRecipes"].as_array().map(Vec::len), Some(2));

    let resp = client.get(format!("{}/restaurants", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let all: Value = resp.json().await?;
    assert_eq!(all.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_is_allowed() -> anyhow::Result<()> {
    if skip_db_tests() { return Ok(()); }
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{}/restaurants", app.base_url))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send()
        .await?;
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
