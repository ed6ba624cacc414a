use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::{AuthSession, Claims, LoginInput, OperatorProfile, RegisterInput};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Operator registered", body = crate::openapi::OperatorDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email or identification already in use", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<OperatorProfile>), JsonApiError> {
    let Json(input) = payload?;
    let profile = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in; also sets the auth_token cookie", body = crate::openapi::SessionDoc),
        (status = 401, description = "Invalid credentials", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let Json(input) = payload?;
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.access_token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(session)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses((status = 204, description = "Cookie cleared"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/auth/profile",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current operator", body = crate::openapi::OperatorDoc),
        (status = 401, description = "Missing, invalid or expired token", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn profile(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<OperatorProfile>, JsonApiError> {
    Ok(Json(state.auth.profile(&claims.sub).await?))
}

/// Reads `Authorization: Bearer <token>`, falling back to the `auth_token`
/// cookie.
fn extract_token(req: &Request) -> Result<Option<String>, JsonApiError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let raw = value.to_str().unwrap_or_default();
        return match raw.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
            _ => {
                tracing::warn!(path = %req.uri().path(), "invalid Authorization format (expect Bearer)");
                Err(JsonApiError::unauthorized("Invalid Authorization header"))
            }
        };
    }
    let jar = CookieJar::from_headers(req.headers());
    Ok(jar
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty()))
}

/// Route layer for operator-only endpoints. Verified claims are stored in
/// the request extensions for handlers to pick up.
pub async fn require_operator(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(token) = extract_token(&req)? else {
        tracing::warn!(path = %req.uri().path(), "missing Authorization header and auth_token cookie");
        return Err(JsonApiError::unauthorized("Authentication required"));
    };
    let claims = state.auth.verify_token(&token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
