use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use service::auth::domain::{OperatorProfile, RegisterInput};
use service::operator_service::{self, OperatorUpdate};

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Creates an operator through the same path as self-registration so the
/// password is always hashed.
#[utoipa::path(
    post,
    path = "/operators",
    tag = "operators",
    security(("bearer" = [])),
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Operator created", body = crate::openapi::OperatorDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email or identification already in use", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<OperatorProfile>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/operators",
    tag = "operators",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All operators", body = [crate::openapi::OperatorDoc]),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<OperatorProfile>>, JsonApiError> {
    Ok(Json(operator_service::list_operators(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/operators/{id}",
    tag = "operators",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Operator id")),
    responses(
        (status = 200, description = "Operator", body = crate::openapi::OperatorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<OperatorProfile>, JsonApiError> {
    Ok(Json(operator_service::get_operator(&state.db, &id).await?))
}

#[utoipa::path(
    patch,
    path = "/operators/{id}",
    tag = "operators",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Operator id")),
    request_body = crate::openapi::OperatorUpdateDoc,
    responses(
        (status = 200, description = "Updated operator", body = crate::openapi::OperatorDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email or identification already in use", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<OperatorUpdate>, JsonRejection>,
) -> Result<Json<OperatorProfile>, JsonApiError> {
    let Json(update) = payload?;
    Ok(Json(operator_service::update_operator(&state.db, &id, update).await?))
}

#[utoipa::path(
    delete,
    path = "/operators/{id}",
    tag = "operators",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Operator id")),
    responses(
        (status = 200, description = "Deleted operator", body = crate::openapi::OperatorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<OperatorProfile>, JsonApiError> {
    Ok(Json(operator_service::delete_operator(&state.db, &id).await?))
}
