use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use models::owner::{self, NewOwner, OwnerChanges};
use service::owner_service::{self, OwnerDetails};
use service::restaurant_service::RestaurantDetails;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    post,
    path = "/owners",
    tag = "owners",
    request_body = crate::openapi::NewOwnerDoc,
    responses(
        (status = 201, description = "Owner created", body = crate::openapi::OwnerDetailsDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already registered", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewOwner>, JsonRejection>,
) -> Result<(StatusCode, Json<OwnerDetails>), JsonApiError> {
    let Json(input) = payload?;
    let created = owner_service::create_owner(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/owners",
    tag = "owners",
    responses((status = 200, description = "Owners with their restaurants", body = [crate::openapi::OwnerDetailsDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<OwnerDetails>>, JsonApiError> {
    Ok(Json(owner_service::list_owners(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/owners/{id}",
    tag = "owners",
    params(("id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Owner", body = crate::openapi::OwnerDetailsDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<OwnerDetails>, JsonApiError> {
    Ok(Json(owner_service::get_owner(&state.db, &id).await?))
}

#[utoipa::path(
    patch,
    path = "/owners/{id}",
    tag = "owners",
    params(("id" = String, Path, description = "Owner id")),
    request_body = crate::openapi::OwnerChangesDoc,
    responses(
        (status = 200, description = "Updated owner", body = crate::openapi::OwnerDetailsDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already registered", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<OwnerChanges>, JsonRejection>,
) -> Result<Json<OwnerDetails>, JsonApiError> {
    let Json(changes) = payload?;
    Ok(Json(owner_service::update_owner(&state.db, &id, changes).await?))
}

#[utoipa::path(
    delete,
    path = "/owners/{id}",
    tag = "owners",
    params(("id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Deleted owner", body = crate::openapi::OwnerDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<owner::Model>, JsonApiError> {
    Ok(Json(owner_service::delete_owner(&state.db, &id).await?))
}

#[utoipa::path(
    get,
    path = "/owners/{id}/restaurants",
    tag = "owners",
    params(("id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Restaurants of the owner with recipes", body = [crate::openapi::RestaurantDetailsDoc]),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn restaurants(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RestaurantDetails>>, JsonApiError> {
    Ok(Json(owner_service::restaurants_of_owner(&state.db, &id).await?))
}
