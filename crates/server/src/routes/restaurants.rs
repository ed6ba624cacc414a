use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use common::types::Count;
use models::restaurant::{self, NewRestaurant, RestaurantChanges};
use service::restaurant_service::{
    self, CompleteRestaurantInput, LinkDetails, RestaurantDetails, RestaurantWithOwnerInput,
};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    post,
    path = "/restaurants",
    tag = "restaurants",
    request_body = crate::openapi::NewRestaurantDoc,
    responses(
        (status = 201, description = "Restaurant created", body = crate::openapi::RestaurantDetailsDoc),
        (status = 400, description = "Invalid input or unknown owner", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewRestaurant>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantDetails>), JsonApiError> {
    let Json(input) = payload?;
    let created = restaurant_service::create_restaurant(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/restaurants/with-owner",
    tag = "restaurants",
    request_body = crate::openapi::RestaurantWithOwnerDoc,
    responses(
        (status = 201, description = "Owner and restaurant created together", body = crate::openapi::RestaurantDetailsDoc),
        (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Owner email already registered", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_with_owner(
    State(state): State<ServerState>,
    payload: Result<Json<RestaurantWithOwnerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantDetails>), JsonApiError> {
    let Json(input) = payload?;
    let created = restaurant_service::create_restaurant_with_owner(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/restaurants/complete",
    tag = "restaurants",
    request_body = crate::openapi::CompleteRestaurantDoc,
    responses(
        (status = 201, description = "Owner, restaurant and recipe links created atomically", body = crate::openapi::RestaurantDetailsDoc),
        (status = 400, description = "Invalid input or unknown recipe id; nothing was written", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Owner email already registered or recipe id repeated; nothing was written", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_complete(
    State(state): State<ServerState>,
    payload: Result<Json<CompleteRestaurantInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantDetails>), JsonApiError> {
    let Json(input) = payload?;
    let created = restaurant_service::create_restaurant_with_owner_and_recipes(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    tag = "restaurants",
    responses((status = 200, description = "All restaurants with owner and recipes", body = [crate::openapi::RestaurantDetailsDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<RestaurantDetails>>, JsonApiError> {
    Ok(Json(restaurant_service::list_restaurants(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant", body = crate::openapi::RestaurantDetailsDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantDetails>, JsonApiError> {
    Ok(Json(restaurant_service::get_restaurant(&state.db, &id).await?))
}

#[utoipa::path(
    patch,
    path = "/restaurants/{id}",
    tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = crate::openapi::RestaurantChangesDoc,
    responses(
        (status = 200, description = "Updated restaurant", body = crate::openapi::RestaurantDetailsDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<RestaurantChanges>, JsonRejection>,
) -> Result<Json<RestaurantDetails>, JsonApiError> {
    let Json(changes) = payload?;
    Ok(Json(restaurant_service::update_restaurant(&state.db, &id, changes).await?))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Deleted restaurant", body = crate::openapi::RestaurantDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<restaurant::Model>, JsonApiError> {
    Ok(Json(restaurant_service::delete_restaurant(&state.db, &id).await?))
}

#[utoipa::path(
    post,
    path = "/restaurants/{id}/recipes/{recipe_id}",
    tag = "restaurants",
    params(
        ("id" = String, Path, description = "Restaurant id"),
        ("recipe_id" = String, Path, description = "Recipe id")
    ),
    responses(
        (status = 201, description = "Link created", body = crate::openapi::LinkDetailsDoc),
        (status = 404, description = "Restaurant or recipe not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Already linked", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn add_recipe(
    State(state): State<ServerState>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<LinkDetails>), JsonApiError> {
    let link = restaurant_service::add_recipe_to_restaurant(&state.db, &id, &recipe_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}/recipes/{recipe_id}",
    tag = "restaurants",
    params(
        ("id" = String, Path, description = "Restaurant id"),
        ("recipe_id" = String, Path, description = "Recipe id")
    ),
    responses((status = 200, description = "Number of links removed", body = crate::openapi::CountDoc))
)]
pub async fn remove_recipe(
    State(state): State<ServerState>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<Json<Count>, JsonApiError> {
    Ok(Json(restaurant_service::remove_recipe_from_restaurant(&state.db, &id, &recipe_id).await?))
}
