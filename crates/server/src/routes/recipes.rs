use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use common::types::Count;
use models::recipe::{self, NewRecipe, RecipeChanges};
use service::recipe_service::{self, RecipeDetails};
use service::restaurant_service::{self, LinkDetails};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = crate::openapi::NewRecipeDoc,
    responses(
        (status = 201, description = "Recipe created", body = crate::openapi::RecipeDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Recipe id already taken", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewRecipe>, JsonRejection>,
) -> Result<(StatusCode, Json<recipe::Model>), JsonApiError> {
    let Json(input) = payload?;
    let created = recipe_service::create_recipe(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses((status = 200, description = "Recipes with the restaurants serving them", body = [crate::openapi::RecipeDetailsDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<RecipeDetails>>, JsonApiError> {
    Ok(Json(recipe_service::list_recipes(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = crate::openapi::RecipeDetailsDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetails>, JsonApiError> {
    Ok(Json(recipe_service::get_recipe(&state.db, &id).await?))
}

#[utoipa::path(
    patch,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = crate::openapi::RecipeChangesDoc,
    responses(
        (status = 200, description = "Updated recipe", body = crate::openapi::RecipeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeChanges>, JsonRejection>,
) -> Result<Json<recipe::Model>, JsonApiError> {
    let Json(changes) = payload?;
    Ok(Json(recipe_service::update_recipe(&state.db, &id, changes).await?))
}

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Deleted recipe", body = crate::openapi::RecipeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<recipe::Model>, JsonApiError> {
    Ok(Json(recipe_service::delete_recipe(&state.db, &id).await?))
}

#[utoipa::path(
    get,
    path = "/recipes/restaurant/{restaurant_id}",
    tag = "recipes",
    params(("restaurant_id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Recipes served by the restaurant", body = [crate::openapi::RecipeDoc]),
        (status = 404, description = "Restaurant not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn by_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<recipe::Model>>, JsonApiError> {
    Ok(Json(recipe_service::recipes_by_restaurant(&state.db, &restaurant_id).await?))
}

#[utoipa::path(
    post,
    path = "/recipes/{id}/restaurant/{restaurant_id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe id"),
        ("restaurant_id" = String, Path, description = "Restaurant id")
    ),
    responses(
        (status = 201, description = "Link created", body = crate::openapi::LinkDetailsDoc),
        (status = 404, description = "Restaurant or recipe not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Already linked", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn link_restaurant(
    State(state): State<ServerState>,
    Path((id, restaurant_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<LinkDetails>), JsonApiError> {
    let link = restaurant_service::add_recipe_to_restaurant(&state.db, &restaurant_id, &id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

#[utoipa::path(
    delete,
    path = "/recipes/{id}/restaurant/{restaurant_id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe id"),
        ("restaurant_id" = String, Path, description = "Restaurant id")
    ),
    responses((status = 200, description = "Number of links removed", body = crate::openapi::CountDoc))
)]
pub async fn unlink_restaurant(
    State(state): State<ServerState>,
    Path((id, restaurant_id)): Path<(String, String)>,
) -> Result<Json<Count>, JsonApiError> {
    Ok(Json(restaurant_service::remove_recipe_from_restaurant(&state.db, &restaurant_id, &id).await?))
}
