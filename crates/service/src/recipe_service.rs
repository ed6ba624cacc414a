use std::collections::HashMap;

use models::recipe::{self, NewRecipe, RecipeChanges};
use models::{restaurant, restaurant_recipe};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::restaurant_service::find_restaurant;

/// Recipe with the restaurants that serve it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: recipe::Model,
    pub restaurant_recipes: Vec<RecipeRestaurantEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeRestaurantEntry {
    #[serde(flatten)]
    pub link: restaurant_recipe::Model,
    pub restaurant: restaurant::Model,
}

async fn find_recipe(db: &DatabaseConnection, id: &str) -> Result<recipe::Model, ServiceError> {
    recipe::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("recipe"))
}

async fn hydrate(db: &DatabaseConnection, recipes: Vec<recipe::Model>) -> Result<Vec<RecipeDetails>, ServiceError> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<String> = recipes.iter().map(|r| r.id.clone()).collect();
    let links = restaurant_recipe::Entity::find()
        .find_also_related(restaurant::Entity)
        .filter(restaurant_recipe::Column::RecipeId.is_in(ids))
        .order_by_asc(restaurant_recipe::Column::CreatedAt)
        .all(db)
        .await?;
    let mut entries: HashMap<String, Vec<RecipeRestaurantEntry>> = HashMap::new();
    for (link, found) in links {
        if let Some(restaurant) = found {
            entries
                .entry(link.recipe_id.clone())
                .or_default()
                .push(RecipeRestaurantEntry { link, restaurant });
        }
    }
    Ok(recipes
        .into_iter()
        .map(|r| RecipeDetails { restaurant_recipes: entries.remove(&r.id).unwrap_or_default(), recipe: r })
        .collect())
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_recipe(db: &DatabaseConnection, input: NewRecipe) -> Result<recipe::Model, ServiceError> {
    let created = recipe::create(db, input).await?;
    info!(recipe_id = %created.id, "recipe_created");
    Ok(created)
}

pub async fn list_recipes(db: &DatabaseConnection) -> Result<Vec<RecipeDetails>, ServiceError> {
    let all = recipe::Entity::find().order_by_asc(recipe::Column::Name).all(db).await?;
    hydrate(db, all).await
}

pub async fn get_recipe(db: &DatabaseConnection, id: &str) -> Result<RecipeDetails, ServiceError> {
    let found = find_recipe(db, id).await?;
    hydrate(db, vec![found])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("recipe"))
}

#[instrument(skip(db, changes))]
pub async fn update_recipe(
    db: &DatabaseConnection,
    id: &str,
    changes: RecipeChanges,
) -> Result<recipe::Model, ServiceError> {
    let existing = find_recipe(db, id).await?;
    let updated = recipe::update(db, existing, changes).await?;
    info!(recipe_id = %updated.id, "recipe_updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_recipe(db: &DatabaseConnection, id: &str) -> Result<recipe::Model, ServiceError> {
    let existing = find_recipe(db, id).await?;
    existing.clone().delete(db).await?;
    info!(recipe_id = %existing.id, "recipe_deleted");
    Ok(existing)
}

/// Recipes served by a restaurant; 404 when the restaurant does not exist.
pub async fn recipes_by_restaurant(
    db: &DatabaseConnection,
    restaurant_id: &str,
) -> Result<Vec<recipe::Model>, ServiceError> {
    let found = find_restaurant(db, restaurant_id).await?;
    Ok(found
        .find_related(recipe::Entity)
        .order_by_asc(recipe::Column::Name)
        .all(db)
        .await?)
}
