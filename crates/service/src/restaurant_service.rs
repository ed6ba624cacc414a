//! Restaurant catalog operations, including the composite owner + restaurant +
//! recipe-links creation that runs as a single transaction.

use std::collections::HashMap;

use common::types::Count;
use models::owner::{self, NewOwner};
use models::restaurant::{self, NewRestaurant, RestaurantChanges};
use models::{recipe, restaurant_recipe};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::ServiceError;

/// Restaurant with its owner and the recipes it serves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetails {
    #[serde(flatten)]
    pub restaurant: restaurant::Model,
    pub owner: Option<owner::Model>,
    pub restaurant_recipes: Vec<RestaurantRecipeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantRecipeEntry {
    #[serde(flatten)]
    pub link: restaurant_recipe::Model,
    pub recipe: recipe::Model,
}

/// A single link with both sides expanded.
#[derive(Debug, Clone, Serialize)]
pub struct LinkDetails {
    #[serde(flatten)]
    pub link: restaurant_recipe::Model,
    pub restaurant: restaurant::Model,
    pub recipe: recipe::Model,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantWithOwnerInput {
    pub restaurant: NewRestaurant,
    pub owner: NewOwner,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRestaurantInput {
    pub restaurant: NewRestaurant,
    pub owner: NewOwner,
    #[serde(default)]
    pub recipe_ids: Vec<String>,
}

/// Loads owners and recipe links for a batch of restaurants with one query
/// per relation.
pub(crate) async fn hydrate<C: ConnectionTrait>(
    db: &C,
    restaurants: Vec<restaurant::Model>,
) -> Result<Vec<RestaurantDetails>, ServiceError> {
    if restaurants.is_empty() {
        return Ok(Vec::new());
    }

    let owner_ids: Vec<String> = restaurants.iter().filter_map(|r| r.owner_id.clone()).collect();
    let mut owners: HashMap<String, owner::Model> = HashMap::new();
    if !owner_ids.is_empty() {
        for o in owner::Entity::find().filter(owner::Column::Id.is_in(owner_ids)).all(db).await? {
            owners.insert(o.id.clone(), o);
        }
    }

    let ids: Vec<String> = restaurants.iter().map(|r| r.id.clone()).collect();
    let links = restaurant_recipe::Entity::find()
        .find_also_related(recipe::Entity)
        .filter(restaurant_recipe::Column::RestaurantId.is_in(ids))
        .order_by_asc(restaurant_recipe::Column::CreatedAt)
        .all(db)
        .await?;
    let mut entries: HashMap<String, Vec<RestaurantRecipeEntry>> = HashMap::new();
    for (link, recipe) in links {
        if let Some(recipe) = recipe {
            entries
                .entry(link.restaurant_id.clone())
                .or_default()
                .push(RestaurantRecipeEntry { link, recipe });
        }
    }

    Ok(restaurants
        .into_iter()
        .map(|r| RestaurantDetails {
            owner: r.owner_id.as_ref().and_then(|id| owners.get(id).cloned()),
            restaurant_recipes: entries.remove(&r.id).unwrap_or_default(),
            restaurant: r,
        })
        .collect())
}

async fn hydrate_one<C: ConnectionTrait>(
    db: &C,
    r: restaurant::Model,
) -> Result<RestaurantDetails, ServiceError> {
    hydrate(db, vec![r])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("restaurant"))
}

pub(crate) async fn find_restaurant<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<restaurant::Model, ServiceError> {
    restaurant::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("restaurant"))
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_restaurant(
    db: &DatabaseConnection,
    input: NewRestaurant,
) -> Result<RestaurantDetails, ServiceError> {
    let created = restaurant::create(db, input, None).await?;
    info!(restaurant_id = %created.id, "restaurant_created");
    hydrate_one(db, created).await
}

/// Owner insert, restaurant insert, then link rows, all in one transaction.
/// The response is read back before commit so it reflects exactly what was
/// written.
async fn create_composite(
    db: &DatabaseConnection,
    restaurant_input: NewRestaurant,
    owner_input: NewOwner,
    recipe_ids: Vec<String>,
) -> Result<RestaurantDetails, ServiceError> {
    restaurant_input.validate()?;
    owner_input.validate()?;

    let details = db
        .transaction::<_, RestaurantDetails, ServiceError>(|txn| {
            Box::pin(async move {
                let owner = owner::create(txn, owner_input).await?;
                let created = restaurant::create(txn, restaurant_input, Some(owner.id)).await?;
                restaurant_recipe::link_many(txn, &created.id, &recipe_ids).await?;
                hydrate_one(txn, created).await
            })
        })
        .await?;

    info!(
        restaurant_id = %details.restaurant.id,
        owner_id = ?details.restaurant.owner_id,
        links = details.restaurant_recipes.len(),
        "restaurant_created"
    );
    Ok(details)
}

#[instrument(skip(db, input), fields(name = %input.restaurant.name))]
pub async fn create_restaurant_with_owner(
    db: &DatabaseConnection,
    input: RestaurantWithOwnerInput,
) -> Result<RestaurantDetails, ServiceError> {
    create_composite(db, input.restaurant, input.owner, Vec::new()).await
}

#[instrument(skip(db, input), fields(name = %input.restaurant.name, recipes = input.recipe_ids.len()))]
pub async fn create_restaurant_with_owner_and_recipes(
    db: &DatabaseConnection,
    input: CompleteRestaurantInput,
) -> Result<RestaurantDetails, ServiceError> {
    create_composite(db, input.restaurant, input.owner, input.recipe_ids).await
}

pub async fn list_restaurants(db: &DatabaseConnection) -> Result<Vec<RestaurantDetails>, ServiceError> {
    let all = restaurant::Entity::find()
        .order_by_asc(restaurant::Column::CreatedAt)
        .all(db)
        .await?;
    hydrate(db, all).await
}

pub async fn get_restaurant(db: &DatabaseConnection, id: &str) -> Result<RestaurantDetails, ServiceError> {
    let found = find_restaurant(db, id).await?;
    hydrate_one(db, found).await
}

#[instrument(skip(db, changes))]
pub async fn update_restaurant(
    db: &DatabaseConnection,
    id: &str,
    changes: RestaurantChanges,
) -> Result<RestaurantDetails, ServiceError> {
    let existing = find_restaurant(db, id).await?;
    let updated = restaurant::update(db, existing, changes).await?;
    info!(restaurant_id = %updated.id, "restaurant_updated");
    hydrate_one(db, updated).await
}

#[instrument(skip(db))]
pub async fn delete_restaurant(db: &DatabaseConnection, id: &str) -> Result<restaurant::Model, ServiceError> {
    let existing = find_restaurant(db, id).await?;
    existing.clone().delete(db).await?;
    info!(restaurant_id = %existing.id, "restaurant_deleted");
    Ok(existing)
}

#[instrument(skip(db))]
pub async fn add_recipe_to_restaurant(
    db: &DatabaseConnection,
    restaurant_id: &str,
    recipe_id: &str,
) -> Result<LinkDetails, ServiceError> {
    let found_restaurant = find_restaurant(db, restaurant_id).await?;
    let found_recipe = recipe::Entity::find_by_id(recipe_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("recipe"))?;
    let link = restaurant_recipe::link(db, &found_restaurant.id, &found_recipe.id).await?;
    info!(restaurant_id, recipe_id, "recipe_linked");
    Ok(LinkDetails { link, restaurant: found_restaurant, recipe: found_recipe })
}

#[instrument(skip(db))]
pub async fn remove_recipe_from_restaurant(
    db: &DatabaseConnection,
    restaurant_id: &str,
    recipe_id: &str,
) -> Result<Count, ServiceError> {
    let count = restaurant_recipe::unlink(db, restaurant_id, recipe_id).await?;
    info!(restaurant_id, recipe_id, count, "recipe_unlinked");
    Ok(Count { count })
}
