use std::collections::HashMap;

use models::owner::{self, NewOwner, OwnerChanges};
use models::restaurant;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::restaurant_service::{hydrate, RestaurantDetails};

#[derive(Debug, Clone, Serialize)]
pub struct OwnerDetails {
    #[serde(flatten)]
    pub owner: owner::Model,
    pub restaurants: Vec<restaurant::Model>,
}

async fn find_owner(db: &DatabaseConnection, id: &str) -> Result<owner::Model, ServiceError> {
    owner::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("owner"))
}

async fn with_restaurants(db: &DatabaseConnection, o: owner::Model) -> Result<OwnerDetails, ServiceError> {
    let restaurants = o
        .find_related(restaurant::Entity)
        .order_by_asc(restaurant::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(OwnerDetails { owner: o, restaurants })
}

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_owner(db: &DatabaseConnection, input: NewOwner) -> Result<OwnerDetails, ServiceError> {
    let created = owner::create(db, input).await?;
    info!(owner_id = %created.id, "owner_created");
    Ok(OwnerDetails { owner: created, restaurants: Vec::new() })
}

pub async fn list_owners(db: &DatabaseConnection) -> Result<Vec<OwnerDetails>, ServiceError> {
    let owners = owner::Entity::find().order_by_asc(owner::Column::CreatedAt).all(db).await?;
    let ids: Vec<String> = owners.iter().map(|o| o.id.clone()).collect();
    let mut by_owner: HashMap<String, Vec<restaurant::Model>> = HashMap::new();
    if !ids.is_empty() {
        let owned = restaurant::Entity::find()
            .filter(restaurant::Column::OwnerId.is_in(ids))
            .order_by_asc(restaurant::Column::CreatedAt)
            .all(db)
            .await?;
        for r in owned {
            if let Some(owner_id) = r.owner_id.clone() {
                by_owner.entry(owner_id).or_default().push(r);
            }
        }
    }
    Ok(owners
        .into_iter()
        .map(|o| OwnerDetails { restaurants: by_owner.remove(&o.id).unwrap_or_default(), owner: o })
        .collect())
}

pub async fn get_owner(db: &DatabaseConnection, id: &str) -> Result<OwnerDetails, ServiceError> {
    let found = find_owner(db, id).await?;
    with_restaurants(db, found).await
}

#[instrument(skip(db, changes))]
pub async fn update_owner(
    db: &DatabaseConnection,
    id: &str,
    changes: OwnerChanges,
) -> Result<OwnerDetails, ServiceError> {
    let existing = find_owner(db, id).await?;
    let updated = owner::update(db, existing, changes).await?;
    info!(owner_id = %updated.id, "owner_updated");
    with_restaurants(db, updated).await
}

/// Deletes the owner; its restaurants stay and lose the reference.
#[instrument(skip(db))]
pub async fn delete_owner(db: &DatabaseConnection, id: &str) -> Result<owner::Model, ServiceError> {
    let existing = find_owner(db, id).await?;
    existing.clone().delete(db).await?;
    info!(owner_id = %existing.id, "owner_deleted");
    Ok(existing)
}

/// Restaurants of an owner with their recipes expanded.
pub async fn restaurants_of_owner(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Vec<RestaurantDetails>, ServiceError> {
    let found = find_owner(db, id).await?;
    let owned = found
        .find_related(restaurant::Entity)
        .order_by_asc(restaurant::Column::CreatedAt)
        .all(db)
        .await?;
    hydrate(db, owned).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurant_service::create_restaurant;
    use crate::test_support::{get_db, owner_input, restaurant_input, skip_db_tests};

    #[tokio::test]
    async fn owner_lifecycle() -> anyhow::Result<()> {
        if skip_db_tests() {
            return Ok(());
        }
        let db = get_db().await?;

        let created = create_owner(&db, owner_input("life@example.com")).await?;
        let mut r = restaurant_input("Owned");
        r.owner_id = Some(created.owner.id.clone());
        create_restaurant(&db, r).await?;
        create_restaurant(&db, restaurant_input("Unowned")).await?;

        let fetched = get_owner(&db, &created.owner.id).await?;
        assert_eq!(fetched.restaurants.len(), 1);
        let listed = list_owners(&db).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].restaurants.len(), 1);
        assert_eq!(restaurants_of_owner(&db, &created.owner.id).await?.len(), 1);

        let renamed = update_owner(
            &db,
            &created.owner.id,
            OwnerChanges { phone: Some("0911111111".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(renamed.owner.phone.as_deref(), Some("0911111111"));

        delete_owner(&db, &created.owner.id).await?;
        assert!(matches!(get_owner(&db, &created.owner.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(restaurants_of_owner(&db, &created.owner.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() -> anyhow::Result<()> {
        if skip_db_tests() {
            return Ok(());
        }
        let db = get_db().await?;
        create_owner(&db, owner_input("same@example.com")).await?;
        let err = create_owner(&db, owner_input("same@example.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let other = create_owner(&db, owner_input("other@example.com")).await?;
        let err = update_owner(
            &db,
            &other.owner.id,
            OwnerChanges { email: Some("same@example.com".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }
}
