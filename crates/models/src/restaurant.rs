use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{owner, recipe, restaurant_recipe, validation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub history: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub principal_image: Option<String>,
    /// JSON array of image URLs.
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,
    pub identification_number: Option<String>,
    pub owner_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn image_urls(&self) -> Vec<String> {
        serde_json::from_value(self.images.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    RestaurantRecipe,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(owner::Entity)
                .from(Column::OwnerId)
                .to(owner::Column::Id)
                .into(),
            Relation::RestaurantRecipe => Entity::has_many(restaurant_recipe::Entity).into(),
        }
    }
}

impl Related<owner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<restaurant_recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantRecipe.def()
    }
}

impl Related<recipe::Entity> for Entity {
    fn to() -> RelationDef {
        restaurant_recipe::Relation::Recipe.def()
    }

    fn via() -> Option<RelationDef> {
        Some(restaurant_recipe::Relation::Restaurant.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurant {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub history: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub principal_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub identification_number: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl NewRestaurant {
    pub fn validate(&self) -> Result<(), ModelError> {
        validation::require_non_empty("restaurant.name", &self.name)?;
        validation::require_non_empty("restaurant.address", &self.address)?;
        validation::validate_latitude(self.latitude)?;
        validation::validate_longitude(self.longitude)?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            validation::validate_email("restaurant.email", email)?;
        }
        Ok(())
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub history: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub principal_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub identification_number: Option<String>,
    pub owner_id: Option<String>,
}

impl RestaurantChanges {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            validation::require_non_empty("restaurant.name", name)?;
        }
        if let Some(address) = &self.address {
            validation::require_non_empty("restaurant.address", address)?;
        }
        if let Some(lat) = self.latitude {
            validation::validate_latitude(lat)?;
        }
        if let Some(lng) = self.longitude {
            validation::validate_longitude(lng)?;
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            validation::validate_email("restaurant.email", email)?;
        }
        Ok(())
    }
}

/// Inserts a restaurant. `owner_id` overrides the id carried by the input,
/// which is how the composite paths attach a freshly created owner.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    input: NewRestaurant,
    owner_id: Option<String>,
) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let owner_id = owner_id.or_else(|| validation::optional(input.owner_id));
    let am = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(input.name.trim().to_string()),
        description: Set(validation::optional(input.description)),
        history: Set(validation::optional(input.history)),
        address: Set(input.address.trim().to_string()),
        latitude: Set(input.latitude),
        longitude: Set(input.longitude),
        phone: Set(validation::optional(input.phone)),
        email: Set(validation::optional(input.email)),
        website: Set(validation::optional(input.website)),
        principal_image: Set(validation::optional(input.principal_image)),
        images: Set(serde_json::json!(input.images)),
        identification_number: Set(validation::optional(input.identification_number)),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    changes: RestaurantChanges,
) -> Result<Model, ModelError> {
    changes.validate()?;
    let mut am: ActiveModel = existing.into();
    if let Some(name) = changes.name {
        am.name = Set(name.trim().to_string());
    }
    if changes.description.is_some() {
        am.description = Set(validation::optional(changes.description));
    }
    if changes.history.is_some() {
        am.history = Set(validation::optional(changes.history));
    }
    if let Some(address) = changes.address {
        am.address = Set(address.trim().to_string());
    }
    if let Some(lat) = changes.latitude {
        am.latitude = Set(lat);
    }
    if let Some(lng) = changes.longitude {
        am.longitude = Set(lng);
    }
    if changes.phone.is_some() {
        am.phone = Set(validation::optional(changes.phone));
    }
    if changes.email.is_some() {
        am.email = Set(validation::optional(changes.email));
    }
    if changes.website.is_some() {
        am.website = Set(validation::optional(changes.website));
    }
    if changes.principal_image.is_some() {
        am.principal_image = Set(validation::optional(changes.principal_image));
    }
    if let Some(images) = changes.images {
        am.images = Set(serde_json::json!(images));
    }
    if changes.identification_number.is_some() {
        am.identification_number = Set(validation::optional(changes.identification_number));
    }
    if changes.owner_id.is_some() {
        am.owner_id = Set(validation::optional(changes.owner_id));
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}
