use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{restaurant, restaurant_recipe, validation};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    RestaurantRecipe,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::RestaurantRecipe => Entity::has_many(restaurant_recipe::Entity).into(),
        }
    }
}

impl Related<restaurant_recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantRecipe.def()
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        restaurant_recipe::Relation::Restaurant.def()
    }

    fn via() -> Option<RelationDef> {
        Some(restaurant_recipe::Relation::Recipe.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// Optional caller-chosen id, e.g. a seeded slug.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewRecipe {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(id) = &self.id {
            validation::require_non_empty("recipe.id", id)?;
        }
        validation::require_non_empty("recipe.name", &self.name)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewRecipe) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let id = input
        .id
        .map(|id| id.trim().to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let am = ActiveModel {
        id: Set(id),
        name: Set(input.name.trim().to_string()),
        description: Set(validation::optional(input.description)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    changes: RecipeChanges,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    if let Some(name) = changes.name {
        validation::require_non_empty("recipe.name", &name)?;
        am.name = Set(name.trim().to_string());
    }
    if changes.description.is_some() {
        am.description = Set(validation::optional(changes.description));
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}
