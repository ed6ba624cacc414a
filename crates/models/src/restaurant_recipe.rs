use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{recipe, restaurant};

/// Join row between a restaurant and a recipe it serves.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant_recipe")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub restaurant_id: String,
    pub recipe_id: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Restaurant,
    Recipe,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Restaurant => Entity::belongs_to(restaurant::Entity)
                .from(Column::RestaurantId)
                .to(restaurant::Column::Id)
                .into(),
            Relation::Recipe => Entity::belongs_to(recipe::Entity)
                .from(Column::RecipeId)
                .to(recipe::Column::Id)
                .into(),
        }
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn new_link(restaurant_id: &str, recipe_id: &str) -> ActiveModel {
    ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        restaurant_id: Set(restaurant_id.to_string()),
        recipe_id: Set(recipe_id.to_string()),
        created_at: Set(Utc::now().into()),
    }
}

pub async fn link<C: ConnectionTrait>(
    db: &C,
    restaurant_id: &str,
    recipe_id: &str,
) -> Result<Model, ModelError> {
    Ok(new_link(restaurant_id, recipe_id).insert(db).await?)
}

/// Inserts one link per recipe id in a single statement. Recipe ids are not
/// checked beforehand: an unknown id fails on the foreign key and a repeated
/// id fails on the unique pair index. Returns the number of rows written.
pub async fn link_many<C: ConnectionTrait>(
    db: &C,
    restaurant_id: &str,
    recipe_ids: &[String],
) -> Result<u64, ModelError> {
    let rows: Vec<ActiveModel> = recipe_ids.iter().map(|id| new_link(restaurant_id, id)).collect();
    if rows.is_empty() {
        return Ok(0);
    }
    let written = Entity::insert_many(rows).exec_without_returning(db).await?;
    Ok(written)
}

pub async fn unlink<C: ConnectionTrait>(
    db: &C,
    restaurant_id: &str,
    recipe_id: &str,
) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::RestaurantId.eq(restaurant_id))
        .filter(Column::RecipeId.eq(recipe_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
