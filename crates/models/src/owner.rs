use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{restaurant, validation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owner")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Restaurant,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Restaurant => Entity::has_many(restaurant::Entity).into(),
        }
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewOwner {
    pub fn validate(&self) -> Result<(), ModelError> {
        validation::require_non_empty("owner.name", &self.name)?;
        validation::validate_email("owner.email", &self.email)
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl OwnerChanges {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            validation::require_non_empty("owner.name", name)?;
        }
        if let Some(email) = &self.email {
            validation::validate_email("owner.email", email)?;
        }
        Ok(())
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewOwner) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(input.name.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        phone: Set(validation::optional(input.phone)),
        address: Set(validation::optional(input.address)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    changes: OwnerChanges,
) -> Result<Model, ModelError> {
    changes.validate()?;
    let mut am: ActiveModel = existing.into();
    if let Some(name) = changes.name {
        am.name = Set(name.trim().to_string());
    }
    if let Some(email) = changes.email {
        am.email = Set(email.trim().to_string());
    }
    if changes.phone.is_some() {
        am.phone = Set(validation::optional(changes.phone));
    }
    if changes.address.is_some() {
        am.address = Set(validation::optional(changes.address));
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}
