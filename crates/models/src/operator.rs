use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{operator_credentials, validation};

/// Registry staff account. Password material lives in `operator_credentials`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operator")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub identification: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Credentials,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Credentials => Entity::has_one(operator_credentials::Entity).into(),
        }
    }
}

impl Related<operator_credentials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credentials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default)]
pub struct NewOperator {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub identification: String,
}

impl NewOperator {
    pub fn validate(&self) -> Result<(), ModelError> {
        validation::require_non_empty("operator.name", &self.name)?;
        validation::validate_email("operator.email", &self.email)?;
        validation::require_non_empty("operator.identification", &self.identification)
    }
}

#[derive(Clone, Debug, Default)]
pub struct OperatorChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub identification: Option<String>,
}

impl OperatorChanges {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            validation::require_non_empty("operator.name", name)?;
        }
        if let Some(email) = &self.email {
            validation::validate_email("operator.email", email)?;
        }
        if let Some(identification) = &self.identification {
            validation::require_non_empty("operator.identification", identification)?;
        }
        Ok(())
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewOperator) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(input.name.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        phone: Set(validation::optional(input.phone)),
        identification: Set(input.identification.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email.trim())).one(db).await?)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    changes: OperatorChanges,
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
    if let Some(identification) = changes.identification {
        am.identification = Set(identification.trim().to_string());
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}
