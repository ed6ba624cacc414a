use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::operator;

/// Never serialized: hashes stay inside the service layer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "operator_credentials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub operator_id: String,
    pub password_hash: String,
    pub password_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Operator,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Operator => Entity::belongs_to(operator::Entity)
                .from(Column::OperatorId)
                .to(operator::Column::Id)
                .into(),
        }
    }
}

impl Related<operator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_for_operator<C: ConnectionTrait>(
    db: &C,
    operator_id: &str,
) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::OperatorId.eq(operator_id))
        .one(db)
        .await?)
}

pub async fn upsert_password<C: ConnectionTrait>(
    db: &C,
    operator_id: &str,
    password_hash: String,
    algorithm: &str,
) -> Result<Model, ModelError> {
    if password_hash.trim().is_empty() {
        return Err(ModelError::validation("password hash required"));
    }
    let now = Utc::now().into();
    if let Some(existing) = find_for_operator(db, operator_id).await? {
        let mut am: ActiveModel = existing.into();
        am.password_hash = Set(password_hash);
        am.password_algorithm = Set(algorithm.to_string());
        am.updated_at = Set(now);
        Ok(am.update(db).await?)
    } else {
        let am = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            operator_id: Set(operator_id.to_string()),
            password_hash: Set(password_hash),
            password_algorithm: Set(algorithm.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(am.insert(db).await?)
    }
}
