//! Operator administration. Creation goes through
//! [`crate::auth::AuthService::register`] so every account has credentials.

use models::operator::{self, OperatorChanges};
use models::operator_credentials;
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::auth::domain::OperatorProfile;
use crate::auth::password;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub identification: Option<String>,
    pub password: Option<String>,
}

async fn find_operator(db: &DatabaseConnection, id: &str) -> Result<operator::Model, ServiceError> {
    operator::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("operator"))
}

pub async fn list_operators(db: &DatabaseConnection) -> Result<Vec<OperatorProfile>, ServiceError> {
    let all = operator::Entity::find().order_by_asc(operator::Column::CreatedAt).all(db).await?;
    Ok(all.into_iter().map(OperatorProfile::from).collect())
}

pub async fn get_operator(db: &DatabaseConnection, id: &str) -> Result<OperatorProfile, ServiceError> {
    Ok(find_operator(db, id).await?.into())
}

/// Applies profile changes and, when a new password is given, replaces the
/// stored hash in the same transaction.
#[instrument(skip(db, update))]
pub async fn update_operator(
    db: &DatabaseConnection,
    id: &str,
    update: OperatorUpdate,
) -> Result<OperatorProfile, ServiceError> {
    let existing = find_operator(db, id).await?;
    let new_hash = match update.password.as_deref() {
        Some(pw) => {
            password::validate_password(pw)?;
            Some(password::hash_password(pw)?)
        }
        None => None,
    };
    let changes = OperatorChanges {
        name: update.name,
        email: update.email,
        phone: update.phone,
        identification: update.identification,
    };
    changes.validate()?;

    let updated = db
        .transaction::<_, operator::Model, ServiceError>(|txn| {
            Box::pin(async move {
                let updated = operator::update(txn, existing, changes).await?;
                if let Some(hash) = new_hash {
                    operator_credentials::upsert_password(txn, &updated.id, hash, password::PASSWORD_ALGORITHM)
                        .await?;
                }
                Ok(updated)
            })
        })
        .await?;
    info!(operator_id = %updated.id, "operator_updated");
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_operator(db: &DatabaseConnection, id: &str) -> Result<OperatorProfile, ServiceError> {
    let existing = find_operator(db, id).await?;
    existing.clone().delete(db).await?;
    info!(operator_id = %existing.id, "operator_deleted");
    Ok(existing.into())
}
