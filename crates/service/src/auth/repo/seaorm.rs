use models::operator::NewOperator;
use models::{operator, operator_credentials};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    TransactionError, TransactionTrait,
};

use crate::auth::domain::{Credentials, OperatorProfile};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn repo_err(e: sea_orm::DbErr) -> AuthError {
    AuthError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_operator_by_email(&self, email: &str) -> Result<Option<OperatorProfile>, AuthError> {
        let res = operator::find_by_email(&self.db, email).await?;
        Ok(res.map(OperatorProfile::from))
    }

    async fn find_operator_by_id(&self, id: &str) -> Result<Option<OperatorProfile>, AuthError> {
        let res = operator::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(res.map(OperatorProfile::from))
    }

    async fn operator_exists(&self, email: &str, identification: &str) -> Result<bool, AuthError> {
        let n = operator::Entity::find()
            .filter(
                Condition::any()
                    .add(operator::Column::Email.eq(email.trim()))
                    .add(operator::Column::Identification.eq(identification.trim())),
            )
            .count(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(n > 0)
    }

    async fn create_operator(
        &self,
        input: NewOperator,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<OperatorProfile, AuthError> {
        let created = self
            .db
            .transaction::<_, operator::Model, AuthError>(|txn| {
                Box::pin(async move {
                    let op = operator::create(txn, input).await?;
                    operator_credentials::upsert_password(txn, &op.id, password_hash, &password_algorithm)
                        .await?;
                    Ok(op)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db) => repo_err(db),
                TransactionError::Transaction(inner) => inner,
            })?;
        Ok(created.into())
    }

    async fn get_credentials(&self, operator_id: &str) -> Result<Option<Credentials>, AuthError> {
        let res = operator_credentials::find_for_operator(&self.db, operator_id).await?;
        Ok(res.map(|c| Credentials {
            operator_id: c.operator_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }
}
