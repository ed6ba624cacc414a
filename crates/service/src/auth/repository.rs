use async_trait::async_trait;
use models::operator::NewOperator;

use super::domain::{Credentials, OperatorProfile};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_operator_by_email(&self, email: &str) -> Result<Option<OperatorProfile>, AuthError>;
    async fn find_operator_by_id(&self, id: &str) -> Result<Option<OperatorProfile>, AuthError>;
    /// `true` when another operator already uses the email or identification.
    async fn operator_exists(&self, email: &str, identification: &str) -> Result<bool, AuthError>;

    /// Creates the operator and its credentials together; neither row exists
    /// if either insert fails.
    async fn create_operator(
        &self,
        input: NewOperator,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<OperatorProfile, AuthError>;

    async fn get_credentials(&self, operator_id: &str) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        operators: Mutex<HashMap<String, OperatorProfile>>, // key: operator id
        creds: Mutex<HashMap<String, Credentials>>,         // key: operator id
    }

    fn poisoned<T>(_: T) -> AuthError {
        AuthError::Repository("mock repository lock poisoned".into())
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_operator_by_email(&self, email: &str) -> Result<Option<OperatorProfile>, AuthError> {
            let ops = self.operators.lock().map_err(poisoned)?;
            Ok(ops.values().find(|o| o.email == email).cloned())
        }

        async fn find_operator_by_id(&self, id: &str) -> Result<Option<OperatorProfile>, AuthError> {
            let ops = self.operators.lock().map_err(poisoned)?;
            Ok(ops.get(id).cloned())
        }

        async fn operator_exists(&self, email: &str, identification: &str) -> Result<bool, AuthError> {
            let ops = self.operators.lock().map_err(poisoned)?;
            Ok(ops.values().any(|o| o.email == email || o.identification == identification))
        }

        async fn create_operator(
            &self,
            input: NewOperator,
            password_hash: String,
            password_algorithm: String,
        ) -> Result<OperatorProfile, AuthError> {
            input.validate()?;
            let mut ops = self.operators.lock().map_err(poisoned)?;
            if ops.values().any(|o| o.email == input.email || o.identification == input.identification) {
                return Err(AuthError::Conflict);
            }
            let now = chrono::Utc::now().fixed_offset();
            let profile = OperatorProfile {
                id: uuid::Uuid::new_v4().to_string(),
                name: input.name,
                email: input.email,
                phone: input.phone,
                identification: input.identification,
                created_at: now,
                updated_at: now,
            };
            ops.insert(profile.id.clone(), profile.clone());
            let c = Credentials { operator_id: profile.id.clone(), password_hash, password_algorithm };
            self.creds.lock().map_err(poisoned)?.insert(profile.id.clone(), c);
            Ok(profile)
        }

        async fn get_credentials(&self, operator_id: &str) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().map_err(poisoned)?;
            Ok(creds.get(operator_id).cloned())
        }
    }
}
