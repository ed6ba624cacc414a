use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("Operator with this email or identification already exists")]
    Conflict,
    #[error("operator not found")]
    NotFound,
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::InvalidToken(_) => 1005,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(err: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        use sea_orm::SqlErr;
        match err {
            ModelError::Validation(msg) => AuthError::Validation(msg),
            ModelError::Db(db) => match db.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::Conflict,
                _ => AuthError::Repository(db.to_string()),
            },
        }
    }
}
