use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use models::operator::NewOperator;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, Claims, LoginInput, OperatorProfile, OperatorSummary, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub password_algorithm: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::hours(token_ttl_hours),
            password_algorithm: password::PASSWORD_ALGORITHM.into(),
        }
    }
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self::new(cfg.jwt_secret.clone(), cfg.token_ttl_hours)
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new operator with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::new("secret", 12));
    /// let input = RegisterInput {
    ///     name: "Ana".into(),
    ///     email: "ana@example.com".into(),
    ///     phone: None,
    ///     identification: "0912345678".into(),
    ///     password: "Secret123".into(),
    /// };
    /// let op = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(op.email, "ana@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<OperatorProfile, AuthError> {
        let new_operator = NewOperator {
            name: input.name,
            email: input.email.trim().to_string(),
            phone: input.phone,
            identification: input.identification.trim().to_string(),
        };
        new_operator.validate()?;
        password::validate_password(&input.password)?;

        if self.repo.operator_exists(&new_operator.email, &new_operator.identification).await? {
            debug!("operator exists: {}", new_operator.email);
            return Err(AuthError::Conflict);
        }

        let hash = password::hash_password(&input.password)?;
        let operator = self
            .repo
            .create_operator(new_operator, hash, self.cfg.password_algorithm.clone())
            .await?;
        info!(operator_id = %operator.id, email = %operator.email, "operator_registered");
        Ok(operator)
    }

    /// Authenticate an operator and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::new("secret", 12));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     name: "N".into(), email: "u@e.com".into(), phone: None,
    ///     identification: "0102".into(), password: "Passw0rd".into(),
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.operator.email, "u@e.com");
    /// assert!(!session.access_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let operator = self
            .repo
            .find_operator_by_email(input.email.trim())
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self
            .repo
            .get_credentials(&operator.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !password::verify_password(&input.password, &cred.password_hash)? {
            warn!(operator_id = %operator.id, "login_rejected");
            return Err(AuthError::Unauthorized);
        }

        let access_token = self.issue_token(&operator)?;
        info!(operator_id = %operator.id, "operator_logged_in");
        Ok(AuthSession { access_token, operator: OperatorSummary::from(&operator) })
    }

    /// Profile of the operator behind a verified token. A deleted operator is
    /// reported as unauthorized.
    #[instrument(skip(self))]
    pub async fn profile(&self, operator_id: &str) -> Result<OperatorProfile, AuthError> {
        self.repo
            .find_operator_by_id(operator_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }

    pub fn issue_token(&self, operator: &OperatorProfile) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: operator.id.clone(),
            email: operator.email.clone(),
            identification: operator.identification.clone(),
            iat: now.timestamp(),
            exp: (now + self.cfg.token_ttl).timestamp(),
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Checks signature and expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}
