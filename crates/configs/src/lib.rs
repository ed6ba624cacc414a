use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            environment: default_environment(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3300 }
fn default_environment() -> String { "development".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Token signing settings for operator sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_hours: default_token_ttl_hours() }
    }
}

fn default_token_ttl_hours() -> i64 { 12 }

/// Object storage used by the image upload endpoint. An empty bucket disables
/// uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: None,
            public_base_url: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_region() -> String { "us-east-1".into() }
fn default_max_upload_bytes() -> usize { 5 * 1024 * 1024 }

impl StorageConfig {
    pub fn is_enabled(&self) -> bool {
        !self.bucket.trim().is_empty()
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Reads `.env`, then the TOML file at `CONFIG_PATH` (or `config.toml`)
    /// when it exists, then fills the gaps from the environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok());
        self.server.normalize()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Fills values left empty by the file from `lookup`. Explicit file values
    /// win over the environment.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = non_empty("SERVER_HOST") {
            if self.server.host == default_host() {
                self.server.host = host;
            }
        }
        if self.server.port == default_port() {
            if let Some(port) = non_empty("PORT")
                .or_else(|| non_empty("SERVER_PORT"))
                .and_then(|p| p.trim().parse::<u16>().ok())
            {
                self.server.port = port;
            }
        }
        if let Some(env) = non_empty("APP_ENV") {
            if self.server.environment == default_environment() {
                self.server.environment = env;
            }
        }
        if self.database.url.trim().is_empty() {
            if let Some(url) = non_empty("DATABASE_URL") {
                self.database.url = url;
            }
        }
        if self.auth.jwt_secret.trim().is_empty() {
            if let Some(secret) = non_empty("JWT_SECRET") {
                self.auth.jwt_secret = secret;
            }
        }
        if self.storage.bucket.trim().is_empty() {
            if let Some(bucket) = non_empty("AWS_S3_BUCKET_NAME") {
                self.storage.bucket = bucket;
            }
        }
        if self.storage.region == default_region() {
            if let Some(region) = non_empty("AWS_REGION") {
                self.storage.region = region;
            }
        }
        if self.storage.endpoint.is_none() {
            self.storage.endpoint = non_empty("AWS_ENDPOINT_URL");
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.environment.trim().is_empty() {
            self.environment = default_environment();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(anyhow!("auth.token_ttl_hours must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3300);
        assert_eq!(cfg.auth.token_ttl_hours, 12);
        assert_eq!(cfg.storage.region, "us-east-1");
        assert_eq!(cfg.storage.max_upload_bytes, 5 * 1024 * 1024);
        assert!(!cfg.storage.is_enabled());
    }

    #[test]
    fn parses_partial_toml() {
        let cfg = parse(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://localhost/catastro"

            [storage]
            bucket = "catastro-images"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.max_connections, 10);
        assert!(cfg.storage.is_enabled());
        assert_eq!(cfg.auth.token_ttl_hours, 12);
    }

    #[test]
    fn env_fills_missing_values() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(env_of(&[
            ("PORT", "4000"),
            ("DATABASE_URL", "postgres://db/catastro"),
            ("JWT_SECRET", "s3cret"),
            ("AWS_S3_BUCKET_NAME", "bucket"),
            ("AWS_REGION", "sa-east-1"),
            ("APP_ENV", "production"),
        ]));
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.environment, "production");
        assert_eq!(cfg.database.url, "postgres://db/catastro");
        assert_eq!(cfg.auth.jwt_secret, "s3cret");
        assert_eq!(cfg.storage.bucket, "bucket");
        assert_eq!(cfg.storage.region, "sa-east-1");
        assert!(cfg.storage.endpoint.is_none());
    }

    #[test]
    fn file_values_win_over_env() {
        let mut cfg = parse(
            r#"
            [database]
            url = "postgres://file/catastro"
            [auth]
            jwt_secret = "from-file"
            "#,
        )
        .unwrap();
        cfg.apply_env_with(env_of(&[
            ("DATABASE_URL", "postgres://env/catastro"),
            ("JWT_SECRET", "from-env"),
        ]));
        assert_eq!(cfg.database.url, "postgres://file/catastro");
        assert_eq!(cfg.auth.jwt_secret, "from-file");
    }

    #[test]
    fn invalid_port_in_env_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(env_of(&[("PORT", "not-a-port")]));
        assert_eq!(cfg.server.port, 3300);
    }

    #[test]
    fn database_validation_rejects_bad_values() {
        let mut db = DatabaseConfig::default();
        assert!(db.validate().is_err());
        db.url = "mysql://localhost/x".into();
        assert!(db.validate().is_err());
        db.url = "postgres://localhost/x".into();
        assert!(db.validate().is_ok());
        db.max_connections = 1;
        assert!(db.validate().is_err());
    }

    #[test]
    fn auth_requires_secret() {
        let mut auth = AuthConfig::default();
        assert!(auth.validate().is_err());
        auth.jwt_secret = "secret".into();
        assert!(auth.validate().is_ok());
        auth.token_ttl_hours = 0;
        assert!(auth.validate().is_err());
    }

    #[test]
    fn server_normalize_fills_worker_threads() {
        let mut server = ServerConfig { worker_threads: Some(0), ..ServerConfig::default() };
        server.normalize().unwrap();
        assert_eq!(server.worker_threads, Some(4));
        assert_eq!(server.bind_addr(), "0.0.0.0:3300");
    }
}
