use std::env;
use std::time::Duration as StdDuration;

use auth::SigningAlgorithm;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;

/// Longest accepted token lifetime (366 days).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 366 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub apps: Vec<AppConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Deadline applied to every request, in milliseconds.
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_seconds: i64,
    pub algorithm: SigningAlgorithm,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Application registered at startup.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub id: i32,
    pub name: String,
    pub secret: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl From<&AppConfig> for App {
    fn from(app: &AppConfig) -> Self {
        Self {
            id: AppId(app.id),
            name: app.name.clone(),
            secret: app.secret.as_bytes().to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__TTL_SECONDS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__TTL_SECONDS=600 overrides token.ttl_seconds
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&self.token.ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must be between 1 and {}",
                MAX_TOKEN_TTL_SECONDS
            )));
        }
        if let Some(app) = self.apps.iter().find(|app| app.secret.is_empty()) {
            return Err(ConfigError::Message(format!(
                "app {} has an empty secret",
                app.id
            )));
        }
        Ok(())
    }

    /// Token lifetime, clamped to the range `validate` enforces.
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token.ttl_seconds.clamp(1, MAX_TOKEN_TTL_SECONDS))
    }

    pub fn request_timeout(&self) -> StdDuration {
        StdDuration::from_millis(self.server.request_timeout_ms)
    }
}
