use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// Accounts loaded into the in-memory user store at startup
    #[serde(default)]
    pub users: Vec<SeedUserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_minutes: i64,
}

impl JwtConfig {
    /// Upper bound for access token lifetimes (one week)
    pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

    /// Access token lifetime, checked to be positive and at most one week.
    ///
    /// # Errors
    /// * `Message` - TTL is out of range
    pub fn access_token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if !(1..=Self::MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&self.access_token_ttl_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_minutes must be between 1 and {}, got {}",
                Self::MAX_ACCESS_TOKEN_TTL_MINUTES,
                self.access_token_ttl_minutes
            )));
        }

        Ok(chrono::Duration::minutes(self.access_token_ttl_minutes))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedUserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.jwt.access_token_ttl()?;

        Ok(config)
    }
}
