//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Minimum length of the token signing secret.
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub assets_dir: String,
    /// Secret used to sign bearer tokens. Has no default; provide it through
    /// `APP_SECRET`.
    pub secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    /// Reads `config/default.yaml`, then the `config/{APP_ENV}.yaml` profile
    /// (defaults to `local`), then `APP_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            // Add `./config/default.yaml`
            .add_source(File::with_name("config/default"))
            // Add environment-specific overrides
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            // Add settings from the environment (with a prefix of APP)
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize::<ServerConfig>()?
            .validate()
    }

    /// Refuses to run with a missing or short token signing secret.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.secret.trim().len() < MIN_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "secret must be at least {MIN_SECRET_LEN} characters, set APP_SECRET"
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".into(),
            port: 8080,
            database_url: "app.db".into(),
            templates_dir: "./templates/**/*".into(),
            assets_dir: "./assets".into(),
            secret: secret.into(),
            token_ttl_hours: 24,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn short_secrets_are_rejected() {
        assert!(config_with_secret("").validate().is_err());
        assert!(config_with_secret("   hunter2   ").validate().is_err());
    }

    #[test]
    fn long_secrets_are_accepted() {
        let secret = "k".repeat(MIN_SECRET_LEN);
        let config = config_with_secret(&secret).validate().unwrap();
        assert_eq!(config.secret, secret);
    }
}
