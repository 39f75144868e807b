//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLINIC_RELAY` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use clinic_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod engine;
mod error;
mod reasoner;
mod server;

pub use engine::EngineLimits;
pub use error::{ConfigError, ValidationError};
pub use reasoner::{ReasonerConfig, ReasonerProvider};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Reasoner provider configuration
    #[serde(default)]
    pub reasoner: ReasonerConfig,

    /// Reconciliation engine limits
    #[serde(default)]
    pub engine: EngineLimits,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `CLINIC_RELAY` prefix, e.g.
    /// `CLINIC_RELAY__SERVER__PORT=8080` -> `server.port = 8080`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLINIC_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.reasoner.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_without_reasoner_key() {
        // Engine and server defaults are fine; only the reasoner key is required.
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NoReasonerConfigured)
        ));
    }

    #[test]
    fn config_with_key_validates() {
        let config = AppConfig {
            reasoner: ReasonerConfig {
                anthropic_api_key: Some("sk-ant-xxx".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
