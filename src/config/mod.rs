//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ROLE_MAP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use role_map::config::AppConfig;
//!
//! # fn main() -> Result<(), role_map::config::ConfigError> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! println!("Server running on {}", config.server.socket_addr()?);
//! # Ok(())
//! # }
//! ```

mod error;
mod platform;
mod server;

pub use error::{ConfigError, ValidationError};
pub use platform::PlatformConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Host platform seed (default role, role catalog, membership roles)
    #[serde(default)]
    pub platform: PlatformConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ROLE_MAP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ROLE_MAP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ROLE_MAP__PLATFORM__DEFAULT_ROLE=subscriber` -> `platform.default_role = "subscriber"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ROLE_MAP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.platform.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ROLE_MAP__SERVER__PORT",
        "ROLE_MAP__SERVER__ENVIRONMENT",
        "ROLE_MAP__PLATFORM__DEFAULT_ROLE",
        "ROLE_MAP__PLATFORM__MEMBERSHIP_ROLES",
        "ROLE_MAP__PLATFORM__SEED_CATALOG",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.platform.default_role, "subscriber");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_platform_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ROLE_MAP__PLATFORM__DEFAULT_ROLE", "member");
        env::set_var("ROLE_MAP__PLATFORM__MEMBERSHIP_ROLES", "gold,silver");
        env::set_var("ROLE_MAP__PLATFORM__SEED_CATALOG", "member:Member,gold:Gold,silver:Silver");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.platform.default_role, "member");
        assert_eq!(config.platform.membership_roles.as_deref(), Some("gold,silver"));
        assert_eq!(config.platform.catalog_roles().unwrap().len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ROLE_MAP__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ROLE_MAP__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_validate_rejects_bad_platform_section() {
        let config = AppConfig {
            platform: PlatformConfig {
                seed_catalog: Some("broken".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
