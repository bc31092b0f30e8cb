//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// JSON file holding the user accounts
    pub users_file: String,
    /// Log level
    pub log_level: String,
    /// Load the demo claims for the default lecturer at start-up
    pub seed_demo_claims: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            users_file: "data/users.json".to_string(),
            log_level: "info".to_string(),
            seed_demo_claims: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset variables take their default value.
    pub fn from_env() -> Result<Self, CoreError> {
        let defaults = Self::default();
        let config: Self = config::Config::builder()
            .set_default("host", defaults.host)
            .and_then(|b| b.set_default("port", defaults.port as i64))
            .and_then(|b| b.set_default("jwt_secret", defaults.jwt_secret))
            .and_then(|b| b.set_default("jwt_expiration_secs", defaults.jwt_expiration_secs as i64))
            .and_then(|b| b.set_default("users_file", defaults.users_file))
            .and_then(|b| b.set_default("log_level", defaults.log_level))
            .and_then(|b| b.set_default("seed_demo_claims", defaults.seed_demo_claims))
            .map_err(|e| CoreError::configuration(e.to_string()))?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(CoreError::validation("jwt_secret must not be empty"));
        }
        if self.jwt_expiration_secs == 0 {
            return Err(CoreError::validation("jwt_expiration_secs must be positive"));
        }
        if self.users_file.trim().is_empty() {
            return Err(CoreError::validation("users_file must not be empty"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
