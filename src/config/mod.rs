//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `RECOVERY_COMPANION`
//! prefix and `__` between nested keys. Every section has defaults, so an
//! empty environment yields a runnable configuration.
//!
//! # Example
//!
//! ```no_run
//! use recovery_companion::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod detection;
mod error;
mod features;
mod notifications;
mod server;

pub use detection::DetectionConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use notifications::NotificationConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Risk detection thresholds
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Intervention notifier and dispatcher
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RECOVERY_COMPANION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `RECOVERY_COMPANION__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RECOVERY_COMPANION__DETECTION__CRAVING_HIGH_THRESHOLD=8`
    ///   -> `detection.craving_high_threshold = 8`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RECOVERY_COMPANION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.detection.validate()?;
        self.notifications.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
