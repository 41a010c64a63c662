//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FLIGHT_CONCIERGE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use flight_concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Extracting with {}", config.extraction.model);
//! ```

mod booking;
mod error;
mod extraction;
mod logging;
mod search;

pub use booking::BookingConfig;
pub use error::{ConfigError, ValidationError};
pub use extraction::ExtractionConfig;
pub use logging::{init_tracing, LoggingConfig};
pub use search::SearchConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Language-model extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Date rules for search validation
    #[serde(default)]
    pub search: SearchConfig,

    /// Booking hand-off settings
    #[serde(default)]
    pub booking: BookingConfig,

    /// Tracing output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FLIGHT_CONCIERGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FLIGHT_CONCIERGE__EXTRACTION__MODEL=gpt-4o` -> `extraction.model = "gpt-4o"`
    /// - `FLIGHT_CONCIERGE__SEARCH__MIN_ADVANCE_DAYS=7` -> `search.min_advance_days = 7`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FLIGHT_CONCIERGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
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
        self.extraction.validate()?;
        self.search.validate()?;
        self.booking.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "FLIGHT_CONCIERGE__EXTRACTION__MODEL",
        "FLIGHT_CONCIERGE__EXTRACTION__HONOR_EXPLICIT_ZERO_COUNTS",
        "FLIGHT_CONCIERGE__SEARCH__MIN_ADVANCE_DAYS",
        "FLIGHT_CONCIERGE__BOOKING__AUTO_GENERATE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.extraction.model, "gpt-4o-mini");
        assert_eq!(config.search.min_advance_days, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FLIGHT_CONCIERGE__EXTRACTION__MODEL", "gpt-4o");
        env::set_var("FLIGHT_CONCIERGE__EXTRACTION__HONOR_EXPLICIT_ZERO_COUNTS", "true");
        env::set_var("FLIGHT_CONCIERGE__SEARCH__MIN_ADVANCE_DAYS", "7");
        env::set_var("FLIGHT_CONCIERGE__BOOKING__AUTO_GENERATE", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.extraction.model, "gpt-4o");
        assert!(config.extraction.honor_explicit_zero_counts);
        assert_eq!(config.search.min_advance_days, 7);
        assert!(!config.booking.auto_generate);
    }

    #[test]
    fn test_validate_reports_first_bad_section() {
        let config = AppConfig {
            search: SearchConfig { min_advance_days: -3 },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::NegativeAdvanceDays(-3))
        );
    }
}
