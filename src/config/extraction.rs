//! Parameter extraction configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::search::MergeOptions;

/// Settings for the language-model extraction call and the merge that
/// consumes its output
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    /// Model identifier sent to the completion provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in the model reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Apply an extracted zero for children or infants
    #[serde(default)]
    pub honor_explicit_zero_counts: bool,
}

impl ExtractionConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Merge options derived from this configuration
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            honor_explicit_zero_counts: self.honor_explicit_zero_counts,
        }
    }

    /// Validate extraction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("EXTRACTION__MODEL"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(self.temperature));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            honor_explicit_zero_counts: false,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout() -> u64 {
    30
}
