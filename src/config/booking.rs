//! Booking hand-off configuration

use serde::Deserialize;
use url::Url;

use super::error::ValidationError;
use crate::ports::Attribution;

/// Where complete searches are sent for booking
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BookingConfig {
    /// Base URL of the booking site search page
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Referral marker appended to every booking link
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Generate the booking link as soon as a search is complete
    #[serde(default = "default_auto_generate")]
    pub auto_generate: bool,
}

impl BookingConfig {
    /// Attribution marker for booking links
    pub fn attribution(&self) -> Attribution {
        Attribution::new(self.attribution.clone())
    }

    /// Validate booking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ValidationError::InvalidBookingUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidBookingUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if self.attribution.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BOOKING__ATTRIBUTION"));
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            attribution: default_attribution(),
            auto_generate: default_auto_generate(),
        }
    }
}

fn default_base_url() -> String {
    "https://flights.example.com/search".to_string()
}

fn default_attribution() -> String {
    "flight-concierge".to_string()
}

fn default_auto_generate() -> bool {
    true
}
