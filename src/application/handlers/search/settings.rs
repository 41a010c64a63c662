//! Settings shared by the search handlers.

use crate::config::{AppConfig, SearchConfig};
use crate::domain::search::{MergeOptions, ValidationContext};
use crate::ports::Attribution;

/// Policy knobs the handlers need, injected at construction.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub merge: MergeOptions,
    pub search: SearchConfig,
    pub attribution: Attribution,
    /// Generate the booking link as soon as a search is complete.
    pub auto_generate_booking: bool,
}

impl SearchSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            merge: config.extraction.merge_options(),
            search: config.search.clone(),
            attribution: config.booking.attribution(),
            auto_generate_booking: config.booking.auto_generate,
        }
    }

    /// Validation context for the current instant.
    pub fn validation_context(&self) -> ValidationContext {
        self.search.validation_context()
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
