//! Parameter extraction port.
//!
//! Turns one user message into a best-effort partial set of trip
//! parameters. The result may be empty and is never assumed valid.

use async_trait::async_trait;

use crate::domain::conversation::Message;
use crate::domain::search::{ExtractedParameters, ExtractionError, SearchParameters};

/// Port for extracting trip parameters from free text.
#[async_trait]
pub trait ParameterExtractor: Send + Sync {
    /// Extract whatever parameters `message` mentions.
    ///
    /// `history` holds earlier messages, oldest first, excluding `message`.
    /// `current` is the stored record before this turn.
    ///
    /// # Errors
    ///
    /// Collaborator failures are returned unmodified; the caller decides
    /// whether to retry.
    async fn extract(
        &self,
        message: &str,
        history: &[Message],
        current: &SearchParameters,
    ) -> Result<ExtractedParameters, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_extractor_is_object_safe() {
        fn _accepts_dyn(_extractor: &dyn ParameterExtractor) {}
    }
}
