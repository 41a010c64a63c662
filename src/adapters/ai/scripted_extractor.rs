//! Extractor that replays pre-recorded extractions.
//!
//! Drives conversations in tests and in the transcript replay tool, where
//! the extraction for each message is already known.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::conversation::Message;
use crate::domain::search::{ExtractedParameters, ExtractionError, SearchParameters};
use crate::ports::ParameterExtractor;

/// Returns queued extraction results in order, then empty extractions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExtractor {
    script: Arc<Mutex<VecDeque<Result<ExtractedParameters, ExtractionError>>>>,
    seen: Arc<Mutex<Vec<String>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an extraction.
    pub fn with_extraction(self, extracted: ExtractedParameters) -> Self {
        self.push(extracted);
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: ExtractionError) -> Self {
        self.push_error(error);
        self
    }

    /// Queues an extraction on a shared handle.
    pub fn push(&self, extracted: ExtractedParameters) {
        locked(&self.script).push_back(Ok(extracted));
    }

    /// Queues a failure on a shared handle.
    pub fn push_error(&self, error: ExtractionError) {
        locked(&self.script).push_back(Err(error));
    }

    /// Messages extracted so far.
    pub fn seen_messages(&self) -> Vec<String> {
        locked(&self.seen).clone()
    }
}

#[async_trait]
impl ParameterExtractor for ScriptedExtractor {
    async fn extract(
        &self,
        message: &str,
        _history: &[Message],
        _current: &SearchParameters,
    ) -> Result<ExtractedParameters, ExtractionError> {
        locked(&self.seen).push(message.to_string());
        locked(&self.script)
            .pop_front()
            .unwrap_or_else(|| Ok(ExtractedParameters::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ProviderError;
    use serde_json::json;

    #[tokio::test]
    async fn replays_script_then_returns_empty() {
        let scripted = ExtractedParameters::from_json(&json!({"origin_code": "SYD"}));
        let extractor = ScriptedExtractor::new().with_extraction(scripted.clone());
        let current = SearchParameters::empty();

        let first = extractor.extract("From Sydney", &[], &current).await.unwrap();
        let second = extractor.extract("Hmm", &[], &current).await.unwrap();

        assert_eq!(first, scripted);
        assert!(second.is_empty());
        assert_eq!(extractor.seen_messages(), vec!["From Sydney", "Hmm"]);
    }

    #[tokio::test]
    async fn replays_errors() {
        let extractor =
            ScriptedExtractor::new().with_error(ExtractionError::Provider(ProviderError::unavailable("down")));
        let result = extractor.extract("hi", &[], &SearchParameters::empty()).await;
        assert_eq!(result, Err(ExtractionError::Provider(ProviderError::unavailable("down"))));
    }
}
