//! Mock completion provider for testing.
//!
//! Returns queued replies or errors in order and records every request,
//! so extraction can be exercised without calling a real model.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockCompletionProvider::new()
//!     .with_response(r#"{"origin_code": "SYD"}"#)
//!     .with_error(ProviderError::network("connection reset"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompletionProvider, CompletionRequest, CompletionResponse, ProviderError};

/// Reply used once the queue is exhausted: an empty extraction.
const DEFAULT_REPLY: &str = "{}";

/// Mock completion provider.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionProvider {
    responses: Arc<Mutex<VecDeque<Result<String, ProviderError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        locked(&self.responses).push_back(Ok(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ProviderError) -> Self {
        locked(&self.responses).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns all recorded requests.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        locked(&self.calls).clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let model = request.model.clone();
        locked(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = locked(&self.responses).pop_front();
        match next {
            Some(Ok(content)) => Ok(CompletionResponse::new(content, model)),
            Some(Err(err)) => Err(err),
            None => Ok(CompletionResponse::new(DEFAULT_REPLY, model)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
