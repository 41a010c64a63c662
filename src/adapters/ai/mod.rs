//! Extraction adapters.
//!
//! ## Available Adapters
//!
//! - `LlmParameterExtractor` - Extraction through any `CompletionProvider`
//! - `MockCompletionProvider` - Queued completion replies for testing
//! - `ScriptedExtractor` - Queued extraction results for tests and transcript replay

mod llm_extractor;
mod mock_provider;
mod scripted_extractor;

pub use llm_extractor::LlmParameterExtractor;
pub use mock_provider::MockCompletionProvider;
pub use scripted_extractor::ScriptedExtractor;
