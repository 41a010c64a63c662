//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ConversationRepository` - Conversations, messages, phase and booking link
//! - `SearchParametersRepository` - Per-conversation search record with atomic segment replacement
//!
//! ## Collaborator Ports
//!
//! - `ParameterExtractor` - Free text to partial trip parameters
//! - `CompletionProvider` - Chat-completion access used by the LLM extractor
//! - `BookingUrlGenerator` - Booking hand-off links for complete searches

mod booking_url_generator;
mod completion_provider;
mod conversation_repository;
mod parameter_extractor;
mod search_parameters_repository;

pub use booking_url_generator::{Attribution, BookingUrlError, BookingUrlGenerator};
pub use completion_provider::{
    ChatMessage, CompletionProvider, CompletionRequest, CompletionResponse, ProviderError,
};
pub use conversation_repository::ConversationRepository;
pub use parameter_extractor::ParameterExtractor;
pub use search_parameters_repository::SearchParametersRepository;
