//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory repositories for conversations and search parameters
//! - `ai` - Parameter extraction through a completion provider, plus test doubles
//! - `booking` - Booking link generation

pub mod ai;
pub mod booking;
pub mod memory;

pub use ai::{LlmParameterExtractor, MockCompletionProvider, ScriptedExtractor};
pub use booking::QueryStringBookingUrlGenerator;
pub use memory::{InMemoryConversationRepository, InMemorySearchParametersRepository};
