//! In-memory persistence adapters.

mod conversation_repository;
mod search_parameters_repository;

pub use conversation_repository::InMemoryConversationRepository;
pub use search_parameters_repository::InMemorySearchParametersRepository;
