//! Conversation repository port.
//!
//! Persists conversations with their messages, phase and booking link.

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError};
use async_trait::async_trait;

/// Repository port for conversation persistence.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Save a new conversation.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the id is taken or on persistence failure
    async fn save(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Update phase and booking link of an existing conversation.
    ///
    /// Does NOT update messages (use `add_message` for that).
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if conversation doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Append a message to a conversation.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if conversation doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn add_message(
        &self,
        conversation_id: &ConversationId,
        message: &Message,
    ) -> Result<(), DomainError>;

    /// Find a conversation by its ID, including all messages.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError>;

    /// Delete a conversation.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if conversation doesn't exist
    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError>;
}
