//! In-memory conversation repository.
//!
//! Useful for tests, the replay tool and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::ConversationRepository;

/// Conversations held in a shared map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub async fn count(&self) -> usize {
        self.conversations.read().await.len()
    }
}

fn not_found(id: &ConversationId) -> DomainError {
    DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
        .with_detail("conversation_id", id.to_string())
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut conversations = self.conversations.write().await;
        if conversations.contains_key(&conversation.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Conversation already exists",
            )
            .with_detail("conversation_id", conversation.id().to_string()));
        }
        conversations.insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut conversations = self.conversations.write().await;
        let stored = conversations
            .get_mut(&conversation.id())
            .ok_or_else(|| not_found(&conversation.id()))?;

        // Messages are owned by add_message
        *stored = Conversation::reconstitute(
            conversation.id(),
            conversation.phase(),
            conversation.booking_url().map(str::to_string),
            stored.messages().to_vec(),
            stored.created_at(),
            conversation.updated_at(),
        );
        Ok(())
    }

    async fn add_message(
        &self,
        conversation_id: &ConversationId,
        message: &Message,
    ) -> Result<(), DomainError> {
        let mut conversations = self.conversations.write().await;
        let stored = conversations
            .get_mut(conversation_id)
            .ok_or_else(|| not_found(conversation_id))?;
        stored.add_message(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError> {
        self.conversations
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
