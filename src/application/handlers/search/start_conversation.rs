//! StartConversationHandler - Opens a new flight search conversation.
//!
//! Creates the conversation together with its empty search record and
//! greets the user with the first clarification question.

use std::sync::Arc;

use crate::domain::conversation::{clarification_prompt, Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError};
use crate::domain::search::{RequiredField, SearchParameters};
use crate::ports::{ConversationRepository, SearchParametersRepository};

const GREETING: &str = "Hi! I can help you find flights.";

/// Command to start a conversation.
#[derive(Debug, Clone, Default)]
pub struct StartConversationCommand {
    /// Caller-chosen id, e.g. when replaying a transcript.
    pub conversation_id: Option<ConversationId>,
}

/// Result of starting a conversation.
#[derive(Debug, Clone)]
pub struct StartConversationResult {
    pub conversation: Conversation,
    pub parameters: SearchParameters,
    pub greeting: String,
}

/// Handler for starting conversations.
pub struct StartConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
    parameters: Arc<dyn SearchParametersRepository>,
}

impl StartConversationHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        parameters: Arc<dyn SearchParametersRepository>,
    ) -> Self {
        Self {
            conversations,
            parameters,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartConversationCommand,
    ) -> Result<StartConversationResult, DomainError> {
        let mut conversation = match cmd.conversation_id {
            Some(id) => Conversation::with_id(id),
            None => Conversation::new(),
        };
        let parameters = SearchParameters::empty();

        let greeting = format!(
            "{} {}",
            GREETING,
            clarification_prompt(RequiredField::Origin).text()
        );
        conversation.add_message(Message::assistant(greeting.clone())?);

        self.conversations.save(&conversation).await?;
        self.parameters.create(&conversation.id(), &parameters).await?;

        tracing::info!(conversation_id = %conversation.id(), "Conversation started");

        Ok(StartConversationResult {
            conversation,
            parameters,
            greeting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryConversationRepository, InMemorySearchParametersRepository};
    use crate::domain::conversation::{ConversationPhase, MessageRole};
    use crate::domain::foundation::ErrorCode;

    fn handler() -> (
        StartConversationHandler,
        Arc<InMemoryConversationRepository>,
        Arc<InMemorySearchParametersRepository>,
    ) {
        let conversations = Arc::new(InMemoryConversationRepository::new());
        let parameters = Arc::new(InMemorySearchParametersRepository::new());
        (
            StartConversationHandler::new(conversations.clone(), parameters.clone()),
            conversations,
            parameters,
        )
    }

    #[tokio::test]
    async fn creates_conversation_and_empty_record() {
        let (handler, conversations, parameters) = handler();

        let result = handler.handle(StartConversationCommand::default()).await.unwrap();
        let id = result.conversation.id();

        let stored = conversations.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.phase(), ConversationPhase::Collecting);
        assert_eq!(stored.messages().len(), 1);
        assert_eq!(stored.messages()[0].role(), MessageRole::Assistant);

        let record = parameters.find(&id).await.unwrap().unwrap();
        assert_eq!(record, SearchParameters::empty());
    }

    #[tokio::test]
    async fn greeting_asks_for_origin() {
        let (handler, _, _) = handler();
        let result = handler.handle(StartConversationCommand::default()).await.unwrap();
        assert!(result.greeting.contains("departure city or airport"));
    }

    #[tokio::test]
    async fn reusing_an_id_fails() {
        let (handler, _, _) = handler();
        let id = ConversationId::new();
        let cmd = StartConversationCommand {
            conversation_id: Some(id),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
