//! ProcessTurnHandler - Handles one user message in a flight search.
//!
//! A turn stores the user message, asks the extractor what the message
//! says about the trip, merges that into the stored search record and
//! settles the result (validation, persistence, phase, booking link).
//! The assistant reply is the prompt chosen by the progression decider.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::conversation::{ConversationPhase, Message, Prompt};
use crate::domain::foundation::{ConversationId, DomainError, MessageId, Percentage, ValidationError};
use crate::domain::search::{
    merge_with, ExtractionError, RequiredField, SearchParameters, SegmentIntegrityError,
    SemanticRuleViolation,
};
use crate::ports::{
    BookingUrlGenerator, ConversationRepository, ParameterExtractor, SearchParametersRepository,
};

use super::settings::SearchSettings;
use super::settle::{SettleError, Settled, Settler};

/// Command to process a user message.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    pub conversation_id: ConversationId,
    pub message: String,
}

impl ProcessTurnCommand {
    pub fn new(conversation_id: ConversationId, message: impl Into<String>) -> Self {
        Self {
            conversation_id,
            message: message.into(),
        }
    }
}

/// Errors that can occur while processing a turn.
#[derive(Debug, Clone, Error)]
pub enum ProcessTurnError {
    #[error("Validation error: message content cannot be empty")]
    EmptyMessage,

    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// The extractor failed. The user message is already stored.
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SegmentIntegrity(#[from] SegmentIntegrityError),

    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

impl From<SettleError> for ProcessTurnError {
    fn from(err: SettleError) -> Self {
        match err {
            SettleError::Validation(e) => Self::Validation(e),
            SettleError::SegmentIntegrity(e) => Self::SegmentIntegrity(e),
            SettleError::Repository(e) => Self::Repository(e),
        }
    }
}

/// What a turn produced, as reported to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub conversation_id: ConversationId,
    pub user_message_id: MessageId,
    pub assistant_message_id: MessageId,
    pub reply: String,
    pub phase: ConversationPhase,
    pub completion: Percentage,
    pub missing_fields: Vec<RequiredField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Prompt>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<SemanticRuleViolation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<SegmentIntegrityError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    pub parameters: SearchParameters,
}

/// Handler for conversation turns.
pub struct ProcessTurnHandler {
    conversations: Arc<dyn ConversationRepository>,
    parameters: Arc<dyn SearchParametersRepository>,
    extractor: Arc<dyn ParameterExtractor>,
    settler: Settler,
    settings: SearchSettings,
}

impl ProcessTurnHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        parameters: Arc<dyn SearchParametersRepository>,
        extractor: Arc<dyn ParameterExtractor>,
        booking: Arc<dyn BookingUrlGenerator>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            conversations,
            settler: Settler::new(parameters.clone(), booking, settings.clone()),
            parameters,
            extractor,
            settings,
        }
    }

    pub async fn handle(&self, cmd: ProcessTurnCommand) -> Result<TurnOutcome, ProcessTurnError> {
        if cmd.message.trim().is_empty() {
            return Err(ProcessTurnError::EmptyMessage);
        }

        // 1. Load conversation and store the user message
        let mut conversation = self
            .conversations
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or(ProcessTurnError::ConversationNotFound(cmd.conversation_id))?;

        let user_message = Message::user(cmd.message.trim())?;
        let user_message_id = *user_message.id();
        let history = conversation.messages().to_vec();
        self.conversations
            .add_message(&cmd.conversation_id, &user_message)
            .await?;
        conversation.add_message(user_message);

        // 2. Extract and merge
        let stored = self.parameters.find(&cmd.conversation_id).await?;
        let current = stored.clone().unwrap_or_else(SearchParameters::empty);
        let extracted = self
            .extractor
            .extract(&cmd.message, &history, &current)
            .await?;
        let merged = merge_with(&extracted, stored.as_ref(), self.settings.merge);

        // 3. Validate, persist, decide
        let settled = self
            .settler
            .settle(&mut conversation, stored.as_ref(), merged, &extracted)
            .await?;

        // 4. Reply
        let reply = compose_reply(&settled);
        let assistant_message = Message::assistant(reply.clone())?;
        let assistant_message_id = *assistant_message.id();
        self.conversations
            .add_message(&cmd.conversation_id, &assistant_message)
            .await?;
        conversation.add_message(assistant_message);
        self.conversations.update(&conversation).await?;

        Ok(TurnOutcome {
            conversation_id: cmd.conversation_id,
            user_message_id,
            assistant_message_id,
            reply,
            phase: conversation.phase(),
            completion: settled.progression.completion,
            missing_fields: settled.progression.missing_fields,
            prompt: settled.progression.prompt,
            violations: settled.violations,
            advisories: settled.advisories,
            booking_url: settled.booking_url,
            parameters: settled.parameters,
        })
    }
}

/// Assistant reply for a settled turn.
fn compose_reply(settled: &Settled) -> String {
    if let Some(prompt) = &settled.progression.prompt {
        return prompt.text().to_string();
    }
    match &settled.booking_url {
        Some(url) => format!("Your flight search is ready. You can book here: {}", url),
        None => format!("Great, I have everything I need: {}.", summarize(&settled.parameters)),
    }
}

fn summarize(params: &SearchParameters) -> String {
    let route = match (&params.origin_code, &params.destination_code) {
        (Some(from), Some(to)) => format!("{} to {}", from, to),
        _ => "your trip".to_string(),
    };
    let mut parts = vec![format!("{} {}", params.trip_type, route)];
    if let Some(date) = params.departure_date {
        parts.push(format!("departing {}", date));
    }
    if let Some(date) = params.return_date {
        parts.push(format!("returning {}", date));
    }
    parts.push(format!("{} passenger(s)", params.total_passengers()));
    parts.join(", ")
}
