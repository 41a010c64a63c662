//! UpdateSearchParametersHandler - Explicit edits to a search record.
//!
//! Accepts a raw JSON patch (e.g. from a form or an API client), validates
//! it through the structural profile and settles the patched record the
//! same way a conversation turn does. Unlike extraction, a patch can set
//! children or infants back to zero.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::conversation::{ConversationPhase, Progression};
use crate::domain::foundation::{ConversationId, DomainError, ValidationError};
use crate::domain::search::{
    validate_patch, ExtractedParameters, SearchParameters, SegmentIntegrityError,
    SemanticRuleViolation,
};
use crate::ports::{BookingUrlGenerator, ConversationRepository, SearchParametersRepository};

use super::settings::SearchSettings;
use super::settle::{SettleError, Settler};

/// Command to patch a conversation's search record.
#[derive(Debug, Clone)]
pub struct UpdateSearchParametersCommand {
    pub conversation_id: ConversationId,
    pub patch: Value,
}

/// Result of a successful patch.
#[derive(Debug, Clone)]
pub struct UpdateSearchParametersResult {
    pub parameters: SearchParameters,
    pub phase: ConversationPhase,
    pub progression: Progression,
    pub violations: Vec<SemanticRuleViolation>,
    pub advisories: Vec<SegmentIntegrityError>,
    pub booking_url: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum UpdateSearchParametersError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SegmentIntegrity(#[from] SegmentIntegrityError),

    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

impl From<SettleError> for UpdateSearchParametersError {
    fn from(err: SettleError) -> Self {
        match err {
            SettleError::Validation(e) => Self::Validation(e),
            SettleError::SegmentIntegrity(e) => Self::SegmentIntegrity(e),
            SettleError::Repository(e) => Self::Repository(e),
        }
    }
}

pub struct UpdateSearchParametersHandler {
    conversations: Arc<dyn ConversationRepository>,
    parameters: Arc<dyn SearchParametersRepository>,
    settler: Settler,
    settings: SearchSettings,
}

impl UpdateSearchParametersHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        parameters: Arc<dyn SearchParametersRepository>,
        booking: Arc<dyn BookingUrlGenerator>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            conversations,
            settler: Settler::new(parameters.clone(), booking, settings.clone()),
            parameters,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSearchParametersCommand,
    ) -> Result<UpdateSearchParametersResult, UpdateSearchParametersError> {
        let mut conversation = self
            .conversations
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or(UpdateSearchParametersError::ConversationNotFound(cmd.conversation_id))?;

        let patch = validate_patch(&cmd.patch, &self.settings.validation_context())?;

        let stored = self.parameters.find(&cmd.conversation_id).await?;
        let current = stored.clone().unwrap_or_else(SearchParameters::empty);
        let patched = patch.apply_to(&current);

        let settled = self
            .settler
            .settle(
                &mut conversation,
                stored.as_ref(),
                patched,
                &ExtractedParameters::default(),
            )
            .await?;
        self.conversations.update(&conversation).await?;

        Ok(UpdateSearchParametersResult {
            parameters: settled.parameters,
            phase: conversation.phase(),
            progression: settled.progression,
            violations: settled.violations,
            advisories: settled.advisories,
            booking_url: settled.booking_url,
        })
    }
}
