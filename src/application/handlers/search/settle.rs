//! Shared tail of every change to a conversation's search record.
//!
//! Whether the change came from a model extraction or an explicit PATCH,
//! the merged record goes through the same steps: segment integrity when
//! the segment set changes, structural checks, completeness, semantic
//! rules once complete, persistence, the phase decision and optionally
//! the booking hand-off.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::{Conversation, ConversationPhase, Progression, ProgressionDecider};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::search::{
    check_chronology, check_connectivity, check_semantic_rules, check_sequence, check_structure,
    is_complete, ExtractedParameters, SearchParameters, SegmentIntegrityError,
    SemanticRuleViolation,
};
use crate::ports::{BookingUrlError, BookingUrlGenerator, SearchParametersRepository};

use super::settings::SearchSettings;

/// Why a change was rejected. Nothing is persisted in these cases.
#[derive(Debug, Clone, Error)]
pub enum SettleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SegmentIntegrity(#[from] SegmentIntegrityError),

    #[error(transparent)]
    Repository(#[from] DomainError),
}

/// What a settled change produced.
#[derive(Debug, Clone)]
pub struct Settled {
    pub parameters: SearchParameters,
    pub progression: Progression,
    pub violations: Vec<SemanticRuleViolation>,
    pub advisories: Vec<SegmentIntegrityError>,
    pub booking_url: Option<String>,
}

pub struct Settler {
    parameters: Arc<dyn SearchParametersRepository>,
    booking: Arc<dyn BookingUrlGenerator>,
    settings: SearchSettings,
    decider: ProgressionDecider,
}

impl Settler {
    pub fn new(
        parameters: Arc<dyn SearchParametersRepository>,
        booking: Arc<dyn BookingUrlGenerator>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            parameters,
            booking,
            settings,
            decider: ProgressionDecider::new(),
        }
    }

    /// Validates, persists and decides on `merged`, updating `conversation`
    /// in place. The caller persists the conversation.
    pub async fn settle(
        &self,
        conversation: &mut Conversation,
        stored: Option<&SearchParameters>,
        mut merged: SearchParameters,
        extracted: &ExtractedParameters,
    ) -> Result<Settled, SettleError> {
        let id = conversation.id();
        let stored_segments = stored.map_or(&[][..], |s| &s.multi_city_segments[..]);
        let segments_replaced = merged.multi_city_segments.as_slice() != stored_segments;

        let mut advisories = Vec::new();
        if segments_replaced && !merged.multi_city_segments.is_empty() {
            check_sequence(&merged.multi_city_segments)?;
            check_chronology(&merged.multi_city_segments)?;
            if let Err(disconnected) = check_connectivity(&merged.multi_city_segments) {
                tracing::warn!(
                    conversation_id = %id,
                    error = %disconnected,
                    "Multi-city itinerary is not connected"
                );
                advisories.push(disconnected);
            }
        }

        check_structure(&merged, &self.settings.validation_context())?;

        let violations = if is_complete(&merged) {
            check_semantic_rules(&merged).err().unwrap_or_default()
        } else {
            Vec::new()
        };
        merged.is_complete = is_complete(&merged) && violations.is_empty();

        match stored {
            None => self.parameters.create(&id, &merged).await?,
            Some(_) => {
                if segments_replaced {
                    self.parameters
                        .replace_segments(&id, merged.multi_city_segments.clone())
                        .await?;
                }
                self.parameters.update(&id, &merged).await?;
            }
        }

        let previous = conversation.phase();
        let progression = self
            .decider
            .decide(phase_before(conversation, stored, &merged), extracted, &merged)
            .blocked_by(&violations);
        conversation.advance_to(progression.phase)?;

        if progression.phase == ConversationPhase::Confirming && self.settings.auto_generate_booking {
            if let Err(e) = book(conversation, &merged, self.booking.as_ref(), &self.settings) {
                tracing::warn!(conversation_id = %id, error = %e, "Booking URL generation failed");
            }
        }

        if conversation.phase() != previous {
            tracing::info!(
                conversation_id = %id,
                from = %previous,
                to = %conversation.phase(),
                "Conversation phase changed"
            );
        }

        Ok(Settled {
            parameters: merged,
            progression,
            violations,
            advisories,
            booking_url: conversation.booking_url().map(str::to_string),
        })
    }
}

/// The phase the decision starts from.
///
/// A booked conversation whose search changed is back to confirming: its
/// link no longer matches the parameters.
fn phase_before(
    conversation: &Conversation,
    stored: Option<&SearchParameters>,
    merged: &SearchParameters,
) -> ConversationPhase {
    let unchanged = stored.is_some_and(|s| same_search(s, merged));
    match conversation.phase() {
        ConversationPhase::Complete if !unchanged => ConversationPhase::Confirming,
        phase => phase,
    }
}

fn same_search(a: &SearchParameters, b: &SearchParameters) -> bool {
    a.clone().with_completeness(false) == b.clone().with_completeness(false)
}

/// Generates a booking link and moves the conversation to complete.
pub fn book(
    conversation: &mut Conversation,
    params: &SearchParameters,
    generator: &dyn BookingUrlGenerator,
    settings: &SearchSettings,
) -> Result<String, BookingUrlError> {
    let attribution = settings
        .attribution
        .clone()
        .for_conversation(conversation.id().to_string());
    let url = generator.generate(params, &attribution)?;
    conversation
        .record_booking(url.clone())
        .map_err(|e| BookingUrlError::Build(e.to_string()))?;
    tracing::info!(conversation_id = %conversation.id(), "Booking URL generated");
    Ok(url)
}
