//! Conversation phase state machine.
//!
//! A search conversation is collecting parameters, confirming a complete
//! search, or complete once a booking link exists. Phases can regress: an
//! edit that removes required information sends the conversation back to
//! collecting from either later phase.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, StateMachine};

/// The progression state of a flight-search conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    /// Required fields are still missing.
    #[default]
    Collecting,

    /// Every required field is known; waiting for a booking link.
    Confirming,

    /// A booking link has been generated for the current parameters.
    Complete,
}

impl ConversationPhase {
    /// Returns the phase name as stored and reported.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::Confirming => "confirming",
            Self::Complete => "complete",
        }
    }

    /// Returns true if a booking link may be generated from this phase.
    pub fn can_book(&self) -> bool {
        matches!(self, Self::Confirming | Self::Complete)
    }

    /// Advances to complete after a booking link was generated.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` from collecting
    pub fn mark_booked(&self) -> Result<Self, DomainError> {
        self.transition_to(Self::Complete)
    }
}

impl std::fmt::Display for ConversationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for ConversationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationPhase::*;
        matches!(
            (self, target),
            (Collecting, Collecting | Confirming)
                | (Confirming, Collecting | Confirming | Complete)
                | (Complete, Collecting | Confirming | Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationPhase::*;
        match self {
            Collecting => vec![Collecting, Confirming],
            Confirming => vec![Collecting, Confirming, Complete],
            Complete => vec![Collecting, Confirming, Complete],
        }
    }
}

/// Phase after a merge, given whether the merged record is complete.
///
/// A complete conversation stays complete while its record stays complete;
/// any incomplete record sends the conversation back to collecting.
pub fn next_conversation_phase(current: ConversationPhase, merged_is_complete: bool) -> ConversationPhase {
    match (merged_is_complete, current) {
        (false, _) => ConversationPhase::Collecting,
        (true, ConversationPhase::Complete) => ConversationPhase::Complete,
        (true, _) => ConversationPhase::Confirming,
    }
}
