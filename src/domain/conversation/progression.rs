//! Decides where a conversation goes after each merge.
//!
//! The decider is pure: it looks at the current phase, what the model
//! extracted this turn and the merged record, and returns the next phase
//! together with the question the assistant should ask, if any.

use serde::Serialize;

use crate::domain::foundation::Percentage;
use crate::domain::search::{
    completion_score, missing_fields, ExtractedParameters, RequiredField, SearchParameters,
    SemanticRuleViolation,
};

use super::airports::multi_airport_city;
use super::phase::{next_conversation_phase, ConversationPhase};

/// Question the assistant asks on this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    /// Asks for the highest-priority missing field.
    Clarification { field: RequiredField, text: String },

    /// Asks which airport of a multi-airport city the user means.
    Disambiguation {
        city: String,
        candidates: Vec<String>,
        text: String,
    },

    /// Asks the user to fix contradictory parameters.
    Correction { text: String },
}

impl Prompt {
    pub fn text(&self) -> &str {
        match self {
            Self::Clarification { text, .. }
            | Self::Disambiguation { text, .. }
            | Self::Correction { text } => text,
        }
    }
}

/// Outcome of one progression decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progression {
    pub phase: ConversationPhase,
    pub missing_fields: Vec<RequiredField>,
    pub completion: Percentage,
    pub prompt: Option<Prompt>,
}

impl Progression {
    /// True if the merged record has every required field.
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }

    /// Holds the conversation in collecting because cross-field rules fail.
    ///
    /// Disambiguation still takes precedence for the turn.
    pub fn blocked_by(mut self, violations: &[SemanticRuleViolation]) -> Self {
        if violations.is_empty() {
            return self;
        }
        self.phase = ConversationPhase::Collecting;
        if !matches!(self.prompt, Some(Prompt::Disambiguation { .. })) {
            self.prompt = Some(correction_prompt(violations));
        }
        self
    }
}

/// Stateless progression policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionDecider;

impl ProgressionDecider {
    pub fn new() -> Self {
        Self
    }

    /// Next phase and prompt after merging `extracted` into the record.
    pub fn decide(
        &self,
        current: ConversationPhase,
        extracted: &ExtractedParameters,
        merged: &SearchParameters,
    ) -> Progression {
        let missing = missing_fields(merged);
        let phase = next_conversation_phase(current, missing.is_empty());

        let prompt = disambiguation_prompt(extracted)
            .or_else(|| missing.first().map(|field| clarification_prompt(*field)));

        Progression {
            phase,
            completion: completion_score(merged),
            missing_fields: missing,
            prompt,
        }
    }
}

/// Fixed clarification question for a missing field.
pub fn clarification_prompt(field: RequiredField) -> Prompt {
    Prompt::Clarification {
        field,
        text: format!("To continue your search, could you tell me your {}?", field.label()),
    }
}

fn disambiguation_prompt(extracted: &ExtractedParameters) -> Option<Prompt> {
    let city = multi_airport_city(extracted.destination_name.value()?)?;
    let code = extracted.destination_code.value().map(|c| c.as_str());
    if !city.is_unresolved_by(code) {
        return None;
    }
    let candidates: Vec<String> = city.airports.iter().map(|a| a.to_string()).collect();
    Some(Prompt::Disambiguation {
        city: city.name.to_string(),
        text: format!(
            "{} has several airports ({}). Which one would you like to fly into?",
            city.name,
            candidates.join(", ")
        ),
        candidates,
    })
}

fn correction_prompt(violations: &[SemanticRuleViolation]) -> Prompt {
    let problems: Vec<String> = violations.iter().map(ToString::to_string).collect();
    Prompt::Correction {
        text: format!(
            "Some of your trip details don't fit together: {}. Could you check them?",
            problems.join("; ")
        ),
    }
}
