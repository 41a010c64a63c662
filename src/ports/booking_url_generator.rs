//! Booking URL generator port.
//!
//! Hands a complete search off to the booking site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::search::SearchParameters;

/// Marker identifying who referred the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub source: String,
    pub conversation_ref: Option<String>,
}

impl Attribution {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            conversation_ref: None,
        }
    }

    pub fn for_conversation(mut self, reference: impl Into<String>) -> Self {
        self.conversation_ref = Some(reference.into());
        self
    }
}

/// Booking URL generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingUrlError {
    #[error("search parameters are incomplete")]
    Incomplete,

    #[error("booking URL could not be built: {0}")]
    Build(String),
}

/// Port for building booking links.
///
/// Synchronous: building a link is local computation.
pub trait BookingUrlGenerator: Send + Sync {
    /// Build a booking link for a complete record.
    ///
    /// # Errors
    ///
    /// - `Incomplete` if `params.is_complete` is false
    /// - `Build` if the link cannot be assembled
    fn generate(&self, params: &SearchParameters, attribution: &Attribution) -> Result<String, BookingUrlError>;
}
