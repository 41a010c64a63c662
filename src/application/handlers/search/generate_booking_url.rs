//! GenerateBookingUrlHandler - Hands a complete search off to booking.
//!
//! Used when automatic booking is disabled, or to rebuild the link of a
//! completed conversation. Dates are checked again at booking time since a
//! record completed earlier may now fall inside the advance-booking window.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ConversationId, DomainError, ValidationError};
use crate::domain::search::check_structure;
use crate::ports::{
    BookingUrlError, BookingUrlGenerator, ConversationRepository, SearchParametersRepository,
};

use super::settings::SearchSettings;
use super::settle::book;

#[derive(Debug, Clone)]
pub struct GenerateBookingUrlCommand {
    pub conversation_id: ConversationId,
}

#[derive(Debug, Clone)]
pub struct GenerateBookingUrlResult {
    pub booking_url: String,
}

#[derive(Debug, Clone, Error)]
pub enum GenerateBookingUrlError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error("Search is not complete yet")]
    SearchIncomplete,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Booking(BookingUrlError),

    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

impl From<BookingUrlError> for GenerateBookingUrlError {
    fn from(err: BookingUrlError) -> Self {
        match err {
            BookingUrlError::Incomplete => Self::SearchIncomplete,
            other => Self::Booking(other),
        }
    }
}

pub struct GenerateBookingUrlHandler {
    conversations: Arc<dyn ConversationRepository>,
    parameters: Arc<dyn SearchParametersRepository>,
    booking: Arc<dyn BookingUrlGenerator>,
    settings: SearchSettings,
}

impl GenerateBookingUrlHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        parameters: Arc<dyn SearchParametersRepository>,
        booking: Arc<dyn BookingUrlGenerator>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            conversations,
            parameters,
            booking,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateBookingUrlCommand,
    ) -> Result<GenerateBookingUrlResult, GenerateBookingUrlError> {
        let mut conversation = self
            .conversations
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or(GenerateBookingUrlError::ConversationNotFound(cmd.conversation_id))?;

        let params = self
            .parameters
            .find(&cmd.conversation_id)
            .await?
            .filter(|p| p.is_complete)
            .ok_or(GenerateBookingUrlError::SearchIncomplete)?;
        if !conversation.phase().can_book() {
            return Err(GenerateBookingUrlError::SearchIncomplete);
        }
        check_structure(&params, &self.settings.validation_context())?;

        let booking_url = book(&mut conversation, &params, self.booking.as_ref(), &self.settings)?;
        self.conversations.update(&conversation).await?;

        Ok(GenerateBookingUrlResult { booking_url })
    }
}
