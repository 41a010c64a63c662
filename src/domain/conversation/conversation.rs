//! Conversation entity.

use crate::domain::conversation::{ConversationPhase, Message, MessageRole};
use crate::domain::foundation::{ConversationId, DomainError, StateMachine, Timestamp};

/// A flight-search conversation: its messages, phase and booking link.
///
/// The search parameters live in their own record keyed by the same id.
#[derive(Debug, Clone)]
pub struct Conversation {
    id: ConversationId,
    phase: ConversationPhase,
    booking_url: Option<String>,
    messages: Vec<Message>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Conversation {
    /// Creates a new conversation in the collecting phase.
    pub fn new() -> Self {
        Self::with_id(ConversationId::new())
    }

    /// Creates a new conversation with a caller-chosen id.
    pub fn with_id(id: ConversationId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            phase: ConversationPhase::Collecting,
            booking_url: None,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a conversation from persistence.
    pub fn reconstitute(
        id: ConversationId,
        phase: ConversationPhase,
        booking_url: Option<String>,
        messages: Vec<Message>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            phase,
            booking_url,
            messages,
            created_at,
            updated_at,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn booking_url(&self) -> Option<&str> {
        self.booking_url.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn user_message_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role() == MessageRole::User)
            .count()
    }

    pub fn last_assistant_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role() == MessageRole::Assistant)
    }

    // === Mutations ===

    /// Appends a message.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Timestamp::now();
    }

    /// Moves to another phase.
    ///
    /// Leaving `Complete` discards the booking link, since it was built
    /// for parameters that no longer hold.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the phase machine forbids the move
    pub fn advance_to(&mut self, phase: ConversationPhase) -> Result<(), DomainError> {
        let next = self.phase.transition_to(phase)?;
        if next != ConversationPhase::Complete {
            self.booking_url = None;
        }
        self.phase = next;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Stores a generated booking link and moves to `Complete`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` while still collecting
    pub fn record_booking(&mut self, url: impl Into<String>) -> Result<(), DomainError> {
        self.phase = self.phase.mark_booked()?;
        self.booking_url = Some(url.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
