//! Search parameters repository port.
//!
//! One record per conversation, keyed by the conversation id. The record
//! owns its multi-city segments, so deleting or replacing them never
//! touches another conversation.

use crate::domain::foundation::{ConversationId, DomainError};
use crate::domain::search::{MultiCitySegment, SearchParameters};
use async_trait::async_trait;

/// Repository port for per-conversation search parameters.
///
/// Implementations do not serialize read-merge-write cycles. Callers must
/// not run two turns for the same conversation concurrently.
#[async_trait]
pub trait SearchParametersRepository: Send + Sync {
    /// Create the record for a new conversation.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if a record already exists or on persistence failure
    async fn create(
        &self,
        conversation_id: &ConversationId,
        params: &SearchParameters,
    ) -> Result<(), DomainError>;

    /// Find the record for a conversation.
    ///
    /// Returns `None` if the conversation has no record.
    async fn find(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<SearchParameters>, DomainError>;

    /// Overwrite every scalar field, keeping the stored segments.
    ///
    /// Segments change only through `replace_segments`.
    ///
    /// # Errors
    ///
    /// - `SearchParametersNotFound` if no record exists
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        conversation_id: &ConversationId,
        params: &SearchParameters,
    ) -> Result<SearchParameters, DomainError>;

    /// Atomically replace the whole segment set.
    ///
    /// No reader ever observes the set half-replaced or empty in between.
    ///
    /// # Errors
    ///
    /// - `SearchParametersNotFound` if no record exists
    /// - `DatabaseError` on persistence failure
    async fn replace_segments(
        &self,
        conversation_id: &ConversationId,
        segments: Vec<MultiCitySegment>,
    ) -> Result<(), DomainError>;

    /// Delete the record and its segments.
    async fn delete(&self, conversation_id: &ConversationId) -> Result<(), DomainError>;
}
