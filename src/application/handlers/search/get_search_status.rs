//! GetSearchStatusHandler - Read-only summary of a search conversation.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::conversation::ConversationPhase;
use crate::domain::foundation::{ConversationId, DomainError, Percentage};
use crate::domain::search::{
    airports_visited, check_semantic_rules, completion_score, is_complete, journey_duration_days,
    missing_fields, IataCode, RequiredField, SearchParameters, SemanticRuleViolation,
};
use crate::ports::{ConversationRepository, SearchParametersRepository};

#[derive(Debug, Clone)]
pub struct GetSearchStatusQuery {
    pub conversation_id: ConversationId,
}

/// Snapshot of where a search stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStatus {
    pub conversation_id: ConversationId,
    pub phase: ConversationPhase,
    pub completion: Percentage,
    pub missing_fields: Vec<RequiredField>,
    /// Cross-field rules holding back a record that has every required field.
    pub violations: Vec<SemanticRuleViolation>,
    pub is_complete: bool,
    /// Days from first to last departure of a multi-city itinerary.
    pub journey_duration_days: i64,
    pub airports_visited: Vec<IataCode>,
    pub booking_url: Option<String>,
    pub message_count: usize,
    pub parameters: SearchParameters,
}

#[derive(Debug, Clone, Error)]
pub enum GetSearchStatusError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

pub struct GetSearchStatusHandler {
    conversations: Arc<dyn ConversationRepository>,
    parameters: Arc<dyn SearchParametersRepository>,
}

impl GetSearchStatusHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        parameters: Arc<dyn SearchParametersRepository>,
    ) -> Self {
        Self {
            conversations,
            parameters,
        }
    }

    pub async fn handle(&self, query: GetSearchStatusQuery) -> Result<SearchStatus, GetSearchStatusError> {
        let conversation = self
            .conversations
            .find_by_id(&query.conversation_id)
            .await?
            .ok_or(GetSearchStatusError::ConversationNotFound(query.conversation_id))?;

        // A conversation whose first turn failed has no record yet.
        let parameters = self
            .parameters
            .find(&query.conversation_id)
            .await?
            .unwrap_or_else(SearchParameters::empty);

        let violations = if is_complete(&parameters) {
            check_semantic_rules(&parameters).err().unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(SearchStatus {
            conversation_id: query.conversation_id,
            phase: conversation.phase(),
            completion: completion_score(&parameters),
            missing_fields: missing_fields(&parameters),
            violations,
            is_complete: parameters.is_complete,
            journey_duration_days: journey_duration_days(&parameters.multi_city_segments),
            airports_visited: airports_visited(&parameters.multi_city_segments)
                .into_iter()
                .collect(),
            booking_url: conversation.booking_url().map(str::to_string),
            message_count: conversation.messages().len(),
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryConversationRepository, InMemorySearchParametersRepository};
    use crate::domain::conversation::Conversation;
    use crate::domain::search::{MultiCitySegment, TripType};
    use chrono::NaiveDate;

    fn code(s: &str) -> IataCode {
        IataCode::parse("code", s).unwrap()
    }

    fn leg(order: u32, from: &str, to: &str, day: u32) -> MultiCitySegment {
        MultiCitySegment::new(order, code(from), code(to), NaiveDate::from_ymd_opt(2030, 5, day).unwrap())
    }

    async fn setup(params: Option<SearchParameters>) -> (GetSearchStatusHandler, ConversationId) {
        let conversations = Arc::new(InMemoryConversationRepository::new());
        let parameters = Arc::new(InMemorySearchParametersRepository::new());
        let conversation = Conversation::new();
        let id = conversation.id();
        conversations.save(&conversation).await.unwrap();
        if let Some(params) = params {
            parameters.create(&id, &params).await.unwrap();
        }
        (GetSearchStatusHandler::new(conversations, parameters), id)
    }

    #[tokio::test]
    async fn summarizes_multi_city_itinerary() {
        let mut params = SearchParameters::empty();
        params.trip_type = TripType::Multicity;
        params.multi_city_segments = vec![leg(1, "SYD", "NRT", 1), leg(2, "NRT", "LAX", 11)];
        let (handler, id) = setup(Some(params)).await;

        let status = handler
            .handle(GetSearchStatusQuery { conversation_id: id })
            .await
            .unwrap();

        assert_eq!(status.phase, ConversationPhase::Collecting);
        assert_eq!(status.journey_duration_days, 10);
        assert_eq!(status.airports_visited, vec![code("LAX"), code("NRT"), code("SYD")]);
        assert_eq!(
            status.missing_fields,
            vec![RequiredField::Origin, RequiredField::Destination, RequiredField::DepartureDate]
        );
        assert!(status.booking_url.is_none());
    }

    #[tokio::test]
    async fn explains_complete_record_held_back_by_rules() {
        let mut params = SearchParameters::empty();
        params.trip_type = TripType::Oneway;
        params.origin_code = Some(code("SYD"));
        params.destination_code = Some(code("NRT"));
        params.departure_date = NaiveDate::from_ymd_opt(2030, 5, 1);
        params.adults = 1;
        params.infants = 2;
        let (handler, id) = setup(Some(params)).await;

        let status = handler
            .handle(GetSearchStatusQuery { conversation_id: id })
            .await
            .unwrap();

        assert!(status.missing_fields.is_empty());
        assert!(!status.is_complete);
        assert_eq!(
            status.violations,
            vec![SemanticRuleViolation::InfantsExceedAdults { infants: 2, adults: 1 }]
        );
    }

    #[tokio::test]
    async fn missing_record_reads_as_empty() {
        let (handler, id) = setup(None).await;
        let status = handler
            .handle(GetSearchStatusQuery { conversation_id: id })
            .await
            .unwrap();
        assert_eq!(status.completion, Percentage::ZERO);
        assert_eq!(status.message_count, 0);
        assert!(!status.is_complete);
        assert!(status.violations.is_empty());
    }

    #[tokio::test]
    async fn unknown_conversation_is_rejected() {
        let (handler, _) = setup(None).await;
        let err = handler
            .handle(GetSearchStatusQuery {
                conversation_id: ConversationId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GetSearchStatusError::ConversationNotFound(_)));
    }
}
