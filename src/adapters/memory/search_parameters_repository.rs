//! In-memory search parameters repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::domain::search::{MultiCitySegment, SearchParameters};
use crate::ports::SearchParametersRepository;

/// Search records held in a shared map, segments stored inside each record.
#[derive(Debug, Clone, Default)]
pub struct InMemorySearchParametersRepository {
    records: Arc<RwLock<HashMap<ConversationId, SearchParameters>>>,
}

impl InMemorySearchParametersRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &ConversationId) -> DomainError {
    DomainError::new(
        ErrorCode::SearchParametersNotFound,
        "Search parameters not found",
    )
    .with_detail("conversation_id", id.to_string())
}

#[async_trait]
impl SearchParametersRepository for InMemorySearchParametersRepository {
    async fn create(
        &self,
        conversation_id: &ConversationId,
        params: &SearchParameters,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(conversation_id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Search parameters already exist",
            )
            .with_detail("conversation_id", conversation_id.to_string()));
        }
        records.insert(*conversation_id, params.clone());
        Ok(())
    }

    async fn find(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<SearchParameters>, DomainError> {
        Ok(self.records.read().await.get(conversation_id).cloned())
    }

    async fn update(
        &self,
        conversation_id: &ConversationId,
        params: &SearchParameters,
    ) -> Result<SearchParameters, DomainError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(conversation_id)
            .ok_or_else(|| not_found(conversation_id))?;

        let segments = std::mem::take(&mut stored.multi_city_segments);
        *stored = SearchParameters {
            multi_city_segments: segments,
            ..params.clone()
        };
        Ok(stored.clone())
    }

    async fn replace_segments(
        &self,
        conversation_id: &ConversationId,
        segments: Vec<MultiCitySegment>,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(conversation_id)
            .ok_or_else(|| not_found(conversation_id))?;
        stored.multi_city_segments = segments;
        Ok(())
    }

    async fn delete(&self, conversation_id: &ConversationId) -> Result<(), DomainError> {
        self.records.write().await.remove(conversation_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::{IataCode, TripType};
    use chrono::NaiveDate;

    fn code(s: &str) -> IataCode {
        IataCode::parse("code", s).unwrap()
    }

    fn segment(order: u32, from: &str, to: &str, day: u32) -> MultiCitySegment {
        MultiCitySegment::new(order, code(from), code(to), NaiveDate::from_ymd_opt(2026, 6, day).unwrap())
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = InMemorySearchParametersRepository::new();
        let id = ConversationId::new();
        repo.create(&id, &SearchParameters::empty()).await.unwrap();

        let found = repo.find(&id).await.unwrap();
        assert_eq!(found, Some(SearchParameters::empty()));
    }

    #[tokio::test]
    async fn find_unknown_is_none() {
        let repo = InMemorySearchParametersRepository::new();
        assert!(repo.find(&ConversationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_twice_fails() {
        let repo = InMemorySearchParametersRepository::new();
        let id = ConversationId::new();
        repo.create(&id, &SearchParameters::empty()).await.unwrap();
        assert!(repo.create(&id, &SearchParameters::empty()).await.is_err());
    }

    #[tokio::test]
    async fn update_keeps_segments() {
        let repo = InMemorySearchParametersRepository::new();
        let id = ConversationId::new();
        repo.create(&id, &SearchParameters::empty()).await.unwrap();
        repo.replace_segments(&id, vec![segment(1, "SYD", "NRT", 1)])
            .await
            .unwrap();

        let mut params = SearchParameters::empty();
        params.trip_type = TripType::Multicity;
        let updated = repo.update(&id, &params).await.unwrap();

        assert_eq!(updated.trip_type, TripType::Multicity);
        assert_eq!(updated.multi_city_segments.len(), 1);
    }

    #[tokio::test]
    async fn replace_segments_swaps_whole_set() {
        let repo = InMemorySearchParametersRepository::new();
        let id = ConversationId::new();
        repo.create(&id, &SearchParameters::empty()).await.unwrap();
        repo.replace_segments(&id, vec![segment(1, "SYD", "NRT", 1), segment(2, "NRT", "LAX", 5)])
            .await
            .unwrap();

        repo.replace_segments(&id, vec![segment(1, "MEL", "SIN", 3)])
            .await
            .unwrap();

        let found = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(found.multi_city_segments, vec![segment(1, "MEL", "SIN", 3)]);
    }

    #[tokio::test]
    async fn segments_are_scoped_to_their_conversation() {
        let repo = InMemorySearchParametersRepository::new();
        let first = ConversationId::new();
        let second = ConversationId::new();
        repo.create(&first, &SearchParameters::empty()).await.unwrap();
        repo.create(&second, &SearchParameters::empty()).await.unwrap();

        repo.replace_segments(&first, vec![segment(1, "SYD", "NRT", 1)])
            .await
            .unwrap();

        let other = repo.find(&second).await.unwrap().unwrap();
        assert!(other.multi_city_segments.is_empty());
    }

    #[tokio::test]
    async fn update_unknown_fails_with_not_found() {
        let repo = InMemorySearchParametersRepository::new();
        let err = repo
            .update(&ConversationId::new(), &SearchParameters::empty())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SearchParametersNotFound);
    }
}
