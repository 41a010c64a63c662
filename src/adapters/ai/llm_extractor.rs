//! LLM-backed ParameterExtractor implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::time::timeout;
use tracing::debug;

use crate::config::ExtractionConfig;
use crate::domain::conversation::{Message, MessageRole};
use crate::domain::search::{
    format_travel_date, ExtractedParameters, ExtractionError, SearchParameters,
};
use crate::ports::{CompletionProvider, CompletionRequest, ParameterExtractor, ProviderError};

/// Extracts trip parameters by asking a chat-completion model for JSON.
pub struct LlmParameterExtractor<P: CompletionProvider> {
    provider: P,
    config: ExtractionConfig,
}

impl<P: CompletionProvider> LlmParameterExtractor<P> {
    pub fn new(provider: P, config: ExtractionConfig) -> Self {
        Self { provider, config }
    }

    /// Builds the request for one message.
    ///
    /// `today` anchors relative dates such as "next Friday".
    pub fn build_request(
        &self,
        message: &str,
        history: &[Message],
        current: &SearchParameters,
        today: NaiveDate,
    ) -> CompletionRequest {
        let mut request = CompletionRequest::new(self.config.model.clone())
            .with_system_prompt(system_prompt(current, today))
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);
        for earlier in history {
            request = request.with_message(earlier.role(), earlier.content());
        }
        request.with_message(MessageRole::User, message)
    }
}

fn system_prompt(current: &SearchParameters, today: NaiveDate) -> String {
    let known = serde_json::to_string(current).unwrap_or_else(|_| "{}".to_string());
    format!(
        r#"You extract flight search parameters from the user's latest message.
Today's date is {}.

Parameters already known:
{}

Reply with a single JSON object containing only the fields the latest message
mentions. Omit anything not mentioned. Fields:
{{
  "origin_code": "3-letter IATA code",
  "origin_name": "city or airport name",
  "destination_code": "3-letter IATA code",
  "destination_name": "city or airport name",
  "departure_date": "YYYY-MM-DD",
  "return_date": "YYYY-MM-DD",
  "trip_type": "return" | "oneway" | "multicity",
  "adults": 1-9,
  "children": 0-8,
  "infants": 0-8,
  "cabin_class": "Y" | "S" | "C" | "F",
  "multi_city_segments": [
    {{"sequence_order": 1, "origin_code": "...", "destination_code": "...", "departure_date": "YYYY-MM-DD"}}
  ]
}}

If the user names a city with several airports and no specific airport,
give destination_name and leave destination_code out."#,
        format_travel_date(&today),
        known
    )
}

#[async_trait]
impl<P: CompletionProvider> ParameterExtractor for LlmParameterExtractor<P> {
    async fn extract(
        &self,
        message: &str,
        history: &[Message],
        current: &SearchParameters,
    ) -> Result<ExtractedParameters, ExtractionError> {
        let today = chrono::Utc::now().date_naive();
        let request = self.build_request(message, history, current, today);

        let response = timeout(self.config.timeout(), self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout {
                timeout_secs: self.config.timeout_secs,
            })
            .and_then(|result| result)?;

        debug!(
            provider = self.provider.name(),
            model = %response.model,
            "Parsing extraction reply"
        );
        ExtractedParameters::from_model_response(&response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionProvider;
    use crate::domain::search::{FieldValue, IataCode};
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    mod request_building {
        use super::*;

        #[test]
        fn uses_configured_model_and_sampling() {
            let config = ExtractionConfig {
                model: "gpt-4o".to_string(),
                temperature: 0.3,
                max_tokens: 256,
                ..Default::default()
            };
            let extractor = LlmParameterExtractor::new(MockCompletionProvider::new(), config);

            let request = extractor.build_request("to Tokyo", &[], &SearchParameters::empty(), today());

            assert_eq!(request.model, "gpt-4o");
            assert_eq!(request.temperature, Some(0.3));
            assert_eq!(request.max_tokens, Some(256));
        }

        #[test]
        fn system_prompt_carries_date_and_known_parameters() {
            let extractor =
                LlmParameterExtractor::new(MockCompletionProvider::new(), ExtractionConfig::default());
            let mut current = SearchParameters::empty();
            current.origin_code = IataCode::normalize("SYD");

            let request = extractor.build_request("to Tokyo", &[], &current, today());
            let prompt = request.system_prompt.unwrap();

            assert!(prompt.contains("Today's date is 2026-03-01"));
            assert!(prompt.contains("\"origin_code\":\"SYD\""));
        }

        #[test]
        fn history_precedes_new_message() {
            let extractor =
                LlmParameterExtractor::new(MockCompletionProvider::new(), ExtractionConfig::default());
            let history = vec![
                Message::user("From Sydney").unwrap(),
                Message::assistant("Where to?").unwrap(),
            ];

            let request = extractor.build_request("Tokyo", &history, &SearchParameters::empty(), today());

            let roles: Vec<MessageRole> = request.messages.iter().map(|m| m.role).collect();
            assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]);
            assert_eq!(request.messages[2].content, "Tokyo");
        }
    }

    mod extraction {
        use super::*;

        #[tokio::test]
        async fn parses_model_reply() {
            let provider = MockCompletionProvider::new()
                .with_response("```json\n{\"destination_code\": \"nrt\"}\n```");
            let extractor = LlmParameterExtractor::new(provider.clone(), ExtractionConfig::default());

            let extracted = extractor
                .extract("to Tokyo Narita", &[], &SearchParameters::empty())
                .await
                .unwrap();

            assert_eq!(extracted.destination_code, FieldValue::Value(IataCode::parse("code", "NRT").unwrap()));
            assert_eq!(provider.call_count(), 1);
        }

        #[tokio::test]
        async fn provider_errors_propagate() {
            let provider = MockCompletionProvider::new().with_error(ProviderError::AuthenticationFailed);
            let extractor = LlmParameterExtractor::new(provider, ExtractionConfig::default());

            let result = extractor.extract("hi", &[], &SearchParameters::empty()).await;

            assert_eq!(
                result,
                Err(ExtractionError::Provider(ProviderError::AuthenticationFailed))
            );
            assert!(!result.unwrap_err().is_retryable());
        }

        #[tokio::test]
        async fn rate_limit_stays_retryable() {
            let provider = MockCompletionProvider::new()
                .with_error(ProviderError::RateLimited { retry_after_secs: 30 });
            let extractor = LlmParameterExtractor::new(provider, ExtractionConfig::default());

            let err = extractor
                .extract("hi", &[], &SearchParameters::empty())
                .await
                .unwrap_err();

            assert!(matches!(&err, ExtractionError::Provider(p) if p.is_retryable()));
            assert_eq!(
                err,
                ExtractionError::Provider(ProviderError::RateLimited { retry_after_secs: 30 })
            );
        }

        #[tokio::test]
        async fn unparseable_reply_is_a_parse_error() {
            let provider = MockCompletionProvider::new().with_response("Sorry, I can't help.");
            let extractor = LlmParameterExtractor::new(provider, ExtractionConfig::default());

            let result = extractor.extract("hi", &[], &SearchParameters::empty()).await;

            assert!(matches!(result, Err(ExtractionError::Parse(_))));
        }

        #[tokio::test]
        async fn slow_provider_times_out() {
            let provider = MockCompletionProvider::new().with_delay(Duration::from_secs(5));
            let config = ExtractionConfig {
                timeout_secs: 1,
                ..Default::default()
            };
            let extractor = LlmParameterExtractor::new(provider, config);

            let result = extractor.extract("hi", &[], &SearchParameters::empty()).await;

            assert_eq!(
                result,
                Err(ExtractionError::Provider(ProviderError::Timeout { timeout_secs: 1 }))
            );
        }
    }
}
