//! End-to-end conversations through the handlers and in-memory adapters.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use flight_concierge::adapters::{
    InMemoryConversationRepository, InMemorySearchParametersRepository, LlmParameterExtractor,
    MockCompletionProvider, QueryStringBookingUrlGenerator, ScriptedExtractor,
};
use flight_concierge::application::{
    GenerateBookingUrlCommand, GetSearchStatusHandler, GetSearchStatusQuery, ProcessTurnCommand,
    ProcessTurnHandler, SearchSettings, StartConversationCommand, StartConversationHandler,
    UpdateSearchParametersCommand, UpdateSearchParametersHandler, GenerateBookingUrlHandler,
};
use flight_concierge::config::ExtractionConfig;
use flight_concierge::domain::conversation::ConversationPhase;
use flight_concierge::domain::foundation::ConversationId;
use flight_concierge::domain::search::{format_travel_date, ExtractedParameters, RequiredField};
use flight_concierge::ports::{BookingUrlGenerator, ParameterExtractor};

fn date(days: i64) -> String {
    format_travel_date(&(Utc::now().date_naive() + Duration::days(days)))
}

struct App {
    conversations: Arc<InMemoryConversationRepository>,
    parameters: Arc<InMemorySearchParametersRepository>,
    booking: Arc<dyn BookingUrlGenerator>,
    settings: SearchSettings,
}

impl App {
    fn new(auto_generate_booking: bool) -> Self {
        Self {
            conversations: Arc::new(InMemoryConversationRepository::new()),
            parameters: Arc::new(InMemorySearchParametersRepository::new()),
            booking: Arc::new(
                QueryStringBookingUrlGenerator::new("https://flights.example.com/search").unwrap(),
            ),
            settings: SearchSettings {
                auto_generate_booking,
                ..SearchSettings::default()
            },
        }
    }

    async fn start(&self) -> ConversationId {
        StartConversationHandler::new(self.conversations.clone(), self.parameters.clone())
            .handle(StartConversationCommand::default())
            .await
            .unwrap()
            .conversation
            .id()
    }

    fn turns(&self, extractor: Arc<dyn ParameterExtractor>) -> ProcessTurnHandler {
        ProcessTurnHandler::new(
            self.conversations.clone(),
            self.parameters.clone(),
            extractor,
            self.booking.clone(),
            self.settings.clone(),
        )
    }

    fn status(&self) -> GetSearchStatusHandler {
        GetSearchStatusHandler::new(self.conversations.clone(), self.parameters.clone())
    }
}

#[tokio::test]
async fn return_trip_collected_over_several_turns() {
    let app = App::new(true);
    let id = app.start().await;
    let extractor = ScriptedExtractor::new();
    let turns = app.turns(Arc::new(extractor.clone()));

    extractor.push(ExtractedParameters::from_json(&json!({
        "origin_code": "SYD", "origin_name": "Sydney"
    })));
    let first = turns
        .handle(ProcessTurnCommand::new(id, "I'm flying out of Sydney"))
        .await
        .unwrap();
    assert_eq!(first.phase, ConversationPhase::Collecting);
    assert_eq!(first.missing_fields[0], RequiredField::Destination);

    extractor.push(ExtractedParameters::from_json(&json!({
        "destination_code": "NRT", "departure_date": date(45)
    })));
    let second = turns
        .handle(ProcessTurnCommand::new(id, "To Tokyo Narita in six weeks"))
        .await
        .unwrap();
    assert_eq!(second.missing_fields, vec![RequiredField::ReturnDate]);
    assert_eq!(second.completion.value(), 75);

    extractor.push(ExtractedParameters::from_json(&json!({
        "return_date": date(60), "cabin_class": "business", "adults": 2
    })));
    let third = turns
        .handle(ProcessTurnCommand::new(id, "Back two weeks later, business, two of us"))
        .await
        .unwrap();
    assert_eq!(third.phase, ConversationPhase::Complete);
    let url = third.booking_url.clone().unwrap();
    assert!(url.contains("from=SYD"));
    assert!(url.contains("cabin=C"));
    assert!(url.contains("adults=2"));

    let status = app
        .status()
        .handle(GetSearchStatusQuery { conversation_id: id })
        .await
        .unwrap();
    assert!(status.is_complete);
    assert!(status.missing_fields.is_empty());
    assert_eq!(status.booking_url, Some(url));
    // greeting plus three exchanges
    assert_eq!(status.message_count, 7);
}

#[tokio::test]
async fn connected_multi_city_itinerary_completes() {
    let app = App::new(false);
    let id = app.start().await;
    let extractor = ScriptedExtractor::new().with_extraction(ExtractedParameters::from_json(&json!({
        "trip_type": "multicity",
        "origin_code": "SYD",
        "destination_code": "LAX",
        "departure_date": date(30),
        "multi_city_segments": [
            {"sequence_order": 1, "origin_code": "SYD", "destination_code": "NRT", "departure_date": date(30)},
            {"sequence_order": 2, "origin_code": "NRT", "destination_code": "LAX", "departure_date": date(37)}
        ]
    })));

    let outcome = app
        .turns(Arc::new(extractor))
        .handle(ProcessTurnCommand::new(id, "Sydney, Tokyo for a week, then LA"))
        .await
        .unwrap();

    assert_eq!(outcome.phase, ConversationPhase::Confirming);
    assert!(outcome.parameters.is_complete);
    assert!(outcome.advisories.is_empty());

    let status = app
        .status()
        .handle(GetSearchStatusQuery { conversation_id: id })
        .await
        .unwrap();
    assert_eq!(status.journey_duration_days, 7);
    assert_eq!(status.airports_visited.len(), 3);

    let booked = GenerateBookingUrlHandler::new(
        app.conversations.clone(),
        app.parameters.clone(),
        app.booking.clone(),
        app.settings.clone(),
    )
    .handle(GenerateBookingUrlCommand { conversation_id: id })
    .await
    .unwrap();
    assert!(booked.booking_url.contains("leg1=SYD-NRT-"));
    assert!(booked.booking_url.contains("leg2=NRT-LAX-"));
}

#[tokio::test]
async fn explicit_patch_clears_children_that_extraction_cannot() {
    let app = App::new(false);
    let id = app.start().await;
    let extractor = ScriptedExtractor::new()
        .with_extraction(ExtractedParameters::from_json(&json!({"children": 2})))
        .with_extraction(ExtractedParameters::from_json(&json!({"children": 0})));
    let turns = app.turns(Arc::new(extractor));

    turns.handle(ProcessTurnCommand::new(id, "Two kids")).await.unwrap();
    let outcome = turns
        .handle(ProcessTurnCommand::new(id, "Actually no kids"))
        .await
        .unwrap();
    assert_eq!(outcome.parameters.children, 2);

    let patched = UpdateSearchParametersHandler::new(
        app.conversations.clone(),
        app.parameters.clone(),
        app.booking.clone(),
        app.settings.clone(),
    )
    .handle(UpdateSearchParametersCommand {
        conversation_id: id,
        patch: json!({"children": 0}),
    })
    .await
    .unwrap();
    assert_eq!(patched.parameters.children, 0);
}

#[tokio::test]
async fn llm_extractor_drives_a_turn() {
    let app = App::new(true);
    let id = app.start().await;
    let reply = format!(
        "Here is what I found:\n```json\n{{\"origin_code\": \"mel\", \"destination_code\": \"akl\", \"departure_date\": \"{}\", \"trip_type\": \"one way\"}}\n```",
        date(90)
    );
    let provider = MockCompletionProvider::new().with_response(reply);
    let extractor = LlmParameterExtractor::new(provider.clone(), ExtractionConfig::default());

    let outcome = app
        .turns(Arc::new(extractor))
        .handle(ProcessTurnCommand::new(id, "Melbourne to Auckland, one way"))
        .await
        .unwrap();

    assert_eq!(outcome.phase, ConversationPhase::Complete);
    assert_eq!(outcome.parameters.origin_code.unwrap().as_str(), "MEL");
    assert_eq!(provider.call_count(), 1);
}
