//! Replays a recorded conversation through the flight search handlers.
//!
//! Usage:
//!   flight-concierge transcript.jsonl
//!   flight-concierge transcript.jsonl --no-auto-book
//!
//! Each line of the transcript carries a user message and the extraction
//! recorded for it. Every turn outcome is printed to stdout as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use flight_concierge::adapters::{
    InMemoryConversationRepository, InMemorySearchParametersRepository,
    QueryStringBookingUrlGenerator, ScriptedExtractor,
};
use flight_concierge::application::{
    GetSearchStatusHandler, GetSearchStatusQuery, ProcessTurnCommand, ProcessTurnHandler,
    SearchSettings, StartConversationCommand, StartConversationHandler,
};
use flight_concierge::config::{init_tracing, AppConfig};
use flight_concierge::replay::load_transcript;

#[derive(Parser)]
#[command(name = "flight-concierge")]
#[command(about = "Replay a flight search transcript")]
struct Args {
    /// JSON Lines transcript to replay
    transcript: PathBuf,

    /// Leave complete searches in confirming instead of generating a booking link
    #[arg(long)]
    no_auto_book: bool,

    /// Print the final search status after the last turn
    #[arg(long)]
    status: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;
    init_tracing(&config.logging)?;

    let turns = load_transcript(&args.transcript)?;

    let conversations = Arc::new(InMemoryConversationRepository::new());
    let parameters = Arc::new(InMemorySearchParametersRepository::new());
    let extractor = ScriptedExtractor::new();
    for turn in &turns {
        extractor.push(turn.extraction.clone());
    }

    let mut settings = SearchSettings::from_config(&config);
    settings.auto_generate_booking &= !args.no_auto_book;

    let start = StartConversationHandler::new(conversations.clone(), parameters.clone());
    let process = ProcessTurnHandler::new(
        conversations.clone(),
        parameters.clone(),
        Arc::new(extractor),
        Arc::new(QueryStringBookingUrlGenerator::from_config(&config.booking)?),
        settings,
    );

    let started = start.handle(StartConversationCommand::default()).await?;
    let conversation_id = started.conversation.id();
    tracing::info!(%conversation_id, turns = turns.len(), "Replaying transcript");
    println!("{}", serde_json::json!({ "greeting": started.greeting }));

    for (i, turn) in turns.iter().enumerate() {
        match process
            .handle(ProcessTurnCommand::new(conversation_id, turn.message.clone()))
            .await
        {
            Ok(outcome) => println!("{}", serde_json::to_string(&outcome)?),
            Err(e) => {
                tracing::warn!(turn = i + 1, error = %e, "Turn rejected");
                println!(
                    "{}",
                    serde_json::json!({ "turn": i + 1, "rejected": e.to_string() })
                );
            }
        }
    }

    if args.status {
        let status = GetSearchStatusHandler::new(conversations, parameters)
            .handle(GetSearchStatusQuery { conversation_id })
            .await?;
        println!("{}", serde_json::to_string(&status)?);
    }

    Ok(())
}
