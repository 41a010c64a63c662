//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change a conversation; the status query only reads it.

pub mod handlers;

pub use handlers::{
    GenerateBookingUrlCommand, GenerateBookingUrlError, GenerateBookingUrlHandler,
    GenerateBookingUrlResult, GetSearchStatusError, GetSearchStatusHandler, GetSearchStatusQuery,
    ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler, SearchSettings, SearchStatus,
    StartConversationCommand, StartConversationHandler, StartConversationResult, TurnOutcome,
    UpdateSearchParametersCommand, UpdateSearchParametersError, UpdateSearchParametersHandler,
    UpdateSearchParametersResult,
};
