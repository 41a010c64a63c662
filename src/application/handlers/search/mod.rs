//! Flight search handlers.
//!
//! - `StartConversationHandler` - New conversation with an empty search record
//! - `ProcessTurnHandler` - One user message: extract, merge, settle, reply
//! - `UpdateSearchParametersHandler` - Explicit patch of the search record
//! - `GenerateBookingUrlHandler` - Booking hand-off for a complete search
//! - `GetSearchStatusHandler` - Read-only progress summary

mod generate_booking_url;
mod get_search_status;
mod process_turn;
mod settings;
mod settle;
mod start_conversation;
mod update_search_parameters;

pub use generate_booking_url::{
    GenerateBookingUrlCommand, GenerateBookingUrlError, GenerateBookingUrlHandler,
    GenerateBookingUrlResult,
};
pub use get_search_status::{
    GetSearchStatusError, GetSearchStatusHandler, GetSearchStatusQuery, SearchStatus,
};
pub use process_turn::{ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler, TurnOutcome};
pub use settings::SearchSettings;
pub use start_conversation::{
    StartConversationCommand, StartConversationHandler, StartConversationResult,
};
pub use update_search_parameters::{
    UpdateSearchParametersCommand, UpdateSearchParametersError, UpdateSearchParametersHandler,
    UpdateSearchParametersResult,
};
