//! Conversation domain module.
//!
//! Tracks a flight-search dialogue: its messages, the phase it is in and
//! the decision of what to ask next.

mod airports;
mod conversation;
mod message;
mod phase;
mod progression;

pub use airports::{multi_airport_city, MultiAirportCity};
pub use conversation::Conversation;
pub use message::{Message, MessageRole};
pub use phase::{next_conversation_phase, ConversationPhase};
pub use progression::{clarification_prompt, Progression, ProgressionDecider, Prompt};
