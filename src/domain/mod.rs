//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `search` - Search parameters, validation, segment integrity, completeness and merge
//! - `conversation` - Conversation entity, phases and progression decisions

pub mod conversation;
pub mod foundation;
pub mod search;
