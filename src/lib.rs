//! Flight Concierge - Conversational flight search.
//!
//! Turns free-text chat into structured flight search parameters one
//! message at a time, tracks what is still missing, and hands complete
//! searches off to a booking site.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod replay;
