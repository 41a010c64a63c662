//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod search;

pub use search::*;
