//! Booking hand-off adapters.

mod query_url_generator;

pub use query_url_generator::QueryStringBookingUrlGenerator;
