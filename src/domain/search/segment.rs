//! One leg of a multi-city itinerary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::airport_code::IataCode;

/// A single flight leg, ordered within its itinerary by `sequence_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiCitySegment {
    /// 1-based position within the itinerary.
    pub sequence_order: u32,
    pub origin_code: IataCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_name: Option<String>,
    pub destination_code: IataCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    pub departure_date: NaiveDate,
}

impl MultiCitySegment {
    /// Creates a segment without display names.
    pub fn new(
        sequence_order: u32,
        origin_code: IataCode,
        destination_code: IataCode,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            sequence_order,
            origin_code,
            origin_name: None,
            destination_code,
            destination_name: None,
            departure_date,
        }
    }

    /// Sets the display names of both ends.
    pub fn with_names(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin_name = Some(origin.into());
        self.destination_name = Some(destination.into());
        self
    }
}

/// Returns the segments ordered by `sequence_order`.
pub fn in_sequence(segments: &[MultiCitySegment]) -> Vec<&MultiCitySegment> {
    let mut ordered: Vec<&MultiCitySegment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.sequence_order);
    ordered
}
