//! The per-conversation search parameter record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::airport_code::IataCode;
use super::field::FieldValue;
use super::segment::{in_sequence, MultiCitySegment};
use super::trip::{CabinClass, TripType};

/// Default number of adults on a fresh search.
pub const DEFAULT_ADULTS: u8 = 1;

/// Everything known so far about the trip a conversation is searching for.
///
/// One record per conversation. Created empty when the conversation starts
/// and rewritten by every merge or explicit update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub origin_code: Option<IataCode>,
    pub origin_name: Option<String>,
    pub destination_code: Option<IataCode>,
    pub destination_name: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default = "default_adults")]
    pub adults: u8,
    #[serde(default)]
    pub children: u8,
    #[serde(default)]
    pub infants: u8,
    pub cabin_class: Option<CabinClass>,
    /// Owned multi-city legs; replaced as a whole, never patched.
    #[serde(default)]
    pub multi_city_segments: Vec<MultiCitySegment>,
    /// Cached completeness; recomputed after every change.
    #[serde(default)]
    pub is_complete: bool,
}

fn default_adults() -> u8 {
    DEFAULT_ADULTS
}

impl SearchParameters {
    /// The record a new conversation starts with.
    pub fn empty() -> Self {
        Self {
            origin_code: None,
            origin_name: None,
            destination_code: None,
            destination_name: None,
            departure_date: None,
            return_date: None,
            trip_type: TripType::default(),
            adults: DEFAULT_ADULTS,
            children: 0,
            infants: 0,
            cabin_class: None,
            multi_city_segments: Vec::new(),
            is_complete: false,
        }
    }

    /// Segments ordered by `sequence_order`.
    pub fn segments_in_sequence(&self) -> Vec<&MultiCitySegment> {
        in_sequence(&self.multi_city_segments)
    }

    /// Total travellers across all age bands.
    pub fn total_passengers(&self) -> u16 {
        u16::from(self.adults) + u16::from(self.children) + u16::from(self.infants)
    }

    /// Returns a copy with the cached completeness flag replaced.
    pub fn with_completeness(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self::empty()
    }
}

/// A structurally validated partial update.
///
/// `Absent` leaves a field alone, `Empty` clears it (or restores its default
/// for fields that cannot be unset), `Value` overwrites it. Unlike a model
/// extraction, a patch can set `children` or `infants` to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParametersPatch {
    pub origin_code: FieldValue<IataCode>,
    pub origin_name: FieldValue<String>,
    pub destination_code: FieldValue<IataCode>,
    pub destination_name: FieldValue<String>,
    pub departure_date: FieldValue<NaiveDate>,
    pub return_date: FieldValue<NaiveDate>,
    pub trip_type: FieldValue<TripType>,
    pub adults: FieldValue<u8>,
    pub children: FieldValue<u8>,
    pub infants: FieldValue<u8>,
    pub cabin_class: FieldValue<CabinClass>,
    pub multi_city_segments: FieldValue<Vec<MultiCitySegment>>,
}

impl SearchParametersPatch {
    /// True if the patch touches the segment set.
    pub fn replaces_segments(&self) -> bool {
        !self.multi_city_segments.is_absent()
    }

    /// Applies the patch, clearing the cached completeness flag.
    pub fn apply_to(self, current: &SearchParameters) -> SearchParameters {
        SearchParameters {
            origin_code: patch_optional(self.origin_code, &current.origin_code),
            origin_name: patch_optional(self.origin_name, &current.origin_name),
            destination_code: patch_optional(self.destination_code, &current.destination_code),
            destination_name: patch_optional(self.destination_name, &current.destination_name),
            departure_date: patch_optional(self.departure_date, &current.departure_date),
            return_date: patch_optional(self.return_date, &current.return_date),
            trip_type: patch_required(self.trip_type, current.trip_type, TripType::default()),
            adults: patch_required(self.adults, current.adults, DEFAULT_ADULTS),
            children: patch_required(self.children, current.children, 0),
            infants: patch_required(self.infants, current.infants, 0),
            cabin_class: patch_optional(self.cabin_class, &current.cabin_class),
            multi_city_segments: match self.multi_city_segments {
                FieldValue::Absent => current.multi_city_segments.clone(),
                FieldValue::Empty => Vec::new(),
                FieldValue::Value(segments) => segments,
            },
            is_complete: false,
        }
    }
}

fn patch_optional<T: Clone>(patch: FieldValue<T>, current: &Option<T>) -> Option<T> {
    match patch {
        FieldValue::Absent => current.clone(),
        FieldValue::Empty => None,
        FieldValue::Value(v) => Some(v),
    }
}

fn patch_required<T>(patch: FieldValue<T>, current: T, default: T) -> T {
    match patch {
        FieldValue::Absent => current,
        FieldValue::Empty => default,
        FieldValue::Value(v) => v,
    }
}
