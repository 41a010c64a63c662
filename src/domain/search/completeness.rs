//! Completeness of a search record.
//!
//! Origin, destination and departure date are always required. The trip type
//! adds at most one more requirement: a return date for return trips, or at
//! least two segments for multi-city trips. One-way trips need nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Percentage;

use super::parameters::SearchParameters;
use super::trip::TripType;
use super::validation::MIN_MULTICITY_SEGMENTS;

/// A field a search needs before it can be booked.
///
/// Declaration order is the priority order for clarification questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Origin,
    Destination,
    DepartureDate,
    ReturnDate,
    #[serde(rename = "multi_city_segments")]
    Segments,
}

impl RequiredField {
    /// Stable field name reported to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::DepartureDate => "departure_date",
            Self::ReturnDate => "return_date",
            Self::Segments => "multi_city_segments",
        }
    }

    /// Phrase used when asking the user for this field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Origin => "departure city or airport",
            Self::Destination => "destination city or airport",
            Self::DepartureDate => "departure date",
            Self::ReturnDate => "return date",
            Self::Segments => "remaining flights of your multi-city trip",
        }
    }

    fn is_satisfied_by(&self, params: &SearchParameters) -> bool {
        match self {
            Self::Origin => params.origin_code.is_some(),
            Self::Destination => params.destination_code.is_some(),
            Self::DepartureDate => params.departure_date.is_some(),
            Self::ReturnDate => params.return_date.is_some(),
            Self::Segments => params.multi_city_segments.len() >= MIN_MULTICITY_SEGMENTS,
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ONEWAY_FIELDS: &[RequiredField] = &[
    RequiredField::Origin,
    RequiredField::Destination,
    RequiredField::DepartureDate,
];

const RETURN_FIELDS: &[RequiredField] = &[
    RequiredField::Origin,
    RequiredField::Destination,
    RequiredField::DepartureDate,
    RequiredField::ReturnDate,
];

const MULTICITY_FIELDS: &[RequiredField] = &[
    RequiredField::Origin,
    RequiredField::Destination,
    RequiredField::DepartureDate,
    RequiredField::Segments,
];

/// Ordered checklist of required fields for a trip type.
pub fn required_fields(trip_type: TripType) -> &'static [RequiredField] {
    match trip_type {
        TripType::Oneway => ONEWAY_FIELDS,
        TripType::Return => RETURN_FIELDS,
        TripType::Multicity => MULTICITY_FIELDS,
    }
}

/// Required fields not yet known, in priority order.
pub fn missing_fields(params: &SearchParameters) -> Vec<RequiredField> {
    required_fields(params.trip_type)
        .iter()
        .copied()
        .filter(|field| !field.is_satisfied_by(params))
        .collect()
}

/// Names of the missing fields, in priority order.
pub fn missing_field_names(params: &SearchParameters) -> Vec<&'static str> {
    missing_fields(params).iter().map(RequiredField::as_str).collect()
}

/// True when every required field for the trip type is known.
pub fn is_complete(params: &SearchParameters) -> bool {
    missing_fields(params).is_empty()
}

/// Share of applicable required fields that are satisfied.
pub fn completion_score(params: &SearchParameters) -> Percentage {
    let applicable = required_fields(params.trip_type);
    let satisfied = applicable
        .iter()
        .filter(|field| field.is_satisfied_by(params))
        .count();
    Percentage::from_ratio(satisfied, applicable.len())
}
