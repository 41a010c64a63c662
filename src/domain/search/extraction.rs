//! Best-effort parameters extracted from a user message by the language model.
//!
//! Nothing here is validated. Model output is normalised where the intent is
//! obvious (lowercase airport codes, "business" for cabin `C`) and dropped
//! where it is not; enforcement happens after the merge.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ports::ProviderError;

use super::airport_code::IataCode;
use super::field::FieldValue;
use super::segment::MultiCitySegment;
use super::travel_date::parse_travel_date;
use super::trip::{CabinClass, TripType};

/// Errors from the extraction collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("Extraction provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ExtractionError {
    /// True if the provider failure is transient. A bad reply never is.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Parse(_) => false,
            Self::Provider(e) => e.is_retryable(),
        }
    }
}

/// Partial trip parameters produced for one user turn.
///
/// Every field is tri-state so the merge can tell "not mentioned" from
/// "mentioned as empty" and, for passenger counts, from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedParameters {
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
    pub multi_city_segments: FieldValue<Vec<ExtractedSegment>>,
}

/// A possibly-incomplete multi-city leg from the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSegment {
    pub sequence_order: Option<u32>,
    pub origin_code: Option<IataCode>,
    pub origin_name: Option<String>,
    pub destination_code: Option<IataCode>,
    pub destination_name: Option<String>,
    pub departure_date: Option<NaiveDate>,
}

impl ExtractedSegment {
    /// Converts to a segment if the endpoints and date are known.
    ///
    /// A missing sequence number falls back to the 1-based list position.
    pub fn to_segment(&self, position: usize) -> Option<MultiCitySegment> {
        Some(MultiCitySegment {
            sequence_order: self.sequence_order.unwrap_or(position as u32 + 1),
            origin_code: self.origin_code.clone()?,
            origin_name: self.origin_name.clone(),
            destination_code: self.destination_code.clone()?,
            destination_name: self.destination_name.clone(),
            departure_date: self.departure_date?,
        })
    }
}

impl ExtractedParameters {
    /// True if the model supplied nothing usable.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reads an extraction object, dropping any field the model got wrong.
    ///
    /// A non-object value yields an empty extraction.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self {
            origin_code: lenient(map, "origin_code", IataCode::normalize),
            origin_name: lenient(map, "origin_name", clean_name),
            destination_code: lenient(map, "destination_code", IataCode::normalize),
            destination_name: lenient(map, "destination_name", clean_name),
            departure_date: lenient(map, "departure_date", lenient_date),
            return_date: lenient(map, "return_date", lenient_date),
            trip_type: lenient(map, "trip_type", TripType::normalize),
            adults: lenient_count(map, "adults"),
            children: lenient_count(map, "children"),
            infants: lenient_count(map, "infants"),
            cabin_class: lenient(map, "cabin_class", CabinClass::normalize),
            multi_city_segments: lenient_segments(map),
        }
    }

    /// Parses a raw model reply, tolerating prose and markdown code fences
    /// around the JSON object.
    pub fn from_model_response(response: &str) -> Result<Self, ExtractionError> {
        let json = extract_json_object(response);
        let value: Value =
            serde_json::from_str(&json).map_err(|e| ExtractionError::Parse(e.to_string()))?;
        Ok(Self::from_json(&value))
    }
}

fn clean_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn lenient_date(raw: &str) -> Option<NaiveDate> {
    parse_travel_date("date", raw.trim()).ok()
}

/// Reads a string field. Null or blank is `Empty`; unparseable is dropped.
fn lenient<T>(map: &Map<String, Value>, key: &str, parse: impl Fn(&str) -> Option<T>) -> FieldValue<T> {
    match map.get(key) {
        None => FieldValue::Absent,
        Some(Value::Null) => FieldValue::Empty,
        Some(Value::String(s)) if s.trim().is_empty() => FieldValue::Empty,
        Some(Value::String(s)) => parse(s).into(),
        Some(_) => FieldValue::Absent,
    }
}

/// Reads a passenger count, accepting numbers or numeric strings.
fn lenient_count(map: &Map<String, Value>, key: &str) -> FieldValue<u8> {
    match map.get(key) {
        None => FieldValue::Absent,
        Some(Value::Null) => FieldValue::Empty,
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u8::try_from(n).ok()).into(),
        Some(Value::String(s)) if s.trim().is_empty() => FieldValue::Empty,
        Some(Value::String(s)) => s.trim().parse::<u8>().ok().into(),
        Some(_) => FieldValue::Absent,
    }
}

fn lenient_segments(map: &Map<String, Value>) -> FieldValue<Vec<ExtractedSegment>> {
    match map.get("multi_city_segments") {
        None => FieldValue::Absent,
        Some(Value::Null) => FieldValue::Empty,
        Some(Value::Array(items)) if items.is_empty() => FieldValue::Empty,
        Some(Value::Array(items)) => FieldValue::Value(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(segment) => Some(ExtractedSegment {
                        sequence_order: segment
                            .get("sequence_order")
                            .and_then(Value::as_u64)
                            .and_then(|n| u32::try_from(n).ok())
                            .filter(|n| *n > 0),
                        origin_code: lenient(segment, "origin_code", IataCode::normalize).into_option(),
                        origin_name: lenient(segment, "origin_name", clean_name).into_option(),
                        destination_code: lenient(segment, "destination_code", IataCode::normalize)
                            .into_option(),
                        destination_name: lenient(segment, "destination_name", clean_name).into_option(),
                        departure_date: lenient(segment, "departure_date", lenient_date).into_option(),
                    }),
                    _ => None,
                })
                .collect(),
        ),
        Some(_) => FieldValue::Absent,
    }
}

/// Pulls the JSON object out of a model reply.
fn extract_json_object(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        return json;
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(json) = extract_balanced_object(trimmed, start) {
            return json;
        }
    }

    // Let the JSON parser report the problem
    trimmed.to_string()
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}
