//! Validation profiles for search parameters and multi-city segments.
//!
//! Two profiles exist for each entity:
//!
//! - **Structural**: types, formats, ranges and the minimum-advance date
//!   rule. Safe for partial input; a missing field is never an error.
//! - **Semantic**: structural plus cross-field business rules. Only applied
//!   to a record that is meant to be whole.
//!
//! Raw input arrives as `serde_json::Value` so that every failure can name
//! the exact field path that caused it.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::ValidationError;

use super::airport_code::IataCode;
use super::field::FieldValue;
use super::parameters::{SearchParameters, SearchParametersPatch};
use super::segment::MultiCitySegment;
use super::travel_date::{parse_travel_date, ValidationContext};
use super::trip::{CabinClass, TripType};

pub const MIN_ADULTS: u8 = 1;
pub const MAX_ADULTS: u8 = 9;
pub const MAX_CHILDREN: u8 = 8;
pub const MAX_INFANTS: u8 = 8;
pub const MIN_MULTICITY_SEGMENTS: usize = 2;

/// A broken cross-field business rule.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SemanticRuleViolation {
    #[error("infants ({infants}) cannot outnumber adults ({adults})")]
    InfantsExceedAdults { infants: u8, adults: u8 },

    #[error("return_date {return_date} must be after departure_date {departure_date}")]
    ReturnNotAfterDeparture {
        departure_date: NaiveDate,
        return_date: NaiveDate,
    },

    #[error("origin and destination cannot both be {code}")]
    SameOriginAndDestination { code: IataCode },

    #[error("multicity trips need at least 2 segments, found {found}")]
    NotEnoughSegments { found: usize },

    #[error("segment {sequence_order} cannot start and end at {code}")]
    SegmentSameOriginAndDestination { sequence_order: u32, code: IataCode },
}

impl SemanticRuleViolation {
    /// The field the rule is reported against.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InfantsExceedAdults { .. } => "infants",
            Self::ReturnNotAfterDeparture { .. } => "return_date",
            Self::SameOriginAndDestination { .. } => "destination_code",
            Self::NotEnoughSegments { .. } => "multi_city_segments",
            Self::SegmentSameOriginAndDestination { .. } => "multi_city_segments",
        }
    }
}

/// Outcome of a semantic-profile validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error(transparent)]
    Field(#[from] ValidationError),

    #[error("semantic rules violated: {}", join_violations(.0))]
    Semantic(Vec<SemanticRuleViolation>),
}

fn join_violations(violations: &[SemanticRuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ════════════════════════════════════════════════════════════════════════════
// Raw input (structural profile)
// ════════════════════════════════════════════════════════════════════════════

/// Structurally validates a partial update.
///
/// Any subset of fields may be present. `null` or `""` clears a field.
pub fn validate_patch(
    raw: &Value,
    ctx: &ValidationContext,
) -> Result<SearchParametersPatch, ValidationError> {
    let obj = RawObject::new("search_parameters", raw)?;

    let multi_city_segments = match obj.array("multi_city_segments")? {
        FieldValue::Absent => FieldValue::Absent,
        FieldValue::Empty => FieldValue::Empty,
        FieldValue::Value(items) => {
            let segments = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    validate_segment(item, ctx)
                        .map_err(|e| e.within(&format!("multi_city_segments[{}]", i)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            FieldValue::Value(segments)
        }
    };

    Ok(SearchParametersPatch {
        origin_code: obj.code("origin_code")?,
        origin_name: obj.name("origin_name")?,
        destination_code: obj.code("destination_code")?,
        destination_name: obj.name("destination_name")?,
        departure_date: obj.date("departure_date", ctx)?,
        return_date: obj.date("return_date", ctx)?,
        trip_type: obj.parsed::<TripType>("trip_type")?,
        adults: obj.count("adults", MIN_ADULTS, MAX_ADULTS)?,
        children: obj.count("children", 0, MAX_CHILDREN)?,
        infants: obj.count("infants", 0, MAX_INFANTS)?,
        cabin_class: obj.parsed::<CabinClass>("cabin_class")?,
        multi_city_segments,
    })
}

/// Structurally validates one segment. All fields except names are required.
pub fn validate_segment(
    raw: &Value,
    ctx: &ValidationContext,
) -> Result<MultiCitySegment, ValidationError> {
    let obj = RawObject::new("segment", raw)?;

    let sequence_order = match obj.integer("sequence_order")? {
        FieldValue::Value(n) if n >= 1 && n <= i64::from(u32::MAX) => n as u32,
        FieldValue::Value(_) => {
            return Err(ValidationError::invalid_format(
                "sequence_order",
                "must be a positive integer",
            ))
        }
        _ => return Err(ValidationError::empty_field("sequence_order")),
    };

    Ok(MultiCitySegment {
        sequence_order,
        origin_code: required(obj.code("origin_code")?, "origin_code")?,
        origin_name: obj.name("origin_name")?.into_option(),
        destination_code: required(obj.code("destination_code")?, "destination_code")?,
        destination_name: obj.name("destination_name")?.into_option(),
        departure_date: required(obj.date("departure_date", ctx)?, "departure_date")?,
    })
}

/// Semantic profile for one segment: structural plus origin ≠ destination.
pub fn validate_segment_semantic(
    raw: &Value,
    ctx: &ValidationContext,
) -> Result<MultiCitySegment, ValidationFailure> {
    let segment = validate_segment(raw, ctx)?;
    if segment.origin_code == segment.destination_code {
        return Err(ValidationFailure::Semantic(vec![
            SemanticRuleViolation::SegmentSameOriginAndDestination {
                sequence_order: segment.sequence_order,
                code: segment.origin_code,
            },
        ]));
    }
    Ok(segment)
}

/// Semantic profile for a whole record.
///
/// Fields not supplied take their defaults; every cross-field rule is checked
/// and all violations are reported together.
pub fn validate_search_parameters(
    raw: &Value,
    ctx: &ValidationContext,
) -> Result<SearchParameters, ValidationFailure> {
    let params = validate_patch(raw, ctx)?.apply_to(&SearchParameters::empty());
    check_semantic_rules(&params).map_err(ValidationFailure::Semantic)?;
    Ok(params)
}

fn required<T>(field: FieldValue<T>, name: &str) -> Result<T, ValidationError> {
    field
        .into_option()
        .ok_or_else(|| ValidationError::empty_field(name))
}

/// Typed view over a JSON object with field-path aware accessors.
struct RawObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> RawObject<'a> {
    fn new(what: &str, raw: &'a Value) -> Result<Self, ValidationError> {
        match raw {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(ValidationError::wrong_type(what, "object")),
        }
    }

    fn string(&self, name: &str) -> Result<FieldValue<&'a str>, ValidationError> {
        match self.map.get(name) {
            None => Ok(FieldValue::Absent),
            Some(Value::Null) => Ok(FieldValue::Empty),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(FieldValue::Empty),
            Some(Value::String(s)) => Ok(FieldValue::Value(s.as_str())),
            Some(_) => Err(ValidationError::wrong_type(name, "string")),
        }
    }

    fn integer(&self, name: &str) -> Result<FieldValue<i64>, ValidationError> {
        match self.map.get(name) {
            None => Ok(FieldValue::Absent),
            Some(Value::Null) => Ok(FieldValue::Empty),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(FieldValue::Value)
                .ok_or_else(|| ValidationError::wrong_type(name, "integer")),
            Some(_) => Err(ValidationError::wrong_type(name, "integer")),
        }
    }

    fn array(&self, name: &str) -> Result<FieldValue<&'a Vec<Value>>, ValidationError> {
        match self.map.get(name) {
            None => Ok(FieldValue::Absent),
            Some(Value::Null) => Ok(FieldValue::Empty),
            Some(Value::Array(items)) => Ok(FieldValue::Value(items)),
            Some(_) => Err(ValidationError::wrong_type(name, "array")),
        }
    }

    fn name(&self, name: &str) -> Result<FieldValue<String>, ValidationError> {
        Ok(self.string(name)?.map(|s| s.trim().to_string()))
    }

    fn code(&self, name: &str) -> Result<FieldValue<IataCode>, ValidationError> {
        match self.string(name)? {
            FieldValue::Value(s) => Ok(FieldValue::Value(IataCode::parse(name, s)?)),
            FieldValue::Empty => Ok(FieldValue::Empty),
            FieldValue::Absent => Ok(FieldValue::Absent),
        }
    }

    fn date(
        &self,
        name: &str,
        ctx: &ValidationContext,
    ) -> Result<FieldValue<NaiveDate>, ValidationError> {
        match self.string(name)? {
            FieldValue::Value(s) => {
                let date = parse_travel_date(name, s)?;
                ctx.ensure_bookable(name, date)?;
                Ok(FieldValue::Value(date))
            }
            FieldValue::Empty => Ok(FieldValue::Empty),
            FieldValue::Absent => Ok(FieldValue::Absent),
        }
    }

    fn count(&self, name: &str, min: u8, max: u8) -> Result<FieldValue<u8>, ValidationError> {
        match self.integer(name)? {
            FieldValue::Value(n) => {
                if n < i64::from(min) || n > i64::from(max) {
                    return Err(ValidationError::out_of_range(
                        name,
                        i64::from(min),
                        i64::from(max),
                        n,
                    ));
                }
                Ok(FieldValue::Value(n as u8))
            }
            FieldValue::Empty => Ok(FieldValue::Empty),
            FieldValue::Absent => Ok(FieldValue::Absent),
        }
    }

    fn parsed<T>(&self, name: &str) -> Result<FieldValue<T>, ValidationError>
    where
        T: std::str::FromStr<Err = ValidationError>,
    {
        match self.string(name)? {
            FieldValue::Value(s) => Ok(FieldValue::Value(s.parse()?)),
            FieldValue::Empty => Ok(FieldValue::Empty),
            FieldValue::Absent => Ok(FieldValue::Absent),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Typed records
// ════════════════════════════════════════════════════════════════════════════

/// Structural checks on an already-typed record (e.g. the result of a merge).
///
/// Codes and date formats are guaranteed by the types; this covers passenger
/// ranges, segment ordering values and the advance-booking window.
pub fn check_structure(
    params: &SearchParameters,
    ctx: &ValidationContext,
) -> Result<(), ValidationError> {
    check_count("adults", params.adults, MIN_ADULTS, MAX_ADULTS)?;
    check_count("children", params.children, 0, MAX_CHILDREN)?;
    check_count("infants", params.infants, 0, MAX_INFANTS)?;

    if let Some(date) = params.departure_date {
        ctx.ensure_bookable("departure_date", date)?;
    }
    if let Some(date) = params.return_date {
        ctx.ensure_bookable("return_date", date)?;
    }

    for (i, segment) in params.multi_city_segments.iter().enumerate() {
        let path = format!("multi_city_segments[{}]", i);
        if segment.sequence_order == 0 {
            return Err(ValidationError::invalid_format(
                "sequence_order",
                "must be a positive integer",
            )
            .within(&path));
        }
        ctx.ensure_bookable("departure_date", segment.departure_date)
            .map_err(|e| e.within(&path))?;
    }
    Ok(())
}

fn check_count(field: &str, value: u8, min: u8, max: u8) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(
            field,
            i64::from(min),
            i64::from(max),
            i64::from(value),
        ));
    }
    Ok(())
}

/// Cross-field business rules. Collects every violation.
pub fn check_semantic_rules(params: &SearchParameters) -> Result<(), Vec<SemanticRuleViolation>> {
    let mut violations = Vec::new();

    if params.infants > params.adults {
        violations.push(SemanticRuleViolation::InfantsExceedAdults {
            infants: params.infants,
            adults: params.adults,
        });
    }

    if params.trip_type == TripType::Return {
        if let (Some(departure_date), Some(return_date)) =
            (params.departure_date, params.return_date)
        {
            if return_date <= departure_date {
                violations.push(SemanticRuleViolation::ReturnNotAfterDeparture {
                    departure_date,
                    return_date,
                });
            }
        }
    }

    if let (Some(origin), Some(destination)) = (&params.origin_code, &params.destination_code) {
        if origin == destination {
            violations.push(SemanticRuleViolation::SameOriginAndDestination {
                code: origin.clone(),
            });
        }
    }

    if params.trip_type == TripType::Multicity
        && params.multi_city_segments.len() < MIN_MULTICITY_SEGMENTS
    {
        violations.push(SemanticRuleViolation::NotEnoughSegments {
            found: params.multi_city_segments.len(),
        });
    }

    for segment in params.segments_in_sequence() {
        if segment.origin_code == segment.destination_code {
            violations.push(SemanticRuleViolation::SegmentSameOriginAndDestination {
                sequence_order: segment.sequence_order,
                code: segment.origin_code.clone(),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
