//! Flight search parameters.
//!
//! Holds the per-conversation search record and the pure logic around it:
//! field validation, multi-city segment integrity, completeness, and the
//! merge of model extractions into the stored record.

mod airport_code;
mod completeness;
mod extraction;
mod field;
mod integrity;
mod merge;
mod parameters;
mod segment;
mod travel_date;
mod trip;
mod validation;

pub use airport_code::IataCode;
pub use completeness::{
    completion_score, is_complete, missing_field_names, missing_fields, required_fields,
    RequiredField,
};
pub use extraction::{ExtractedParameters, ExtractedSegment, ExtractionError};
pub use field::FieldValue;
pub use integrity::{
    airports_visited, check_chronology, check_connectivity, check_itinerary, check_sequence,
    journey_duration_days, SegmentIntegrityError,
};
pub use merge::{merge, merge_with, MergeOptions};
pub use parameters::{SearchParameters, SearchParametersPatch, DEFAULT_ADULTS};
pub use segment::{in_sequence, MultiCitySegment};
pub use travel_date::{
    format_travel_date, parse_travel_date, ValidationContext, DEFAULT_MIN_ADVANCE_DAYS,
    MAX_ADVANCE_DAYS,
};
pub use trip::{CabinClass, TripType};
pub use validation::{
    check_semantic_rules, check_structure, validate_patch, validate_search_parameters,
    validate_segment, validate_segment_semantic, SemanticRuleViolation, ValidationFailure,
    MAX_ADULTS, MAX_CHILDREN, MAX_INFANTS, MIN_ADULTS, MIN_MULTICITY_SEGMENTS,
};
