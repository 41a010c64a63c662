//! Folds a per-turn extraction into the stored search record.
//!
//! New non-empty values win, otherwise the stored value is kept, otherwise
//! the default applies. Nothing is validated here and the result is always
//! marked incomplete; completeness is recomputed by the caller.

use super::extraction::{ExtractedParameters, ExtractedSegment};
use super::field::FieldValue;
use super::parameters::SearchParameters;
use super::segment::MultiCitySegment;

/// Knobs for the merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Apply an extracted `0` for children or infants instead of treating it
    /// as "not supplied". Adults are never set to zero.
    pub honor_explicit_zero_counts: bool,
}

/// Merges with default options: an extracted zero count is ignored.
pub fn merge(extracted: &ExtractedParameters, current: Option<&SearchParameters>) -> SearchParameters {
    merge_with(extracted, current, MergeOptions::default())
}

/// Merges an extraction into the current record (or a fresh one).
pub fn merge_with(
    extracted: &ExtractedParameters,
    current: Option<&SearchParameters>,
    options: MergeOptions,
) -> SearchParameters {
    let base = current.cloned().unwrap_or_else(SearchParameters::empty);

    SearchParameters {
        origin_code: prefer(&extracted.origin_code, base.origin_code),
        origin_name: prefer(&extracted.origin_name, base.origin_name),
        destination_code: prefer(&extracted.destination_code, base.destination_code),
        destination_name: prefer(&extracted.destination_name, base.destination_name),
        departure_date: prefer(&extracted.departure_date, base.departure_date),
        return_date: prefer(&extracted.return_date, base.return_date),
        trip_type: extracted.trip_type.value().copied().unwrap_or(base.trip_type),
        adults: count(&extracted.adults, base.adults, false),
        children: count(&extracted.children, base.children, options.honor_explicit_zero_counts),
        infants: count(&extracted.infants, base.infants, options.honor_explicit_zero_counts),
        cabin_class: prefer(&extracted.cabin_class, base.cabin_class),
        multi_city_segments: replacement_segments(&extracted.multi_city_segments)
            .unwrap_or(base.multi_city_segments),
        is_complete: false,
    }
}

fn prefer<T: Clone>(extracted: &FieldValue<T>, current: Option<T>) -> Option<T> {
    extracted.value().cloned().or(current)
}

fn count(extracted: &FieldValue<u8>, current: u8, zero_is_value: bool) -> u8 {
    match extracted {
        FieldValue::Value(0) if zero_is_value => 0,
        FieldValue::Value(n) if *n > 0 => *n,
        _ => current,
    }
}

/// The segment set that replaces the stored one, if the extraction carries
/// at least one usable segment. Legs missing an endpoint or date are dropped.
fn replacement_segments(extracted: &FieldValue<Vec<ExtractedSegment>>) -> Option<Vec<MultiCitySegment>> {
    let segments: Vec<MultiCitySegment> = extracted
        .value()?
        .iter()
        .enumerate()
        .filter_map(|(position, segment)| segment.to_segment(position))
        .collect();
    (!segments.is_empty()).then_some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::completeness::{is_complete, missing_field_names};
    use crate::domain::search::{CabinClass, IataCode, TripType};
    use chrono::NaiveDate;
    use serde_json::json;

    fn code(s: &str) -> IataCode {
        IataCode::parse("code", s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn extraction(value: serde_json::Value) -> ExtractedParameters {
        ExtractedParameters::from_json(&value)
    }

    mod scalar_fields {
        use super::*;

        #[test]
        fn new_values_fill_gaps_and_keep_known_values() {
            let mut current = SearchParameters::empty();
            current.origin_code = Some(code("SYD"));

            let merged = merge(
                &extraction(json!({"destination_code": "NRT", "departure_date": "2025-06-01"})),
                Some(&current),
            );

            assert_eq!(merged.origin_code, Some(code("SYD")));
            assert_eq!(merged.destination_code, Some(code("NRT")));
            assert_eq!(merged.departure_date, Some(date(2025, 6, 1)));
            assert_eq!(merged.trip_type, TripType::Return);
            assert!(!is_complete(&merged));
            assert_eq!(missing_field_names(&merged), vec!["return_date"]);
        }

        #[test]
        fn new_value_overrides_stored_value() {
            let mut current = SearchParameters::empty();
            current.cabin_class = Some(CabinClass::Economy);
            let merged = merge(&extraction(json!({"cabin_class": "F"})), Some(&current));
            assert_eq!(merged.cabin_class, Some(CabinClass::First));
        }

        #[test]
        fn empty_extracted_value_does_not_clear() {
            let mut current = SearchParameters::empty();
            current.destination_name = Some("Tokyo".to_string());
            let merged = merge(&extraction(json!({"destination_name": ""})), Some(&current));
            assert_eq!(merged.destination_name, Some("Tokyo".to_string()));
        }

        #[test]
        fn missing_current_starts_from_defaults() {
            let merged = merge(&ExtractedParameters::default(), None);
            assert_eq!(merged, SearchParameters::empty());
        }

        #[test]
        fn always_clears_completeness() {
            let current = SearchParameters::empty().with_completeness(true);
            let merged = merge(&ExtractedParameters::default(), Some(&current));
            assert!(!merged.is_complete);
        }
    }

    mod passenger_counts {
        use super::*;

        fn with_family() -> SearchParameters {
            let mut current = SearchParameters::empty();
            current.adults = 2;
            current.children = 2;
            current.infants = 1;
            current
        }

        #[test]
        fn zero_is_treated_as_absent_by_default() {
            let merged = merge(
                &extraction(json!({"children": 0, "infants": 0})),
                Some(&with_family()),
            );
            assert_eq!(merged.children, 2);
            assert_eq!(merged.infants, 1);
        }

        #[test]
        fn zero_can_be_honoured_when_configured() {
            let options = MergeOptions {
                honor_explicit_zero_counts: true,
            };
            let merged = merge_with(
                &extraction(json!({"children": 0, "adults": 0})),
                Some(&with_family()),
                options,
            );
            assert_eq!(merged.children, 0);
            assert_eq!(merged.adults, 2);
        }

        #[test]
        fn positive_counts_override() {
            let merged = merge(&extraction(json!({"adults": 3})), Some(&with_family()));
            assert_eq!(merged.adults, 3);
        }
    }

    mod segments {
        use super::*;

        fn stored_itinerary() -> SearchParameters {
            let mut current = SearchParameters::empty();
            current.trip_type = TripType::Multicity;
            current.multi_city_segments = vec![
                MultiCitySegment::new(1, code("SYD"), code("NRT"), date(2026, 6, 1)),
                MultiCitySegment::new(2, code("NRT"), code("LAX"), date(2026, 6, 5)),
            ];
            current
        }

        #[test]
        fn supplied_list_replaces_stored_set() {
            let merged = merge(
                &extraction(json!({"multi_city_segments": [
                    {"sequence_order": 1, "origin_code": "MEL", "destination_code": "SIN", "departure_date": "2026-07-01"}
                ]})),
                Some(&stored_itinerary()),
            );
            assert_eq!(merged.multi_city_segments.len(), 1);
            assert_eq!(merged.multi_city_segments[0].origin_code, code("MEL"));
        }

        #[test]
        fn empty_list_keeps_stored_set() {
            let merged = merge(
                &extraction(json!({"multi_city_segments": []})),
                Some(&stored_itinerary()),
            );
            assert_eq!(merged.multi_city_segments.len(), 2);
        }

        #[test]
        fn unusable_legs_are_dropped() {
            let merged = merge(
                &extraction(json!({"multi_city_segments": [
                    {"origin_code": "SYD", "destination_code": "NRT", "departure_date": "2026-06-01"},
                    {"origin_code": "NRT"}
                ]})),
                None,
            );
            assert_eq!(merged.multi_city_segments.len(), 1);
            assert_eq!(merged.multi_city_segments[0].sequence_order, 1);
        }

        #[test]
        fn list_with_no_usable_legs_keeps_stored_set() {
            let merged = merge(
                &extraction(json!({"multi_city_segments": [{"origin_code": "SYD"}]})),
                Some(&stored_itinerary()),
            );
            assert_eq!(merged.multi_city_segments, stored_itinerary().multi_city_segments);
        }
    }
}
