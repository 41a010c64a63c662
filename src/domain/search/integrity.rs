//! Structural integrity of a multi-city itinerary.
//!
//! Three independent passes, each sorting by `sequence_order` first:
//! sequence contiguity, strictly increasing departure dates, and
//! connectivity (each leg departs from where the previous one landed).
//! Callers choose which to enforce; [`check_itinerary`] runs all of them.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use super::airport_code::IataCode;
use super::segment::{in_sequence, MultiCitySegment};
use super::validation::MIN_MULTICITY_SEGMENTS;

/// A multi-city segment set that does not form a usable itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum SegmentIntegrityError {
    #[error("itinerary needs at least {required} segments, found {found}")]
    TooFewSegments { required: usize, found: usize },

    #[error("segment sequence has a gap: expected {expected}, found {found}")]
    SequenceGap { expected: u32, found: u32 },

    #[error("segment sequence number {order} appears more than once")]
    DuplicateSequence { order: u32 },

    #[error("segment {order} departs on {current}, which is not after the previous departure on {previous}")]
    NotChronological {
        order: u32,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("segment {order} departs from {departs_from} but the previous segment arrives at {arrived_at}")]
    Disconnected {
        order: u32,
        arrived_at: IataCode,
        departs_from: IataCode,
    },
}

/// Fails unless sequence numbers are exactly `1..=N`.
pub fn check_sequence(segments: &[MultiCitySegment]) -> Result<(), SegmentIntegrityError> {
    let ordered = in_sequence(segments);
    let mut expected: u32 = 1;
    for segment in ordered {
        let found = segment.sequence_order;
        if found == expected {
            expected += 1;
        } else if found == 0 || found > expected {
            // zero sorts first, so it is reported against the expected 1
            return Err(SegmentIntegrityError::SequenceGap { expected, found });
        } else {
            return Err(SegmentIntegrityError::DuplicateSequence { order: found });
        }
    }
    Ok(())
}

/// Fails unless each departure is strictly later than the one before it.
pub fn check_chronology(segments: &[MultiCitySegment]) -> Result<(), SegmentIntegrityError> {
    let ordered = in_sequence(segments);
    for pair in ordered.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if current.departure_date <= previous.departure_date {
            return Err(SegmentIntegrityError::NotChronological {
                order: current.sequence_order,
                previous: previous.departure_date,
                current: current.departure_date,
            });
        }
    }
    Ok(())
}

/// Fails unless each leg departs from the previous leg's destination.
pub fn check_connectivity(segments: &[MultiCitySegment]) -> Result<(), SegmentIntegrityError> {
    let ordered = in_sequence(segments);
    for pair in ordered.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if current.origin_code != previous.destination_code {
            return Err(SegmentIntegrityError::Disconnected {
                order: current.sequence_order,
                arrived_at: previous.destination_code.clone(),
                departs_from: current.origin_code.clone(),
            });
        }
    }
    Ok(())
}

/// Full itinerary check: at least two segments, then sequence, chronology
/// and connectivity, failing on the first problem.
pub fn check_itinerary(segments: &[MultiCitySegment]) -> Result<(), SegmentIntegrityError> {
    if segments.len() < MIN_MULTICITY_SEGMENTS {
        return Err(SegmentIntegrityError::TooFewSegments {
            required: MIN_MULTICITY_SEGMENTS,
            found: segments.len(),
        });
    }
    check_sequence(segments)?;
    check_chronology(segments)?;
    check_connectivity(segments)
}

/// Days between the first and last departure, 0 for fewer than two segments.
pub fn journey_duration_days(segments: &[MultiCitySegment]) -> i64 {
    let ordered = in_sequence(segments);
    match (ordered.first(), ordered.last()) {
        (Some(first), Some(last)) if ordered.len() > 1 => {
            (last.departure_date - first.departure_date).num_days()
        }
        _ => 0,
    }
}

/// Every distinct airport touched by the itinerary.
pub fn airports_visited(segments: &[MultiCitySegment]) -> BTreeSet<IataCode> {
    segments
        .iter()
        .flat_map(|s| [s.origin_code.clone(), s.destination_code.clone()])
        .collect()
}
