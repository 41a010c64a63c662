//! Travel dates and the minimum-advance booking window.
//!
//! Flights can only be searched for departures at least
//! [`DEFAULT_MIN_ADVANCE_DAYS`] days out, because bookings are paid on a
//! deferred schedule. The check runs against the calendar date at the moment
//! of validation, so a date that passed yesterday can fail today.

use chrono::{Duration, NaiveDate};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Minimum days between today and any departure.
pub const DEFAULT_MIN_ADVANCE_DAYS: i64 = 14;

/// Widest advance window that can be configured.
pub const MAX_ADVANCE_DAYS: i64 = 3650;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_travel_date(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    // chrono accepts unpadded months and days; the wire format does not.
    if raw.len() != 10 {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a YYYY-MM-DD date", raw),
        ));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        ValidationError::invalid_format(field, format!("'{}' is not a YYYY-MM-DD date", raw))
    })
}

/// Formats a date the way it travels on the wire.
pub fn format_travel_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The instant-dependent inputs to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Calendar date the validation is evaluated on.
    pub today: NaiveDate,
    /// Minimum days between `today` and any travel date.
    pub min_advance_days: i64,
}

impl ValidationContext {
    /// Context for the current UTC date with the default advance window.
    pub fn now() -> Self {
        Self::on(Timestamp::now().date())
    }

    /// Context pinned to a specific date.
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today,
            min_advance_days: DEFAULT_MIN_ADVANCE_DAYS,
        }
    }

    /// Overrides the advance window.
    pub fn with_min_advance_days(mut self, days: i64) -> Self {
        self.min_advance_days = days;
        self
    }

    /// First date that may be booked.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` on `min_advance_days` if the window is negative, wider
    ///   than [`MAX_ADVANCE_DAYS`] or runs off the calendar
    pub fn earliest_bookable(&self) -> Result<NaiveDate, ValidationError> {
        let out_of_range = || {
            ValidationError::out_of_range("min_advance_days", 0, MAX_ADVANCE_DAYS, self.min_advance_days)
        };
        if !(0..=MAX_ADVANCE_DAYS).contains(&self.min_advance_days) {
            return Err(out_of_range());
        }
        Duration::try_days(self.min_advance_days)
            .and_then(|window| self.today.checked_add_signed(window))
            .ok_or_else(out_of_range)
    }

    /// Fails unless `date` is on or after the earliest bookable date.
    pub fn ensure_bookable(&self, field: &str, date: NaiveDate) -> Result<(), ValidationError> {
        let earliest = self.earliest_bookable()?;
        if date < earliest {
            return Err(ValidationError::too_soon(
                field,
                format_travel_date(&date),
                format_travel_date(&earliest),
            ));
        }
        Ok(())
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::now()
    }
}
