//! Search rule configuration

use chrono::NaiveDate;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::search::{ValidationContext, DEFAULT_MIN_ADVANCE_DAYS, MAX_ADVANCE_DAYS};

/// Business rules applied when validating travel dates
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Days between today and the earliest bookable departure
    #[serde(default = "default_min_advance_days")]
    pub min_advance_days: i64,
}

impl SearchConfig {
    /// Validation context anchored at the current instant
    pub fn validation_context(&self) -> ValidationContext {
        ValidationContext::now().with_min_advance_days(self.min_advance_days)
    }

    /// Validation context anchored at a fixed day
    pub fn validation_context_on(&self, today: NaiveDate) -> ValidationContext {
        ValidationContext::on(today).with_min_advance_days(self.min_advance_days)
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_advance_days < 0 {
            return Err(ValidationError::NegativeAdvanceDays(self.min_advance_days));
        }
        if self.min_advance_days > MAX_ADVANCE_DAYS {
            return Err(ValidationError::AdvanceDaysTooLarge {
                value: self.min_advance_days,
                max: MAX_ADVANCE_DAYS,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_advance_days: default_min_advance_days(),
        }
    }
}

fn default_min_advance_days() -> i64 {
    DEFAULT_MIN_ADVANCE_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_config_defaults_to_fourteen_days() {
        let config = SearchConfig::default();
        assert_eq!(config.min_advance_days, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_context_uses_configured_window() {
        let config = SearchConfig { min_advance_days: 3 };
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let ctx = config.validation_context_on(today);
        assert_eq!(ctx.earliest_bookable(), Ok(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()));
    }

    #[test]
    fn test_validation_rejects_negative_window() {
        let config = SearchConfig { min_advance_days: -1 };
        assert_eq!(config.validate(), Err(ValidationError::NegativeAdvanceDays(-1)));
    }

    #[test]
    fn test_validation_rejects_window_beyond_ten_years() {
        assert!(SearchConfig { min_advance_days: 3650 }.validate().is_ok());

        let config = SearchConfig { min_advance_days: i64::MAX / 2 };
        assert_eq!(
            config.validate(),
            Err(ValidationError::AdvanceDaysTooLarge {
                value: i64::MAX / 2,
                max: 3650
            })
        );
    }

    #[test]
    fn test_oversized_window_fails_validation_instead_of_panicking() {
        let ctx = SearchConfig { min_advance_days: i64::MAX / 2 }.validation_context();
        assert!(ctx.earliest_bookable().is_err());
        assert!(ctx
            .ensure_bookable("departure_date", NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
            .is_err());
    }
}
