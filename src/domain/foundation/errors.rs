//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Field-level validation failure.
///
/// Every variant names the offending field so the message can be surfaced
/// verbatim to the caller (and from there to the user or the model).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' must be a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Field '{field}' date {date} is too soon, earliest bookable date is {earliest}")]
    TooSoon {
        field: String,
        date: String,
        earliest: String,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a wrong type validation error.
    pub fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        ValidationError::WrongType {
            field: field.into(),
            expected,
        }
    }

    /// Creates a too-soon date validation error.
    pub fn too_soon(
        field: impl Into<String>,
        date: impl fmt::Display,
        earliest: impl fmt::Display,
    ) -> Self {
        ValidationError::TooSoon {
            field: field.into(),
            date: date.to_string(),
            earliest: earliest.to_string(),
        }
    }

    /// Returns the path of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::EmptyField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::WrongType { field, .. }
            | Self::TooSoon { field, .. } => field,
        }
    }

    /// Prefixes the field path, e.g. `origin_code` -> `multi_city_segments[1].origin_code`.
    pub fn within(self, prefix: &str) -> Self {
        let nest = |field: String| format!("{}.{}", prefix, field);
        match self {
            Self::EmptyField { field } => Self::EmptyField { field: nest(field) },
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => Self::OutOfRange {
                field: nest(field),
                min,
                max,
                actual,
            },
            Self::InvalidFormat { field, reason } => Self::InvalidFormat {
                field: nest(field),
                reason,
            },
            Self::WrongType { field, expected } => Self::WrongType {
                field: nest(field),
                expected,
            },
            Self::TooSoon {
                field,
                date,
                earliest,
            } => Self::TooSoon {
                field: nest(field),
                date,
                earliest,
            },
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    ConversationNotFound,
    SearchParametersNotFound,

    // State errors
    InvalidStateTransition,

    // Infrastructure errors
    DatabaseError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ConversationNotFound => "CONVERSATION_NOT_FOUND",
            ErrorCode::SearchParametersNotFound => "SEARCH_PARAMETERS_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Persistence adapters report their failures with this type.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("origin_code");
        assert_eq!(format!("{}", err), "Field 'origin_code' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("adults", 1, 9, 12);
        assert_eq!(
            format!("{}", err),
            "Field 'adults' must be between 1 and 9, got 12"
        );
    }

    #[test]
    fn validation_error_too_soon_names_earliest_date() {
        let err = ValidationError::too_soon("departure_date", "2026-01-02", "2026-01-15");
        assert_eq!(
            format!("{}", err),
            "Field 'departure_date' date 2026-01-02 is too soon, earliest bookable date is 2026-01-15"
        );
    }

    #[test]
    fn within_prefixes_field_path() {
        let err = ValidationError::empty_field("origin_code").within("multi_city_segments[0]");
        assert_eq!(err.field(), "multi_city_segments[0].origin_code");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found");
        assert_eq!(
            format!("{}", err),
            "[CONVERSATION_NOT_FOUND] Conversation not found"
        );
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::wrong_type("adults", "integer").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"adults".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidStateTransition), "INVALID_STATE_TRANSITION");
        assert_eq!(format!("{}", ErrorCode::DatabaseError), "DATABASE_ERROR");
    }
}
