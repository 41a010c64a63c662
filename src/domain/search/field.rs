//! Tri-state field values for partial inputs.

/// A field in a partial input: not mentioned, explicitly emptied, or set.
///
/// Model extractions and PATCH bodies both need to tell "the key was not
/// there" apart from "the key was there but null/blank". `Option` alone
/// collapses the two.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue<T> {
    /// The field was not supplied.
    #[default]
    Absent,
    /// The field was supplied as `null` or an empty string.
    Empty,
    /// The field was supplied with a value.
    Value(T),
}

impl<T> FieldValue<T> {
    /// Returns true if the field was not supplied at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the value if one was supplied.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into an `Option`, treating `Empty` like `Absent`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Maps the contained value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldValue<U> {
        match self {
            Self::Absent => FieldValue::Absent,
            Self::Empty => FieldValue::Empty,
            Self::Value(v) => FieldValue::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for FieldValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Absent,
        }
    }
}
