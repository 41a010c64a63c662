//! IATA airport code value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Three-letter uppercase IATA airport code, e.g. `SYD`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IataCode(String);

impl IataCode {
    /// Parses a code strictly: exactly three ASCII uppercase letters.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let well_formed = raw.len() == 3 && raw.chars().all(|c| c.is_ascii_uppercase());
        if !well_formed {
            return Err(ValidationError::invalid_format(
                field,
                format!("'{}' is not a 3-letter uppercase IATA code", raw),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Lenient parse for model output: trims and uppercases before checking.
    pub fn normalize(raw: &str) -> Option<Self> {
        Self::parse("iata_code", &raw.trim().to_ascii_uppercase()).ok()
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IataCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse("iata_code", &value)
    }
}

impl From<IataCode> for String {
    fn from(code: IataCode) -> Self {
        code.0
    }
}
