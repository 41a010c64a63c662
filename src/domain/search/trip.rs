//! Trip type and cabin class enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Shape of the journey; decides which fields a search needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    /// Out and back between the same two airports.
    #[default]
    Return,
    /// Single outbound flight.
    Oneway,
    /// Ordered sequence of segments.
    Multicity,
}

impl TripType {
    /// Wire name of the trip type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Return => "return",
            Self::Oneway => "oneway",
            Self::Multicity => "multicity",
        }
    }

    /// Lenient parse for model output ("one-way", "round trip", "Multi City").
    pub fn normalize(raw: &str) -> Option<Self> {
        let squashed: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match squashed.as_str() {
            "return" | "roundtrip" | "round" => Some(Self::Return),
            "oneway" | "single" => Some(Self::Oneway),
            "multicity" | "multi" | "multileg" => Some(Self::Multicity),
            _ => None,
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "return" => Ok(Self::Return),
            "oneway" => Ok(Self::Oneway),
            "multicity" => Ok(Self::Multicity),
            other => Err(ValidationError::invalid_format(
                "trip_type",
                format!("'{}' is not one of return, oneway, multicity", other),
            )),
        }
    }
}

/// Cabin class using the single-letter booking codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CabinClass {
    /// Economy.
    #[serde(rename = "Y")]
    Economy,
    /// Premium economy.
    #[serde(rename = "S")]
    PremiumEconomy,
    /// Business.
    #[serde(rename = "C")]
    Business,
    /// First.
    #[serde(rename = "F")]
    First,
}

impl CabinClass {
    /// Single-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Economy => "Y",
            Self::PremiumEconomy => "S",
            Self::Business => "C",
            Self::First => "F",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::PremiumEconomy => "Premium Economy",
            Self::Business => "Business",
            Self::First => "First",
        }
    }

    /// Lenient parse accepting codes or names ("business", "premium economy").
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(class) = trimmed.parse() {
            return Some(class);
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.contains("premium") {
            Some(Self::PremiumEconomy)
        } else if lower.contains("economy") || lower == "coach" {
            Some(Self::Economy)
        } else if lower.contains("business") {
            Some(Self::Business)
        } else if lower.contains("first") {
            Some(Self::First)
        } else {
            None
        }
    }
}

impl FromStr for CabinClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Y" => Ok(Self::Economy),
            "S" => Ok(Self::PremiumEconomy),
            "C" => Ok(Self::Business),
            "F" => Ok(Self::First),
            other => Err(ValidationError::invalid_format(
                "cabin_class",
                format!("'{}' is not one of Y, S, C, F", other),
            )),
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod trip_type {
        use super::*;

        #[test]
        fn default_is_return() {
            assert_eq!(TripType::default(), TripType::Return);
        }

        #[test]
        fn serializes_lowercase() {
            assert_eq!(
                serde_json::to_string(&TripType::Multicity).unwrap(),
                "\"multicity\""
            );
        }

        #[test]
        fn strict_parse_rejects_variants() {
            assert!("one-way".parse::<TripType>().is_err());
            assert_eq!("oneway".parse::<TripType>().unwrap(), TripType::Oneway);
        }

        #[test]
        fn normalize_accepts_spoken_forms() {
            assert_eq!(TripType::normalize("One-Way"), Some(TripType::Oneway));
            assert_eq!(TripType::normalize("round trip"), Some(TripType::Return));
            assert_eq!(TripType::normalize("Multi City"), Some(TripType::Multicity));
            assert_eq!(TripType::normalize("cruise"), None);
        }
    }

    mod cabin_class {
        use super::*;

        #[test]
        fn serializes_as_letter_code() {
            assert_eq!(serde_json::to_string(&CabinClass::Business).unwrap(), "\"C\"");
        }

        #[test]
        fn strict_parse_only_accepts_codes() {
            assert_eq!("F".parse::<CabinClass>().unwrap(), CabinClass::First);
            assert!("first".parse::<CabinClass>().is_err());
        }

        #[test]
        fn normalize_accepts_names() {
            assert_eq!(CabinClass::normalize("business"), Some(CabinClass::Business));
            assert_eq!(
                CabinClass::normalize("Premium Economy"),
                Some(CabinClass::PremiumEconomy)
            );
            assert_eq!(CabinClass::normalize("economy"), Some(CabinClass::Economy));
            assert_eq!(CabinClass::normalize("Y"), Some(CabinClass::Economy));
            assert_eq!(CabinClass::normalize("luxury"), None);
        }
    }
}
