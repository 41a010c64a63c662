//! Cities served by more than one airport.
//!
//! When a user names one of these cities without picking an airport, the
//! assistant asks which one they mean.

use once_cell::sync::Lazy;

/// A city with several airports and the metropolitan code that spans them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiAirportCity {
    pub name: &'static str,
    pub metro_code: &'static str,
    pub airports: &'static [&'static str],
}

static MULTI_AIRPORT_CITIES: Lazy<Vec<MultiAirportCity>> = Lazy::new(|| {
    vec![
        MultiAirportCity {
            name: "London",
            metro_code: "LON",
            airports: &["LHR", "LGW", "STN", "LTN", "LCY", "SEN"],
        },
        MultiAirportCity {
            name: "New York",
            metro_code: "NYC",
            airports: &["JFK", "LGA", "EWR"],
        },
        MultiAirportCity {
            name: "Tokyo",
            metro_code: "TYO",
            airports: &["HND", "NRT"],
        },
        MultiAirportCity {
            name: "Paris",
            metro_code: "PAR",
            airports: &["CDG", "ORY", "BVA"],
        },
        MultiAirportCity {
            name: "Chicago",
            metro_code: "CHI",
            airports: &["ORD", "MDW"],
        },
    ]
});

/// Looks up a city by name, ignoring case and surrounding whitespace.
pub fn multi_airport_city(name: &str) -> Option<&'static MultiAirportCity> {
    let name = name.trim();
    MULTI_AIRPORT_CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name))
}

impl MultiAirportCity {
    /// True if `code` is the metro code or does not pick a specific airport.
    pub fn is_unresolved_by(&self, code: Option<&str>) -> bool {
        match code {
            None => true,
            Some(code) => code == self.metro_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_city_case_insensitively() {
        let city = multi_airport_city("  new york ").unwrap();
        assert_eq!(city.airports, &["JFK", "LGA", "EWR"]);
    }

    #[test]
    fn single_airport_city_is_not_listed() {
        assert!(multi_airport_city("Sydney").is_none());
    }

    #[test]
    fn metro_code_does_not_resolve_city() {
        let tokyo = multi_airport_city("Tokyo").unwrap();
        assert!(tokyo.is_unresolved_by(None));
        assert!(tokyo.is_unresolved_by(Some("TYO")));
        assert!(!tokyo.is_unresolved_by(Some("HND")));
    }
}
