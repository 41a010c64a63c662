//! Booking links as query strings on a configured search page.

use url::Url;

use crate::config::BookingConfig;
use crate::domain::search::{format_travel_date, SearchParameters, TripType};
use crate::ports::{Attribution, BookingUrlError, BookingUrlGenerator};

/// Encodes a complete search as query parameters on `base_url`.
///
/// Multi-city legs are encoded in sequence order as `leg1`, `leg2`, ...
/// with the value `ORIGIN-DESTINATION-YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct QueryStringBookingUrlGenerator {
    base_url: Url,
}

impl QueryStringBookingUrlGenerator {
    /// # Errors
    ///
    /// - `Build` if `base_url` is not an absolute URL
    pub fn new(base_url: &str) -> Result<Self, BookingUrlError> {
        let base_url = Url::parse(base_url).map_err(|e| BookingUrlError::Build(e.to_string()))?;
        Ok(Self { base_url })
    }

    pub fn from_config(config: &BookingConfig) -> Result<Self, BookingUrlError> {
        Self::new(&config.base_url)
    }
}

impl BookingUrlGenerator for QueryStringBookingUrlGenerator {
    fn generate(
        &self,
        params: &SearchParameters,
        attribution: &Attribution,
    ) -> Result<String, BookingUrlError> {
        if !params.is_complete {
            return Err(BookingUrlError::Incomplete);
        }
        let (Some(origin), Some(destination), Some(departure)) = (
            params.origin_code.as_ref(),
            params.destination_code.as_ref(),
            params.departure_date.as_ref(),
        ) else {
            return Err(BookingUrlError::Incomplete);
        };

        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("trip", params.trip_type.as_str())
                .append_pair("from", origin.as_str())
                .append_pair("to", destination.as_str())
                .append_pair("depart", &format_travel_date(departure));

            match params.trip_type {
                TripType::Return => {
                    let return_date = params.return_date.as_ref().ok_or(BookingUrlError::Incomplete)?;
                    query.append_pair("return", &format_travel_date(return_date));
                }
                TripType::Multicity => {
                    for segment in params.segments_in_sequence() {
                        query.append_pair(
                            &format!("leg{}", segment.sequence_order),
                            &format!(
                                "{}-{}-{}",
                                segment.origin_code,
                                segment.destination_code,
                                format_travel_date(&segment.departure_date)
                            ),
                        );
                    }
                }
                TripType::Oneway => {}
            }

            query
                .append_pair("adults", &params.adults.to_string())
                .append_pair("children", &params.children.to_string())
                .append_pair("infants", &params.infants.to_string());
            if let Some(cabin) = params.cabin_class {
                query.append_pair("cabin", cabin.code());
            }
            query.append_pair("ref", &attribution.source);
            if let Some(reference) = &attribution.conversation_ref {
                query.append_pair("conv", reference);
            }
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::{CabinClass, IataCode, MultiCitySegment};
    use chrono::NaiveDate;

    fn code(s: &str) -> IataCode {
        IataCode::parse("code", s).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn generator() -> QueryStringBookingUrlGenerator {
        QueryStringBookingUrlGenerator::new("https://flights.example.com/search").unwrap()
    }

    fn return_trip() -> SearchParameters {
        let mut params = SearchParameters::empty();
        params.origin_code = Some(code("SYD"));
        params.destination_code = Some(code("NRT"));
        params.departure_date = Some(date(6, 1));
        params.return_date = Some(date(6, 15));
        params.cabin_class = Some(CabinClass::Business);
        params.with_completeness(true)
    }

    #[test]
    fn encodes_return_trip() {
        let url = generator()
            .generate(&return_trip(), &Attribution::new("concierge").for_conversation("c-1"))
            .unwrap();

        assert_eq!(
            url,
            "https://flights.example.com/search?trip=return&from=SYD&to=NRT&depart=2026-06-01\
             &return=2026-06-15&adults=1&children=0&infants=0&cabin=C&ref=concierge&conv=c-1"
        );
    }

    #[test]
    fn encodes_multicity_legs_in_sequence() {
        let mut params = SearchParameters::empty();
        params.trip_type = TripType::Multicity;
        params.origin_code = Some(code("SYD"));
        params.destination_code = Some(code("LAX"));
        params.departure_date = Some(date(6, 1));
        params.multi_city_segments = vec![
            MultiCitySegment::new(2, code("NRT"), code("LAX"), date(6, 5)),
            MultiCitySegment::new(1, code("SYD"), code("NRT"), date(6, 1)),
        ];
        let params = params.with_completeness(true);

        let url = generator().generate(&params, &Attribution::new("concierge")).unwrap();

        let first = url.find("leg1=SYD-NRT-2026-06-01").unwrap();
        let second = url.find("leg2=NRT-LAX-2026-06-05").unwrap();
        assert!(first < second);
    }

    #[test]
    fn refuses_incomplete_record() {
        let params = return_trip().with_completeness(false);
        assert_eq!(
            generator().generate(&params, &Attribution::new("concierge")),
            Err(BookingUrlError::Incomplete)
        );
    }

    #[test]
    fn rejects_relative_base_url() {
        assert!(matches!(
            QueryStringBookingUrlGenerator::new("/search"),
            Err(BookingUrlError::Build(_))
        ));
    }
}
