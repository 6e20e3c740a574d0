//! Round-trip itinerary types.
//!
//! An `Itinerary` is a round trip bookable as a single ticket: an
//! outbound leg, an inbound leg, a price, and a booking URL. An
//! `ExploreCandidate` is the flight-less summary the provider's explore
//! operation produces.

use chrono::Duration;

use super::{AirportCode, DomainError, Leg};

/// A round trip bookable as one ticket.
///
/// # Invariants
///
/// - The inbound leg departs after the outbound leg arrives
/// - `outbound.departure_airport == inbound.arrival_airport`
/// - `outbound.arrival_airport == inbound.departure_airport`
/// - Price is finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    outbound: Leg,
    inbound: Leg,
    price: f64,
    booking_url: String,
}

impl Itinerary {
    /// Construct an itinerary, validating the round-trip invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the inbound leg departs before the outbound leg
    /// arrives, the legs don't mirror each other's route, or the price is
    /// negative or not finite.
    pub fn new(
        outbound: Leg,
        inbound: Leg,
        price: f64,
        booking_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if inbound.departure() <= outbound.arrival() {
            return Err(DomainError::ReturnBeforeOutbound);
        }

        if outbound.departure_airport() != inbound.arrival_airport()
            || outbound.arrival_airport() != inbound.departure_airport()
        {
            return Err(DomainError::RouteMismatch(
                outbound.departure_airport(),
                outbound.arrival_airport(),
                inbound.departure_airport(),
                inbound.arrival_airport(),
            ));
        }

        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidPrice(price));
        }

        Ok(Itinerary {
            outbound,
            inbound,
            price,
            booking_url: booking_url.into(),
        })
    }

    /// Returns the outbound leg.
    pub fn outbound(&self) -> &Leg {
        &self.outbound
    }

    /// Returns the inbound leg.
    pub fn inbound(&self) -> &Leg {
        &self.inbound
    }

    /// Returns the ticket price in the request currency.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the opaque booking URL.
    pub fn booking_url(&self) -> &str {
        &self.booking_url
    }

    /// Returns total time in the air across both legs.
    pub fn total_duration(&self) -> Duration {
        self.outbound.duration() + self.inbound.duration()
    }
}

/// A cheap destination summary produced by the provider's explore
/// operation. Carries no flight-level detail.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreCandidate {
    /// Suggested destination airport.
    pub destination: AirportCode,

    /// Indicative one-way price.
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Flight;
    use chrono::{DateTime, TimeZone, Utc};

    fn airport(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn leg(dep: &str, arr: &str, dep_offset_h: i64, arr_offset_h: i64) -> Leg {
        Leg::new(vec![Flight {
            departure: base_time() + Duration::hours(dep_offset_h),
            arrival: base_time() + Duration::hours(arr_offset_h),
            departure_airport: airport(dep),
            arrival_airport: airport(arr),
            flight_code: "XX100".into(),
            aircraft: "A320".into(),
            airline: "MockAir".into(),
        }])
        .unwrap()
    }

    #[test]
    fn valid_itinerary() {
        let out = leg("LHR", "JFK", 0, 8);
        let back = leg("JFK", "LHR", 168, 176);

        let itin = Itinerary::new(out, back, 300.0, "https://example.com/book").unwrap();

        assert_eq!(itin.price(), 300.0);
        assert_eq!(itin.booking_url(), "https://example.com/book");
        assert_eq!(itin.outbound().arrival_airport(), airport("JFK"));
        assert_eq!(itin.total_duration(), Duration::hours(16));
    }

    #[test]
    fn inbound_before_outbound_rejected() {
        let out = leg("LHR", "JFK", 0, 8);
        let back = leg("JFK", "LHR", 4, 12); // departs mid-outbound

        let result = Itinerary::new(out, back, 300.0, "");
        assert!(matches!(result, Err(DomainError::ReturnBeforeOutbound)));
    }

    #[test]
    fn mismatched_route_rejected() {
        let out = leg("LHR", "JFK", 0, 8);
        let back = leg("EWR", "LHR", 168, 176); // returns from a different airport

        let result = Itinerary::new(out, back, 300.0, "");
        assert!(matches!(result, Err(DomainError::RouteMismatch(..))));
    }

    #[test]
    fn negative_price_rejected() {
        let out = leg("LHR", "JFK", 0, 8);
        let back = leg("JFK", "LHR", 168, 176);

        let result = Itinerary::new(out, back, -1.0, "");
        assert!(matches!(result, Err(DomainError::InvalidPrice(_))));
    }

    #[test]
    fn non_finite_price_rejected() {
        let out = leg("LHR", "JFK", 0, 8);
        let back = leg("JFK", "LHR", 168, 176);

        let result = Itinerary::new(out, back, f64::NAN, "");
        assert!(matches!(result, Err(DomainError::InvalidPrice(_))));
    }

    #[test]
    fn zero_price_allowed() {
        let out = leg("LHR", "JFK", 0, 8);
        let back = leg("JFK", "LHR", 168, 176);

        assert!(Itinerary::new(out, back, 0.0, "").is_ok());
    }

    #[test]
    fn explore_candidate_fields() {
        let candidate = ExploreCandidate {
            destination: airport("CDG"),
            price: 150.0,
        };

        assert_eq!(candidate.destination, airport("CDG"));
        assert_eq!(candidate.price, 150.0);
    }
}
