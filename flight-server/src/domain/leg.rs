//! One-way journey leg type.
//!
//! A `Leg` is a one-way journey of one or more flights. Endpoints are
//! validated and cached at construction so accessors never fail.

use chrono::{DateTime, Duration, Utc};

use super::{AirportCode, DomainError, Flight};

/// A one-way journey made of one or more connecting flights.
///
/// # Invariants
///
/// - At least one flight
/// - Consecutive flights share the intermediate airport
/// - Overall arrival is not before overall departure
/// - `stops() == flights().len() - 1`
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    flights: Vec<Flight>,
    // Cached endpoints (guaranteed consistent - validated at construction)
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    departure_airport: AirportCode,
    arrival_airport: AirportCode,
}

impl Leg {
    /// Construct a leg, validating flight connectivity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `flights` is empty
    /// - Consecutive flights don't share the intermediate airport
    /// - The last flight arrives before the first flight departs
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_server::domain::{AirportCode, Flight, Leg};
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let dep = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    /// let flight = Flight {
    ///     departure: dep,
    ///     arrival: dep + Duration::hours(8),
    ///     departure_airport: AirportCode::parse("LHR").unwrap(),
    ///     arrival_airport: AirportCode::parse("JFK").unwrap(),
    ///     flight_code: "BA117".into(),
    ///     aircraft: "Boeing 777".into(),
    ///     airline: "British Airways".into(),
    /// };
    ///
    /// let leg = Leg::new(vec![flight]).unwrap();
    /// assert_eq!(leg.stops(), 0);
    /// assert_eq!(leg.duration(), Duration::hours(8));
    /// ```
    pub fn new(flights: Vec<Flight>) -> Result<Self, DomainError> {
        let first = flights.first().ok_or(DomainError::EmptyLeg)?;
        let last = flights.last().ok_or(DomainError::EmptyLeg)?;

        for window in flights.windows(2) {
            if window[0].arrival_airport != window[1].departure_airport {
                return Err(DomainError::FlightsNotConnected(
                    window[0].arrival_airport,
                    window[1].departure_airport,
                ));
            }
        }

        if last.arrival < first.departure {
            return Err(DomainError::NegativeDuration);
        }

        let departure = first.departure;
        let arrival = last.arrival;
        let departure_airport = first.departure_airport;
        let arrival_airport = last.arrival_airport;

        Ok(Leg {
            flights,
            departure,
            arrival,
            departure_airport,
            arrival_airport,
        })
    }

    /// Returns all flights in order.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Returns the number of intermediate stops (flights - 1).
    pub fn stops(&self) -> usize {
        self.flights.len() - 1
    }

    /// Returns the overall departure instant (first flight's departure).
    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the overall arrival instant (last flight's arrival).
    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// Returns the overall departure airport.
    pub fn departure_airport(&self) -> AirportCode {
        self.departure_airport
    }

    /// Returns the overall arrival airport.
    pub fn arrival_airport(&self) -> AirportCode {
        self.arrival_airport
    }

    /// Returns the overall duration (arrival - departure).
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}
