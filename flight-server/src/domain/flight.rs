//! Flight segment type.

use chrono::{DateTime, Duration, Utc};

use super::AirportCode;

/// A single atomic flight segment.
///
/// Produced by the provider and immutable afterwards. Multi-segment
/// journeys are modelled by [`Leg`](super::Leg), which chains flights.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    /// Departure instant (UTC).
    pub departure: DateTime<Utc>,

    /// Arrival instant (UTC).
    pub arrival: DateTime<Utc>,

    /// Departure airport.
    pub departure_airport: AirportCode,

    /// Arrival airport.
    pub arrival_airport: AirportCode,

    /// Airline code plus flight number, e.g. "BA117".
    pub flight_code: String,

    /// Aircraft model, e.g. "Boeing 777".
    pub aircraft: String,

    /// Operating airline name.
    pub airline: String,
}

impl Flight {
    /// Returns the flight duration.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}
