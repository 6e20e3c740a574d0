//! Split-ticket search result.

use chrono::Duration;

use crate::domain::{AirportCode, Itinerary};

/// A split-ticket plan: two separately-bookable round trips meeting at a
/// common stop airport.
///
/// Validity (layover band, airport match) is enforced by the combine
/// stage; construction only derives fields. The inbound stop length is
/// reported as-is and may be negative, since only the outbound connection
/// is gated.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitTicket {
    stop_city: AirportCode,
    itineraries: [Itinerary; 2],
    stop_lengths: [Duration; 2],
    price: f64,
}

impl SplitTicket {
    /// Build a result from the first (origin <-> stop) and second
    /// (stop <-> destination) tickets. Ordering matters.
    pub fn new(first: Itinerary, second: Itinerary) -> Self {
        let stop_city = first.outbound().arrival_airport();
        let stop_lengths = [
            second.outbound().departure() - first.outbound().arrival(),
            first.inbound().departure() - second.inbound().arrival(),
        ];
        let price = first.price() + second.price();

        SplitTicket {
            stop_city,
            itineraries: [first, second],
            stop_lengths,
            price,
        }
    }

    /// The airport where the two tickets meet.
    pub fn stop_city(&self) -> AirportCode {
        self.stop_city
    }

    /// The two tickets: `[origin <-> stop, stop <-> destination]`.
    pub fn itineraries(&self) -> &[Itinerary; 2] {
        &self.itineraries
    }

    /// Outbound and inbound layovers at the stop airport.
    pub fn stop_lengths(&self) -> [Duration; 2] {
        self.stop_lengths
    }

    /// Combined price of both tickets.
    pub fn price(&self) -> f64 {
        self.price
    }
}
