//! Averages over a set of round-trip itineraries.

use chrono::Duration;

use crate::domain::Itinerary;

/// Mean duration, stops, and price over a set of itineraries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    /// Mean outbound+inbound flying time.
    pub duration: Duration,

    /// Mean stops per itinerary. Each itinerary contributes
    /// `(outbound.stops + inbound.stops) / 2` with integer truncation,
    /// so an itinerary with 1 + 2 stops counts as 1.
    pub stops: f64,

    /// Arithmetic mean price.
    pub price: f64,
}

impl Averages {
    /// Compute averages over `itineraries`.
    ///
    /// Behavior on empty input is undefined at this layer; callers guard.
    pub fn of(itineraries: &[Itinerary]) -> Self {
        let mut total_duration = Duration::zero();
        let mut total_stops: usize = 0;
        let mut total_price = 0.0;

        for itin in itineraries {
            total_duration = total_duration + itin.outbound().duration() + itin.inbound().duration();
            total_stops += (itin.outbound().stops() + itin.inbound().stops()) / 2;
            total_price += itin.price();
        }

        let count = itineraries.len() as f64;
        let duration =
            Duration::nanoseconds((total_duration.num_nanoseconds().unwrap_or(i64::MAX) as f64
                / count) as i64);

        Averages {
            duration,
            stops: total_stops as f64 / count,
            price: total_price / count,
        }
    }
}
