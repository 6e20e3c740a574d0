//! Base-price estimation and the candidate reasonableness filter.
//!
//! The base price represents what a user should reasonably expect to pay
//! for a single ticket on the direct route. Split-ticket deals must beat
//! this threshold to be worthwhile.

use crate::domain::{ExploreCandidate, Itinerary};

use super::averages::Averages;

/// Fraction of the base price an explore candidate's one-way price may
/// reach before it is discarded.
const REASONABLE_RATIO: f64 = 0.8;

/// Estimate the quality-adjusted base price for a direct route.
///
/// `offers` must already be sorted ascending by price; the cheapest offer
/// anchors the blend. Returns 0 for an empty list, which makes the
/// downstream filter discard every candidate.
///
/// The threshold blends the cheapest and average price (70/30) and then
/// applies a quality adjustment from the route's mean duration and stops:
/// a long or multi-stop direct route pushes the threshold up, making
/// split tickets easier to justify, while a short direct route keeps it
/// low so a split must offer significant savings.
///
/// durationScore: 0 -> instant, 0.5 -> 6hrs, 0.67 -> 12hrs, 0.8 -> 24hrs
/// stopsScore:    0 -> direct, 0.5 -> 1 stop, 0.67 -> 2 stops
pub fn base_price(offers: &[Itinerary]) -> f64 {
    let Some(cheapest) = offers.first() else {
        return 0.0;
    };

    let averages = Averages::of(offers);

    let avg_hours = averages.duration.num_seconds() as f64 / 3600.0;
    let duration_score = avg_hours / (avg_hours + 6.0);
    let stops_score = averages.stops / (averages.stops + 1.0);
    let quality_adjustment = 1.0 + 0.3 * duration_score + 0.2 * stops_score;

    let blended = 0.7 * cheapest.price() + 0.3 * averages.price;

    blended * quality_adjustment
}

/// Keep only candidates whose one-way indicative price leaves room for a
/// cheaper pair: `price <= 0.8 * base`. The boundary is inclusive.
///
/// A candidate whose one-way price already approaches the round-trip base
/// price cannot contribute to a cheaper split.
pub fn filter_reasonable(
    candidates: Vec<ExploreCandidate>,
    base: f64,
) -> Vec<ExploreCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.price <= base * REASONABLE_RATIO)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirportCode, Flight, Leg};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn leg(dep: &str, arr: &str, dep_offset_h: i64, duration_h: i64) -> Leg {
        let start = base_time() + Duration::hours(dep_offset_h);
        Leg::new(vec![Flight {
            departure: start,
            arrival: start + Duration::hours(duration_h),
            departure_airport: AirportCode::parse(dep).unwrap(),
            arrival_airport: AirportCode::parse(arr).unwrap(),
            flight_code: "XX100".into(),
            aircraft: "A320".into(),
            airline: "MockAir".into(),
        }])
        .unwrap()
    }

    fn direct(duration_h: i64, price: f64) -> Itinerary {
        Itinerary::new(
            leg("LHR", "LAX", 0, duration_h),
            leg("LAX", "LHR", 168, duration_h),
            price,
            "",
        )
        .unwrap()
    }

    fn candidate(code: &str, price: f64) -> ExploreCandidate {
        ExploreCandidate {
            destination: AirportCode::parse(code).unwrap(),
            price,
        }
    }

    #[test]
    fn empty_offers_give_zero() {
        assert_eq!(base_price(&[]), 0.0);
    }

    #[test]
    fn single_offer_positive() {
        let price = base_price(&[direct(11, 500.0)]);
        assert!(price > 0.0);
    }

    #[test]
    fn short_direct_flight_stays_near_sticker_price() {
        // 1h each way, direct: tiny quality adjustment
        let price = base_price(&[direct(1, 100.0)]);
        assert!(price <= 120.0, "expected low adjustment, got {price}");
    }

    #[test]
    fn long_route_raises_threshold_above_sticker() {
        // 24h each way: durationScore near 0.9
        let price = base_price(&[direct(24, 1000.0)]);
        assert!(price > 1000.0, "expected raised threshold, got {price}");
    }

    #[test]
    fn blend_uses_cheapest_and_mean() {
        // cheapest 300, mean 400: blend at least 0.7*300 + 0.3*400 = 330
        let offers = vec![direct(11, 300.0), direct(11, 500.0)];
        let price = base_price(&offers);
        assert!(price > 330.0, "expected blended minimum, got {price}");
    }

    #[test]
    fn filter_all_pass() {
        let kept = filter_reasonable(
            vec![
                candidate("JFK", 50.0),
                candidate("CDG", 100.0),
                candidate("DXB", 150.0),
            ],
            1000.0,
        );
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn filter_none_pass() {
        // threshold = 800
        let kept = filter_reasonable(
            vec![candidate("JFK", 900.0), candidate("CDG", 850.0)],
            1000.0,
        );
        assert!(kept.is_empty());
    }

    #[test]
    fn filter_boundary_is_inclusive() {
        // base 500 -> threshold 400: 400.0 passes, 401.0 does not
        let kept = filter_reasonable(
            vec![
                candidate("JFK", 100.0),
                candidate("CDG", 450.0),
                candidate("DXB", 399.0),
                candidate("SIN", 400.0),
                candidate("NRT", 401.0),
            ],
            500.0,
        );

        assert_eq!(kept.len(), 3);
        assert!(kept.iter().any(|c| c.destination.as_str() == "SIN"));
        assert!(!kept.iter().any(|c| c.destination.as_str() == "NRT"));
    }

    #[test]
    fn zero_base_discards_everything_priced() {
        let kept = filter_reasonable(vec![candidate("JFK", 50.0)], 0.0);
        assert!(kept.is_empty());
    }

    #[test]
    fn filter_empty_input() {
        assert!(filter_reasonable(vec![], 1000.0).is_empty());
    }
}
