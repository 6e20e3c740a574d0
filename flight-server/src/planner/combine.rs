//! Joining first and second legs into split-ticket pairs.
//!
//! Two-phase combine: `stop_index` buckets expanded first-leg and
//! second-leg pools by their shared stop airport, then `one_stop`
//! enumerates the pairs within a bucket whose connecting layover falls
//! inside the configured band.

use std::collections::HashMap;

use chrono::Duration;

use crate::domain::{AirportCode, Itinerary};

use super::result::SplitTicket;

/// First-leg and second-leg itineraries meeting at one stop airport.
#[derive(Debug, Clone, Default)]
pub struct StopPair {
    /// Origin -> stop round trips.
    pub firsts: Vec<Itinerary>,

    /// Stop -> destination round trips.
    pub seconds: Vec<Itinerary>,
}

/// Bucket expanded leg pools by stop airport.
///
/// Each element of `firsts`/`seconds` is the expansion of one explore
/// candidate. A first sublist is keyed by its outbound arrival airport, a
/// second sublist by its outbound departure airport; keys present on only
/// one side are dropped. When two sublists on the same side share an
/// airport the later one replaces the earlier bucket.
pub fn stop_index(
    firsts: &[Vec<Itinerary>],
    seconds: &[Vec<Itinerary>],
) -> HashMap<AirportCode, StopPair> {
    let mut index: HashMap<AirportCode, StopPair> = HashMap::new();

    for sublist in firsts {
        let Some(first) = sublist.first() else {
            continue;
        };

        index.insert(
            first.outbound().arrival_airport(),
            StopPair {
                firsts: sublist.clone(),
                seconds: Vec::new(),
            },
        );
    }

    for sublist in seconds {
        let Some(first) = sublist.first() else {
            continue;
        };

        if let Some(pair) = index.get_mut(&first.outbound().departure_airport()) {
            pair.seconds = sublist.clone();
        }
    }

    index.retain(|_, pair| !pair.seconds.is_empty());
    index
}

/// Check the connecting layover between two tickets at the stop airport.
///
/// Only the outbound connection is gated: the time between the first
/// ticket's outbound arrival and the second ticket's outbound departure
/// must lie in the closed interval `[min_layover, max_layover]`. The
/// inbound connection is reported downstream but never validated.
pub fn valid_layover(
    first: &Itinerary,
    second: &Itinerary,
    min_layover: Duration,
    max_layover: Duration,
) -> bool {
    let layover = second.outbound().departure() - first.outbound().arrival();
    layover >= min_layover && layover <= max_layover
}

/// Enumerate all split-ticket pairs between two pools.
///
/// Seconds are indexed by outbound departure airport; each first probes
/// with its outbound arrival airport and pairs with every second passing
/// the layover gate.
pub fn one_stop(
    firsts: &[Itinerary],
    seconds: &[Itinerary],
    min_layover: Duration,
    max_layover: Duration,
) -> Vec<SplitTicket> {
    let mut index: HashMap<AirportCode, Vec<&Itinerary>> = HashMap::new();
    for second in seconds {
        index
            .entry(second.outbound().departure_airport())
            .or_default()
            .push(second);
    }

    let mut results = Vec::new();

    for first in firsts {
        let Some(candidates) = index.get(&first.outbound().arrival_airport()) else {
            continue;
        };

        for second in candidates {
            if valid_layover(first, second, min_layover, max_layover) {
                results.push(SplitTicket::new(first.clone(), (*second).clone()));
            }
        }
    }

    results
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Flight, Leg};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn itin(dep: &str, arr: &str, out_dep_h: i64, flight_h: i64, price: f64) -> Itinerary {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let t = |h: i64| t0 + Duration::hours(h);
        let leg = |d: &str, a: &str, dep_h: i64, arr_h: i64| {
            Leg::new(vec![Flight {
                departure: t(dep_h),
                arrival: t(arr_h),
                departure_airport: AirportCode::parse(d).unwrap(),
                arrival_airport: AirportCode::parse(a).unwrap(),
                flight_code: "XX100".into(),
                aircraft: "A320".into(),
                airline: "MockAir".into(),
            }])
            .unwrap()
        };
        Itinerary::new(
            leg(dep, arr, out_dep_h, out_dep_h + flight_h),
            leg(arr, dep, out_dep_h + 168, out_dep_h + 168 + flight_h),
            price,
            "",
        )
        .unwrap()
    }

    proptest! {
        /// With every layover valid, output size is exactly |A| * |B|.
        #[test]
        fn product_size_when_all_layovers_valid(
            n_firsts in 1usize..5,
            n_seconds in 1usize..5,
            layover_h in 3i64..=6,
        ) {
            // All firsts arrive at t0+8h, all seconds depart layover_h later
            let firsts: Vec<_> = (0..n_firsts)
                .map(|i| itin("LHR", "JFK", 0, 8, 300.0 + i as f64))
                .collect();
            let seconds: Vec<_> = (0..n_seconds)
                .map(|i| itin("JFK", "LAX", 8 + layover_h, 5, 200.0 + i as f64))
                .collect();

            let results = one_stop(
                &firsts,
                &seconds,
                Duration::hours(3),
                Duration::hours(6),
            );

            prop_assert_eq!(results.len(), n_firsts * n_seconds);
        }

        /// Every emitted pair respects the layover band and price sum.
        #[test]
        fn emitted_pairs_satisfy_invariants(
            layover_h in -2i64..10,
        ) {
            let firsts = vec![itin("LHR", "JFK", 0, 8, 300.0)];
            let seconds = vec![itin("JFK", "LAX", 8 + layover_h, 5, 200.0)];

            let results = one_stop(
                &firsts,
                &seconds,
                Duration::hours(3),
                Duration::hours(6),
            );

            let expected_valid = (3..=6).contains(&layover_h);
            prop_assert_eq!(results.len(), usize::from(expected_valid));

            for ticket in &results {
                prop_assert_eq!(ticket.price(), 500.0);
                prop_assert!(ticket.stop_lengths()[0] >= Duration::hours(3));
                prop_assert!(ticket.stop_lengths()[0] <= Duration::hours(6));
            }
        }
    }
}
