//! Caching layer for provider responses.
//!
//! Fare searches are expensive and the planner re-queries the same routes
//! across pipeline stages and repeated user searches. Responses are
//! cached per fully-qualified request (route, dates, passengers, class,
//! currency) with a TTL that bounds price staleness. Errors are never
//! cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tokio_util::sync::CancellationToken;

use crate::domain::{ExploreCandidate, Itinerary};
use crate::provider::{FlightProvider, ProviderError, Request};

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per operation.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(120),
            max_capacity: 1000,
        }
    }
}

/// Cache key: every request field that affects provider output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RequestKey {
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    return_date: NaiveDate,
    adults: u32,
    children: u32,
    cabin: i64,
    currency: String,
}

impl From<&Request> for RequestKey {
    fn from(request: &Request) -> Self {
        RequestKey {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            departure_date: request.departure_date,
            return_date: request.return_date,
            adults: request.adults,
            children: request.children,
            cabin: request.cabin.code(),
            currency: request.currency.as_str().to_string(),
        }
    }
}

/// A provider wrapper that serves repeated requests from memory.
///
/// Wraps any [`FlightProvider`]; the planner stays oblivious to caching.
pub struct CachedProvider<P> {
    inner: P,
    searches: MokaCache<RequestKey, Arc<Vec<Itinerary>>>,
    explores: MokaCache<(RequestKey, String), Arc<Vec<ExploreCandidate>>>,
}

impl<P> CachedProvider<P> {
    /// Wrap `inner` with a cache using the given configuration.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            searches: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            explores: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// Access the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: FlightProvider> FlightProvider for CachedProvider<P> {
    async fn explore(
        &self,
        cancel: CancellationToken,
        request: Request,
        origin: String,
    ) -> Result<Vec<ExploreCandidate>, ProviderError> {
        let key = (RequestKey::from(&request), origin.clone());

        if let Some(hit) = self.explores.get(&key).await {
            return Ok((*hit).clone());
        }

        let candidates = self.inner.explore(cancel, request, origin).await?;
        self.explores
            .insert(key, Arc::new(candidates.clone()))
            .await;

        Ok(candidates)
    }

    async fn search(
        &self,
        cancel: CancellationToken,
        request: Request,
    ) -> Result<Vec<Itinerary>, ProviderError> {
        let key = RequestKey::from(&request);

        if let Some(hit) = self.searches.get(&key).await {
            return Ok((*hit).clone());
        }

        let offers = self.inner.search(cancel, request).await?;
        self.searches.insert(key, Arc::new(offers.clone())).await;

        Ok(offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirportCode, CurrencyCode, Flight, Leg};
    use crate::provider::{CabinClass, MockProvider};
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    fn request(origin: &str, destination: &str) -> Request {
        Request {
            origin: origin.into(),
            destination: destination.into(),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
            adults: 1,
            children: 0,
            cabin: CabinClass::Economy,
            currency: CurrencyCode::parse("GBP").unwrap(),
        }
    }

    fn offer(dep: &str, arr: &str, price: f64) -> Itinerary {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let leg = |d: &str, a: &str, dep_h: i64, arr_h: i64| {
            Leg::new(vec![Flight {
                departure: t0 + ChronoDuration::hours(dep_h),
                arrival: t0 + ChronoDuration::hours(arr_h),
                departure_airport: AirportCode::parse(d).unwrap(),
                arrival_airport: AirportCode::parse(a).unwrap(),
                flight_code: "XX100".into(),
                aircraft: "A320".into(),
                airline: "MockAir".into(),
            }])
            .unwrap()
        };
        Itinerary::new(leg(dep, arr, 0, 8), leg(arr, dep, 168, 176), price, "").unwrap()
    }

    #[tokio::test]
    async fn repeated_search_hits_cache() {
        let mock = MockProvider::new().with_search("LHR", "JFK", vec![offer("LHR", "JFK", 300.0)]);
        let cached = CachedProvider::new(mock, &CacheConfig::default());

        let first = cached
            .search(CancellationToken::new(), request("LHR", "JFK"))
            .await
            .unwrap();
        let second = cached
            .search(CancellationToken::new(), request("LHR", "JFK"))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().search_call_count(), 1);
    }

    #[tokio::test]
    async fn distinct_routes_miss() {
        let mock = MockProvider::new();
        let cached = CachedProvider::new(mock, &CacheConfig::default());

        cached
            .search(CancellationToken::new(), request("LHR", "JFK"))
            .await
            .unwrap();
        cached
            .search(CancellationToken::new(), request("LHR", "ORD"))
            .await
            .unwrap();

        assert_eq!(cached.inner().search_call_count(), 2);
    }

    #[tokio::test]
    async fn passenger_count_is_part_of_the_key() {
        let mock = MockProvider::new();
        let cached = CachedProvider::new(mock, &CacheConfig::default());

        let mut req = request("LHR", "JFK");
        cached
            .search(CancellationToken::new(), req.clone())
            .await
            .unwrap();
        req.adults = 2;
        cached
            .search(CancellationToken::new(), req)
            .await
            .unwrap();

        assert_eq!(cached.inner().search_call_count(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let mock = MockProvider::new().with_search_error("LHR", "JFK", "boom");
        let cached = CachedProvider::new(mock, &CacheConfig::default());

        for _ in 0..2 {
            let result = cached
                .search(CancellationToken::new(), request("LHR", "JFK"))
                .await;
            assert!(result.is_err());
        }

        // Both attempts reached the provider
        assert_eq!(cached.inner().search_call_count(), 2);
    }

    #[tokio::test]
    async fn explore_cached_per_origin() {
        let mock = MockProvider::new().with_explore(
            "LAX",
            vec![ExploreCandidate {
                destination: AirportCode::parse("JFK").unwrap(),
                price: 100.0,
            }],
        );
        let cached = CachedProvider::new(mock, &CacheConfig::default());

        let req = request("LHR", "LAX");
        cached
            .explore(CancellationToken::new(), req.clone(), "LAX".into())
            .await
            .unwrap();
        cached
            .explore(CancellationToken::new(), req.clone(), "LAX".into())
            .await
            .unwrap();
        cached
            .explore(CancellationToken::new(), req, "LHR".into())
            .await
            .unwrap();

        assert_eq!(cached.inner().explore_call_count(), 2);
    }
}
