//! Mock flight provider for testing without API access.
//!
//! Serves canned results keyed by route (for search) and origin (for
//! explore), with per-key error injection. Requests are recorded so tests
//! can pin exactly which routes the planner expanded.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use crate::domain::{ExploreCandidate, Itinerary};

use super::error::ProviderError;
use super::request::Request;
use super::FlightProvider;

/// Deterministic in-memory provider.
///
/// Routes without canned data return empty results, not errors, matching
/// how a fare API responds to a route it has no offers for.
#[derive(Default)]
pub struct MockProvider {
    search_results: HashMap<(String, String), Vec<Itinerary>>,
    search_errors: HashMap<(String, String), String>,
    explore_results: HashMap<String, Vec<ExploreCandidate>>,
    explore_errors: HashMap<String, String>,

    search_log: Mutex<Vec<Request>>,
    explore_log: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Create an empty mock: every search returns no offers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `offers` for searches on `origin -> destination`.
    pub fn with_search(
        mut self,
        origin: &str,
        destination: &str,
        offers: Vec<Itinerary>,
    ) -> Self {
        self.search_results
            .insert((origin.to_string(), destination.to_string()), offers);
        self
    }

    /// Fail searches on `origin -> destination` with an API error.
    pub fn with_search_error(mut self, origin: &str, destination: &str, message: &str) -> Self {
        self.search_errors
            .insert((origin.to_string(), destination.to_string()), message.to_string());
        self
    }

    /// Serve `candidates` for explores from `origin`.
    pub fn with_explore(mut self, origin: &str, candidates: Vec<ExploreCandidate>) -> Self {
        self.explore_results.insert(origin.to_string(), candidates);
        self
    }

    /// Fail explores from `origin` with an API error.
    pub fn with_explore_error(mut self, origin: &str, message: &str) -> Self {
        self.explore_errors
            .insert(origin.to_string(), message.to_string());
        self
    }

    /// Every search request received, in arrival order.
    pub fn search_requests(&self) -> Vec<Request> {
        self.search_log.lock().unwrap().clone()
    }

    /// Every explore origin received, in arrival order.
    pub fn explore_origins(&self) -> Vec<String> {
        self.explore_log.lock().unwrap().clone()
    }

    /// Number of search calls received.
    pub fn search_call_count(&self) -> usize {
        self.search_log.lock().unwrap().len()
    }

    /// Number of explore calls received.
    pub fn explore_call_count(&self) -> usize {
        self.explore_log.lock().unwrap().len()
    }

    fn api_error(message: &str) -> ProviderError {
        ProviderError::Api {
            status: 500,
            message: message.to_string(),
        }
    }
}

impl FlightProvider for MockProvider {
    async fn explore(
        &self,
        cancel: CancellationToken,
        _request: Request,
        origin: String,
    ) -> Result<Vec<ExploreCandidate>, ProviderError> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        self.explore_log.lock().unwrap().push(origin.clone());

        if let Some(message) = self.explore_errors.get(&origin) {
            return Err(Self::api_error(message));
        }

        Ok(self.explore_results.get(&origin).cloned().unwrap_or_default())
    }

    async fn search(
        &self,
        cancel: CancellationToken,
        request: Request,
    ) -> Result<Vec<Itinerary>, ProviderError> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let key = (request.origin.clone(), request.destination.clone());
        self.search_log.lock().unwrap().push(request);

        if let Some(message) = self.search_errors.get(&key) {
            return Err(Self::api_error(message));
        }

        Ok(self.search_results.get(&key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirportCode, CurrencyCode};
    use crate::provider::CabinClass;
    use chrono::NaiveDate;

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

    #[tokio::test]
    async fn unknown_route_returns_empty() {
        let mock = MockProvider::new();

        let offers = mock
            .search(CancellationToken::new(), request("LHR", "LAX"))
            .await
            .unwrap();

        assert!(offers.is_empty());
        assert_eq!(mock.search_call_count(), 1);
    }

    #[tokio::test]
    async fn injected_search_error() {
        let mock = MockProvider::new().with_search_error("LHR", "LAX", "boom");

        let result = mock
            .search(CancellationToken::new(), request("LHR", "LAX"))
            .await;

        assert!(matches!(result, Err(ProviderError::Api { .. })));
    }

    #[tokio::test]
    async fn explore_dispatches_by_origin() {
        let mock = MockProvider::new().with_explore(
            "LAX",
            vec![ExploreCandidate {
                destination: AirportCode::parse("JFK").unwrap(),
                price: 100.0,
            }],
        );

        let from_lax = mock
            .explore(CancellationToken::new(), request("LHR", "LAX"), "LAX".into())
            .await
            .unwrap();
        let from_lhr = mock
            .explore(CancellationToken::new(), request("LHR", "LAX"), "LHR".into())
            .await
            .unwrap();

        assert_eq!(from_lax.len(), 1);
        assert!(from_lhr.is_empty());
        assert_eq!(mock.explore_origins(), vec!["LAX", "LHR"]);
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let mock = MockProvider::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = mock.search(cancel.clone(), request("LHR", "LAX")).await;
        assert!(matches!(result, Err(ProviderError::Cancelled)));

        let result = mock.explore(cancel, request("LHR", "LAX"), "LAX".into()).await;
        assert!(matches!(result, Err(ProviderError::Cancelled)));

        // Cancelled calls are not recorded
        assert_eq!(mock.search_call_count(), 0);
        assert_eq!(mock.explore_call_count(), 0);
    }
}
