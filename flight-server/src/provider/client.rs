//! Live fare API client.
//!
//! Provides async access to the fare aggregator HTTP API. Handles
//! authentication, concurrency capping, and conversion to domain types.
//!
//! A round-trip search is a two-step flow on the wire: list outbound
//! offers for the route, then expand the cheapest outbound offers into
//! priced return options and a booking URL per selection. Failures in the
//! second step affect only that offer and are logged and skipped; callers
//! never see them.

use std::sync::Arc;

use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{ExploreCandidate, Itinerary};

use super::error::ProviderError;
use super::request::Request;
use super::types::{
    BookingUrlResponse, ExploreResponse, OutboundOffer, OutboundOffersResponse,
    ReturnOffersResponse, convert_candidate, convert_itinerary,
};
use super::FlightProvider;

/// Default base URL for the fare API.
const DEFAULT_BASE_URL: &str = "https://api.faregrid.io";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// How many of the cheapest outbound offers to expand into return options.
const EXPANSION_LIMIT: usize = 5;

/// Configuration for the fare API client.
#[derive(Debug, Clone)]
pub struct FareApiConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FareApiConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Fare API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting;
/// the cap applies across every fan-out the planner performs, since the
/// client is shared.
#[derive(Debug, Clone)]
pub struct FareApiClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl FareApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FareApiConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| ProviderError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert("x-api-key", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Perform a GET request and deserialize the JSON response.
    ///
    /// Acquires a semaphore permit for the duration of the request and
    /// races it against the cancellation token.
    async fn get_json<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);

        let send = self.http.get(&url).query(query).send();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
            response = send => response?,
        };

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Json {
            message: format!("{e} (body: {})", body.chars().take(500).collect::<String>()),
        })
    }

    /// Query parameters shared by every offer-shaped request.
    fn route_query(request: &Request) -> Vec<(&'static str, String)> {
        vec![
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("departure", request.departure_date.format("%Y-%m-%d").to_string()),
            ("return", request.return_date.format("%Y-%m-%d").to_string()),
            ("adults", request.adults.to_string()),
            ("children", request.children.to_string()),
            ("cabin", request.cabin.code().to_string()),
            ("currency", request.currency.as_str().to_string()),
        ]
    }

    /// Expand one outbound offer into priced itineraries.
    ///
    /// Returns only the successfully-expanded itineraries; per-return
    /// failures are logged and skipped.
    async fn expand_offer(
        &self,
        cancel: &CancellationToken,
        offer: &OutboundOffer,
        cap_price: f64,
    ) -> Vec<Itinerary> {
        let returns: ReturnOffersResponse = match self
            .get_json(cancel, &format!("/v1/offers/{}/returns", offer.id), &[])
            .await
        {
            Ok(returns) => returns,
            Err(e) => {
                warn!(offer = %offer.id, error = %e, "Failed to fetch return flights, skipping offer");
                return Vec::new();
            }
        };

        let mut itineraries = Vec::new();

        for ret in &returns.returns {
            if ret.price > cap_price {
                continue;
            }

            let booking: BookingUrlResponse = match self
                .get_json(
                    cancel,
                    "/v1/booking-url",
                    &[
                        ("outbound", offer.id.clone()),
                        ("return", ret.id.clone()),
                    ],
                )
                .await
            {
                Ok(booking) => booking,
                Err(e) => {
                    warn!(offer = %offer.id, ret = %ret.id, error = %e, "Failed to serialise booking URL, skipping return");
                    continue;
                }
            };

            match convert_itinerary(offer, ret, booking.url) {
                Ok(itin) => itineraries.push(itin),
                Err(e) => {
                    warn!(offer = %offer.id, ret = %ret.id, error = %e, "Rejected malformed offer payload");
                }
            }
        }

        itineraries
    }
}

impl FlightProvider for FareApiClient {
    async fn explore(
        &self,
        cancel: CancellationToken,
        request: Request,
        origin: String,
    ) -> Result<Vec<ExploreCandidate>, ProviderError> {
        let mut query = Self::route_query(&request);
        query.retain(|(name, _)| *name != "origin" && *name != "destination");
        query.push(("origin", origin));

        let response: ExploreResponse = self.get_json(&cancel, "/v1/explore", &query).await?;

        response
            .destinations
            .iter()
            .map(convert_candidate)
            .collect()
    }

    async fn search(
        &self,
        cancel: CancellationToken,
        request: Request,
    ) -> Result<Vec<Itinerary>, ProviderError> {
        let response: OutboundOffersResponse = self
            .get_json(&cancel, "/v1/offers", &Self::route_query(&request))
            .await?;

        let mut offers = response.offers;
        offers.sort_by(|a, b| a.price.total_cmp(&b.price));

        // Expand only the cheapest few outbounds, and ignore return options
        // priced beyond the next-cheapest unexpanded outbound: a better
        // pairing would already have been found under an earlier offer.
        let cap_price = offers
            .get(EXPANSION_LIMIT)
            .map(|offer| offer.price)
            .unwrap_or(f64::INFINITY);

        debug!(
            offers = offers.len(),
            expanding = offers.len().min(EXPANSION_LIMIT),
            "Expanding outbound offers"
        );

        let expansions = join_all(
            offers
                .iter()
                .take(EXPANSION_LIMIT)
                .map(|offer| self.expand_offer(&cancel, offer, cap_price)),
        )
        .await;

        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        Ok(expansions.into_iter().flatten().collect())
    }
}
