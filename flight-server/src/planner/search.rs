//! Split-ticket search pipeline.
//!
//! Finds pairs of separately-bookable round trips through a common stop
//! airport that together undercut a reasonable single-ticket price for
//! the direct route.
//!
//! The pipeline: probe the direct route for a quality-adjusted base
//! price, explore candidate stop airports from both ends of the route,
//! drop candidates whose one-way price is already close to the base,
//! expand the survivors into priced round trips for each half of the
//! journey, join the halves by stop airport, and enumerate the pairs
//! whose connecting layover fits the configured band.

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::domain::{ExploreCandidate, Itinerary};
use crate::provider::{FlightProvider, ProviderError, Request};

use super::combine::{one_stop, stop_index};
use super::config::PlannerConfig;
use super::pricing::{base_price, filter_reasonable};
use super::result::SplitTicket;

/// Error from split-ticket search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A provider call failed. The first failure observed in a fan-out
    /// stage is surfaced; no partial results accompany it.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The search was cancelled before completion.
    #[error("search cancelled")]
    Cancelled,
}

/// Split-ticket planner.
///
/// Borrows a provider and configuration; the cancellation token is
/// propagated into every provider invocation.
pub struct Planner<'a, P: FlightProvider> {
    provider: &'a P,
    config: &'a PlannerConfig,
    cancel: CancellationToken,
}

impl<'a, P: FlightProvider> Planner<'a, P> {
    /// Create a new planner.
    pub fn new(provider: &'a P, config: &'a PlannerConfig, cancel: CancellationToken) -> Self {
        Self {
            provider,
            config,
            cancel,
        }
    }

    /// Search for split-ticket itineraries for the request's route.
    ///
    /// Returns results sorted ascending by total price. A direct route
    /// with no offers yields an empty list, not an error. Any provider
    /// failure during the probe, explore, or expansion stages fails the
    /// whole search.
    #[instrument(skip(self, request), fields(
        origin = %request.origin,
        destination = %request.destination
    ))]
    pub async fn search(&self, request: &Request) -> Result<Vec<SplitTicket>, SearchError> {
        info!("Starting split-ticket search");
        self.check_cancelled()?;

        let base = self.probe_base_price(request).await?;
        debug!(base_price = base, "Computed direct-route base price");

        let (dest_side, origin_side) = self.explore(request).await?;
        debug!(
            dest_side = dest_side.len(),
            origin_side = origin_side.len(),
            "Explore complete"
        );

        let dest_side = filter_reasonable(dest_side, base);
        let origin_side = filter_reasonable(origin_side, base);
        debug!(
            dest_side = dest_side.len(),
            origin_side = origin_side.len(),
            "Filtered candidates against base price"
        );
        self.check_cancelled()?;

        let first_via_dest = self.expand_first_legs(request, &dest_side).await?;
        let first_via_origin = self.expand_first_legs(request, &origin_side).await?;

        let (second_via_dest, second_via_origin) = self
            .expand_second_legs(request, &dest_side, &origin_side)
            .await?;

        let mut results = self.combine(
            &first_via_dest,
            &second_via_dest,
            &first_via_origin,
            &second_via_origin,
        );

        results.sort_by(|a, b| a.price().total_cmp(&b.price()));

        info!(results = results.len(), "Search complete");
        if results.is_empty() {
            warn!("No split-ticket itineraries found");
        }

        Ok(results)
    }

    fn check_cancelled(&self) -> Result<(), SearchError> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        Ok(())
    }

    /// Establish what a user should reasonably pay for the direct route
    /// as a single ticket. No offers means no reference price: the base
    /// is 0 and the filter will discard every candidate.
    async fn probe_base_price(&self, request: &Request) -> Result<f64, SearchError> {
        let mut offers = self
            .provider
            .search(self.cancel.clone(), request.clone())
            .await?;

        if offers.is_empty() {
            return Ok(0.0);
        }

        self.provider.sort_by_price(&mut offers);
        Ok(base_price(&offers))
    }

    /// Explore candidate stop airports from both ends of the route
    /// concurrently. Each list comes back sorted ascending by price.
    async fn explore(
        &self,
        request: &Request,
    ) -> Result<(Vec<ExploreCandidate>, Vec<ExploreCandidate>), SearchError> {
        let from_destination = self.provider.explore(
            self.cancel.clone(),
            request.clone(),
            request.destination.clone(),
        );
        let from_origin =
            self.provider
                .explore(self.cancel.clone(), request.clone(), request.origin.clone());

        let (from_destination, from_origin) = tokio::join!(from_destination, from_origin);

        let mut dest_side = from_destination?;
        let mut origin_side = from_origin?;

        dest_side.sort_by(|a, b| a.price.total_cmp(&b.price));
        origin_side.sort_by(|a, b| a.price.total_cmp(&b.price));

        Ok((dest_side, origin_side))
    }

    /// Expand candidates into priced first-leg round trips:
    /// `origin -> candidate` for every candidate.
    async fn expand_first_legs(
        &self,
        request: &Request,
        candidates: &[ExploreCandidate],
    ) -> Result<Vec<Vec<Itinerary>>, SearchError> {
        let requests = candidates
            .iter()
            .map(|candidate| {
                request.with_route(request.origin.clone(), candidate.destination.as_str())
            })
            .collect();

        self.expand_requests(requests).await
    }

    /// Expand candidates into priced second-leg round trips, both sides
    /// joined as one fan-out.
    ///
    /// Destination-side candidates expand `candidate -> destination`.
    /// Origin-side candidates expand `origin -> candidate`, the same
    /// route their first legs used. Consequence: origin-side pools never
    /// produce a join, since their second-leg buckets key on the origin
    /// airport, which no first-leg bucket matches.
    async fn expand_second_legs(
        &self,
        request: &Request,
        dest_side: &[ExploreCandidate],
        origin_side: &[ExploreCandidate],
    ) -> Result<(Vec<Vec<Itinerary>>, Vec<Vec<Itinerary>>), SearchError> {
        let requests: Vec<Request> = dest_side
            .iter()
            .map(|candidate| {
                request.with_route(candidate.destination.as_str(), request.destination.clone())
            })
            .chain(origin_side.iter().map(|candidate| {
                request.with_route(request.origin.clone(), candidate.destination.as_str())
            }))
            .collect();

        let mut expanded = self.expand_requests(requests).await?;
        let second_via_origin = expanded.split_off(dest_side.len());

        Ok((expanded, second_via_origin))
    }

    /// Run one provider search per request, `batch_size` at a time.
    ///
    /// Results stay aligned with input order: the fan-out writes each
    /// outcome back at its request's index, and the single consumer
    /// surfaces the first error it sees. Each sublist is sorted
    /// ascending by price.
    async fn expand_requests(
        &self,
        requests: Vec<Request>,
    ) -> Result<Vec<Vec<Itinerary>>, SearchError> {
        let mut results = Vec::with_capacity(requests.len());

        for batch in requests.chunks(self.config.batch_size) {
            let futures: Vec<_> = batch
                .iter()
                .map(|req| {
                    let cancel = self.cancel.clone();
                    async move { self.provider.search(cancel, req.clone()).await }
                })
                .collect();

            for outcome in join_all(futures).await {
                let mut offers = outcome?;
                self.provider.sort_by_price(&mut offers);
                results.push(offers);
            }
        }

        Ok(results)
    }

    /// Join each side's pools by stop airport and enumerate valid pairs.
    /// Buckets are visited in airport-code order so equal-price results
    /// come out in a stable order.
    fn combine(
        &self,
        first_via_dest: &[Vec<Itinerary>],
        second_via_dest: &[Vec<Itinerary>],
        first_via_origin: &[Vec<Itinerary>],
        second_via_origin: &[Vec<Itinerary>],
    ) -> Vec<SplitTicket> {
        let min = self.config.min_layover();
        let max = self.config.max_layover();

        let mut results = Vec::new();

        for (firsts, seconds) in [
            (first_via_dest, second_via_dest),
            (first_via_origin, second_via_origin),
        ] {
            let mut stops: Vec<_> = stop_index(firsts, seconds).into_iter().collect();
            stops.sort_by_key(|(airport, _)| *airport);

            for (_, pair) in stops {
                results.extend(one_stop(&pair.firsts, &pair.seconds, min, max));
            }
        }

        results
    }
}
