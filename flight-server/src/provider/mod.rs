//! Flight data provider capability.
//!
//! The planner depends on a single abstract capability with three
//! operations: explore destinations from an origin, search round-trip
//! offers for a route, and sort offers by price. Implementations include
//! the live fare API client ([`FareApiClient`]) and a deterministic
//! in-memory mock ([`MockProvider`]); any of them can be fronted by the
//! response cache in [`crate::cache`].

mod client;
mod error;
mod mock;
mod request;
mod types;

pub use client::{FareApiClient, FareApiConfig};
pub use error::ProviderError;
pub use mock::MockProvider;
pub use request::{CabinClass, InvalidCabinClass, Request};

use tokio_util::sync::CancellationToken;

use crate::domain::{ExploreCandidate, Itinerary};

/// Trait for providing flight data.
///
/// This abstraction allows the planner to be tested with mock data.
/// Implementations must be safe to invoke from multiple tasks
/// concurrently and must observe the cancellation token, returning
/// [`ProviderError::Cancelled`] promptly once it fires.
pub trait FlightProvider: Send + Sync {
    /// Suggest interesting destinations reachable from `origin` under the
    /// request's constraints (dates, passengers, class, currency).
    ///
    /// The request's own origin/destination are ignored; `origin` is the
    /// city being explored from.
    fn explore(
        &self,
        cancel: CancellationToken,
        request: Request,
        origin: String,
    ) -> impl std::future::Future<Output = Result<Vec<ExploreCandidate>, ProviderError>> + Send;

    /// Return round-trip offers for the request's origin/destination,
    /// dates, passengers, class, and currency.
    fn search(
        &self,
        cancel: CancellationToken,
        request: Request,
    ) -> impl std::future::Future<Output = Result<Vec<Itinerary>, ProviderError>> + Send;

    /// Sort offers in place, ascending by price. Stable.
    fn sort_by_price(&self, itineraries: &mut [Itinerary]) {
        itineraries.sort_by(|a, b| a.price().total_cmp(&b.price()));
    }
}
