//! Domain types for the split-ticket flight planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod airport;
mod currency;
mod error;
mod flight;
mod itinerary;
mod leg;

pub use airport::{AirportCode, InvalidAirportCode};
pub use currency::{CurrencyCode, InvalidCurrencyCode};
pub use error::DomainError;
pub use flight::Flight;
pub use itinerary::{ExploreCandidate, Itinerary};
pub use leg::Leg;
