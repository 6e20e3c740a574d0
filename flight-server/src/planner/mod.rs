//! Split-ticket planner.
//!
//! This module implements the core pipeline that answers: "can two
//! separately-booked return tickets through a stop airport beat the price
//! of a single through-ticket?"
//!
//! The planner probes the direct route for a reference price, explores
//! candidate stop airports from both ends, expands the plausible ones
//! into priced round trips, and joins the halves into layover-respecting
//! pairs ranked by total price.

mod averages;
mod combine;
mod config;
mod pricing;
mod result;
mod search;

pub use averages::Averages;
pub use combine::{StopPair, one_stop, stop_index, valid_layover};
pub use config::PlannerConfig;
pub use pricing::{base_price, filter_reasonable};
pub use result::SplitTicket;
pub use search::{Planner, SearchError};
