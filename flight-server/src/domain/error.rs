//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from provider/IO errors.

use super::AirportCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A leg must contain at least one flight
    #[error("leg must contain at least one flight")]
    EmptyLeg,

    /// Consecutive flights in a leg don't share an airport
    #[error("flights do not connect: arrival at {0} but next departure from {1}")]
    FlightsNotConnected(AirportCode, AirportCode),

    /// A leg (or flight) arrives before it departs
    #[error("arrival precedes departure")]
    NegativeDuration,

    /// The inbound leg departs before the outbound leg arrives
    #[error("inbound leg departs before outbound leg arrives")]
    ReturnBeforeOutbound,

    /// Outbound and inbound legs don't mirror each other's route
    #[error("round trip routes do not mirror: out {0}->{1}, in {2}->{3}")]
    RouteMismatch(AirportCode, AirportCode, AirportCode, AirportCode),

    /// Price is negative or not a finite number
    #[error("price must be a non-negative finite number, got {0}")]
    InvalidPrice(f64),
}
