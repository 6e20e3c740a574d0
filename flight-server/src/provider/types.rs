//! Fare API response DTOs and conversion to domain types.
//!
//! These types map directly to the fare API JSON responses. Conversion is
//! fallible: offers with malformed airport codes or inconsistent legs are
//! rejected, and the caller decides whether that is fatal (explore,
//! outbound listing) or skippable (per-offer expansion).

use serde::Deserialize;

use chrono::{DateTime, Utc};

use crate::domain::{AirportCode, ExploreCandidate, Flight, Itinerary, Leg};

use super::error::ProviderError;

/// A single flight segment as the fare API reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFlight {
    /// Departure instant (ISO 8601, UTC).
    pub departure_time: DateTime<Utc>,

    /// Arrival instant (ISO 8601, UTC).
    pub arrival_time: DateTime<Utc>,

    /// Departure airport IATA code.
    pub departure_airport: String,

    /// Arrival airport IATA code.
    pub arrival_airport: String,

    /// Airline code, e.g. "BA".
    pub airline_code: String,

    /// Flight number, e.g. "117".
    pub flight_number: String,

    /// Aircraft model. Omitted for some carriers.
    pub airplane: Option<String>,

    /// Operating airline name. Omitted for some carriers.
    pub airline_name: Option<String>,
}

/// Response from `GET /v1/offers`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundOffersResponse {
    pub offers: Vec<OutboundOffer>,
}

/// An outbound offer with its round-trip anchor price.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundOffer {
    /// Opaque offer id, used to fetch matching return flights.
    pub id: String,

    /// Cheapest round-trip price anchored on this outbound.
    pub price: f64,

    /// Outbound flight segments in order.
    pub flights: Vec<WireFlight>,
}

/// Response from `GET /v1/offers/{id}/returns`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOffersResponse {
    pub returns: Vec<ReturnOffer>,
}

/// A return option for a selected outbound offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOffer {
    /// Opaque offer id, used to serialise a booking URL.
    pub id: String,

    /// Total round-trip price for outbound + this return.
    pub price: f64,

    /// Return flight segments in order.
    pub flights: Vec<WireFlight>,
}

/// Response from `GET /v1/booking-url`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUrlResponse {
    pub url: String,
}

/// Response from `GET /v1/explore`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreResponse {
    pub destinations: Vec<ExploreDestination>,
}

/// A destination suggestion with an indicative price.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreDestination {
    /// Destination airport IATA code.
    pub airport: String,

    /// Indicative price in the request currency.
    pub price: f64,
}

fn parse_airport(code: &str) -> Result<AirportCode, ProviderError> {
    AirportCode::parse(code).map_err(|e| ProviderError::Json {
        message: format!("invalid airport code {code:?}: {e}"),
    })
}

/// Convert a wire flight into a domain [`Flight`].
pub fn convert_flight(wire: &WireFlight) -> Result<Flight, ProviderError> {
    Ok(Flight {
        departure: wire.departure_time,
        arrival: wire.arrival_time,
        departure_airport: parse_airport(&wire.departure_airport)?,
        arrival_airport: parse_airport(&wire.arrival_airport)?,
        flight_code: format!("{}{}", wire.airline_code, wire.flight_number),
        aircraft: wire.airplane.clone().unwrap_or_default(),
        airline: wire.airline_name.clone().unwrap_or_default(),
    })
}

/// Convert an ordered list of wire flights into a domain [`Leg`].
pub fn convert_leg(flights: &[WireFlight]) -> Result<Leg, ProviderError> {
    let flights = flights
        .iter()
        .map(convert_flight)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Leg::new(flights)?)
}

/// Build a domain [`Itinerary`] from an outbound offer and one of its
/// return options. The return offer's price is the round-trip total.
pub fn convert_itinerary(
    outbound: &OutboundOffer,
    ret: &ReturnOffer,
    booking_url: String,
) -> Result<Itinerary, ProviderError> {
    let out = convert_leg(&outbound.flights)?;
    let back = convert_leg(&ret.flights)?;

    Ok(Itinerary::new(out, back, ret.price, booking_url)?)
}

/// Convert an explore destination into a domain [`ExploreCandidate`].
pub fn convert_candidate(dest: &ExploreDestination) -> Result<ExploreCandidate, ProviderError> {
    Ok(ExploreCandidate {
        destination: parse_airport(&dest.airport)?,
        price: dest.price,
    })
}
