//! Provider request types.

use chrono::NaiveDate;

use crate::domain::CurrencyCode;

/// Cabin class for a search request.
///
/// The numeric codes are wire-stable and shared with the fare API:
/// Economy=1, PremiumEconomy=2, Business=3, First=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CabinClass {
    Economy = 1,
    PremiumEconomy = 2,
    Business = 3,
    First = 4,
}

impl CabinClass {
    /// Returns the wire-stable numeric tag.
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for CabinClass {
    type Error = InvalidCabinClass;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(CabinClass::Economy),
            2 => Ok(CabinClass::PremiumEconomy),
            3 => Ok(CabinClass::Business),
            4 => Ok(CabinClass::First),
            _ => Err(InvalidCabinClass(code)),
        }
    }
}

/// Error returned for an unknown cabin class code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cabin class code: {0}")]
pub struct InvalidCabinClass(pub i64);

/// A round-trip search request.
///
/// Origin and destination are city or airport identifiers as the provider
/// understands them; the planner substitutes explore-candidate airports
/// into them when expanding legs.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub origin: String,
    pub destination: String,

    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,

    pub adults: u32,
    pub children: u32,

    pub cabin: CabinClass,
    pub currency: CurrencyCode,
}

impl Request {
    /// Returns a copy of this request with a different route, keeping
    /// dates, passengers, class, and currency.
    pub fn with_route(&self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Request {
            origin: origin.into(),
            destination: destination.into(),
            ..self.clone()
        }
    }
}
