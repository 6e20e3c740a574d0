//! Currency code type.

use std::fmt;

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency code: {reason}")]
pub struct InvalidCurrencyCode {
    reason: &'static str,
}

/// An ISO 4217 alphabetic currency code ("GBP", "USD", ...).
///
/// Three uppercase ASCII letters, valid by construction. The code is a
/// wire-stable request parameter; prices are plain numbers in whatever
/// currency the request named.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Parse a currency code from a string (exactly 3 uppercase ASCII letters).
    pub fn parse(s: &str) -> Result<Self, InvalidCurrencyCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCurrencyCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCurrencyCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(CurrencyCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
