//! Provider error types.

use crate::domain::DomainError;

/// Errors surfaced by a flight data provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body failed to deserialize
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Rate limited by the API
    #[error("rate limited by fare API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// The API returned an offer the domain layer rejects
    #[error("invalid offer payload: {0}")]
    InvalidOffer(#[from] DomainError),

    /// The request was cancelled before completion
    #[error("request cancelled")]
    Cancelled,
}
