//! Client error types.

use thiserror::Error;

/// Errors that can occur while calling the API or decoding its responses.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A type tag with no model variant in the closed registry.
    #[error("unknown model type tag: {0}")]
    UnknownTypeTag(String),

    /// The raw body did not decode as the expected model variant.
    #[error("failed to decode {type_tag}: {source}")]
    Decode {
        /// Tag of the model variant the body was expected to decode into.
        type_tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// An endpoint key with no template in the catalog.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// The endpoint catalog could not be read or parsed.
    #[error("endpoint catalog unusable: {0}")]
    Catalog(String),

    /// Session cookies could not be loaded.
    #[error("session unavailable: {0}")]
    Session(String),
}
