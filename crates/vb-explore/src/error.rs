//! Exploration error types.
//!
//! Everything that can go wrong inside a single iteration converges here;
//! the explorer recovers at iteration granularity and records the failure
//! on the endpoint's report.

use thiserror::Error;

/// Errors that can occur during one exploration iteration.
#[derive(Debug, Error)]
pub enum ExploreError {
    /// Live call or decoding failure.
    #[error(transparent)]
    Client(#[from] vb_client::ClientError),

    /// The raw body did not parse as JSON at all.
    #[error("raw body is not JSON: {0}")]
    RawBody(#[from] serde_json::Error),

    /// Strict-mode schema drift or a pathological payload.
    #[error(transparent)]
    Match(#[from] vb_match::MatchError),

    /// The capture could not be persisted.
    #[error(transparent)]
    Cache(#[from] vb_cache::CacheError),
}
