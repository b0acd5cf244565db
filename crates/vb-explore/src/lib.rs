//! # vb-explore
//!
//! Frontier-based exploration of an endpoint's pagination space.
//!
//! Each page the server returns may carry cursor tokens pointing at further
//! pages; the explorer feeds unvisited tokens back as new requests, scoring
//! every response's typed representation against its raw body along the way
//! and persisting the captures for offline replay. The walk is bounded by a
//! hard iteration cap, so an endpoint that always reports another page
//! still terminates.
//!
//! Exploration is inherently sequential per endpoint — each iteration
//! depends on the cursors the previous response revealed — but endpoints
//! own their frontier and visited set, so different endpoints could be
//! walked concurrently if a caller wanted to.

mod error;
mod explorer;

pub use error::ExploreError;
pub use explorer::{EndpointCaller, EndpointReport, ExploreOptions, Explorer, Termination};
