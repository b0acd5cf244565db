//! # vb-match
//!
//! Structural comparison of JSON value trees and predicate-driven node
//! discovery.
//!
//! The two halves of this crate are the algorithmic core of verbatim:
//! - [`engine`] scores how faithfully a typed model's reserialized tree
//!   reproduces the raw payload it was decoded from, with a lenient mode
//!   that degrades and records divergences and a strict mode that fails
//!   fast on the first irreconcilable disagreement;
//! - [`discover`] walks a tree collecting every value a node predicate
//!   extracts, which is how pagination cursors are pulled out of decoded
//!   timeline responses.
//!
//! Both halves are pure and reentrant: no shared state, safe to call from
//! any number of concurrent workers.

pub mod discover;
pub mod engine;
pub mod tree;

pub use discover::{
    CURSOR_TYPE, collect, cursor_tokens, field_names, named_fields, pagination_cursors,
};
pub use engine::{MatchError, MatchMode, MatchOutcome, Matcher};
pub use tree::{MAX_DEPTH, Path, PathSegment};
