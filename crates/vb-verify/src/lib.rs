//! # vb-verify
//!
//! Offline replay of captured payloads.
//!
//! Every cache record is decoded through the closed model registry,
//! reserialized, and scored against an independent parse of its own raw
//! body. A record passes only at full fidelity (score ≥ 1). Units are
//! independent — in parallel mode they fan out on a `JoinSet` and one
//! unit's failure never touches its siblings; every unit reports an
//! explicit outcome rather than disappearing into a swallowed error.
//!
//! After a batch, failing records are re-run one by one in propagating
//! mode: decode and corruption errors surface with their full chain
//! instead of collapsing into a unit outcome, and lossy records log the
//! exact divergence path.

use serde_json::Value;
use thiserror::Error;

use vb_cache::{CacheError, CacheStore, RecordId};
use vb_client::{ClientError, decode_tagged};
use vb_match::{MatchError, MatchMode, Matcher};

/// Errors surfaced by the propagating diagnostic re-run.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The record file is unreadable or corrupt.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Unknown type tag or a body that does not decode as its tag.
    #[error(transparent)]
    Decode(#[from] ClientError),

    /// The raw body does not parse as JSON.
    #[error("raw body is not JSON: {0}")]
    RawBody(#[from] serde_json::Error),

    /// A pathological payload the engine refuses to walk.
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Explicit result of one verification unit.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    /// Full fidelity.
    Pass { id: RecordId, score: f64 },
    /// Decoded fine but lost information on the round trip.
    Mismatch {
        id: RecordId,
        score: f64,
        divergence: Option<String>,
    },
    /// The unit could not be scored at all; scored 0 by definition.
    Error { id: RecordId, reason: String },
}

impl UnitOutcome {
    #[must_use]
    pub const fn id(&self) -> RecordId {
        match self {
            Self::Pass { id, .. } | Self::Mismatch { id, .. } | Self::Error { id, .. } => *id,
        }
    }

    /// A record is a failure unless it reproduced its raw body losslessly.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !matches!(self, Self::Pass { .. })
    }
}

/// Outcome of one replay batch.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// Records attempted.
    pub attempts: usize,
    /// Per-record outcomes, ordered by record identifier.
    pub outcomes: Vec<UnitOutcome>,
    /// Identifiers of failing records, ordered.
    pub failures: Vec<RecordId>,
}

impl VerifyReport {
    fn from_outcomes(mut outcomes: Vec<UnitOutcome>) -> Self {
        outcomes.sort_by_key(UnitOutcome::id);
        let failures = outcomes
            .iter()
            .filter(|outcome| outcome.is_failure())
            .map(UnitOutcome::id)
            .collect();
        Self {
            attempts: outcomes.len(),
            outcomes,
            failures,
        }
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Replays cache records against the fidelity engine.
pub struct Verifier<'a> {
    store: &'a CacheStore,
}

impl<'a> Verifier<'a> {
    #[must_use]
    pub const fn new(store: &'a CacheStore) -> Self {
        Self { store }
    }

    /// Verify every record in the store.
    ///
    /// # Errors
    ///
    /// [`CacheError`] only if the store cannot be listed; per-record
    /// problems land in the report, never here.
    pub async fn verify_all(&self, parallel: bool) -> Result<VerifyReport, CacheError> {
        let ids = self.store.list()?;
        Ok(self.verify(ids, parallel).await)
    }

    /// Verify the given records, fanning out when `parallel`.
    pub async fn verify(&self, ids: Vec<RecordId>, parallel: bool) -> VerifyReport {
        let outcomes = if parallel {
            let mut set = tokio::task::JoinSet::new();
            for id in ids {
                let store = self.store.clone();
                set.spawn(async move { verify_unit(&store, id) });
            }
            // Completion order is arbitrary; the report sorts by id.
            let mut outcomes = Vec::new();
            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(error) => tracing::error!(%error, "verification worker panicked"),
                }
            }
            outcomes
        } else {
            ids.into_iter()
                .map(|id| verify_unit(self.store, id))
                .collect()
        };

        for outcome in &outcomes {
            match outcome {
                UnitOutcome::Pass { id, score } => {
                    tracing::info!(id, score, "match rate");
                }
                UnitOutcome::Mismatch { id, score, divergence } => {
                    tracing::warn!(
                        id,
                        score,
                        divergence = divergence.as_deref().unwrap_or("<none>"),
                        "match rate below 1"
                    );
                }
                UnitOutcome::Error { id, reason } => {
                    tracing::error!(id, reason, "record could not be verified");
                }
            }
        }

        VerifyReport::from_outcomes(outcomes)
    }

    /// Re-run one record with errors propagating instead of folding into a
    /// unit outcome. A well-formed record never errors here, however low it
    /// scores; its divergence path is logged as the diagnostic.
    ///
    /// # Errors
    ///
    /// [`VerifyError`] carrying the exact failure: corrupt record, unknown
    /// tag, or an undecodable body.
    pub fn diagnose(&self, id: RecordId) -> Result<f64, VerifyError> {
        let record = self.store.load(id)?;
        let model = decode_tagged(&record.type_tag, &record.raw)?;
        let raw: Value = serde_json::from_str(&record.raw)?;
        let outcome = Matcher::new(MatchMode::Lenient, model.type_tag()).score(model.tree(), &raw)?;
        if let Some(path) = &outcome.divergence {
            tracing::warn!(id, path = %path, "fidelity diverges");
        }
        Ok(outcome.score)
    }

    /// Diagnostic pass over a batch's failures. Logs each diagnostic and
    /// returns how many re-runs still failed.
    pub fn diagnose_failures(&self, failures: &[RecordId]) -> usize {
        let mut still_failing = 0;
        for &id in failures {
            match self.diagnose(id) {
                Ok(score) if score >= 1.0 => tracing::info!(id, score, "re-run scored clean"),
                Ok(score) => {
                    still_failing += 1;
                    tracing::warn!(id, score, "re-run still below full fidelity");
                }
                Err(error) => {
                    still_failing += 1;
                    tracing::error!(id, %error, "replay failure diagnostic");
                }
            }
        }
        still_failing
    }
}

fn verify_unit(store: &CacheStore, id: RecordId) -> UnitOutcome {
    match check_record(store, id) {
        Ok(outcome) => outcome,
        Err(error) => UnitOutcome::Error {
            id,
            reason: error.to_string(),
        },
    }
}

fn check_record(store: &CacheStore, id: RecordId) -> Result<UnitOutcome, VerifyError> {
    let record = store.load(id)?;
    let model = decode_tagged(&record.type_tag, &record.raw)?;
    let raw: Value = serde_json::from_str(&record.raw)?;
    let outcome = Matcher::new(MatchMode::Lenient, model.type_tag()).score(model.tree(), &raw)?;
    if outcome.is_faithful() {
        Ok(UnitOutcome::Pass {
            id,
            score: outcome.score,
        })
    } else {
        Ok(UnitOutcome::Mismatch {
            id,
            score: outcome.score,
            divergence: outcome.divergence.map(|path| path.to_string()),
        })
    }
}
