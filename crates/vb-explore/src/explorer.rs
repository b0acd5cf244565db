//! The pagination explorer.
//!
//! Per endpoint, a frontier of undiscovered cursor tokens (seeded with the
//! "no cursor" sentinel) and a visited set drive a bounded walk of the
//! server's pagination space: pop a token, request the page, score the
//! decoded model against the raw body, persist the capture, discover new
//! cursors, repeat. The iteration cap is a hard ceiling — a server that
//! always reports another page still terminates the walk.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::{Map, Value};

use vb_cache::CacheStore;
use vb_client::{CallOutcome, ClientError, TransactionSigner, XClient};
use vb_match::{MatchMode, Matcher, cursor_tokens};

use crate::error::ExploreError;

/// The live-call seam. Production uses [`XClient`]; tests drive the
/// explorer against synthetic endpoints.
pub trait EndpointCaller: Sync {
    fn call(
        &self,
        operation: &str,
        overrides: &Map<String, Value>,
    ) -> impl Future<Output = Result<CallOutcome, ClientError>> + Send;
}

impl<S: TransactionSigner> EndpointCaller for XClient<S> {
    fn call(
        &self,
        operation: &str,
        overrides: &Map<String, Value>,
    ) -> impl Future<Output = Result<CallOutcome, ClientError>> + Send {
        Self::call(self, operation, overrides)
    }
}

/// Knobs for one exploration run.
#[derive(Debug, Clone)]
pub struct ExploreOptions {
    /// Hard ceiling on iterations per endpoint.
    pub max_iterations: usize,
    /// Pause between iterations, skipped when no further iteration runs.
    pub delay: Duration,
    /// Fail fast on the first structural disagreement instead of degrading
    /// the score.
    pub strict: bool,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            delay: Duration::ZERO,
            strict: false,
        }
    }
}

/// How an endpoint's exploration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The frontier ran dry: every discovered cursor was visited.
    Exhausted,
    /// The iteration cap cut the walk short with cursors still waiting.
    Capped,
    /// An iteration errored; the failure is recorded on the report.
    Failed,
}

/// Outcome of exploring one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointReport {
    pub endpoint: String,
    /// Iterations that completed (requested, scored, persisted).
    pub iterations: usize,
    /// Match score of each completed iteration, in order.
    pub scores: Vec<f64>,
    /// Responses that decoded fine but carried an explicit error member.
    pub api_errors: usize,
    /// The error that ended the walk, when [`Termination::Failed`].
    pub failure: Option<String>,
    pub termination: Termination,
}

impl EndpointReport {
    fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            iterations: 0,
            scores: Vec::new(),
            api_errors: 0,
            failure: None,
            termination: Termination::Exhausted,
        }
    }

    /// Failures this endpoint contributes to the run total: API error
    /// payloads plus the terminal error, when there is one.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.api_errors + usize::from(self.failure.is_some())
    }
}

/// Drives exploration over endpoints, sequentially per endpoint.
pub struct Explorer<'a, C> {
    caller: &'a C,
    cache: &'a CacheStore,
    opts: ExploreOptions,
}

impl<'a, C: EndpointCaller> Explorer<'a, C> {
    pub const fn new(caller: &'a C, cache: &'a CacheStore, opts: ExploreOptions) -> Self {
        Self { caller, cache, opts }
    }

    /// Explore every endpoint in turn. A failed endpoint never aborts the
    /// run; its report carries the failure and the walk moves on.
    pub async fn explore_all<I, E>(&self, endpoints: I) -> Vec<EndpointReport>
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        let mut reports = Vec::new();
        for endpoint in endpoints {
            reports.push(self.explore(endpoint.as_ref()).await);
        }
        reports
    }

    /// Walk one endpoint's cursor space.
    pub async fn explore(&self, endpoint: &str) -> EndpointReport {
        let mut report = EndpointReport::new(endpoint);
        // The sentinel `None` means "no cursor parameter": the first page.
        let mut frontier: HashSet<Option<String>> = HashSet::from([None]);
        let mut visited: HashSet<Option<String>> = HashSet::new();

        for iteration in 0..self.opts.max_iterations {
            let Some(cursor) = frontier.iter().next().cloned() else {
                return report;
            };
            frontier.remove(&cursor);
            visited.insert(cursor.clone());
            tracing::info!(
                endpoint,
                cursor = cursor.as_deref().unwrap_or("<start>"),
                "requesting page"
            );

            match self.step(endpoint, cursor.as_deref(), &mut report).await {
                Ok(discovered) => {
                    report.iterations += 1;
                    for token in discovered {
                        let token = Some(token);
                        if !visited.contains(&token) {
                            frontier.insert(token);
                        }
                    }
                }
                Err(error) => {
                    tracing::error!(
                        endpoint,
                        cursor = cursor.as_deref().unwrap_or("<start>"),
                        %error,
                        "iteration failed"
                    );
                    report.failure = Some(error.to_string());
                    report.termination = Termination::Failed;
                    return report;
                }
            }

            if frontier.is_empty() {
                report.termination = Termination::Exhausted;
                return report;
            }
            if iteration + 1 < self.opts.max_iterations && !self.opts.delay.is_zero() {
                tokio::time::sleep(self.opts.delay).await;
            }
        }

        report.termination = Termination::Capped;
        report
    }

    async fn step(
        &self,
        endpoint: &str,
        cursor: Option<&str>,
        report: &mut EndpointReport,
    ) -> Result<Vec<String>, ExploreError> {
        let mut overrides = Map::new();
        if let Some(token) = cursor {
            overrides.insert("cursor".to_owned(), Value::String(token.to_owned()));
        }

        let outcome = self.caller.call(endpoint, &overrides).await?;
        let raw: Value = serde_json::from_str(&outcome.raw)?;

        let mode = if self.opts.strict {
            MatchMode::Strict
        } else {
            MatchMode::Lenient
        };
        let scored = Matcher::new(mode, outcome.model.type_tag()).score(outcome.model.tree(), &raw)?;
        tracing::info!(endpoint, score = scored.score, "match rate");
        if let Some(path) = &scored.divergence {
            tracing::warn!(endpoint, path = %path, "fidelity diverges");
        }
        report.scores.push(scored.score);

        self.cache.persist(&outcome.raw, outcome.model.type_tag())?;

        if outcome.model.has_error_payload() {
            tracing::error!(endpoint, "response carries an error payload");
            report.api_errors += 1;
        }

        Ok(cursor_tokens(outcome.model.tree()))
    }
}
