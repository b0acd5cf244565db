//! Structural match engine.
//!
//! Scores how faithfully one JSON tree (`a`, a typed model reserialized)
//! reproduces another (`b`, the raw payload the model was decoded from).
//! The score is 1.0 for perfect agreement and degrades toward 0.0 as
//! subtrees disagree.
//!
//! The equivalence rules are deliberate about a handful of asymmetries the
//! typed layer introduces:
//! - absence modeled as `null` matches absence modeled as `false`, an empty
//!   sequence, or an empty mapping;
//! - mapping scores divide by the key count of the *reference* side `b`, so
//!   extra keys produced by the typed layer are not penalized (and matching
//!   extras can push a subtree's score above 1.0 — callers compare against
//!   `>= 1.0`, not `== 1.0`);
//! - sequences of different lengths cannot be aligned elementwise and score
//!   a hard zero for the whole subtree.
//!
//! Do not change the mapping divisor to the union size: pass/fail outcomes
//! across the recorded corpus depend on it.

use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use crate::tree::{MAX_DEPTH, Path, PathSegment};

const NULL: &Value = &Value::Null;

/// How the engine reacts to an irreconcilable disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Score the disagreeing subtree 0.0, record the divergence path, and
    /// keep aggregating upward.
    Lenient,
    /// Fail on the first disagreement with a [`MatchError::SchemaDrift`]
    /// naming the owning type and path.
    Strict,
}

/// Result of one comparison: the aggregate score and, in lenient mode, the
/// path to the first subtree that bottomed out at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub score: f64,
    pub divergence: Option<Path>,
}

impl MatchOutcome {
    /// Whether the typed side reproduced the reference losslessly.
    #[must_use]
    pub fn is_faithful(&self) -> bool {
        self.score >= 1.0
    }
}

/// Errors raised by the engine.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Strict mode only: the typed layer does not represent what the
    /// reference payload contains at `path`.
    #[error("schema drift in {type_tag} at `{path}`: reference content {reference}")]
    SchemaDrift {
        /// Type tag of the decoded model that owns the disagreeing subtree.
        type_tag: String,
        /// Where the comparison bottomed out.
        path: Path,
        /// Dump of the reference side's conflicting content.
        reference: String,
    },

    /// Nesting exceeded [`MAX_DEPTH`]; the payload is pathological.
    #[error("nesting exceeds depth limit {limit} at `{path}`")]
    DepthExceeded { limit: usize, path: Path },
}

/// One comparison run. Construct per decoded model so strict-mode
/// diagnostics can name the owning type.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    mode: MatchMode,
    type_tag: &'a str,
}

impl<'a> Matcher<'a> {
    #[must_use]
    pub const fn new(mode: MatchMode, type_tag: &'a str) -> Self {
        Self { mode, type_tag }
    }

    /// Compare the reserialized typed tree `a` against the raw reference
    /// tree `b`.
    ///
    /// # Errors
    ///
    /// [`MatchError::SchemaDrift`] in strict mode on the first
    /// disagreement; [`MatchError::DepthExceeded`] in either mode when the
    /// trees nest beyond [`MAX_DEPTH`].
    pub fn score(&self, a: &Value, b: &Value) -> Result<MatchOutcome, MatchError> {
        let mut path = Path::root();
        let mut divergence = None;
        let score = self.walk(a, b, &mut path, 0, &mut divergence)?;
        Ok(MatchOutcome { score, divergence })
    }

    fn walk(
        &self,
        a: &Value,
        b: &Value,
        path: &mut Path,
        depth: usize,
        divergence: &mut Option<Path>,
    ) -> Result<f64, MatchError> {
        if depth > MAX_DEPTH {
            return Err(MatchError::DepthExceeded {
                limit: MAX_DEPTH,
                path: path.clone(),
            });
        }

        match (a, b) {
            (Value::Null, Value::Bool(false)) | (Value::Bool(false), Value::Null) => Ok(1.0),
            (Value::Null, Value::Array(items)) | (Value::Array(items), Value::Null)
                if items.is_empty() =>
            {
                Ok(1.0)
            }
            (Value::Null, Value::Object(map)) | (Value::Object(map), Value::Null)
                if map.is_empty() =>
            {
                Ok(1.0)
            }
            (Value::Object(ma), Value::Object(mb)) => {
                if ma.is_empty() && mb.is_empty() {
                    return Ok(1.0);
                }
                if mb.is_empty() {
                    // The reference has no keys to normalize by; the pair is
                    // in structural disagreement.
                    return self.disagree(b, path, divergence);
                }
                let keys: BTreeSet<&str> = ma.keys().chain(mb.keys()).map(String::as_str).collect();
                let mut total = 0.0;
                for key in keys {
                    path.push(PathSegment::Key(key.to_owned()));
                    let result = self.walk(
                        ma.get(key).unwrap_or(NULL),
                        mb.get(key).unwrap_or(NULL),
                        path,
                        depth + 1,
                        divergence,
                    );
                    path.pop();
                    total += result?;
                }
                #[allow(clippy::cast_precision_loss)]
                let reference_keys = mb.len() as f64;
                Ok(total / reference_keys)
            }
            (Value::Array(xa), Value::Array(xb)) => {
                if xa.is_empty() && xb.is_empty() {
                    return Ok(1.0);
                }
                if xa.len() != xb.len() {
                    // No elementwise decomposition exists for mismatched
                    // lengths; the whole subtree is a disagreement.
                    return self.disagree(b, path, divergence);
                }
                let mut total = 0.0;
                for (idx, (ea, eb)) in xa.iter().zip(xb).enumerate() {
                    path.push(PathSegment::Index(idx));
                    let result = self.walk(ea, eb, path, depth + 1, divergence);
                    path.pop();
                    total += result?;
                }
                #[allow(clippy::cast_precision_loss)]
                let length = xa.len() as f64;
                Ok(total / length)
            }
            (Value::Number(na), Value::Number(nb)) => {
                if numbers_equal(na, nb) {
                    Ok(1.0)
                } else {
                    self.disagree(b, path, divergence)
                }
            }
            _ => {
                if a == b {
                    Ok(1.0)
                } else {
                    self.disagree(b, path, divergence)
                }
            }
        }
    }

    fn disagree(
        &self,
        b: &Value,
        path: &Path,
        divergence: &mut Option<Path>,
    ) -> Result<f64, MatchError> {
        match self.mode {
            MatchMode::Strict => Err(MatchError::SchemaDrift {
                type_tag: self.type_tag.to_owned(),
                path: path.clone(),
                reference: b.to_string(),
            }),
            MatchMode::Lenient => {
                if divergence.is_none() {
                    *divergence = Some(path.clone());
                }
                Ok(0.0)
            }
        }
    }
}

/// Numeric equality across integer and float representations: the typed
/// layer may reserialize `1` as `1.0` and the two must still agree.
fn numbers_equal(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn lenient(a: &Value, b: &Value) -> MatchOutcome {
        Matcher::new(MatchMode::Lenient, "TestResponse")
            .score(a, b)
            .expect("lenient mode never errors on shallow trees")
    }

    #[rstest]
    #[case::null_vs_false(json!(null), json!(false))]
    #[case::false_vs_null(json!(false), json!(null))]
    #[case::null_vs_empty_seq(json!(null), json!([]))]
    #[case::empty_seq_vs_null(json!([]), json!(null))]
    #[case::null_vs_empty_map(json!(null), json!({}))]
    #[case::empty_map_vs_null(json!({}), json!(null))]
    #[case::empty_maps(json!({}), json!({}))]
    #[case::empty_seqs(json!([]), json!([]))]
    #[case::equal_strings(json!("abc"), json!("abc"))]
    #[case::equal_ints(json!(7), json!(7))]
    #[case::int_vs_float(json!(1), json!(1.0))]
    fn absence_and_equality_rules_score_one(#[case] a: Value, #[case] b: Value) {
        assert_eq!(lenient(&a, &b).score, 1.0);
    }

    #[test]
    fn extra_typed_keys_are_not_penalized() {
        // Per-key scores [1, 0] sum to 1, divided by len(b) = 1.
        let outcome = lenient(&json!({"x": 1, "y": 2}), &json!({"x": 1}));
        assert_eq!(outcome.score, 1.0);
    }

    #[test]
    fn matching_extra_keys_can_exceed_one() {
        // "y": null on the typed side pairs with a missing reference key,
        // null vs null is equal, and the divisor stays len(b) = 1.
        let outcome = lenient(&json!({"x": 1, "y": null}), &json!({"x": 1}));
        assert_eq!(outcome.score, 2.0);
        assert!(outcome.is_faithful());
    }

    #[test]
    fn missing_typed_key_degrades_by_reference_size() {
        let outcome = lenient(&json!({"x": 1}), &json!({"x": 1, "y": 2}));
        assert_eq!(outcome.score, 0.5);
        assert_eq!(
            outcome.divergence.expect("y diverges").to_string(),
            "$.y"
        );
    }

    #[test]
    fn sequence_length_mismatch_is_zero() {
        let outcome = lenient(&json!([1, 2, 3]), &json!([1, 2]));
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.divergence.expect("whole tree").to_string(), "$");
    }

    #[test]
    fn sequence_length_mismatch_raises_in_strict() {
        let err = Matcher::new(MatchMode::Strict, "UserTweetsResponse")
            .score(&json!([1, 2, 3]), &json!([1, 2]))
            .expect_err("strict mode fails fast");
        match err {
            MatchError::SchemaDrift {
                type_tag,
                path,
                reference,
            } => {
                assert_eq!(type_tag, "UserTweetsResponse");
                assert!(path.is_root());
                assert_eq!(reference, "[1,2]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_divergence_path_names_the_leaf() {
        let a = json!({"data": {"entries": [{"id": "1"}, {"id": "2"}]}});
        let b = json!({"data": {"entries": [{"id": "1"}, {"id": "x"}]}});
        let outcome = lenient(&a, &b);
        assert_eq!(
            outcome.divergence.expect("leaf diverges").to_string(),
            "$.data.entries[1].id"
        );
        assert_eq!(outcome.score, 0.5);
    }

    #[test]
    fn sequences_average_elementwise() {
        let outcome = lenient(&json!([1, 2, 9, 9]), &json!([1, 2, 3, 4]));
        assert_eq!(outcome.score, 0.5);
    }

    #[test]
    fn empty_reference_mapping_against_populated_tree_disagrees() {
        let outcome = lenient(&json!({"x": 1}), &json!({}));
        assert_eq!(outcome.score, 0.0);
        assert!(outcome.divergence.is_some());
    }

    #[test]
    fn strict_mode_names_the_final_segment() {
        let a = json!({"user": {"handle": "alice"}});
        let b = json!({"user": {"handle": "bob"}});
        let err = Matcher::new(MatchMode::Strict, "UserResponse")
            .score(&a, &b)
            .expect_err("handles differ");
        match err {
            MatchError::SchemaDrift { path, reference, .. } => {
                assert_eq!(path.to_string(), "$.user.handle");
                assert_eq!(
                    path.last(),
                    Some(&PathSegment::Key("handle".into()))
                );
                assert_eq!(reference, "\"bob\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn depth_limit_guards_pathological_nesting() {
        let mut a = json!("leaf");
        let mut b = json!("leaf");
        for _ in 0..=MAX_DEPTH {
            a = json!([a]);
            b = json!([b]);
        }
        let err = Matcher::new(MatchMode::Lenient, "TestResponse")
            .score(&a, &b)
            .expect_err("nesting exceeds the limit");
        assert!(matches!(err, MatchError::DepthExceeded { limit, .. } if limit == MAX_DEPTH));
    }

    #[test]
    fn round_trip_of_identical_trees_is_faithful() {
        let raw = json!({
            "data": {
                "user": {
                    "result": {
                        "__typename": "User",
                        "legacy": {"screen_name": "alice", "followers_count": 12},
                        "rest_id": "42"
                    }
                }
            }
        });
        let outcome = lenient(&raw, &raw);
        assert_eq!(outcome.score, 1.0);
        assert!(outcome.divergence.is_none());
    }
}
