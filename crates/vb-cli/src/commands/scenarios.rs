//! Ad-hoc scenario suite: self lookup, id sweeps, fixture decode checks.
//!
//! These exercise known-good targets with fixed identifiers, complementing
//! the cursor walk's breadth with depth on payloads that historically
//! carried the most schema variety.

use std::path::Path;

use serde_json::{Map, Value, json};

use vb_cache::CacheStore;
use vb_client::{XClient, decode_tagged};
use vb_config::VerbatimConfig;
use vb_match::{MatchMode, Matcher, field_names};

pub async fn handle(config: &VerbatimConfig) -> anyhow::Result<usize> {
    let session = crate::session::load(&config.session).await?;
    let client = XClient::new(session);
    let cache = CacheStore::new(&config.cache.dir);
    Ok(run_suite(&client, &cache, config).await)
}

async fn run_suite(client: &XClient, cache: &CacheStore, config: &VerbatimConfig) -> usize {
    let mut failures = 0;

    tracing::info!(screen_name = %config.scenarios.screen_name, "scenario: self lookup");
    if let Err(error) = self_lookup(client, &config.scenarios.screen_name).await {
        tracing::error!(%error, "self lookup failed");
        failures += 1;
    }

    for user_id in &config.scenarios.user_ids {
        tracing::info!(user_id = %user_id, "scenario: user tweets");
        if let Err(error) = score_user_tweets(client, user_id).await {
            tracing::error!(user_id = %user_id, %error, "user tweets failed");
            failures += 1;
        }
    }

    for tweet_id in &config.scenarios.tweet_ids {
        tracing::info!(tweet_id = %tweet_id, "scenario: tweet detail");
        if let Err(error) = tweet_detail(client, cache, tweet_id).await {
            tracing::error!(tweet_id = %tweet_id, %error, "tweet detail failed");
            failures += 1;
        }
    }

    failures += check_fixtures(Path::new(&config.cache.fixture_dir));
    failures
}

/// Look our own handle up and require the response to echo it back.
async fn self_lookup(client: &XClient, screen_name: &str) -> anyhow::Result<()> {
    let mut overrides = Map::new();
    overrides.insert("screen_name".to_owned(), json!(screen_name));
    let outcome = client.call("UserByScreenName", &overrides).await?;

    let score = score_against_raw(&outcome)?;
    tracing::info!(score, "match rate");

    let echoed = outcome
        .model
        .tree()
        .pointer("/data/user/result/legacy/screen_name")
        .and_then(Value::as_str);
    anyhow::ensure!(
        echoed == Some(screen_name),
        "lookup echoed {echoed:?}, expected {screen_name:?}"
    );
    Ok(())
}

async fn score_user_tweets(client: &XClient, user_id: &str) -> anyhow::Result<()> {
    let mut overrides = Map::new();
    overrides.insert("userId".to_owned(), json!(user_id));
    let outcome = client.call("UserTweets", &overrides).await?;
    let score = score_against_raw(&outcome)?;
    tracing::info!(score, "match rate");
    Ok(())
}

/// Tweet detail responses get cached for offline replay on top of the
/// inline score.
async fn tweet_detail(client: &XClient, cache: &CacheStore, tweet_id: &str) -> anyhow::Result<()> {
    let mut overrides = Map::new();
    overrides.insert("focalTweetId".to_owned(), json!(tweet_id));
    let outcome = client.call("TweetDetail", &overrides).await?;

    cache.persist(&outcome.raw, outcome.model.type_tag())?;

    let score = score_against_raw(&outcome)?;
    tracing::info!(score, "match rate");

    let names = field_names(outcome.model.tree());
    tracing::debug!(tweet_id, named_entities = names.len(), "payload coverage");
    Ok(())
}

fn score_against_raw(outcome: &vb_client::CallOutcome) -> anyhow::Result<f64> {
    let reference: Value = serde_json::from_str(&outcome.raw)?;
    let scored = Matcher::new(MatchMode::Lenient, outcome.model.type_tag())
        .score(outcome.model.tree(), &reference)?;
    if let Some(path) = &scored.divergence {
        tracing::warn!(path = %path, "fidelity diverges");
    }
    Ok(scored.score)
}

/// Decode-only check of auxiliary fixture payloads. Fixtures are raw
/// tweet-detail bodies collected out of band; a decode error means the
/// typed layer regressed against a payload shape we have already seen.
fn check_fixtures(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "no fixture directory, skipping");
        return 0;
    };

    let mut failures = 0;
    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let result = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|body| {
                decode_tagged("TweetDetailResponse", &body)?;
                Ok(())
            });
        match result {
            Ok(()) => tracing::info!(fixture = %path.display(), "fixture decodes"),
            Err(error) => {
                tracing::error!(fixture = %path.display(), %error, "fixture decode failed");
                failures += 1;
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_fixture_directory_is_not_a_failure() {
        assert_eq!(check_fixtures(Path::new("/nonexistent/fixtures")), 0);
    }

    #[test]
    fn fixture_decode_failures_are_counted_per_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("good.json"),
            r#"{"data": {"threaded_conversation_with_injections_v2": {"instructions": []}}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("bad.json"), "definitely not json").unwrap();
        std::fs::write(
            dir.path().join("wrong_shape.json"),
            r#"{"data": {"threaded_conversation_with_injections_v2": {"instructions": [{"type": "NoSuchInstruction"}]}}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(check_fixtures(dir.path()), 2);
    }
}
