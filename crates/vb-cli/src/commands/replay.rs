//! Offline replay of the capture store.

use vb_cache::CacheStore;
use vb_config::VerbatimConfig;
use vb_verify::Verifier;

use crate::cli::ReplayArgs;

pub async fn handle(config: &VerbatimConfig, args: &ReplayArgs) -> anyhow::Result<usize> {
    let cache = CacheStore::new(&config.cache.dir);
    let verifier = Verifier::new(&cache);

    let parallel = config.verify.parallel && !args.sequential;
    let report = verifier.verify_all(parallel).await?;
    tracing::info!(
        failures = report.failure_count(),
        attempts = report.attempts,
        "replay finished"
    );

    if !report.failures.is_empty() {
        let unresolved = verifier.diagnose_failures(&report.failures);
        tracing::info!(unresolved, "diagnostic re-run complete");
    }

    Ok(report.failure_count())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_for(dir: &std::path::Path) -> VerbatimConfig {
        let mut config = VerbatimConfig::default();
        config.cache.dir = dir.to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn empty_store_replays_clean() {
        let dir = tempfile::tempdir().unwrap();
        let failures = handle(&config_for(dir.path()), &ReplayArgs::default())
            .await
            .unwrap();
        assert_eq!(failures, 0);
    }

    #[tokio::test]
    async fn failures_count_in_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        store
            .persist(r#"{"data":{"user":{"result":{"rest_id":"1"}}}}"#, "UserResponse")
            .unwrap();
        store
            .persist(
                r#"{"data":{"user":{"result":{"rest_id":"1","unmapped":true}}}}"#,
                "UserResponse",
            )
            .unwrap();
        store.persist("{}", "NotARealResponse").unwrap();

        let config = config_for(dir.path());
        let parallel = handle(&config, &ReplayArgs::default()).await.unwrap();
        let sequential = handle(&config, &ReplayArgs { sequential: true }).await.unwrap();
        assert_eq!(parallel, 2);
        assert_eq!(sequential, 2);
    }
}
