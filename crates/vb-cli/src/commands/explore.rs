//! Live pagination exploration.

use std::time::Duration;

use vb_cache::CacheStore;
use vb_client::{EndpointCatalog, XClient};
use vb_config::VerbatimConfig;
use vb_explore::{EndpointReport, ExploreOptions, Explorer};

use crate::cli::ExploreArgs;

pub async fn handle(config: &VerbatimConfig, args: &ExploreArgs) -> anyhow::Result<usize> {
    let session = crate::session::load(&config.session).await?;
    let mut client = XClient::new(session);
    if let Some(path) = &config.explore.catalog_file {
        client = client.with_catalog(EndpointCatalog::from_file(std::path::Path::new(path))?);
    }
    let cache = CacheStore::new(&config.cache.dir);

    let endpoints = selected_endpoints(config, args, client.catalog());
    let explorer = Explorer::new(&client, &cache, options(config, args));
    let reports = explorer.explore_all(&endpoints).await;

    Ok(summarize(&reports))
}

fn options(config: &VerbatimConfig, args: &ExploreArgs) -> ExploreOptions {
    ExploreOptions {
        max_iterations: args.max_iterations.unwrap_or(config.explore.max_iterations),
        delay: Duration::from_secs_f64(args.sleep.unwrap_or(config.explore.sleep_secs)),
        strict: args.strict || config.explore.strict,
    }
}

/// CLI flags beat the config, which beats "everything in the catalog".
fn selected_endpoints(
    config: &VerbatimConfig,
    args: &ExploreArgs,
    catalog: &EndpointCatalog,
) -> Vec<String> {
    if !args.endpoints.is_empty() {
        args.endpoints.clone()
    } else if !config.explore.endpoints.is_empty() {
        config.explore.endpoints.clone()
    } else {
        catalog.keys().map(str::to_owned).collect()
    }
}

fn summarize(reports: &[EndpointReport]) -> usize {
    for report in reports {
        tracing::info!(
            endpoint = %report.endpoint,
            iterations = report.iterations,
            termination = ?report.termination,
            failures = report.failures(),
            "endpoint explored"
        );
    }
    let failures: usize = reports.iter().map(EndpointReport::failures).sum();
    tracing::info!(failures, endpoints = reports.len(), "exploration finished");
    failures
}
