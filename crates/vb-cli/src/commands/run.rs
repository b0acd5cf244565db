//! The full pass: live exploration, scenarios, then offline replay.

use vb_config::VerbatimConfig;

use crate::cli::{ExploreArgs, ReplayArgs};
use crate::commands::{explore, replay, scenarios};

pub async fn handle(config: &VerbatimConfig, args: &ExploreArgs) -> anyhow::Result<usize> {
    let mut failures = 0;
    failures += explore::handle(config, args).await?;
    failures += scenarios::handle(config).await?;
    failures += replay::handle(config, &ReplayArgs::default()).await?;
    tracing::info!(failures, "full run finished");
    Ok(failures)
}
