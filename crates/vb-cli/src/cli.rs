//! Command-line surface of the `vbt` binary.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `vbt` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vbt",
    version,
    about = "verbatim - differential fidelity harness for the social-platform API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk pagination cursors of live endpoints, scoring every response
    Explore(ExploreArgs),
    /// Replay captured payloads offline through the fidelity engine
    Replay(ReplayArgs),
    /// Run the ad-hoc scenario suite (self lookup, id sweeps, fixtures)
    Scenarios,
    /// Explore, run scenarios, then replay; exit non-zero on any failure
    Run(ExploreArgs),
}

#[derive(Debug, Default, Args)]
pub struct ExploreArgs {
    /// Hard ceiling on iterations per endpoint (overrides config)
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Seconds to pause between iterations (overrides config)
    #[arg(long)]
    pub sleep: Option<f64>,

    /// Fail fast on the first structural disagreement
    #[arg(long)]
    pub strict: bool,

    /// Endpoint keys to explore (default: config, else the whole catalog)
    #[arg(long, value_delimiter = ',')]
    pub endpoints: Vec<String>,
}

#[derive(Debug, Default, Args)]
pub struct ReplayArgs {
    /// Verify records one at a time instead of fanning out
    #[arg(long)]
    pub sequential: bool,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn explore_args_parse() {
        let cli = Cli::parse_from([
            "vbt",
            "explore",
            "--max-iterations",
            "5",
            "--strict",
            "--endpoints",
            "UserTweets,TweetDetail",
        ]);
        match cli.command {
            Commands::Explore(args) => {
                assert_eq!(args.max_iterations, Some(5));
                assert!(args.strict);
                assert_eq!(args.endpoints, vec!["UserTweets", "TweetDetail"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn replay_defaults_to_parallel() {
        let cli = Cli::parse_from(["vbt", "replay"]);
        match cli.command {
            Commands::Replay(args) => assert!(!args.sequential),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_apply_to_subcommands() {
        let cli = Cli::parse_from(["vbt", "run", "--verbose"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
