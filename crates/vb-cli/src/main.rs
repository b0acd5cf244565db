use clap::Parser;

mod cli;
mod commands;
mod session;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("vbt error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = vb_config::VerbatimConfig::load_with_dotenv()?;

    let failures = match &cli.command {
        cli::Commands::Explore(args) => commands::explore::handle(&config, args).await?,
        cli::Commands::Replay(args) => commands::replay::handle(&config, args).await?,
        cli::Commands::Scenarios => commands::scenarios::handle(&config).await?,
        cli::Commands::Run(args) => commands::run::handle(&config, args).await?,
    };

    if failures > 0 {
        tracing::error!(failures, "run finished with failures");
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("VERBATIM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
