//! Roster CLI - Main Entry Point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use roster_cli::commands::{config, players};
use roster_cli::output::{self, print_error};
use roster_common::{ReqwestTransport, RosterApp, RosterClient, RosterConfig};

/// Roster CLI - manage the players roster
#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (defaults to ~/.roster/config.toml)
    #[arg(long, env = "ROSTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Players API base URL
    #[arg(long, env = "ROSTER_API_URL", global = true)]
    api_url: Option<String>,

    /// Cohort path segment
    #[arg(long, env = "ROSTER_COHORT", global = true)]
    cohort: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Players(players::PlayerCommands),

    /// Show the effective configuration
    Config(config::ConfigArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(roster_common::default_config_path);
    let mut cfg = RosterConfig::load(&config_path)?;
    debug!("Loaded config from {}", config_path.display());
    cfg.apply_env()?;
    if let Some(url) = cli.api_url {
        cfg.api.base_url = url;
    }
    if let Some(cohort) = cli.cohort {
        cfg.api.cohort = cohort;
    }

    match cli.command {
        Commands::Players(cmd) => {
            let transport = Arc::new(ReqwestTransport::new(cfg.request_timeout())?);
            let endpoint = cfg.endpoint()?;
            debug!("Using players API at {}", endpoint.collection_url());
            let client = RosterClient::new(transport, endpoint);
            let app = RosterApp::new(client, cfg.form.reset_policy);

            if let Err(e) = players::execute(cmd, &app, cli.format).await {
                print_error(&e.to_string());
                std::process::exit(1);
            }
        }
        Commands::Config(args) => config::execute(args, &cfg, &config_path)?,
        Commands::Version => {
            println!("Roster CLI v{}", roster_common::VERSION);
            println!("API: {}", cfg.endpoint()?.collection_url());
        }
    }

    Ok(())
}
