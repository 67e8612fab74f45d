//! prpilot command line entry point

mod cli;

use clap::{ArgAction, Args, Parser, Subcommand};
use prpilot::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "prpilot",
    version,
    about = "Keep pull requests up to date and merge them according to a repository policy"
)]
struct Cli {
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// GitHub Enterprise host (defaults to github.com)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Which pull request to act on
#[derive(Args, Debug, Clone)]
struct Target {
    /// Repository as owner/name
    #[arg(long)]
    repo: String,

    /// Pull request number
    #[arg(long)]
    pr: u64,

    /// Policy file (YAML, or TOML with a .toml extension)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the policy for a pull request without changing anything
    Check {
        #[command(flatten)]
        target: Target,
    },
    /// Bring a pull request up to date with its base branch if the policy allows
    Update {
        #[command(flatten)]
        target: Target,
    },
    /// Merge a pull request if the policy allows
    Merge {
        #[command(flatten)]
        target: Target,

        /// Show what would be merged without merging
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("prpilot={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let connection = cli::Connection {
        token: cli.token,
        host: cli.host,
    };

    match cli.command {
        Commands::Check { target } => {
            cli::run_check(&connection, &target.repo, target.pr, &target.config).await?;
        }
        Commands::Update { target } => {
            cli::run_update(&connection, &target.repo, target.pr, &target.config).await?;
        }
        Commands::Merge { target, dry_run } => {
            cli::run_merge(&connection, &target.repo, target.pr, &target.config, dry_run).await?;
        }
    }

    Ok(())
}
