use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tradequest::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "tradequest")]
#[command(about = "Tiered trading achievements - catalog, progress and badges")]
#[command(version)]
struct Cli {
    /// Working directory (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .tradequest/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the achievement catalog
    Catalog {
        /// Only show achievements in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Resolve one achievement against a progress value
    Resolve {
        /// Achievement id (e.g. totalTrades)
        id: String,

        /// Current metric value
        value: f64,
    },

    /// Ingest a user's progress file and show the achievements board
    Board {
        /// JSON file with userId, xp, snapshots and worn badges
        input: PathBuf,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a catalog file and report every malformed entry
    Validate {
        /// Catalog file (.toml or .json)
        catalog: PathBuf,
    },

    /// Initialize a new .tradequest/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let config_path = cli.config;
    let load_config = || -> Result<Config> {
        match &config_path {
            Some(path) => Config::from_file(path),
            None => Config::from_dir(&work_dir),
        }
    };

    match cli.command {
        Commands::Catalog { category } => {
            cli::catalog::catalog_command(&load_config()?, category)?;
        }
        Commands::Resolve { id, value } => {
            cli::resolve::resolve_command(&load_config()?, &id, value)?;
        }
        Commands::Board { input, json } => {
            cli::board::board_command(&load_config()?, &input, json)?;
        }
        Commands::Validate { catalog } => {
            cli::validate::validate_command(&catalog)?;
        }
        Commands::Init { force } => {
            cli::init::init_command(&work_dir, config_path.clone(), force)?;
        }
    }

    Ok(())
}
