//! Tellerweb main entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tellerweb_api::start_server;
use tellerweb_config::{Config, ConfigError};
use tellerweb_core::Session;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "tellerweb")]
#[command(author = "Tellerweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Card eligibility, transaction search and statement exports for a banking client", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Snapshot file path (overrides data.snapshot_path)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default configuration file
    PrintConfig,
}

fn load_config(path: PathBuf) -> anyhow::Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound { path }) => {
            eprintln!("[WARN] Config file not found: {}, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => Err(anyhow::anyhow!(e.to_details().to_string())),
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(Command::PrintConfig) = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let mut config = load_config(args.config.clone())?;
    if let Some(snapshot) = args.snapshot {
        config.data.snapshot_path = snapshot;
    }
    init_logging(&config.logging.level);
    log::info!("Config loaded: snapshot path={}", config.data.snapshot_path.display());

    let rt = Runtime::new().context("Failed to start tokio runtime")?;
    rt.block_on(async {
        let mut session = Session::with_file_source(config.clone());
        match session.load_configured().await {
            Ok(()) => log::info!("Snapshot loaded successfully"),
            // Serve anyway; POST /api/reload retries once the file is in place
            Err(e) => log::warn!("Snapshot not loaded: {}", e),
        }

        start_server(config, session)
            .await
            .context("Server error")
    })
}
