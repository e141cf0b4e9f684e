use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use creative_studio::config::{self, StudioConfig};
use creative_studio::shell::Shell;
use creative_studio::storage::open_local_storage;
use creative_studio::tui::runner::run_tui;

#[derive(Parser)]
#[command(
    name = "creative-studio",
    about = "AI Creative Studio. Generate images and text from a prompt."
)]
struct Cli {
    /// Data directory for config, preferences and logs (defaults to ~/.creative-studio)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Override the simulated generation latency, milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Where downloaded images are written
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Log to stderr instead of the log file
    #[arg(long)]
    log_stderr: bool,
}

/// Install the subscriber. Without a usable log file, logs are dropped
/// rather than written over the TUI.
fn init_tracing(cli: &Cli, data_dir: &Path) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("creative_studio=info".parse()?);
    if cli.log_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }
    let path = config::log_path(data_dir);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = match cli.data_dir.clone().or_else(config::default_data_dir) {
        Some(dir) => dir,
        None => PathBuf::from(".creative-studio"),
    };
    let dir_error = fs::create_dir_all(&data_dir).err();
    init_tracing(&cli, &data_dir)?;
    if let Some(e) = dir_error {
        warn!(data_dir = %data_dir.display(), error = %e, "data directory unavailable, running without persistence");
    }

    let mut config = StudioConfig::load(&data_dir);
    if let Some(ms) = cli.latency_ms {
        config.latency_ms = ms;
    }
    if let Some(dir) = cli.download_dir {
        config.download_dir = Some(dir);
    }
    info!(data_dir = %data_dir.display(), latency_ms = config.latency_ms, "creative studio starting");

    let shell = Shell::load(open_local_storage(&config::storage_path(&data_dir)));

    run_tui(&config, shell).await
}
