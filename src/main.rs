//! Station Easy - rail station companion, driven from the command line
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use steasy_app::config::load_config;

/// Station Easy - headless navigation controller for rail travelers
#[derive(Parser, Debug)]
#[command(name = "steasy")]
#[command(about = "Drive the Station Easy controller with line commands on stdin", long_about = None)]
struct Args {
    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the splash duration in milliseconds
    #[arg(long, value_name = "N")]
    splash_ms: Option<u64>,

    /// Debug-level logging for the workspace crates
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    steasy_core::logging::init(args.verbose)?;

    let mut config = load_config(args.config.as_deref());
    if let Some(splash_ms) = args.splash_ms {
        config.startup.splash_ms = splash_ms;
    }

    station_easy::run_headless(config).await?;
    Ok(())
}
