// Hardshell - AI-assisted Linux hardening script generator
// Main entry point

use anyhow::Result;
use clap::Parser;

use hardshell::cli::{self, Cli};
use hardshell::config::load_settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration (missing credentials surface at the first API call)
    let settings = load_settings()?;

    cli::run(cli, settings).await
}
