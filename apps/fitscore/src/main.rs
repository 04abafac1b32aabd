mod cli;
mod config;
mod errors;
mod job_profile;
mod models;
mod resume;
mod scoring;
mod signals;
mod state;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::signals::patterns::PATTERN_LIBRARY_VERSION;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the JSON output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting fitscore v{} (pattern library {})",
        env!("CARGO_PKG_VERSION"),
        PATTERN_LIBRARY_VERSION
    );

    cli::run(config).await?;
    Ok(())
}
