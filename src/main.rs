//! Main entry point for the aozora-clean HTTP service.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use aozora_clean::server::{self, AppState};
use aozora_clean::{Cli, TextPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pipeline = TextPipeline::new(cli.pipeline_config()).context("failed to build HTTP client")?;
    let state = AppState::new(Arc::new(pipeline)).context("failed to load page templates")?;

    server::serve(cli.bind, state)
        .await
        .with_context(|| format!("server on {} failed", cli.bind))
}
