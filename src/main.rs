//! Application Insights logging demo service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────────────┐
//!     ────────────────────┼─▶ http (axum router, request id, trace, metrics)      │
//!                         │        │                                             │
//!                         │        ▼                                             │
//!                         │   handlers ──▶ telemetry::Telemetry::emit            │
//!                         │                   │                │                 │
//!                         │                   ▼                ▼                 │
//!                         │              console (always)   gate + allow-list    │
//!                         │                                    │                 │
//!                         └────────────────────────────────────┼─────────────────┘
//!                                                              ▼
//!                                                   Application Insights
//! ```
//!
//! Export is enabled only when `APPLICATIONINSIGHTS_CONNECTION_STRING` is set.
//! The `untracked-logger` channel never leaves the console.

use std::path::PathBuf;

use clap::Parser;

use insights_demo::config;
use insights_demo::lifecycle;
use insights_demo::observability::logging;

#[derive(Parser)]
#[command(name = "insights-demo")]
#[command(about = "Demo service logging to Azure Application Insights", long_about = None)]
struct Cli {
    /// Optional TOML config file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("insights-demo v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
