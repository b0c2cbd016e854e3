//! Employee gateway (v1)
//!
//! A REST façade over a mock employee API, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────┐
//!                         │               EMPLOYEE GATEWAY                │
//!     Client Request      │  ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//!     ────────────────────┼─▶│   http   │───▶│ employee │───▶│upstream │──┼──▶ Upstream
//!                         │  │ handlers │    │ service  │    │ client  │  │    employee API
//!     Client Response     │  └──────────┘    └────┬─────┘    └─────────┘  │
//!     ◀───────────────────┼──  response  ◀── aggregate                    │
//!                         │                                               │
//!                         │  config · observability · lifecycle           │
//!                         └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use employee_gateway::config::{load_config, ConfigOverrides};
use employee_gateway::lifecycle::startup;
use employee_gateway::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "employee-gateway", version, about = "REST gateway for the employee API")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Upstream employee collection URL (overrides config and environment).
    #[arg(long, value_name = "URL")]
    upstream_url: Option<String>,

    /// Address to listen on (overrides config and environment).
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        upstream_url: cli.upstream_url,
        bind_address: cli.bind,
    };
    let config = load_config(cli.config.as_deref(), overrides)?;

    init_logging(&config.observability)?;

    tracing::info!("employee-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
