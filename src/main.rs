//! Command service over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 COMMAND SERVICE                  │
//!                    │                                                  │
//!  POST /commands    │  ┌─────────┐   ┌──────────┐   ┌───────────────┐  │
//!  ──────────────────┼─▶│ request │──▶│ command  │──▶│   response    │  │
//!                    │  │ decoder │   │ service  │   │   encoder     │  │
//!                    │  └────┬────┘   └──────────┘   └───────┬───────┘  │
//!                    │       │ decode error                  │          │
//!                    │       └──────────▶ error envelope ◀───┘          │
//!  ◀─────────────────┼─────────────────── + status table                │
//!                    │                                                  │
//!                    │  config · observability · lifecycle              │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use command_transport::command::BasicCommandService;
use command_transport::config::{load_config, ServiceConfig};
use command_transport::http::HttpServer;
use command_transport::lifecycle::{wait_for_signal, Shutdown};
use command_transport::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "command-transport")]
#[command(about = "Serve the create-command operation over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        route = %config.transport.route_path,
        request_timeout_secs = config.transport.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config, Arc::new(BasicCommandService::new()));
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
