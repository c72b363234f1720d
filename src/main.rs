//! CLI entry point for PollSub.
//!
//! Takes the port to listen on, with optional overrides for the bind host
//! and the per-topic message retention bound, then runs the HTTP server
//! until interrupted.

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use pollsub::broker::Broker;
use pollsub::config::load_config;
use pollsub::transport::http;
use pollsub::utils::logging;

#[derive(Parser)]
#[command(name = "pollsub", about = "A polling publish/subscribe relay over HTTP")]
struct Cli {
    /// Port number to listen on
    port: u16,

    /// Host address to bind (overrides the configuration file)
    #[arg(long)]
    host: Option<String>,

    /// Maximum number of messages retained per topic before the oldest is evicted
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_queue_length: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    if let Err(e) = run_server(cli).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config()?;
    config.server.port = cli.port;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(max_queue_length) = cli.max_queue_length {
        config.broker.max_queue_length = max_queue_length as usize;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let broker = Arc::new(Broker::new(config.broker.max_queue_length));
    info!(
        "starting pollsub, retaining up to {} message(s) per topic",
        config.broker.max_queue_length
    );

    tokio::select! {
        result = http::serve(&addr, broker) => {
            result?;
            error!("HTTP server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}
