//! redirector
//!
//! Serves ordered redirect rules in front of a static site (or a plain 404).
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌──────────┐    ┌──────────────┐    ┌──────────────┐
//!     ──────────────────▶│   net    │───▶│  http server │───▶│   redirect   │──▶ 3xx / meta page
//!      (HTTP or HTTPS)   │ listener │    │ (trace, id)  │    │    layer     │
//!                        └──────────┘    └──────────────┘    └──────┬───────┘
//!                                                                   │ no match
//!                                                                   ▼
//!                                                           ┌──────────────┐
//!                                                           │ next handler │
//!                                                           │ (site / 404) │
//!                                                           └──────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use redirector::config::load_config;
use redirector::lifecycle::{signals, Shutdown};
use redirector::observability::{logging, metrics};
use redirector::redirect::check_url;
use redirector::HttpServer;

#[derive(Parser)]
#[command(name = "redirector")]
#[command(about = "HTTP redirect server driven by ordered rules", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "redirector.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP (and optional HTTPS) listeners
    Serve,
    /// Show which rule a URL would hit, without starting a server
    Check {
        /// Absolute URL; an https:// URL is treated as a TLS connection
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            logging::init(&config.observability);
            tracing::info!(config = ?cli.config, "redirector v0.1.0 starting");

            if config.observability.metrics_enabled {
                match config.observability.metrics_address.parse() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(_) => tracing::error!(
                        metrics_address = %config.observability.metrics_address,
                        "Failed to parse metrics address"
                    ),
                }
            }

            let server = HttpServer::new(config)?;
            let shutdown = Shutdown::new();

            let trigger = shutdown.clone();
            tokio::spawn(async move {
                signals::wait_for_signal().await;
                trigger.trigger();
            });

            server.run(&shutdown).await?;
            tracing::info!("Shutdown complete");
        }
        Commands::Check { url } => {
            let rules = config.compile_rules().map_err(redirector::config::ConfigError::Validation)?;
            let verdict = check_url(&rules, &url)?;

            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
    }

    Ok(())
}
