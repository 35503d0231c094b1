//! Heaven CLI
//!
//! Command-line interface for the heaven web service: abort a port's job,
//! print the port status fragment, or keep it reloaded.

mod commands;
mod config;
mod document;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "heaven")]
#[command(about = "Heaven port status CLI", long_about = None)]
struct Cli {
    /// Heaven web service URL
    #[arg(long, env = "HEAVEN_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "HEAVEN_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heaven_cli=info,heaven_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        base_url: cli.url,
        request_timeout: cli.timeout_secs.map(Duration::from_secs),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
