//! Port status command handlers
//!
//! Fetches the port status fragment once, or keeps a document reloaded
//! from it until interrupted.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use heaven_client::HeavenClient;
use heaven_core::Document;
use heaven_core::domain::reloader::{
    DEFAULT_CONTAINER_ID, DEFAULT_STATUS_PAGE, ReloaderConfig, ReloaderStats, TickPolicy,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::document::{FileDocument, TerminalDocument};

/// Status subcommands
#[derive(Subcommand)]
pub enum StatusCommands {
    /// Print a status page once
    Fetch {
        /// Page to fetch
        #[arg(default_value = DEFAULT_STATUS_PAGE)]
        page: String,
    },
    /// Reload a status page on an interval until Ctrl-C
    Watch {
        /// Container the fragment is rendered into
        #[arg(long, default_value = DEFAULT_CONTAINER_ID)]
        container: String,

        /// Page to fetch on every tick
        #[arg(long, default_value = DEFAULT_STATUS_PAGE)]
        page: String,

        /// Milliseconds between ticks
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Skip a tick while the previous fetch is still running
        #[arg(long)]
        skip_overlapping: bool,

        /// Rewrite this file on every update instead of printing
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Handle status commands
pub async fn handle_status_command(command: StatusCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        StatusCommands::Fetch { page } => fetch_page(&client, &page).await,
        StatusCommands::Watch {
            container,
            page,
            interval_ms,
            skip_overlapping,
            output,
        } => {
            let policy = if skip_overlapping {
                TickPolicy::SkipWhileInFlight
            } else {
                TickPolicy::Overlap
            };
            let config = ReloaderConfig::new(container, page)
                .with_interval(Duration::from_millis(interval_ms))
                .with_policy(policy);
            watch(&client, config, output).await
        }
    }
}

async fn fetch_page(client: &HeavenClient, page: &str) -> Result<()> {
    let text = client
        .fetch_page(page)
        .await
        .with_context(|| format!("Failed to fetch {}", page))?;
    println!("{}", text);
    Ok(())
}

async fn watch(client: &HeavenClient, config: ReloaderConfig, output: Option<PathBuf>) -> Result<()> {
    let document: Arc<dyn Document> = match output {
        Some(path) => Arc::new(FileDocument::new(config.container_id.clone(), path)),
        None => Arc::new(TerminalDocument::new(config.container_id.clone())),
    };

    info!(
        "Reloading #{} from {} every {:?} (Ctrl-C to stop)",
        config.container_id, config.page, config.interval
    );
    let handle = client
        .spawn_reloader(config, document)
        .context("Failed to start reloader")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    let stats = handle.shutdown().await;
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &ReloaderStats) {
    println!();
    println!("{}", "Reloader stopped:".bold());
    println!("  Ticks:     {}", stats.ticks_fired);
    if stats.ticks_skipped > 0 {
        println!("  Skipped:   {}", stats.ticks_skipped.to_string().yellow());
    }
    println!("  Updates:   {}", stats.updates_applied.to_string().green());
    if stats.fetch_failures > 0 {
        println!("  Fetch failures:    {}", stats.fetch_failures.to_string().red());
    }
    if stats.document_failures > 0 {
        println!("  Document failures: {}", stats.document_failures.to_string().red());
    }
    if let Some(last) = stats.last_update_at {
        println!(
            "  Last update: {}",
            last.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
}
