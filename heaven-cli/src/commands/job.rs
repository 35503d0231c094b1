//! Job command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use heaven_client::{AbortReceipt, HeavenClient};

use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Abort the job running on a port
    Abort {
        /// Job identifier (the port label)
        job: String,

        /// Print the server's answer as JSON
        #[arg(long)]
        json: bool,

        /// Do not report the server's answer, only log failures
        #[arg(long, conflicts_with = "json")]
        detach: bool,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        JobCommands::Abort { job, json, detach } => abort_job(&client, &job, json, detach).await,
    }
}

async fn abort_job(client: &HeavenClient, job: &str, json: bool, detach: bool) -> Result<()> {
    if detach {
        // Wait for the spawned request so the process does not exit under it
        client
            .abort_job_detached(job)
            .await
            .context("Abort task panicked")?;
        println!("{}", format!("Abort requested for job {}", job).dimmed());
        return Ok(());
    }

    let receipt = client
        .abort_job(job)
        .await
        .context("Failed to send abort request")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        print_receipt(&receipt);
    }

    Ok(())
}

fn print_receipt(receipt: &AbortReceipt) {
    let body = receipt.body.trim();
    if receipt.is_success() {
        println!(
            "{} Abort of job {} acknowledged {}",
            "✓".green(),
            receipt.job.to_string().cyan(),
            format!("({})", body).dimmed()
        );
    } else {
        println!(
            "{} Abort of job {} answered with status {}",
            "✗".red(),
            receipt.job.to_string().cyan(),
            receipt.status.to_string().red()
        );
        if !body.is_empty() {
            println!("  {}", body.dimmed());
        }
    }
}
