//! `domain_reconcile` binary.
//!
//! Reads the owner inventory, asks for Cloudflare credentials on the terminal
//! and prints the hostnames that no longer point at their server.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_reconcile::initialization::init_logger_with;
use domain_reconcile::{load_owners, render_table, run_reconcile, Config, StdinPrompter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let owners = match load_owners(&config.inventory) {
        Ok(owners) => owners,
        Err(e) => {
            eprintln!("domain_reconcile error: {:#}", e);
            process::exit(1);
        }
    };

    match run_reconcile(config, &owners, &mut StdinPrompter).await {
        Ok(report) => {
            print!("{}", render_table(&report.flagged));
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_reconcile error: {:#}", e);
            process::exit(1);
        }
    }
}
