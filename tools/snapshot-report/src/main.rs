use std::fs;

use anyhow::Context;
use clap::Parser;
use client_core::ledger::Snapshot;
use snapshot_report::cli::{Cli, OutputFormat};
use snapshot_report::logging::init_logging;
use snapshot_report::report::Report;

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(config.log_format)?;

    tracing::info!(snapshot = %cli.snapshot.display(), "loading snapshot");

    let json = fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("reading snapshot {}", cli.snapshot.display()))?;
    let snapshot = Snapshot::from_json(&json)
        .with_context(|| format!("decoding snapshot {}", cli.snapshot.display()))?;

    let report = Report::build(&snapshot, &config).context("building report")?;

    match cli.output {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
