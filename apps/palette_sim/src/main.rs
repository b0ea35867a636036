use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use page::{load_settings, PageHarness, PageSnapshot};
use serde::Serialize;
use shared::{
    domain::EventDisposition,
    error::ErrorReport,
    protocol::PageEvent,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replays a recorded page-event script against an in-memory page and prints
/// a JSON snapshot after every step.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./palette.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON array of page events.
    #[arg(long)]
    script: Option<PathBuf>,
    #[arg(long)]
    viewport_width: Option<u32>,
    #[arg(long)]
    location: Option<String>,
}

#[derive(Serialize)]
struct StepReport<'a> {
    step: usize,
    event: &'a PageEvent,
    disposition: Option<EventDisposition>,
    error: Option<ErrorReport>,
    snapshot: PageSnapshot,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(width) = args.viewport_width {
        settings.viewport_width = width;
    }
    if let Some(location) = args.location {
        settings.location = location;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut harness = PageHarness::load(&settings).context("failed to load page")?;
    println!("{}", serde_json::to_string(&harness.snapshot())?);

    let Some(script) = args.script else {
        return Ok(());
    };
    let raw = fs::read_to_string(&script)
        .with_context(|| format!("failed to read script '{}'", script.display()))?;
    let events: Vec<PageEvent> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse script '{}'", script.display()))?;
    info!(events = events.len(), "replaying script");

    for (step, event) in events.iter().enumerate() {
        let (disposition, error) = match harness.step(event.clone()) {
            Ok(disposition) => (Some(disposition), None),
            Err(err) => (None, Some(ErrorReport::from(err))),
        };
        let report = StepReport {
            step,
            event,
            disposition,
            error,
            snapshot: harness.snapshot(),
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
