use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use talorik_api::TalorikClient;
use tracing::debug;

/// Smoke-test the TalorikAgent Security API.
///
/// Runs the fixed probe sequence against a dashboard and prints a pass/fail
/// report. Probe failures are report content, not process failures: the tool
/// exits 0 unless startup itself fails (bad base URL, unwritable stdout).
#[derive(Debug, Parser)]
#[command(name = "talorik-smoke", version)]
struct Cli {
    /// Dashboard base URL; defaults to TALORIK_API_BASE, then
    /// http://localhost:8080/api
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let timeout = Duration::from_secs(cli.timeout_secs);
    let client = match cli.base_url {
        Some(base_url) => TalorikClient::new(base_url, timeout)?,
        None => TalorikClient::from_env(timeout)?,
    };
    debug!(base_url = %client.base_url, timeout_secs = cli.timeout_secs, "starting smoke run");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    talorik_probe::run(&client, &talorik_probe::standard_sequence(), &mut out).await?;
    out.flush()?;
    Ok(())
}

fn init_tracing() {
    // Default to warn so diagnostics never mix into the report.
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
