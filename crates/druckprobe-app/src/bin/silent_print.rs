// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Standalone silent-print endpoint probe.
//
// Pre-flights the server's health endpoint, then drives the four canonical
// silent-print cases in order and renders the report. Exits 1 only when the
// pre-flight finds no healthy server; a completed run exits 0 whatever the
// individual verdicts say.

use std::process::ExitCode;

use chrono::Utc;

use druckprobe_app::{init_tracing, rule};
use druckprobe_client::client::{JOBS_PATH, PrintServerClient};
use druckprobe_core::config::ProbeConfig;
use druckprobe_core::error::Result;
use druckprobe_harness::{report, runner, suites};

/// The standalone silent server keeps its health endpoint under /api.
const SILENT_HEALTH_PATH: &str = "/api/health";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("silent-print probe failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let mut config = ProbeConfig::from_env()?;
    config.health_path = SILENT_HEALTH_PATH.into();

    let client = PrintServerClient::new(&config.silent_server_url, &config)?;
    tracing::debug!(target_url = %client.base_url(), "silent-print probe starting");

    println!("Silent Print Endpoint Probe");
    println!("{}", rule());
    println!("Checking if the server is running...");

    if !client.check_health().await {
        println!("Server is not running or not healthy.");
        println!("Start the print server first, then run this probe again.");
        return Ok(ExitCode::FAILURE);
    }
    println!("Server is running and healthy.");
    println!();

    let cases = suites::silent_print_suite(Utc::now())?;
    let summary = runner::run_all(&client, &cases).await;

    print!("{}", report::render(&summary));
    println!();
    println!("Probe run complete.");
    println!("To check job status: curl {}{}", client.base_url(), JOBS_PATH);

    Ok(ExitCode::SUCCESS)
}
