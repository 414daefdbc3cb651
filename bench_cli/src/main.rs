//! Firebird benchmark command-line driver

mod args;

use anyhow::Context;
use bench_core::logging;
use bench_core::{ClientConfig, SysinfoProfile};
use clap::Parser;

use args::Args;

fn main() {
    if let Err(e) = run() {
        eprintln!("ERROR: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init(args.logging_config())
        .context("Failed to initialize logging")?;

    let config = args.run_config(ClientConfig::from_env());
    tracing::info!(
        "Benchmarking {} with {} rows",
        config.target.connection_string(),
        config.workload.row_count
    );

    let report = bench_core::run(&config, &SysinfoProfile::new()).map_err(|e| {
        if e.is_setup() {
            anyhow::anyhow!("Setup failed: {e}")
        } else {
            anyhow::anyhow!("Benchmark failed: {e}")
        }
    })?;

    let json = report.to_json().context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
