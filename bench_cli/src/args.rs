//! Command-line arguments

use bench_core::config::{
    ClientConfig, Protocol, RunConfig, Target, parse_protocol, parse_row_count,
};
use bench_core::logging::LoggingConfig;
use bench_core::workload::{DEFAULT_ROW_COUNT, WorkloadOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fbbench")]
#[command(about = "Measures Firebird load, query, update and indexing times on this machine")]
pub struct Args {
    /// Folder that will hold the temporary benchmark database
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// How the client connects: local, inet (through localhost) or xnet
    #[arg(short, long, default_value = "local", value_parser = parse_protocol)]
    pub protocol: Protocol,

    /// Number of rows inserted by the load phase
    #[arg(short, long, default_value_t = DEFAULT_ROW_COUNT, value_parser = parse_row_count)]
    pub rows: u64,

    /// Skip the engine version query
    #[arg(long)]
    pub no_engine_facts: bool,

    /// Keep going when the read queries fail
    #[arg(long)]
    pub tolerate_select_errors: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not log to stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter directives such as `debug` or `bench_core=trace`; RUST_LOG wins
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn folder(&self) -> PathBuf {
        self.folder.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn run_config(&self, client: ClientConfig) -> RunConfig {
        RunConfig {
            client,
            target: Target::in_folder(self.protocol, &self.folder()),
            workload: WorkloadOptions {
                row_count: self.rows,
                tolerate_select_errors: self.tolerate_select_errors,
            },
            collect_engine_facts: !self.no_engine_facts,
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::new(self.log_file.clone(), !self.quiet).with_filter(self.log_level.clone())
    }
}
