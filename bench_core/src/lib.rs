//! Firebird storage benchmark harness
//!
//! Drives the `isql` client through a fixed sequence of workload phases
//! against a throwaway database and reports per-phase timings together with
//! engine, host and storage facts.

pub mod benchmark;
pub mod config;
pub mod error;
pub mod facts;
pub mod host;
pub mod isql;
pub mod lifecycle;
pub mod list_output;
pub mod logging;
pub mod report;
pub mod workload;

#[cfg(test)]
mod test_utils;

pub use benchmark::{Benchmark, engine_facts, run, validate_target_folder};
pub use config::{ClientConfig, Credentials, Protocol, RunConfig, Target};
pub use error::BenchError;
pub use facts::FactMap;
pub use host::{HostFacts, HostProfile, StaticProfile, SysinfoProfile};
pub use isql::{CommandOutput, IsqlClient, SqlExecutor};
pub use lifecycle::{DatabaseLifecycle, EphemeralDatabase};
pub use list_output::parse_list_output;
pub use report::{BenchmarkReport, aggregate};
pub use workload::{PhaseResult, WorkloadOptions, WorkloadPhase, WorkloadRunner, canonical_phases};
