//! Workload phases and the sequential phase runner

pub mod sql;

use std::time::{Duration, Instant};

use crate::config::Target;
use crate::error::Result;
use crate::isql::SqlExecutor;

/// Reference row count for the bulk insert phase.
pub const DEFAULT_ROW_COUNT: u64 = 5_000_000;

/// One named step of the benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadPhase {
    pub name: String,
    pub sql: String,
    pub timed: bool,
    pub ignore_errors: bool,
}

impl WorkloadPhase {
    pub fn timed(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            timed: true,
            ignore_errors: false,
        }
    }

    pub fn untimed(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            timed: false,
            ..Self::timed(name, sql)
        }
    }

    pub fn ignoring_errors(mut self, ignore_errors: bool) -> Self {
        self.ignore_errors = ignore_errors;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseResult {
    pub phase_name: String,
    pub elapsed_ms: u64,
}

impl PhaseResult {
    /// Field name of this timing in the report, e.g. `insertMs`.
    pub fn report_key(&self) -> String {
        format!("{}Ms", self.phase_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadOptions {
    pub row_count: u64,
    pub tolerate_select_errors: bool,
}

impl Default for WorkloadOptions {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            tolerate_select_errors: false,
        }
    }
}

/// The fixed phase sequence: schema, insert, select, update, createIndex.
pub fn canonical_phases(options: &WorkloadOptions) -> Vec<WorkloadPhase> {
    vec![
        WorkloadPhase::untimed("schema", sql::CREATE_TABLE),
        WorkloadPhase::timed("insert", sql::bulk_insert(options.row_count)),
        WorkloadPhase::timed("select", sql::SELECT_QUERIES)
            .ignoring_errors(options.tolerate_select_errors),
        WorkloadPhase::timed("update", sql::UPDATE_QUERY),
        WorkloadPhase::timed("createIndex", sql::CREATE_INDEX),
    ]
}

pub fn round_to_millis(elapsed: Duration) -> u64 {
    let nanos = elapsed.as_nanos() + 500_000;
    u64::try_from(nanos / 1_000_000).unwrap_or(u64::MAX)
}

/// Runs phases strictly in order, one client invocation each.
pub struct WorkloadRunner<'a, E: SqlExecutor + ?Sized> {
    executor: &'a E,
}

impl<'a, E: SqlExecutor + ?Sized> WorkloadRunner<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Returns one result per timed phase in declaration order. The first
    /// untolerated failure aborts the run.
    pub fn run(&self, phases: &[WorkloadPhase], target: &Target) -> Result<Vec<PhaseResult>> {
        let mut results = Vec::with_capacity(phases.iter().filter(|p| p.timed).count());

        for phase in phases {
            tracing::info!("Starting phase {}", phase.name);
            let start = Instant::now();
            let output = self
                .executor
                .execute(&phase.sql, Some(target), phase.ignore_errors)
                .inspect_err(|e| tracing::error!("Phase {} failed: {e}", phase.name))?;
            let elapsed = start.elapsed();

            if !output.success() {
                tracing::warn!(
                    "Phase {} failed with exit code {:?}, continuing",
                    phase.name,
                    output.exit_code
                );
            }

            if phase.timed {
                let elapsed_ms = round_to_millis(elapsed);
                tracing::info!("Phase {} took {elapsed_ms} ms", phase.name);
                results.push(PhaseResult {
                    phase_name: phase.name.clone(),
                    elapsed_ms,
                });
            } else {
                tracing::info!("Phase {} done", phase.name);
            }
        }

        Ok(results)
    }
}
