//! End-to-end run: create, load, measure, describe, tear down, report

use snafu::ensure;
use std::path::Path;

use crate::config::{RunConfig, Target};
use crate::error::{InvalidTargetFolderSnafu, Result};
use crate::facts::FactMap;
use crate::host::HostProfile;
use crate::isql::{IsqlClient, SqlExecutor};
use crate::lifecycle::DatabaseLifecycle;
use crate::list_output::parse_list_output;
use crate::report::{BenchmarkReport, aggregate};
use crate::workload::{PhaseResult, WorkloadPhase, WorkloadRunner, canonical_phases, sql};

pub struct Benchmark<'a, E: SqlExecutor + ?Sized, H: HostProfile + ?Sized> {
    executor: &'a E,
    host: &'a H,
    target: Target,
    phases: Vec<WorkloadPhase>,
    collect_engine_facts: bool,
}

impl<'a, E: SqlExecutor + ?Sized, H: HostProfile + ?Sized> Benchmark<'a, E, H> {
    pub fn new(executor: &'a E, host: &'a H, target: Target, phases: Vec<WorkloadPhase>) -> Self {
        Self {
            executor,
            host,
            target,
            phases,
            collect_engine_facts: true,
        }
    }

    pub fn with_engine_facts(mut self, collect: bool) -> Self {
        self.collect_engine_facts = collect;
        self
    }

    /// Runs every phase once. The database is removed whether or not the
    /// workload succeeds; no report is produced on failure.
    pub fn run(&self) -> Result<BenchmarkReport> {
        let lifecycle = DatabaseLifecycle::new(self.executor);
        let database = lifecycle.create(&self.target)?;

        let measured = self.measure(database.target());
        let host_facts = measured
            .is_ok()
            .then(|| self.host.collect(self.target.folder()));
        lifecycle.destroy(database);

        let (timings, engine) = measured?;
        let host_facts = host_facts.unwrap_or_default();
        Ok(aggregate(
            timings,
            host_facts.storage,
            host_facts.system,
            engine,
        ))
    }

    fn measure(&self, target: &Target) -> Result<(Vec<PhaseResult>, Option<FactMap>)> {
        let timings = WorkloadRunner::new(self.executor).run(&self.phases, target)?;
        let engine = if self.collect_engine_facts {
            engine_facts(self.executor, target)?
        } else {
            None
        };
        Ok((timings, engine))
    }
}

/// Queries engine metadata in list mode. A failed invocation is an error;
/// output that does not parse only makes the facts absent.
pub fn engine_facts<E: SqlExecutor + ?Sized>(
    executor: &E,
    target: &Target,
) -> Result<Option<FactMap>> {
    let output = executor.execute(sql::ENGINE_FACTS, Some(target), false)?;
    if !output.stderr.trim().is_empty() {
        tracing::debug!("Engine facts query wrote to stderr: {}", output.stderr.trim());
    }
    match parse_list_output(&output.stdout) {
        Ok(facts) if facts.is_empty() => {
            tracing::warn!("Engine facts query returned no entries");
            Ok(None)
        }
        Ok(facts) => Ok(Some(facts)),
        Err(e) => {
            tracing::warn!("Could not parse engine facts: {e}");
            Ok(None)
        }
    }
}

pub fn validate_target_folder(folder: &Path) -> Result<()> {
    ensure!(
        folder.is_dir(),
        InvalidTargetFolderSnafu {
            path: folder.to_path_buf(),
        }
    );
    Ok(())
}

/// Runs the canonical workload through `isql` as described by `config`.
pub fn run(config: &RunConfig, host: &dyn HostProfile) -> Result<BenchmarkReport> {
    let client = IsqlClient::new(config.client.clone());
    let executable = client.verify()?;
    tracing::info!("Using database client {}", executable.display());
    validate_target_folder(config.target.folder())?;

    let phases = canonical_phases(&config.workload);
    Benchmark::new(&client, host, config.target.clone(), phases)
        .with_engine_facts(config.collect_engine_facts)
        .run()
}
