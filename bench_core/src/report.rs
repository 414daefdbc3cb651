//! Benchmark report assembly and JSON output

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::facts::FactMap;
use crate::workload::PhaseResult;

/// Final result of one run: phase timings followed by the fact groups.
///
/// Serializes as a single JSON object with one `<phase>Ms` field per timed
/// phase in run order, then `storage`, `system` and `firebird`. Absent fact
/// groups serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkReport {
    timings: Vec<PhaseResult>,
    storage: Option<FactMap>,
    system: FactMap,
    engine: Option<FactMap>,
}

impl BenchmarkReport {
    pub fn timings(&self) -> &[PhaseResult] {
        &self.timings
    }

    pub fn elapsed_ms(&self, phase_name: &str) -> Option<u64> {
        self.timings
            .iter()
            .find(|t| t.phase_name == phase_name)
            .map(|t| t.elapsed_ms)
    }

    pub fn storage(&self) -> Option<&FactMap> {
        self.storage.as_ref()
    }

    pub fn system(&self) -> &FactMap {
        &self.system
    }

    pub fn engine(&self) -> Option<&FactMap> {
        self.engine.as_ref()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn aggregate(
    phase_results: Vec<PhaseResult>,
    storage_facts: Option<FactMap>,
    system_facts: FactMap,
    engine_facts: Option<FactMap>,
) -> BenchmarkReport {
    BenchmarkReport {
        timings: phase_results,
        storage: storage_facts,
        system: system_facts,
        engine: engine_facts,
    }
}

impl Serialize for BenchmarkReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.timings.len() + 3))?;
        for timing in &self.timings {
            map.serialize_entry(&timing.report_key(), &timing.elapsed_ms)?;
        }
        map.serialize_entry("storage", &self.storage)?;
        map.serialize_entry("system", &self.system)?;
        map.serialize_entry("firebird", &self.engine)?;
        map.end()
    }
}
