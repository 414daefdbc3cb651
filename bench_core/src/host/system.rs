use std::path::Path;
use sysinfo::System;

use super::{
    HostFacts, HostProfile, KERNEL_VERSION, OS_NAME, OS_VERSION, PROCESSOR, TOTAL_MEMORY_BYTES,
    probe_storage,
};
use crate::facts::FactMap;

/// Host facts from `sysinfo`, with storage probed per platform.
#[derive(Debug, Clone, Default)]
pub struct SysinfoProfile;

impl SysinfoProfile {
    pub fn new() -> Self {
        Self
    }

    fn system_facts(&self) -> FactMap {
        let mut system = System::new();
        system.refresh_cpu_all();
        system.refresh_memory();

        let processor = system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty());
        let total_memory = Some(system.total_memory())
            .filter(|bytes| *bytes > 0)
            .map(|bytes| bytes.to_string());

        let mut facts = FactMap::new();
        facts.insert(PROCESSOR, processor);
        facts.insert(TOTAL_MEMORY_BYTES, total_memory);
        facts.insert(OS_NAME, System::name());
        facts.insert(OS_VERSION, System::long_os_version().or_else(System::os_version));
        facts.insert(KERNEL_VERSION, System::kernel_version());
        facts
    }
}

impl HostProfile for SysinfoProfile {
    fn collect(&self, database_folder: &Path) -> HostFacts {
        HostFacts {
            system: self.system_facts(),
            storage: probe_storage(database_folder),
        }
    }
}
