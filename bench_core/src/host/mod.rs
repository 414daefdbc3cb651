//! Host system and storage facts

mod storage;
mod system;

pub use storage::probe_storage;
pub use system::SysinfoProfile;

use std::path::Path;

use crate::facts::FactMap;

pub const PROCESSOR: &str = "processor";
pub const TOTAL_MEMORY_BYTES: &str = "totalMemoryBytes";
pub const OS_NAME: &str = "osName";
pub const OS_VERSION: &str = "osVersion";
pub const KERNEL_VERSION: &str = "kernelVersion";

pub const DEVICE: &str = "device";
pub const FRIENDLY_NAME: &str = "friendlyName";
pub const LOGICAL_SECTOR_SIZE: &str = "logicalSectorSize";
pub const PHYSICAL_SECTOR_SIZE: &str = "physicalSectorSize";
pub const DEVICE_CACHE_ENABLED: &str = "deviceCacheEnabled";
pub const POWER_PROTECTED: &str = "powerProtected";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostFacts {
    pub system: FactMap,
    pub storage: Option<FactMap>,
}

/// Source of host facts for the machine running the benchmark.
///
/// Collection never fails: a fact that cannot be obtained is recorded
/// with an absent value.
pub trait HostProfile {
    /// `database_folder` selects the storage device to describe.
    fn collect(&self, database_folder: &Path) -> HostFacts;
}

/// Returns the same facts on every call.
#[derive(Debug, Clone, Default)]
pub struct StaticProfile {
    facts: HostFacts,
}

impl StaticProfile {
    pub fn new(system: FactMap, storage: Option<FactMap>) -> Self {
        Self {
            facts: HostFacts { system, storage },
        }
    }
}

impl HostProfile for StaticProfile {
    fn collect(&self, _database_folder: &Path) -> HostFacts {
        self.facts.clone()
    }
}
