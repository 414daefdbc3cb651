use std::path::Path;
use sysinfo::Disks;

use super::{
    DEVICE, DEVICE_CACHE_ENABLED, FRIENDLY_NAME, LOGICAL_SECTOR_SIZE, PHYSICAL_SECTOR_SIZE,
    POWER_PROTECTED,
};
use crate::facts::FactMap;

/// Describes the block device holding `folder`, if one can be identified.
pub fn probe_storage(folder: &Path) -> Option<FactMap> {
    let device = mounted_device(folder)?;
    tracing::debug!("Database folder {} is on {device}", folder.display());
    Some(device_facts(&device))
}

/// Device name of the mount with the longest mount point containing `folder`.
fn mounted_device(folder: &Path) -> Option<String> {
    let folder = folder.canonicalize().ok()?;
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .filter(|disk| folder.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .map(|disk| disk.name().to_string_lossy().into_owned())
}

#[cfg(target_os = "linux")]
fn device_facts(device: &str) -> FactMap {
    let sysfs = block_device_dir(device);
    let read = |relative: &str| -> Option<String> {
        let dir = sysfs.as_ref()?;
        let value = std::fs::read_to_string(dir.join(relative)).ok()?;
        Some(value.trim().to_string()).filter(|v| !v.is_empty())
    };

    let mut facts = FactMap::new();
    facts.insert_value(DEVICE, device);
    facts.insert(FRIENDLY_NAME, read("device/model"));
    facts.insert(LOGICAL_SECTOR_SIZE, read("queue/logical_block_size"));
    facts.insert(PHYSICAL_SECTOR_SIZE, read("queue/physical_block_size"));
    facts.insert(
        DEVICE_CACHE_ENABLED,
        read("queue/write_cache").and_then(|mode| write_cache_enabled(&mode)),
    );
    facts.insert(POWER_PROTECTED, None);
    facts
}

#[cfg(not(target_os = "linux"))]
fn device_facts(device: &str) -> FactMap {
    let mut facts = FactMap::new();
    facts.insert_value(DEVICE, device);
    for key in [
        FRIENDLY_NAME,
        LOGICAL_SECTOR_SIZE,
        PHYSICAL_SECTOR_SIZE,
        DEVICE_CACHE_ENABLED,
        POWER_PROTECTED,
    ] {
        facts.insert(key, None);
    }
    facts
}

/// Sysfs directory of the whole disk behind `device`; partitions resolve
/// to their parent disk.
#[cfg(target_os = "linux")]
fn block_device_dir(device: &str) -> Option<std::path::PathBuf> {
    let name = Path::new(device).file_name()?;
    let dir = Path::new("/sys/class/block").join(name).canonicalize().ok()?;
    if dir.join("partition").exists() {
        return dir.parent().map(Path::to_path_buf);
    }
    Some(dir)
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn write_cache_enabled(mode: &str) -> Option<String> {
    match mode.trim() {
        "write back" => Some("true".to_string()),
        "write through" => Some("false".to_string()),
        other => {
            tracing::debug!("Unknown write cache mode: {other}");
            None
        }
    }
}
