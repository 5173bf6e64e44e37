use std::fs;
use std::path::Path;
use sysinfo::{DiskKind, Disks};
use tracing::debug;

use crate::error::InventoryError;
use crate::hardware::sysfs::{read_to_string_trim, read_to_u64};
use crate::hardware::types::DiskLayout;

const SYS_BLOCK: &str = "/sys/block";

/// Entry point: collect the physical disk layout of this machine.
pub fn collect_disk_layout() -> Result<Vec<DiskLayout>, InventoryError> {
    if Path::new(SYS_BLOCK).is_dir() {
        return scan_block_devices(Path::new(SYS_BLOCK), Path::new("/dev"));
    }
    Ok(collect_with_sysinfo())
}

fn scan_block_devices(sys_block: &Path, dev_root: &Path) -> Result<Vec<DiskLayout>, InventoryError> {
    let entries = fs::read_dir(sys_block).map_err(|source| InventoryError::Io {
        path: sys_block.display().to_string(),
        source,
    })?;

    let mut disks = Vec::new();
    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };

        // Skip virtual / non-physical devices
        if is_virtual_device(&name) {
            continue;
        }

        // Skip if the device file doesn't actually exist
        if !dev_root.join(&name).exists() {
            continue;
        }

        let sys_path = entry.path();
        let size_bytes = read_to_u64(sys_path.join("size")).map(|sectors| sectors * 512);
        let rotational = read_to_u64(sys_path.join("queue/rotational")).map(|v| v == 1);
        let removable = read_to_u64(sys_path.join("removable")).map(|v| v == 1);

        let device_type = disk_type(&name, rotational, removable);
        debug!(disk = %name, ?device_type, ?size_bytes, "block device");

        disks.push(DiskLayout {
            name: read_to_string_trim(sys_path.join("device/model")).unwrap_or_else(|| name.clone()),
            device_type,
            size_bytes,
        });
    }

    disks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(disks)
}

fn is_virtual_device(name: &str) -> bool {
    name.starts_with("loop")
        || name.starts_with("ram")
        || name.starts_with("dm-")
        || name.starts_with("zram")
        || name.starts_with("sr")
        || name.starts_with("md")
}

/// Declared medium type, in the vocabulary inventory tools commonly report.
fn disk_type(name: &str, rotational: Option<bool>, removable: Option<bool>) -> Option<String> {
    if name.starts_with("nvme") {
        return Some("NVMe".to_string());
    }
    if removable == Some(true) {
        return Some("Removable".to_string());
    }
    match rotational {
        Some(true) => Some("HD".to_string()),
        Some(false) => Some("SSD".to_string()),
        None => None,
    }
}

/// Fallback for platforms without sysfs: one entry per mounted disk.
fn collect_with_sysinfo() -> Vec<DiskLayout> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .map(|disk| DiskLayout {
            name: disk.name().to_string_lossy().into_owned(),
            device_type: match disk.kind() {
                DiskKind::SSD => Some("SSD".to_string()),
                DiskKind::HDD => Some("HD".to_string()),
                DiskKind::Unknown(_) => None,
            },
            size_bytes: Some(disk.total_space()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_type() {
        assert_eq!(disk_type("nvme0n1", Some(false), None), Some("NVMe".to_string()));
        assert_eq!(disk_type("sda", Some(true), Some(false)), Some("HD".to_string()));
        assert_eq!(disk_type("sdb", Some(false), Some(false)), Some("SSD".to_string()));
        assert_eq!(disk_type("sdc", Some(false), Some(true)), Some("Removable".to_string()));
        assert_eq!(disk_type("vda", None, None), None);
    }

    #[test]
    fn test_scan_block_devices_skips_virtual() {
        let sys = tempfile::tempdir().unwrap();
        let dev = tempfile::tempdir().unwrap();

        for (name, sectors, rotational) in [("sda", "2097152", "1"), ("loop0", "100", "0")] {
            let path = sys.path().join(name);
            fs::create_dir_all(path.join("queue")).unwrap();
            fs::write(path.join("size"), sectors).unwrap();
            fs::write(path.join("queue/rotational"), rotational).unwrap();
            fs::write(dev.path().join(name), "").unwrap();
        }

        let disks = scan_block_devices(sys.path(), dev.path()).unwrap();
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].name, "sda");
        assert_eq!(disks[0].device_type.as_deref(), Some("HD"));
        assert_eq!(disks[0].size_bytes, Some(1024 * 1024 * 1024));
    }
}
