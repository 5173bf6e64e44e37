//! Heuristics that fold noisy device inventory into fingerprint fields.
//!
//! Matching is by substring on free-text labels; the order of the tests is
//! part of the contract.

use crate::fingerprint::types::{StorageDrive, StorageSize, UNKNOWN};
use crate::hardware::types::{BluetoothDevice, DiskLayout, DisplayInfo, UsbDevice};

const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// Connection label rewrites, applied in order, first occurrence only.
const CONNECTION_REWRITES: &[(&str, &str)] = &[
    ("Display Port", "DisplayPort"),
    ("DP", "DisplayPort"),
    ("HD15", "VGA"),
    ("LVDS", "Built-in"),
];

const BUILT_IN: &str = "Built-in";

pub fn storage_drive_type(disks: &[DiskLayout]) -> StorageDrive {
    if disks.is_empty() {
        return StorageDrive::Unknown;
    }

    let types: Vec<String> = disks
        .iter()
        .map(|disk| disk.device_type.as_deref().unwrap_or_default().to_uppercase())
        .collect();

    let has_ssd = types.iter().any(|t| t.contains("SSD") || t.contains("NVME"));
    let has_hdd = types
        .iter()
        .any(|t| t.contains("HDD") || (t.contains("HD") && !t.contains("SSD")));

    match (has_ssd, has_hdd) {
        (true, true) => StorageDrive::Hybrid,
        (true, false) => StorageDrive::Ssd,
        (false, true) => StorageDrive::Hdd,
        (false, false) => StorageDrive::Unknown,
    }
}

pub fn total_storage_size(disks: &[DiskLayout]) -> StorageSize {
    if disks.is_empty() {
        return StorageSize::Unreported;
    }

    let total_bytes = disks
        .iter()
        .fold(0u64, |sum, disk| sum.saturating_add(disk.size_bytes.unwrap_or(0)));
    StorageSize::Gigabytes(bytes_to_gb(total_bytes))
}

/// Bytes to whole gigabytes (2^30), rounded to nearest.
pub fn bytes_to_gb(bytes: u64) -> u64 {
    (bytes as f64 / BYTES_PER_GB).round() as u64
}

pub fn has_webcam(usb: &[UsbDevice]) -> bool {
    usb.iter().any(|device| {
        device.device_type.as_deref() == Some("Camera")
            || device.name.as_deref().is_some_and(|name| {
                let name = name.to_lowercase();
                name.contains("camera") || name.contains("webcam")
            })
    })
}

pub fn has_keyboard(usb: &[UsbDevice], bluetooth: &[BluetoothDevice]) -> bool {
    usb.iter().any(|device| device.device_type.as_deref() == Some("Keyboard"))
        || bluetooth
            .iter()
            .any(|device| device.device_type.as_deref() == Some("Keyboard") && device.connected)
}

pub fn has_mouse(usb: &[UsbDevice], bluetooth: &[BluetoothDevice]) -> bool {
    usb.iter().any(|device| device.device_type.as_deref() == Some("Mouse"))
        || bluetooth.iter().any(|device| {
            matches!(device.device_type.as_deref(), Some("Mouse") | Some("Trackpad"))
                && device.connected
        })
}

pub fn monitor_topology(displays: &[DisplayInfo]) -> Vec<String> {
    if displays.is_empty() {
        return vec![UNKNOWN.to_string()];
    }

    displays
        .iter()
        .map(|display| {
            let connection = normalize_connection(display.connection.as_deref().unwrap_or(UNKNOWN));
            if display.builtin || connection == BUILT_IN {
                BUILT_IN.to_string()
            } else {
                format!("{} - External", connection)
            }
        })
        .collect()
}

pub fn normalize_connection(label: &str) -> String {
    CONNECTION_REWRITES
        .iter()
        .fold(label.to_string(), |acc, (from, to)| acc.replacen(from, to, 1))
}
