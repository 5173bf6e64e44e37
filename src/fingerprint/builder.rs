use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{FingerprintError, InventoryError};
use crate::fingerprint::classify;
use crate::fingerprint::types::{Fingerprint, NOT_AVAILABLE, UNKNOWN};
use crate::hardware::{InventoryCategory, InventoryProvider, RawInventory};

/// Collect every inventory category concurrently and classify the result.
pub async fn build_fingerprint<P: InventoryProvider>(
    provider: Arc<P>,
) -> Result<Fingerprint, FingerprintError> {
    let inventory = collect_inventory(provider).await?;
    let fingerprint = Fingerprint::from_inventory(&inventory);
    info!(computer = %fingerprint.computer_name, "fingerprint assembled");
    Ok(fingerprint)
}

/// Fan out the independent queries onto the blocking pool and join them.
/// The first failing category aborts the whole collection.
pub async fn collect_inventory<P: InventoryProvider>(
    provider: Arc<P>,
) -> Result<RawInventory, FingerprintError> {
    let (system, chassis, os, cpu, memory, disks, usb, bluetooth, displays) = tokio::try_join!(
        query(&provider, InventoryCategory::System, |p| p.system()),
        query(&provider, InventoryCategory::Chassis, |p| p.chassis()),
        query(&provider, InventoryCategory::Os, |p| p.os()),
        query(&provider, InventoryCategory::Cpu, |p| p.cpu()),
        query(&provider, InventoryCategory::Memory, |p| p.memory()),
        query(&provider, InventoryCategory::DiskLayout, |p| p.disk_layout()),
        query(&provider, InventoryCategory::Usb, |p| p.usb_devices()),
        query(&provider, InventoryCategory::Bluetooth, |p| p.bluetooth_devices()),
        query(&provider, InventoryCategory::Displays, |p| p.displays()),
    )?;

    Ok(RawInventory {
        system,
        chassis,
        os,
        cpu,
        memory,
        disks,
        usb,
        bluetooth,
        displays,
    })
}

async fn query<P, T, F>(
    provider: &Arc<P>,
    category: InventoryCategory,
    f: F,
) -> Result<T, FingerprintError>
where
    P: InventoryProvider,
    T: Send + 'static,
    F: FnOnce(&P) -> Result<T, InventoryError> + Send + 'static,
{
    let provider = Arc::clone(provider);
    let started = Instant::now();

    let result = tokio::task::spawn_blocking(move || f(&provider))
        .await
        .map_err(|err| FingerprintError::InventoryCollection {
            category,
            reason: err.to_string(),
        })?;

    debug!(%category, elapsed_ms = started.elapsed().as_millis() as u64, "inventory query finished");

    result.map_err(|err| FingerprintError::InventoryCollection {
        category,
        reason: err.to_string(),
    })
}

impl Fingerprint {
    pub fn from_inventory(inventory: &RawInventory) -> Self {
        let system = &inventory.system;

        Fingerprint {
            computer_name: or_placeholder(system.hostname.as_deref(), UNKNOWN),
            serial_no: or_placeholder(system.serial.as_deref(), NOT_AVAILABLE),
            chassis_type: or_placeholder(inventory.chassis.chassis_type.as_deref(), UNKNOWN),
            brand: or_placeholder(system.manufacturer.as_deref(), UNKNOWN),
            model: or_placeholder(system.model.as_deref(), UNKNOWN),
            operating_system: operating_system(
                inventory.os.distro.as_deref(),
                inventory.os.release.as_deref(),
            ),
            cpu: or_placeholder(inventory.cpu.brand.as_deref(), UNKNOWN),
            ram: format!(
                "{}GB",
                classify::bytes_to_gb(inventory.memory.total_bytes.unwrap_or(0))
            ),
            storage_drive: classify::storage_drive_type(&inventory.disks),
            storage_size: classify::total_storage_size(&inventory.disks),
            webcam: classify::has_webcam(&inventory.usb).into(),
            keyboard: classify::has_keyboard(&inventory.usb, &inventory.bluetooth).into(),
            mouse: classify::has_mouse(&inventory.usb, &inventory.bluetooth).into(),
            monitors: classify::monitor_topology(&inventory.displays),
        }
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

fn operating_system(distro: Option<&str>, release: Option<&str>) -> String {
    let joined = format!("{} {}", distro.unwrap_or_default(), release.unwrap_or_default());
    or_placeholder(Some(&joined), UNKNOWN)
}
