use smbioslib::*;
use sysinfo::System;

use crate::error::InventoryError;
use crate::hardware::collect_node::load_smbios;
use crate::hardware::types::MemoryInfo;

pub fn collect_memory_info() -> Result<MemoryInfo, InventoryError> {
    let mut sys = System::new();
    sys.refresh_memory();

    let total_bytes = match sys.total_memory() {
        0 => installed_dimm_bytes(),
        total => Some(total),
    };

    Ok(MemoryInfo { total_bytes })
}

/// Sum of installed DIMM sizes from SMBIOS memory devices.
fn installed_dimm_bytes() -> Option<u64> {
    let smbios_data = load_smbios()?;
    let mut total_bytes = 0u64;

    for structure in smbios_data.iter() {
        if let DefinedStruct::MemoryDevice(memory_device) = structure.defined_struct() {
            match memory_device.size() {
                Some(MemorySize::Kilobytes(kb)) => total_bytes += kb as u64 * 1024,
                Some(MemorySize::Megabytes(mb)) => total_bytes += mb as u64 * 1024 * 1024,
                Some(MemorySize::SeeExtendedSize) => {
                    if let Some(MemorySizeExtended::Megabytes(mb)) = memory_device.extended_size() {
                        total_bytes += mb as u64 * 1024 * 1024;
                    }
                }
                _ => {}
            }
        }
    }

    if total_bytes > 0 { Some(total_bytes) } else { None }
}
