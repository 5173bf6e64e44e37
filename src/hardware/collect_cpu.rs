use smbioslib::*;
use sysinfo::System;

use crate::error::InventoryError;
use crate::hardware::collect_node::load_smbios;
use crate::hardware::types::CpuInfo;

pub fn collect_cpu_info() -> Result<CpuInfo, InventoryError> {
    let mut sys = System::new_all();
    sys.refresh_all();

    let brand = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(processor_version_from_smbios);

    Ok(CpuInfo { brand })
}

/// First socket's processor version string, for hosts where the kernel hides the brand.
fn processor_version_from_smbios() -> Option<String> {
    let smbios_data = load_smbios()?;

    for structure in smbios_data.iter() {
        if let DefinedStruct::ProcessorInformation(processor) = structure.defined_struct() {
            if let Some(version_str) = processor.processor_version().to_utf8_lossy() {
                let trimmed_version = version_str.trim();
                if !trimmed_version.is_empty() && trimmed_version != "Not Specified" {
                    return Some(trimmed_version.to_string());
                }
            }
        }
    }
    None
}
