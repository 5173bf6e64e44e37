use std::fs;
use smbioslib::*;
use sysinfo::System;
use tracing::debug;

use crate::error::InventoryError;
use crate::hardware::types::{ChassisInfo, SystemIdentity};

const DMI_TABLE_PATH: &str = "/sys/firmware/dmi/tables/DMI";

/// Vendor filler strings that mean "no value".
const PLACEHOLDERS: &[&str] = &[
    "Not Specified",
    "Not Available",
    "To Be Filled By O.E.M.",
    "Default string",
    "System Serial Number",
];

pub fn collect_system_identity() -> Result<SystemIdentity, InventoryError> {
    let mut identity = SystemIdentity {
        hostname: get_hostname(),
        ..SystemIdentity::default()
    };

    let Some(smbios_data) = load_smbios() else {
        return Ok(identity);
    };

    for structure in smbios_data.iter() {
        if let DefinedStruct::SystemInformation(system_struct) = structure.defined_struct() {
            identity.manufacturer = clean(system_struct.manufacturer().to_utf8_lossy());
            identity.model = clean(system_struct.product_name().to_utf8_lossy());
            identity.serial = clean(system_struct.serial_number().to_utf8_lossy());
            break;
        }
    }

    Ok(identity)
}

pub fn collect_chassis() -> Result<ChassisInfo, InventoryError> {
    let mut chassis = ChassisInfo::default();

    let Some(smbios_data) = load_smbios() else {
        return Ok(chassis);
    };

    for structure in smbios_data.iter() {
        if let DefinedStruct::SystemChassisInformation(chassis_struct) = structure.defined_struct() {
            chassis.manufacturer = clean(chassis_struct.manufacturer().to_utf8_lossy());
            chassis.chassis_type = chassis_struct
                .chassis_type()
                .map(|data| format!("{:?}", data.value))
                .filter(|s| !matches!(s.as_str(), "Unknown" | "Other" | "None"));
            break;
        }
    }

    Ok(chassis)
}

fn get_hostname() -> Option<String> {
    System::host_name()
        .or_else(|| fs::read_to_string("/proc/sys/kernel/hostname").ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Load SMBIOS data from the platform, falling back to the raw sysfs table.
pub(crate) fn load_smbios() -> Option<SMBiosData> {
    if let Ok(data) = table_load_from_device() {
        return Some(data);
    }

    match SMBiosData::try_load_from_file(DMI_TABLE_PATH, None) {
        Ok(data) => Some(data),
        Err(_) => match fs::read(DMI_TABLE_PATH) {
            Ok(table_data) => Some(SMBiosData::from_vec_and_version(table_data, None)),
            Err(err) => {
                debug!(error = %err, "SMBIOS tables unavailable");
                None
            }
        },
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !PLACEHOLDERS.contains(&s.as_str()))
}
