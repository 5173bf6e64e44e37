use sysinfo::System;

use crate::error::InventoryError;
use crate::hardware::types::OsInfo;

pub fn collect_os_info() -> Result<OsInfo, InventoryError> {
    Ok(OsInfo {
        distro: System::name().filter(|s| !s.trim().is_empty()),
        release: System::os_version().filter(|s| !s.trim().is_empty()),
    })
}
