use serde::Serialize;
use std::fmt;

/// The independent inventory queries fanned out for one fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryCategory {
    System,
    Chassis,
    Os,
    Cpu,
    Memory,
    DiskLayout,
    Usb,
    Bluetooth,
    Displays,
}

impl fmt::Display for InventoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InventoryCategory::System => "system",
            InventoryCategory::Chassis => "chassis",
            InventoryCategory::Os => "operating system",
            InventoryCategory::Cpu => "CPU",
            InventoryCategory::Memory => "memory",
            InventoryCategory::DiskLayout => "disk layout",
            InventoryCategory::Usb => "USB device",
            InventoryCategory::Bluetooth => "Bluetooth device",
            InventoryCategory::Displays => "display",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct RawInventory {
    pub system: SystemIdentity,
    pub chassis: ChassisInfo,
    pub os: OsInfo,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub disks: Vec<DiskLayout>,
    pub usb: Vec<UsbDevice>,
    pub bluetooth: Vec<BluetoothDevice>,
    pub displays: Vec<DisplayInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemIdentity {
    pub hostname: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChassisInfo {
    pub chassis_type: Option<String>,
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OsInfo {
    pub distro: Option<String>,
    pub release: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CpuInfo {
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryInfo {
    pub total_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiskLayout {
    pub name: String,
    pub device_type: Option<String>, // "NVMe", "SSD", "HD", ...
    pub size_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UsbDevice {
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub device_type: Option<String>, // "Camera", "Keyboard", "Mouse", "Hub"
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BluetoothDevice {
    pub name: Option<String>,
    pub address: Option<String>,
    pub device_type: Option<String>, // "Keyboard", "Mouse", "Trackpad", ...
    pub connected: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayInfo {
    pub model: Option<String>,
    pub connection: Option<String>, // connector type, e.g. "eDP", "DP", "HDMI-A"
    pub builtin: bool,
}
