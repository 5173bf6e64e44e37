use crate::error::InventoryError;
use crate::hardware;
use crate::hardware::types::{
    BluetoothDevice, ChassisInfo, CpuInfo, DiskLayout, DisplayInfo, MemoryInfo, OsInfo,
    SystemIdentity, UsbDevice,
};

/// Source of raw host inventory. Every query is independent of the others so
/// callers may run them concurrently.
pub trait InventoryProvider: Send + Sync + 'static {
    fn system(&self) -> Result<SystemIdentity, InventoryError>;
    fn chassis(&self) -> Result<ChassisInfo, InventoryError>;
    fn os(&self) -> Result<OsInfo, InventoryError>;
    fn cpu(&self) -> Result<CpuInfo, InventoryError>;
    fn memory(&self) -> Result<MemoryInfo, InventoryError>;
    fn disk_layout(&self) -> Result<Vec<DiskLayout>, InventoryError>;
    fn usb_devices(&self) -> Result<Vec<UsbDevice>, InventoryError>;
    fn bluetooth_devices(&self) -> Result<Vec<BluetoothDevice>, InventoryError>;
    fn displays(&self) -> Result<Vec<DisplayInfo>, InventoryError>;
}

/// Inventory read from the machine this process runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostInventory;

impl InventoryProvider for HostInventory {
    fn system(&self) -> Result<SystemIdentity, InventoryError> {
        hardware::collect_system_identity()
    }

    fn chassis(&self) -> Result<ChassisInfo, InventoryError> {
        hardware::collect_chassis()
    }

    fn os(&self) -> Result<OsInfo, InventoryError> {
        hardware::collect_os_info()
    }

    fn cpu(&self) -> Result<CpuInfo, InventoryError> {
        hardware::collect_cpu_info()
    }

    fn memory(&self) -> Result<MemoryInfo, InventoryError> {
        hardware::collect_memory_info()
    }

    fn disk_layout(&self) -> Result<Vec<DiskLayout>, InventoryError> {
        hardware::collect_disk_layout()
    }

    fn usb_devices(&self) -> Result<Vec<UsbDevice>, InventoryError> {
        hardware::collect_usb_devices()
    }

    fn bluetooth_devices(&self) -> Result<Vec<BluetoothDevice>, InventoryError> {
        hardware::collect_bluetooth_devices()
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, InventoryError> {
        hardware::collect_displays()
    }
}
