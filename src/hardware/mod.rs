// Raw host inventory collection modules
pub mod types;
pub mod sysfs;
pub mod collect_node;
pub mod collect_os;
pub mod collect_cpu;
pub mod collect_memory;
pub mod collect_storage;
pub mod collect_usb;
pub mod collect_bluetooth;
pub mod collect_displays;
pub mod collector;

// Re-export main collection functions
pub use collect_node::{collect_chassis, collect_system_identity};
pub use collect_os::collect_os_info;
pub use collect_cpu::collect_cpu_info;
pub use collect_memory::collect_memory_info;
pub use collect_storage::collect_disk_layout;
pub use collect_usb::collect_usb_devices;
pub use collect_bluetooth::collect_bluetooth_devices;
pub use collect_displays::collect_displays;
pub use collector::{HostInventory, InventoryProvider};
pub use types::{InventoryCategory, RawInventory};
