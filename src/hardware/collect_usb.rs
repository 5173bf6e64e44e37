use std::fs;
use std::path::Path;

use crate::error::InventoryError;
use crate::hardware::sysfs::{read_hex_u8, read_to_string_trim};
use crate::hardware::types::UsbDevice;

const SYS_USB_DEVICES: &str = "/sys/bus/usb/devices";

// USB class codes (usb.org defined class codes)
const CLASS_HID: u8 = 0x03;
const CLASS_HUB: u8 = 0x09;
const CLASS_VIDEO: u8 = 0x0e;
const HID_PROTOCOL_KEYBOARD: u8 = 0x01;
const HID_PROTOCOL_MOUSE: u8 = 0x02;

#[derive(Debug, Clone, Copy)]
struct UsbInterface {
    class: u8,
    protocol: u8,
}

pub fn collect_usb_devices() -> Result<Vec<UsbDevice>, InventoryError> {
    let root = Path::new(SYS_USB_DEVICES);
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    scan_usb_devices(root)
}

fn scan_usb_devices(root: &Path) -> Result<Vec<UsbDevice>, InventoryError> {
    let entries = fs::read_dir(root).map_err(|source| InventoryError::Io {
        path: root.display().to_string(),
        source,
    })?;

    let mut devices = Vec::new();
    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };
        // Interface nodes ("1-1:1.0") are read through their parent device
        if name.contains(':') {
            continue;
        }

        let path = entry.path();
        let device_class = read_hex_u8(path.join("bDeviceClass"));
        let interfaces = read_interfaces(&path, &name);

        devices.push(UsbDevice {
            name: read_to_string_trim(path.join("product")),
            vendor: read_to_string_trim(path.join("manufacturer")),
            device_type: usb_device_type(device_class, &interfaces),
        });
    }

    Ok(devices)
}

fn read_interfaces(device_path: &Path, device_name: &str) -> Vec<UsbInterface> {
    let prefix = format!("{}:", device_name);
    let Ok(entries) = fs::read_dir(device_path) else {
        return Vec::new();
    };

    entries
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(&prefix))
        .filter_map(|entry| {
            let path = entry.path();
            Some(UsbInterface {
                class: read_hex_u8(path.join("bInterfaceClass"))?,
                protocol: read_hex_u8(path.join("bInterfaceProtocol")).unwrap_or(0),
            })
        })
        .collect()
}

fn usb_device_type(device_class: Option<u8>, interfaces: &[UsbInterface]) -> Option<String> {
    let has = |class: u8, protocol: Option<u8>| {
        interfaces
            .iter()
            .any(|i| i.class == class && protocol.map_or(true, |p| i.protocol == p))
    };

    let kind = if has(CLASS_VIDEO, None) {
        "Camera"
    } else if has(CLASS_HID, Some(HID_PROTOCOL_KEYBOARD)) {
        "Keyboard"
    } else if has(CLASS_HID, Some(HID_PROTOCOL_MOUSE)) {
        "Mouse"
    } else if device_class == Some(CLASS_HUB) {
        "Hub"
    } else {
        return None;
    };
    Some(kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(class: u8, protocol: u8) -> UsbInterface {
        UsbInterface { class, protocol }
    }

    #[test]
    fn test_usb_device_type() {
        assert_eq!(usb_device_type(Some(0xef), &[iface(0x0e, 0), iface(0x01, 0)]).as_deref(), Some("Camera"));
        assert_eq!(usb_device_type(Some(0), &[iface(0x03, 1), iface(0x03, 2)]).as_deref(), Some("Keyboard"));
        assert_eq!(usb_device_type(Some(0), &[iface(0x03, 2)]).as_deref(), Some("Mouse"));
        assert_eq!(usb_device_type(Some(0x09), &[iface(0x09, 0)]).as_deref(), Some("Hub"));
        assert_eq!(usb_device_type(Some(0), &[iface(0x08, 0x50)]), None);
    }

    #[test]
    fn test_scan_usb_devices() {
        let root = tempfile::tempdir().unwrap();
        let cam = root.path().join("1-4");
        fs::create_dir_all(cam.join("1-4:1.0")).unwrap();
        fs::write(cam.join("product"), "Integrated Camera\n").unwrap();
        fs::write(cam.join("manufacturer"), "Chicony\n").unwrap();
        fs::write(cam.join("bDeviceClass"), "ef\n").unwrap();
        fs::write(cam.join("1-4:1.0/bInterfaceClass"), "0e\n").unwrap();
        // top-level interface node must be ignored
        fs::create_dir_all(root.path().join("1-4:1.0")).unwrap();

        let devices = scan_usb_devices(root.path()).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name.as_deref(), Some("Integrated Camera"));
        assert_eq!(devices[0].device_type.as_deref(), Some("Camera"));
    }
}
