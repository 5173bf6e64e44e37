use std::process::Command;
use tracing::debug;

use crate::error::InventoryError;
use crate::hardware::types::BluetoothDevice;

/// Seconds `bluetoothctl` may wait on an unresponsive `bluetoothd`.
const BLUETOOTHCTL_TIMEOUT_SECS: &str = "2";

/// Collect paired Bluetooth devices through `bluetoothctl`.
/// Hosts without BlueZ simply report no devices.
pub fn collect_bluetooth_devices() -> Result<Vec<BluetoothDevice>, InventoryError> {
    let Some(listing) = run_bluetoothctl(&["devices"]) else {
        return Ok(Vec::new());
    };

    let devices = parse_device_list(&listing)
        .into_iter()
        .map(|(address, name)| match run_bluetoothctl(&["info", &address]) {
            Some(info) => parse_device_info(&address, &info),
            None => BluetoothDevice {
                name: Some(name),
                address: Some(address),
                ..BluetoothDevice::default()
            },
        })
        .collect();

    Ok(devices)
}

fn run_bluetoothctl(args: &[&str]) -> Option<String> {
    let output = match Command::new("bluetoothctl").args(bluetoothctl_args(args)).output() {
        Ok(output) => output,
        Err(err) => {
            debug!(error = %err, "bluetoothctl not available");
            return None;
        }
    };

    if !output.status.success() {
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn bluetoothctl_args<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let mut full = vec!["--timeout", BLUETOOTHCTL_TIMEOUT_SECS];
    full.extend_from_slice(args);
    full
}

/// Lines look like `Device AA:BB:CC:DD:EE:FF Magic Keyboard`.
fn parse_device_list(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("Device ")?;
            let (address, name) = rest.split_once(' ').unwrap_or((rest, ""));
            Some((address.to_string(), name.trim().to_string()))
        })
        .collect()
}

fn parse_device_info(address: &str, text: &str) -> BluetoothDevice {
    let mut device = BluetoothDevice {
        address: Some(address.to_string()),
        ..BluetoothDevice::default()
    };

    for line in text.lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key {
            "Name" => device.name = Some(value.to_string()),
            "Icon" => device.device_type = icon_device_type(value),
            "Connected" => device.connected = value == "yes",
            _ => {}
        }
    }

    device
}

fn icon_device_type(icon: &str) -> Option<String> {
    let kind = match icon {
        "input-keyboard" => "Keyboard",
        "input-mouse" => "Mouse",
        "input-tablet" => "Trackpad",
        "input-gaming" => "Gamepad",
        "audio-headset" | "audio-headphones" | "audio-card" => "Audio",
        "phone" => "Phone",
        _ => return None,
    };
    Some(kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bluetoothctl_args_are_time_bounded() {
        assert_eq!(bluetoothctl_args(&["devices"]), vec!["--timeout", "2", "devices"]);
        assert_eq!(
            bluetoothctl_args(&["info", "F0:99:B6:33:44:55"]),
            vec!["--timeout", "2", "info", "F0:99:B6:33:44:55"]
        );
    }

    #[test]
    fn test_parse_device_list() {
        let output = "Device 04:52:C7:0A:11:22 Magic Keyboard\nDevice F0:99:B6:33:44:55 MX Master 3\n";
        let devices = parse_device_list(output);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[1], ("F0:99:B6:33:44:55".to_string(), "MX Master 3".to_string()));
    }

    #[test]
    fn test_parse_device_info() {
        let output = "Device F0:99:B6:33:44:55 (random)\n\tName: MX Master 3\n\tIcon: input-mouse\n\tPaired: yes\n\tConnected: yes\n";
        let device = parse_device_info("F0:99:B6:33:44:55", output);
        assert_eq!(device.name.as_deref(), Some("MX Master 3"));
        assert_eq!(device.device_type.as_deref(), Some("Mouse"));
        assert!(device.connected);

        let idle = parse_device_info("00:11", "\tIcon: input-keyboard\n\tConnected: no\n");
        assert_eq!(idle.device_type.as_deref(), Some("Keyboard"));
        assert!(!idle.connected);
    }
}
