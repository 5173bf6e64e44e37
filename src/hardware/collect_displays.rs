use std::fs;
use std::path::Path;

use crate::error::InventoryError;
use crate::hardware::sysfs::read_to_string_trim;
use crate::hardware::types::DisplayInfo;

const SYS_DRM: &str = "/sys/class/drm";

const EDID_BLOCK_LEN: usize = 128;
const EDID_DESCRIPTOR_OFFSETS: [usize; 4] = [54, 72, 90, 108];
const EDID_DISPLAY_NAME_TAG: u8 = 0xFC;

/// Connector types wired to a panel inside the chassis.
const INTERNAL_CONNECTORS: &[&str] = &["eDP", "LVDS", "DSI"];

pub fn collect_displays() -> Result<Vec<DisplayInfo>, InventoryError> {
    let root = Path::new(SYS_DRM);
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    scan_connectors(root)
}

fn scan_connectors(root: &Path) -> Result<Vec<DisplayInfo>, InventoryError> {
    let entries = fs::read_dir(root).map_err(|source| InventoryError::Io {
        path: root.display().to_string(),
        source,
    })?;

    let mut connectors: Vec<(String, DisplayInfo)> = Vec::new();
    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let Some(connector) = connector_type(&name) else {
            continue;
        };

        let status = read_to_string_trim(entry.path().join("status"));
        if status.as_deref() != Some("connected") {
            continue;
        }

        let builtin = INTERNAL_CONNECTORS.contains(&connector.as_str());
        let model = fs::read(entry.path().join("edid"))
            .ok()
            .and_then(|edid| edid_monitor_name(&edid));
        connectors.push((
            name,
            DisplayInfo {
                model,
                connection: Some(connector),
                builtin,
            },
        ));
    }

    connectors.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(connectors.into_iter().map(|(_, display)| display).collect())
}

/// `card0-HDMI-A-1` -> `HDMI-A`; plain `card0` / `renderD128` are not connectors.
fn connector_type(entry_name: &str) -> Option<String> {
    let (card, rest) = entry_name.split_once('-')?;
    if !card.starts_with("card") {
        return None;
    }
    let (kind, index) = rest.rsplit_once('-')?;
    if kind.is_empty() || index.parse::<u32>().is_err() {
        return None;
    }
    Some(kind.to_string())
}

/// Monitor name from the display descriptor (tag 0xFC) of an EDID base block.
fn edid_monitor_name(edid: &[u8]) -> Option<String> {
    if edid.len() < EDID_BLOCK_LEN {
        return None;
    }

    EDID_DESCRIPTOR_OFFSETS.iter().find_map(|&offset| {
        let descriptor = &edid[offset..offset + 18];
        if descriptor[..3] != [0, 0, 0] || descriptor[3] != EDID_DISPLAY_NAME_TAG {
            return None;
        }
        let text = &descriptor[5..];
        let end = text.iter().position(|&b| b == b'\n').unwrap_or(text.len());
        let name = String::from_utf8_lossy(&text[..end]).trim().to_string();
        (!name.is_empty()).then_some(name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_type() {
        assert_eq!(connector_type("card0-eDP-1").as_deref(), Some("eDP"));
        assert_eq!(connector_type("card1-HDMI-A-2").as_deref(), Some("HDMI-A"));
        assert_eq!(connector_type("card0-DP-3").as_deref(), Some("DP"));
        assert_eq!(connector_type("card0"), None);
        assert_eq!(connector_type("renderD128"), None);
    }

    fn edid_with_name(name: &str) -> Vec<u8> {
        let mut edid = vec![0u8; EDID_BLOCK_LEN];
        edid[..8].copy_from_slice(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
        // serial number descriptor first, name second
        edid[72 + 3] = 0xFF;
        edid[90 + 3] = EDID_DISPLAY_NAME_TAG;
        let mut text = name.as_bytes().to_vec();
        text.push(b'\n');
        text.resize(13, b' ');
        edid[95..108].copy_from_slice(&text);
        edid
    }

    #[test]
    fn test_edid_monitor_name() {
        assert_eq!(edid_monitor_name(&edid_with_name("DELL U2720Q")).as_deref(), Some("DELL U2720Q"));
        assert_eq!(edid_monitor_name(&[0u8; EDID_BLOCK_LEN]), None);
        assert_eq!(edid_monitor_name(&[]), None);
    }

    #[test]
    fn test_scan_connectors_only_reports_connected() {
        let root = tempfile::tempdir().unwrap();
        for (name, status) in [
            ("card0-eDP-1", "connected"),
            ("card0-DP-1", "connected"),
            ("card0-HDMI-A-1", "disconnected"),
        ] {
            fs::create_dir_all(root.path().join(name)).unwrap();
            fs::write(root.path().join(name).join("status"), format!("{}\n", status)).unwrap();
        }
        fs::write(root.path().join("card0-DP-1").join("edid"), edid_with_name("DELL U2720Q")).unwrap();
        fs::write(root.path().join("card0-eDP-1").join("edid"), b"").unwrap();

        let displays = scan_connectors(root.path()).unwrap();
        assert_eq!(displays.len(), 2);
        assert_eq!(displays[0].connection.as_deref(), Some("DP"));
        assert_eq!(displays[0].model.as_deref(), Some("DELL U2720Q"));
        assert!(!displays[0].builtin);
        assert_eq!(displays[1].connection.as_deref(), Some("eDP"));
        assert!(displays[1].builtin);
        assert_eq!(displays[1].model, None);
    }
}
