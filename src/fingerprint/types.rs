use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "Not available";

/// Fixed-schema summary of one host. Every field always carries one of its
/// documented literal forms; missing sources degrade to placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    #[serde(rename = "ComputerName")]
    pub computer_name: String,
    #[serde(rename = "SerialNo")]
    pub serial_no: String,
    #[serde(rename = "Type")]
    pub chassis_type: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "OperatingSystem")]
    pub operating_system: String,
    #[serde(rename = "CPU")]
    pub cpu: String,
    #[serde(rename = "RAM")]
    pub ram: String,
    #[serde(rename = "StorageDrive")]
    pub storage_drive: StorageDrive,
    #[serde(rename = "StorageSize")]
    pub storage_size: StorageSize,
    #[serde(rename = "Webcam")]
    pub webcam: Presence,
    #[serde(rename = "Keyboard")]
    pub keyboard: Presence,
    #[serde(rename = "Mouse")]
    pub mouse: Presence,
    #[serde(rename = "Monitors")]
    pub monitors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageDrive {
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "HDD")]
    Hdd,
    Hybrid,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    Yes,
    No,
}

impl From<bool> for Presence {
    fn from(present: bool) -> Self {
        if present {
            Presence::Yes
        } else {
            Presence::No
        }
    }
}

/// Total disk capacity. A host with no reported disks serializes as the
/// number `0`, anything else as a `"<n>GB"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSize {
    Unreported,
    Gigabytes(u64),
}

impl fmt::Display for StorageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageSize::Unreported => write!(f, "0"),
            StorageSize::Gigabytes(gb) => write!(f, "{}GB", gb),
        }
    }
}

impl Serialize for StorageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StorageSize::Unreported => serializer.serialize_u64(0),
            StorageSize::Gigabytes(_) => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for StorageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StorageSizeVisitor)
    }
}

struct StorageSizeVisitor;

impl<'de> Visitor<'de> for StorageSizeVisitor {
    type Value = StorageSize;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("the number 0 or a string like \"512GB\"")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<StorageSize, E> {
        match value {
            0 => Ok(StorageSize::Unreported),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<StorageSize, E> {
        match value {
            0 => Ok(StorageSize::Unreported),
            other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<StorageSize, E> {
        value
            .strip_suffix("GB")
            .and_then(|n| n.parse::<u64>().ok())
            .map(StorageSize::Gigabytes)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}
