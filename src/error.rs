use std::path::PathBuf;
use thiserror::Error;

use crate::artifact::ErrorCorrection;
use crate::config::ConfigError;
use crate::hardware::InventoryCategory;

/// Failure raised by a single inventory query.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("failed to collect {category} information: {reason}")]
    InventoryCollection {
        category: InventoryCategory,
        reason: String,
    },
    #[error(
        "payload of {payload_len} bytes is too large for a QR code at error correction level {level}; \
         consider reducing the information collected or lowering the error correction level"
    )]
    PayloadTooLarge {
        payload_len: usize,
        level: ErrorCorrection,
    },
    #[error("failed to open {}: {reason}", .path.display())]
    ArtifactOpen { path: PathBuf, reason: String },
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("failed to encode fingerprint: {0}")]
    Encode(String),
    #[error("failed to decode payload: {0}")]
    Decode(String),
    #[error("failed to render QR code: {0}")]
    Render(String),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_too_large_message() {
        let err = FingerprintError::PayloadTooLarge {
            payload_len: 3120,
            level: ErrorCorrection::H,
        };
        let message = err.to_string();
        assert!(message.starts_with("payload of 3120 bytes is too large"));
        assert!(message.contains("level H"));
        assert!(!message.contains("strategy"));
    }
}
