use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::FingerprintError;
use crate::fingerprint::Fingerprint;
use crate::pipeline::telemetry::{CompactionResult, Stage, StageMeasurement};

const BROTLI_QUALITY: i32 = 11;
const BROTLI_WINDOW: i32 = 22;

/// How a fingerprint is packed into barcode-safe text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompactionStrategy {
    /// MessagePack, Brotli at maximum quality, then base64
    #[default]
    Compact,
    /// base64 of the JSON text, no packing or compression
    Plain,
}

impl fmt::Display for CompactionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompactionStrategy::Compact => write!(f, "compact"),
            CompactionStrategy::Plain => write!(f, "plain"),
        }
    }
}

impl CompactionStrategy {
    /// Encode a fingerprint, measuring every stage against the JSON baseline.
    /// The output depends only on the fingerprint and the strategy.
    pub fn compact(&self, fingerprint: &Fingerprint) -> Result<CompactionResult, FingerprintError> {
        let json = serde_json::to_vec(fingerprint)
            .map_err(|e| FingerprintError::Encode(e.to_string()))?;
        let mut stages = vec![StageMeasurement::new(Stage::Json, json.len())];

        let payload = match self {
            CompactionStrategy::Compact => {
                let packed = rmp_serde::to_vec_named(fingerprint)
                    .map_err(|e| FingerprintError::Encode(e.to_string()))?;
                stages.push(StageMeasurement::new(Stage::MessagePack, packed.len()));

                let compressed = brotli_compress(&packed)?;
                stages.push(StageMeasurement::new(Stage::Brotli, compressed.len()));

                STANDARD.encode(&compressed)
            }
            CompactionStrategy::Plain => STANDARD.encode(&json),
        };
        stages.push(StageMeasurement::new(Stage::Base64, payload.len()));

        debug!(strategy = %self, payload_len = payload.len(), "fingerprint compacted");
        Ok(CompactionResult { stages, payload })
    }

    /// Exact inverse of [`CompactionStrategy::compact`].
    pub fn decode(&self, payload: &str) -> Result<Fingerprint, FingerprintError> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| FingerprintError::Decode(format!("invalid base64: {}", e)))?;

        match self {
            CompactionStrategy::Compact => {
                let packed = brotli_decompress(&bytes)?;
                rmp_serde::from_slice(&packed)
                    .map_err(|e| FingerprintError::Decode(format!("invalid MessagePack record: {}", e)))
            }
            CompactionStrategy::Plain => serde_json::from_slice(&bytes)
                .map_err(|e| FingerprintError::Decode(format!("invalid JSON record: {}", e))),
        }
    }
}

fn brotli_compress(input: &[u8]) -> Result<Vec<u8>, FingerprintError> {
    let mut params = brotli::enc::BrotliEncoderParams::default();
    params.quality = BROTLI_QUALITY;
    params.lgwin = BROTLI_WINDOW;

    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut &input[..], &mut compressed, &params)
        .map_err(|e| FingerprintError::Encode(format!("brotli compression failed: {}", e)))?;
    Ok(compressed)
}

fn brotli_decompress(input: &[u8]) -> Result<Vec<u8>, FingerprintError> {
    let mut decompressed = Vec::new();
    brotli::BrotliDecompress(&mut &input[..], &mut decompressed)
        .map_err(|e| FingerprintError::Decode(format!("invalid brotli stream: {}", e)))?;
    Ok(decompressed)
}
