use clap::ValueEnum;
use image::{ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use thiserror::Error;

/// QR error correction level. Lower levels carry more data but survive less damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ErrorCorrection {
    /// ~7% recovery, largest capacity
    #[default]
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        };
        f.write_str(level)
    }
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub error_correction: ErrorCorrection,
    /// Minimum edge length of the square image, in pixels
    pub width: u32,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("data exceeds barcode capacity")]
    CapacityExceeded,
    #[error("{0}")]
    Failed(String),
}

/// Turns payload text into encoded image bytes.
pub trait BarcodeRenderer {
    fn render(&self, text: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError>;
}

/// PNG QR code renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrRenderer;

impl BarcodeRenderer for QrRenderer {
    fn render(&self, text: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), options.error_correction.into())
            .map_err(|err| match err {
                QrError::DataTooLong => RenderError::CapacityExceeded,
                other => RenderError::Failed(other.to_string()),
            })?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(options.width, options.width)
            .build();

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| RenderError::Failed(err.to_string()))?;
        Ok(bytes)
    }
}
