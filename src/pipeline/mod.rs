// Fingerprint compaction into barcode-safe text
pub mod strategy;
pub mod telemetry;

pub use strategy::CompactionStrategy;
pub use telemetry::CompactionResult;
