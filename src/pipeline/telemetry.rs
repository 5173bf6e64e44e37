use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Json,
    MessagePack,
    Brotli,
    Base64,
}

impl Stage {
    fn label(&self) -> &'static str {
        match self {
            Stage::Json => "Original JSON size",
            Stage::MessagePack => "MessagePack size",
            Stage::Brotli => "After Brotli compression",
            Stage::Base64 => "After base64 encoding",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Json => "json",
            Stage::MessagePack => "msgpack",
            Stage::Brotli => "brotli",
            Stage::Base64 => "base64",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageMeasurement {
    pub stage: Stage,
    pub bytes: usize,
}

impl StageMeasurement {
    pub fn new(stage: Stage, bytes: usize) -> Self {
        Self { stage, bytes }
    }
}

/// Stage sizes plus the final payload of one compaction run.
#[derive(Debug, Clone, Serialize)]
pub struct CompactionResult {
    pub stages: Vec<StageMeasurement>,
    pub payload: String,
}

impl CompactionResult {
    /// Size of the first (uncompacted JSON) stage.
    pub fn baseline(&self) -> usize {
        self.stages.first().map(|s| s.bytes).unwrap_or(0)
    }

    /// Percentage saved by `bytes` relative to the baseline; negative when it grew.
    pub fn reduction_vs_baseline(&self, bytes: usize) -> f64 {
        match self.baseline() {
            0 => 0.0,
            baseline => (1.0 - bytes as f64 / baseline as f64) * 100.0,
        }
    }

    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.stages.len() + 1);

        for (index, measurement) in self.stages.iter().enumerate() {
            if index == 0 {
                lines.push(format!("{}: {} bytes", measurement.stage.label(), measurement.bytes));
            } else {
                lines.push(format!(
                    "{}: {} bytes ({:.1}% reduction)",
                    measurement.stage.label(),
                    measurement.bytes,
                    self.reduction_vs_baseline(measurement.bytes)
                ));
            }
        }

        lines.push(format!(
            "Total size reduction vs original: {:.1}%",
            self.reduction_vs_baseline(self.payload.len())
        ));
        lines
    }

    pub fn log_report(&self) {
        for measurement in &self.stages {
            debug!(
                stage = %measurement.stage,
                bytes = measurement.bytes,
                reduction_pct = self.reduction_vs_baseline(measurement.bytes),
                "compaction stage"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> CompactionResult {
        CompactionResult {
            stages: vec![
                StageMeasurement::new(Stage::Json, 400),
                StageMeasurement::new(Stage::MessagePack, 300),
                StageMeasurement::new(Stage::Brotli, 150),
                StageMeasurement::new(Stage::Base64, 200),
            ],
            payload: "A".repeat(200),
        }
    }

    #[test]
    fn test_reduction_vs_baseline() {
        let result = result();
        assert_eq!(result.baseline(), 400);
        assert!((result.reduction_vs_baseline(300) - 25.0).abs() < f64::EPSILON);
        assert!((result.reduction_vs_baseline(600) + 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_lines() {
        let lines = result().report_lines();
        assert_eq!(
            lines,
            vec![
                "Original JSON size: 400 bytes",
                "MessagePack size: 300 bytes (25.0% reduction)",
                "After Brotli compression: 150 bytes (62.5% reduction)",
                "After base64 encoding: 200 bytes (50.0% reduction)",
                "Total size reduction vs original: 50.0%",
            ]
        );
    }

    #[test]
    fn test_empty_baseline() {
        let empty = CompactionResult { stages: vec![], payload: String::new() };
        assert_eq!(empty.reduction_vs_baseline(10), 0.0);
    }
}
