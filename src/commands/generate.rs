use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::artifact::{
    Artifact, ArtifactEmitter, ArtifactOpener, BarcodeRenderer, QrRenderer, SystemOpener,
};
use crate::config::Config;
use crate::error::FingerprintError;
use crate::fingerprint::build_fingerprint;
use crate::hardware::{HostInventory, InventoryProvider};
use crate::output::{print_info, print_success, print_warning};
use crate::pipeline::{CompactionResult, CompactionStrategy};

pub async fn handle_generate_command(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    print_info("Collecting system information...");

    let opener = cfg.open_artifact.then_some(SystemOpener);
    let emitter = ArtifactEmitter::new(cfg.output_dir(), QrRenderer, opener);
    let (_, artifact) = run_generate(
        Arc::new(HostInventory),
        &emitter,
        cfg,
        Utc::now(),
        |result| {
            for line in result.report_lines() {
                println!("{}", line);
            }
        },
    )
    .await?;

    print_success(&format!("QR code generated: {}", artifact.path.display()));
    match open_failure_message(&artifact) {
        Some(message) => {
            print_warning(&message);
            print_info(&format!("Please manually open: {}", artifact.path.display()));
        }
        None if cfg.open_artifact => print_info("Opening QR code for scanning..."),
        None => {}
    }
    print_info(encoding_note(cfg.strategy));

    Ok(())
}

/// Collect, compact and emit once. `on_compacted` sees the stage sizes before
/// rendering, so they are reported even when the payload does not fit.
pub async fn run_generate<P, R, O, F>(
    provider: Arc<P>,
    emitter: &ArtifactEmitter<R, O>,
    cfg: &Config,
    generated_at: DateTime<Utc>,
    on_compacted: F,
) -> Result<(CompactionResult, Artifact), FingerprintError>
where
    P: InventoryProvider,
    R: BarcodeRenderer,
    O: ArtifactOpener,
    F: FnOnce(&CompactionResult),
{
    let fingerprint = build_fingerprint(provider).await?;

    let result = cfg.strategy.compact(&fingerprint)?;
    result.log_report();
    on_compacted(&result);

    let artifact = emitter.emit(&result.payload, cfg.error_correction, cfg.width, generated_at)?;
    Ok((result, artifact))
}

fn open_failure_message(artifact: &Artifact) -> Option<String> {
    artifact
        .open_failure
        .as_ref()
        .map(|err| format!("Failed to open image: {}", err))
}

fn encoding_note(strategy: CompactionStrategy) -> &'static str {
    match strategy {
        CompactionStrategy::Compact => {
            "Note: Data is base64 encoded, Brotli compressed, and MessagePack encoded."
        }
        CompactionStrategy::Plain => "Note: Data is base64 encoded JSON.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::renderer::{RenderError, RenderOptions};
    use crate::artifact::ErrorCorrection;
    use crate::fingerprint::builder::tests::{sample_fingerprint, FakeInventory};
    use chrono::TimeZone;
    use std::path::Path;

    struct NoViewer;

    impl ArtifactOpener for NoViewer {
        fn open(&self, _path: &Path) -> Result<(), FingerprintError> {
            Ok(())
        }
    }

    struct BrokenViewer;

    impl ArtifactOpener for BrokenViewer {
        fn open(&self, _path: &Path) -> Result<(), FingerprintError> {
            Err(FingerprintError::UnsupportedPlatform("plan9".to_string()))
        }
    }

    /// Renderer with a tiny capacity, standing in for an oversized payload.
    struct TinyRenderer;

    impl BarcodeRenderer for TinyRenderer {
        fn render(&self, text: &str, _options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
            if text.len() > 16 {
                return Err(RenderError::CapacityExceeded);
            }
            Ok(text.as_bytes().to_vec())
        }
    }

    #[tokio::test]
    async fn test_generate_twice_gives_identical_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = ArtifactEmitter::new(dir.path(), QrRenderer, Some(NoViewer));
        let cfg = Config::default();
        let provider = Arc::new(FakeInventory::default());

        let (first, first_artifact) =
            run_generate(provider.clone(), &emitter, &cfg, Utc.timestamp_millis_opt(1).unwrap(), |_| {})
                .await
                .unwrap();
        let (second, second_artifact) =
            run_generate(provider, &emitter, &cfg, Utc.timestamp_millis_opt(2).unwrap(), |_| {})
                .await
                .unwrap();

        assert_eq!(first.payload, second.payload);
        assert_ne!(first_artifact.path, second_artifact.path);
        assert_eq!(
            CompactionStrategy::Compact.decode(&first.payload).unwrap(),
            sample_fingerprint()
        );
    }

    #[tokio::test]
    async fn test_oversized_payload_reports_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = ArtifactEmitter::new(dir.path(), TinyRenderer, Some(NoViewer));
        let cfg = Config {
            strategy: CompactionStrategy::Plain,
            ..Config::default()
        };

        let mut report = Vec::new();
        let err = run_generate(
            Arc::new(FakeInventory::default()),
            &emitter,
            &cfg,
            Utc::now(),
            |result| report = result.report_lines(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            FingerprintError::PayloadTooLarge { level: ErrorCorrection::L, .. }
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(report[0].starts_with("Original JSON size: "));
        assert!(report[1].starts_with("After base64 encoding: "));
        assert!(report.last().unwrap().starts_with("Total size reduction vs original: "));
    }

    #[tokio::test]
    async fn test_open_failure_is_reported_with_its_message() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = ArtifactEmitter::new(dir.path(), QrRenderer, Some(BrokenViewer));

        let (_, artifact) = run_generate(
            Arc::new(FakeInventory::default()),
            &emitter,
            &Config::default(),
            Utc::now(),
            |_| {},
        )
        .await
        .unwrap();

        assert!(artifact.path.exists());
        assert!(matches!(
            artifact.open_failure,
            Some(FingerprintError::UnsupportedPlatform(_))
        ));
        assert_eq!(
            open_failure_message(&artifact).as_deref(),
            Some("Failed to open image: unsupported platform: plan9")
        );
    }

    #[tokio::test]
    async fn test_inventory_failure_produces_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = ArtifactEmitter::new(dir.path(), QrRenderer, Some(NoViewer));

        let err = run_generate(
            Arc::new(FakeInventory { fail_usb: true }),
            &emitter,
            &Config::default(),
            Utc::now(),
            |_| panic!("nothing to report without an inventory"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FingerprintError::InventoryCollection { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
