use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::artifact::opener::ArtifactOpener;
use crate::artifact::renderer::{BarcodeRenderer, ErrorCorrection, RenderError, RenderOptions};
use crate::error::FingerprintError;

const FILE_PREFIX: &str = "system-info-qr";

/// A rendered barcode on disk.
#[derive(Debug)]
pub struct Artifact {
    pub path: PathBuf,
    /// Why the viewer could not be launched, when it could not.
    pub open_failure: Option<FingerprintError>,
}

/// Renders payloads to uniquely named image files and shows them.
pub struct ArtifactEmitter<R, O> {
    dir: PathBuf,
    renderer: R,
    opener: Option<O>,
}

impl<R: BarcodeRenderer, O: ArtifactOpener> ArtifactEmitter<R, O> {
    /// `opener` of `None` writes the file without launching a viewer.
    pub fn new(dir: impl Into<PathBuf>, renderer: R, opener: Option<O>) -> Self {
        Self {
            dir: dir.into(),
            renderer,
            opener,
        }
    }

    pub fn artifact_path(&self, generated_at: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(format!("{}-{}.png", FILE_PREFIX, generated_at.timestamp_millis()))
    }

    /// Render `payload` and write it under the emitter's directory.
    /// Nothing is written unless rendering succeeded; viewer failures are
    /// reported on the artifact, never as an error.
    pub fn emit(
        &self,
        payload: &str,
        error_correction: ErrorCorrection,
        width: u32,
        generated_at: DateTime<Utc>,
    ) -> Result<Artifact, FingerprintError> {
        let options = RenderOptions {
            error_correction,
            width,
        };

        let image = self
            .renderer
            .render(payload, &options)
            .map_err(|err| match err {
                RenderError::CapacityExceeded => FingerprintError::PayloadTooLarge {
                    payload_len: payload.len(),
                    level: error_correction,
                },
                RenderError::Failed(reason) => FingerprintError::Render(reason),
            })?;

        let path = self.artifact_path(generated_at);
        write_artifact(&path, &image)?;
        info!(path = %path.display(), bytes = image.len(), "QR code written");

        let open_failure = match &self.opener {
            Some(opener) => opener.open(&path).err(),
            None => None,
        };
        if let Some(err) = &open_failure {
            warn!(error = %err, "could not open QR code automatically");
        }

        Ok(Artifact { path, open_failure })
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), FingerprintError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FingerprintError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| FingerprintError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::renderer::QrRenderer;
    use chrono::TimeZone;
    use std::cell::RefCell;

    struct OverCapacity;

    impl BarcodeRenderer for OverCapacity {
        fn render(&self, _text: &str, _options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::CapacityExceeded)
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        fail: bool,
        opened: RefCell<Vec<PathBuf>>,
    }

    impl ArtifactOpener for RecordingOpener {
        fn open(&self, path: &Path) -> Result<(), FingerprintError> {
            self.opened.borrow_mut().push(path.to_path_buf());
            if self.fail {
                return Err(FingerprintError::UnsupportedPlatform("plan9".to_string()));
            }
            Ok(())
        }
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_emit_writes_and_opens() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = ArtifactEmitter::new(dir.path(), QrRenderer, Some(RecordingOpener::default()));

        let artifact = emitter
            .emit("G6EAIBwHdg==", ErrorCorrection::L, 200, at(1_700_000_000_123))
            .unwrap();

        assert_eq!(artifact.path, dir.path().join("system-info-qr-1700000000123.png"));
        assert!(artifact.path.exists());
        assert!(artifact.open_failure.is_none());
        let opener = emitter.opener.as_ref().unwrap();
        assert_eq!(opener.opened.borrow().as_slice(), &[artifact.path.clone()]);
    }

    #[test]
    fn test_distinct_timestamps_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let emitter: ArtifactEmitter<QrRenderer, RecordingOpener> =
            ArtifactEmitter::new(dir.path(), QrRenderer, None);

        let first = emitter.emit("one", ErrorCorrection::L, 100, at(1)).unwrap();
        let second = emitter.emit("one", ErrorCorrection::L, 100, at(2)).unwrap();
        assert_ne!(first.path, second.path);
        assert!(first.path.exists() && second.path.exists());
    }

    #[test]
    fn test_capacity_exceeded_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = ArtifactEmitter::new(dir.path(), OverCapacity, Some(RecordingOpener::default()));

        let err = emitter
            .emit("payload", ErrorCorrection::L, 500, at(42))
            .unwrap_err();

        assert!(matches!(
            err,
            FingerprintError::PayloadTooLarge { payload_len: 7, level: ErrorCorrection::L }
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(emitter.opener.as_ref().unwrap().opened.borrow().is_empty());
    }

    #[test]
    fn test_open_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let opener = RecordingOpener { fail: true, ..Default::default() };
        let emitter = ArtifactEmitter::new(dir.path(), QrRenderer, Some(opener));

        let artifact = emitter.emit("payload", ErrorCorrection::L, 100, at(7)).unwrap();

        assert!(artifact.path.exists());
        assert!(matches!(
            artifact.open_failure,
            Some(FingerprintError::UnsupportedPlatform(_))
        ));
    }
}
