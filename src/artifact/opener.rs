use std::path::Path;
use std::process::Command;

use crate::error::FingerprintError;

/// Hands a file to the desktop so the operator can look at it.
pub trait ArtifactOpener {
    fn open(&self, path: &Path) -> Result<(), FingerprintError>;
}

/// Opens files with the host's default application.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl ArtifactOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), FingerprintError> {
        let platform = std::env::consts::OS;
        let (program, args) = open_command(platform, path)
            .ok_or_else(|| FingerprintError::UnsupportedPlatform(platform.to_string()))?;

        let status = Command::new(program)
            .args(&args)
            .status()
            .map_err(|err| FingerprintError::ArtifactOpen {
                path: path.to_path_buf(),
                reason: format!("{}: {}", program, err),
            })?;

        if !status.success() {
            return Err(FingerprintError::ArtifactOpen {
                path: path.to_path_buf(),
                reason: format!("{} exited with {}", program, status),
            });
        }
        Ok(())
    }
}

fn open_command(platform: &str, path: &Path) -> Option<(&'static str, Vec<String>)> {
    let target = path.display().to_string();
    match platform {
        "macos" => Some(("open", vec![target])),
        "windows" => Some((
            "cmd",
            vec!["/C".to_string(), "start".to_string(), String::new(), target],
        )),
        "linux" | "freebsd" | "openbsd" | "netbsd" => Some(("xdg-open", vec![target])),
        _ => None,
    }
}
