// QR code rendering, artifact files and the desktop viewer hand-off
pub mod renderer;
pub mod opener;
pub mod emitter;

pub use emitter::{Artifact, ArtifactEmitter};
pub use opener::{ArtifactOpener, SystemOpener};
pub use renderer::{BarcodeRenderer, ErrorCorrection, QrRenderer};
