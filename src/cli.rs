use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::artifact::ErrorCorrection;
use crate::config::Config;
use crate::pipeline::CompactionStrategy;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "host-fingerprint")]
#[command(about = "Collect a host fingerprint and show it as a scannable QR code")]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args)]
pub struct GlobalOptions {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Payload encoding strategy
    #[arg(short, long, global = true, value_enum)]
    pub strategy: Option<CompactionStrategy>,

    /// QR error correction level
    #[arg(short, long, global = true, value_enum, ignore_case = true)]
    pub error_correction: Option<ErrorCorrection>,

    /// Minimum QR image width in pixels
    #[arg(short, long, global = true)]
    pub width: Option<u32>,

    /// Directory for the generated image (defaults to the system temp dir)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Do not open the image after generating it
    #[arg(long, global = true)]
    pub no_open: bool,
}

impl GlobalOptions {
    /// Command line flags take precedence over the config file.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(strategy) = self.strategy {
            cfg.strategy = strategy;
        }
        if let Some(level) = self.error_correction {
            cfg.error_correction = level;
        }
        if let Some(width) = self.width {
            cfg.width = width;
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = Some(dir.clone());
        }
        if self.no_open {
            cfg.open_artifact = false;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect the fingerprint and write it as a QR code (default)
    Generate,
    /// Print the fingerprint without encoding it
    Show {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Print the raw inventory the fingerprint is built from
    Inventory {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Decode a scanned payload back into a fingerprint
    Decode {
        /// Payload text as read from the QR code
        payload: String,
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}
