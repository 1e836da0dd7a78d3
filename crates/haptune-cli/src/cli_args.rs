//! CLI argument definitions for the HapTune command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use haptune_cli::commands::spectrum::DEFAULT_PEAKS;
use haptune_cli::settings::ConfigOverrides;

/// HapTune - Haptic curve resampling and vibration synthesis
#[derive(Parser)]
#[command(name = "haptune")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Resample a curve at a fixed number of points per x unit
    Interpolate {
        /// Path to the curve file (.csv/.txt brace CSV or .json workbook)
        #[arg(short, long)]
        input: String,

        /// Output file (.json workbook or .csv brace CSV)
        #[arg(short, long)]
        out: Option<String>,

        #[command(flatten)]
        config: ConfigOverrides,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Keep every n-th point of a curve
    Downsample {
        /// Path to the curve file (.csv/.txt brace CSV or .json workbook)
        #[arg(short, long)]
        input: String,

        /// Output file (.json workbook or .csv brace CSV)
        #[arg(short, long)]
        out: Option<String>,

        #[command(flatten)]
        config: ConfigOverrides,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Synthesize a vibration waveform using the curve as envelope
    Vibrate {
        /// Path to the curve file (.csv/.txt brace CSV or .json workbook)
        #[arg(short, long)]
        input: String,

        /// Output file (.json workbook or .csv table)
        #[arg(short, long)]
        out: Option<String>,

        /// Interpolate the curve before synthesis
        #[arg(long)]
        interpolate: bool,

        #[command(flatten)]
        config: ConfigOverrides,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Synthesize a vibration and report its magnitude spectrum
    Spectrum {
        /// Path to the curve file (.csv/.txt brace CSV or .json workbook)
        #[arg(short, long)]
        input: String,

        /// Output file (.json or .csv)
        #[arg(short, long)]
        out: Option<String>,

        /// Interpolate the curve before synthesis
        #[arg(long)]
        interpolate: bool,

        /// Number of strongest bins to report
        #[arg(long, default_value_t = DEFAULT_PEAKS)]
        peaks: usize,

        #[command(flatten)]
        config: ConfigOverrides,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report fit kind, axis ranges and near-duplicate points of a curve
    Inspect {
        /// Path to the curve file (.csv/.txt brace CSV or .json workbook)
        #[arg(short, long)]
        input: String,

        /// Write the dense preview curve to this file (.json or .csv)
        #[arg(long)]
        preview: Option<String>,

        #[command(flatten)]
        config: ConfigOverrides,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
