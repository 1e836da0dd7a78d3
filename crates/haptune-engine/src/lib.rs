//! HapTune Curve Engine
//!
//! This crate implements the numerical core of HapTune, a tool for sculpting
//! a one-dimensional amplitude curve by hand and deriving haptic vibration
//! waveforms from it.
//!
//! # Overview
//!
//! - **Point editing** - An ordered curve with add/move/delete and undo
//! - **Curve fitting** - Interpolating and smoothing cubic splines with a
//!   piecewise-linear fallback for short or degenerate curves
//! - **Resampling** - Density interpolation and stride downsampling
//! - **Vibration synthesis** - Sums of sine tones, normalized and modulated
//!   by the curve as an envelope
//! - **Spectral analysis** - One-sided DFT magnitude spectrum
//!
//! # Determinism
//!
//! All operations are deterministic. The same curve and configuration give
//! bit-identical signals, checked through a BLAKE3 content hash.
//!
//! # Example
//!
//! ```ignore
//! use haptune_engine::{EngineConfig, Point, Workbench};
//!
//! let mut bench = Workbench::new(EngineConfig::default())?;
//! bench.load(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0), Point::new(20.0, 0.0)]);
//! let signal = bench.generate_vibration()?;
//! println!("hash: {}", signal.content_hash());
//! ```
//!
//! # Crate Structure
//!
//! - [`point_set`] - Curve storage with undo history
//! - [`fitter`] - Spline and linear fits
//! - [`resample`] - Interpolation, downsampling and smoothing
//! - [`synthesis`] - Envelope-modulated multi-tone synthesis
//! - [`spectrum`] - Magnitude spectrum
//! - [`io`] - Brace CSV and workbook formats
//! - [`workbench`] - Editing session

pub mod axes;
pub mod config;
pub mod error;
pub mod fitter;
pub mod io;
pub mod point;
pub mod point_set;
pub mod resample;
pub mod spectrum;
pub mod synthesis;
pub mod workbench;

// Re-export main types at crate root
pub use axes::{tick_interval, AxisRange};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, ValidationError};
pub use fitter::{linspace, preview_curve, CubicSpline, CurveFit, FitKind};
pub use point::{Point, NEAR_DUPLICATE_TOLERANCE};
pub use point_set::PointSet;
pub use resample::{apply_smoothing, downsample, interpolate};
pub use spectrum::{magnitude_spectrum, Spectrum};
pub use synthesis::{
    synthesize, Envelope, FrequencyComponent, VibrationConfig, VibrationSignal,
    VibrationSynthesizer,
};
pub use workbench::Workbench;
