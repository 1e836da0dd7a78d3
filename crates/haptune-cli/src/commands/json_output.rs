//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json` and prints one [`CommandOutput`] document
//! to stdout instead of colored text.

use haptune_engine::{AxisRange, EngineError, FrequencyComponent};
use serde::{Deserialize, Serialize};

use crate::input::{CurveFormat, InputError};

/// Error codes for CLI operations.
///
/// Engine errors pass through their own `HAPTUNE_XXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// Any other failure (config parsing, output writing)
    pub const COMMAND_FAILED: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "HAPTUNE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Engine error category (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            category: None,
        }
    }

    /// Maps an error chain to its most specific code.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        for cause in err.chain() {
            if let Some(engine) = cause.downcast_ref::<EngineError>() {
                return Self {
                    code: engine.code().to_string(),
                    message,
                    category: Some(engine.category().to_string()),
                };
            }
            if let Some(input) = cause.downcast_ref::<InputError>() {
                let category = match input {
                    InputError::Parse(e) => Some(e.category().to_string()),
                    _ => None,
                };
                return Self {
                    code: input.code().to_string(),
                    message,
                    category,
                };
            }
        }
        Self::new(error_codes::COMMAND_FAILED, message)
    }
}

/// Top-level JSON document printed by every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded.
    pub success: bool,
    /// Command name.
    pub command: String,
    /// Input curve path.
    pub input: String,
    /// Command result (on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// Errors (on failure).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl<T> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(command: &str, input: &str, result: T) -> Self {
        Self {
            success: true,
            command: command.to_string(),
            input: input.to_string(),
            result: Some(result),
            errors: Vec::new(),
        }
    }

    /// Creates a failed output.
    pub fn failure(command: &str, input: &str, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            command: command.to_string(),
            input: input.to_string(),
            result: None,
            errors,
        }
    }
}

/// Where the curve came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceInfo {
    /// Detected file format.
    pub format: CurveFormat,
    /// BLAKE3 hash of the file content.
    pub source_hash: String,
    /// Number of points loaded.
    pub points: usize,
}

/// Result of `haptune interpolate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterpolateResult {
    pub source: SourceInfo,
    /// Points produced.
    pub output_points: usize,
    pub points_per_unit: u32,
    pub smoothing_factor: f64,
    /// Output file (if written).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Result of `haptune downsample`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownsampleResult {
    pub source: SourceInfo,
    pub stride: u32,
    /// Points kept.
    pub kept_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Result of `haptune vibrate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VibrateResult {
    pub source: SourceInfo,
    /// Whether the curve was interpolated before synthesis.
    pub interpolated: bool,
    pub samples: usize,
    pub sampling_rate: u32,
    /// Largest absolute amplitude.
    pub peak: f64,
    /// BLAKE3 hash of the signal samples.
    pub content_hash: String,
    pub tones: Vec<FrequencyComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// One strong spectrum bin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpectralPeak {
    pub frequency: f64,
    pub magnitude: f64,
}

/// Result of `haptune spectrum`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpectrumResult {
    pub source: SourceInfo,
    pub samples: usize,
    pub bins: usize,
    pub nyquist: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_frequency: Option<f64>,
    /// Strongest bins, DC excluded, by descending magnitude.
    pub peaks: Vec<SpectralPeak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Result of `haptune inspect`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectResult {
    pub source: SourceInfo,
    /// Estimator the curve would be fitted with.
    pub fit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axes: Option<AxisRange>,
    /// Index pairs of points with nearly equal x.
    pub near_duplicates: Vec<(usize, usize)>,
}
