//! Engine configuration.
//!
//! `EngineConfig` replaces the settings dialogs of an interactive front end.
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::synthesis::{FrequencyComponent, VibrationConfig};

/// Default sampling rate in samples per 1000 x units.
pub const DEFAULT_SAMPLING_RATE: u32 = 1000;
/// Default interpolation density.
pub const DEFAULT_POINTS_PER_UNIT: u32 = 10;
/// Default downsample stride.
pub const DEFAULT_DOWNSAMPLE_STRIDE: u32 = 20;

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Synthesis sampling rate (1-50000).
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: u32,
    /// Gain applied to the normalized vibration (0.0-10.0).
    #[serde(default = "default_amplitude_scale")]
    pub global_amplitude_scale: f64,
    /// Tones summed by synthesis. Frequencies are whole Hz (1-10000),
    /// amplitudes 0.0-10.0.
    #[serde(default = "default_frequency_components")]
    pub frequency_components: Vec<FrequencyComponent>,
    /// Smoothing factor for the curve spline (>= 0, 0 interpolates).
    #[serde(default)]
    pub smoothing_factor: f64,
    /// Interpolated points per x unit (1-100).
    #[serde(default = "default_points_per_unit")]
    pub points_per_unit: u32,
    /// Keep every n-th original point when downsampling (1-100).
    #[serde(default = "default_downsample_stride")]
    pub downsample_stride: u32,
}

fn default_sampling_rate() -> u32 {
    DEFAULT_SAMPLING_RATE
}

fn default_amplitude_scale() -> f64 {
    1.0
}

fn default_frequency_components() -> Vec<FrequencyComponent> {
    vec![FrequencyComponent::new(100.0, 1.0)]
}

fn default_points_per_unit() -> u32 {
    DEFAULT_POINTS_PER_UNIT
}

fn default_downsample_stride() -> u32 {
    DEFAULT_DOWNSAMPLE_STRIDE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sampling_rate: default_sampling_rate(),
            global_amplitude_scale: default_amplitude_scale(),
            frequency_components: default_frequency_components(),
            smoothing_factor: 0.0,
            points_per_unit: default_points_per_unit(),
            downsample_stride: default_downsample_stride(),
        }
    }
}

impl EngineConfig {
    /// Parses a config from JSON and validates it.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::import_format(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::import_format(format!("cannot serialize config: {}", e)))
    }

    /// Checks every range, reporting the first violation.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=50_000).contains(&self.sampling_rate) {
            return Err(EngineError::invalid_param(
                "sampling_rate",
                format!("must be 1-50000, got {}", self.sampling_rate),
            ));
        }
        if !(0.0..=10.0).contains(&self.global_amplitude_scale) {
            return Err(EngineError::invalid_param(
                "global_amplitude_scale",
                format!("must be 0.0-10.0, got {}", self.global_amplitude_scale),
            ));
        }
        for (i, component) in self.frequency_components.iter().enumerate() {
            let frequency = component.frequency;
            if !(1.0..=10_000.0).contains(&frequency) || frequency.fract() != 0.0 {
                return Err(EngineError::invalid_param(
                    format!("frequency_components[{}].frequency", i),
                    format!("must be a whole number 1-10000 Hz, got {}", frequency),
                ));
            }
            if !(0.0..=10.0).contains(&component.amplitude) {
                return Err(EngineError::invalid_param(
                    format!("frequency_components[{}].amplitude", i),
                    format!("must be 0.0-10.0, got {}", component.amplitude),
                ));
            }
        }
        if !(self.smoothing_factor >= 0.0 && self.smoothing_factor.is_finite()) {
            return Err(EngineError::invalid_param(
                "smoothing_factor",
                format!("must be a finite value >= 0, got {}", self.smoothing_factor),
            ));
        }
        if !(1..=100).contains(&self.points_per_unit) {
            return Err(EngineError::invalid_param(
                "points_per_unit",
                format!("must be 1-100, got {}", self.points_per_unit),
            ));
        }
        if !(1..=100).contains(&self.downsample_stride) {
            return Err(EngineError::invalid_param(
                "downsample_stride",
                format!("must be 1-100, got {}", self.downsample_stride),
            ));
        }
        Ok(())
    }

    /// Synthesis parameters derived from this config.
    pub fn vibration_config(&self) -> VibrationConfig {
        VibrationConfig {
            sampling_rate: self.sampling_rate,
            global_amplitude_scale: self.global_amplitude_scale,
            components: self.frequency_components.clone(),
        }
    }
}
