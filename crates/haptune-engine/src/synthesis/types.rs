//! Synthesis parameter and result types.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// One sine tone of the vibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyComponent {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Relative amplitude before normalization.
    pub amplitude: f64,
    /// Disabled components are ignored by synthesis.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl FrequencyComponent {
    /// Creates an enabled component.
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
            enabled: true,
        }
    }

    /// Returns a disabled copy.
    pub fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }
}

/// Everything synthesis needs besides the envelope source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationConfig {
    /// Samples per 1000 x units of the curve.
    pub sampling_rate: u32,
    /// Final gain applied after normalization.
    pub global_amplitude_scale: f64,
    /// Tones to sum.
    pub components: Vec<FrequencyComponent>,
}

impl Default for VibrationConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 1000,
            global_amplitude_scale: 1.0,
            components: vec![FrequencyComponent::new(100.0, 1.0)],
        }
    }
}

impl VibrationConfig {
    /// A single enabled tone of unit amplitude.
    pub fn single_tone(frequency: f64) -> Self {
        Self {
            components: vec![FrequencyComponent::new(frequency, 1.0)],
            ..Self::default()
        }
    }

    /// Sets the sampling rate.
    pub fn with_sampling_rate(mut self, sampling_rate: u32) -> Self {
        self.sampling_rate = sampling_rate;
        self
    }

    /// Sets the global amplitude scale.
    pub fn with_amplitude_scale(mut self, scale: f64) -> Self {
        self.global_amplitude_scale = scale;
        self
    }

    /// Appends a component.
    pub fn with_component(mut self, component: FrequencyComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Enabled components as `(frequency, amplitude)` pairs.
    pub fn enabled_tones(&self) -> Vec<(f64, f64)> {
        self.components
            .iter()
            .filter(|c| c.enabled)
            .map(|c| (c.frequency, c.amplitude))
            .collect()
    }
}

/// Dense envelope evaluated on a fixed grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Grid abscissae.
    pub x: Vec<f64>,
    /// Envelope values.
    pub y: Vec<f64>,
}

impl Envelope {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the envelope has no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Mirror image used to draw the lower half of the envelope.
    pub fn lower(&self) -> Vec<f64> {
        self.y.iter().map(|y| -y).collect()
    }

    /// Envelope as points.
    pub fn points(&self) -> Vec<Point> {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }
}

/// Synthesized vibration waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct VibrationSignal {
    /// Sample abscissae, same domain as the envelope.
    pub x: Vec<f64>,
    /// Sample amplitudes.
    pub amplitude: Vec<f64>,
    /// Sampling rate the signal was synthesized at.
    pub sampling_rate: u32,
}

impl VibrationSignal {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.amplitude.len()
    }

    /// Returns true if the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.amplitude.is_empty()
    }

    /// Largest absolute amplitude.
    pub fn peak(&self) -> f64 {
        self.amplitude
            .iter()
            .map(|s| s.abs())
            .fold(0.0_f64, |a, b| a.max(b))
    }

    /// Samples as points.
    pub fn points(&self) -> Vec<Point> {
        self.x
            .iter()
            .zip(&self.amplitude)
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }

    /// BLAKE3 hash of the sample bits, for determinism checks.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (x, y) in self.x.iter().zip(&self.amplitude) {
            hasher.update(&x.to_le_bytes());
            hasher.update(&y.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Envelope and signal produced by one synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    /// Envelope on the synthesis grid.
    pub envelope: Envelope,
    /// Final vibration signal.
    pub signal: VibrationSignal,
}
