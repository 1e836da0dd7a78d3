//! Envelope-modulated multi-tone vibration synthesis.

use super::oscillator::{compose_oscillator, normalize_peak};
use super::types::{Envelope, Synthesis, VibrationConfig, VibrationSignal};
use crate::error::{EngineError, EngineResult, ValidationError};
use crate::fitter::{linspace, CurveFit};
use crate::point::{x_bounds, Point};

/// Grid size of an envelope prepared without synthesis.
pub const ENVELOPE_PREVIEW_RESOLUTION: usize = 1000;

/// Evaluates the exact fit of `source` on `n` evenly spaced points over its
/// x range.
pub fn build_envelope(source: &[Point], n: usize) -> EngineResult<Envelope> {
    if source.len() < 2 {
        return Err(ValidationError::InsufficientPoints {
            required: 2,
            found: source.len(),
        }
        .into());
    }
    let (min_x, max_x) = x_bounds(source).unwrap_or((0.0, 0.0));
    let fit = CurveFit::fit(source, 0.0)?;
    let x = linspace(min_x, max_x, n);
    let y = fit.evaluate_many(&x);
    Ok(Envelope { x, y })
}

/// Synthesizes the vibration for `source` from scratch.
///
/// The grid has `round(span * sampling_rate / 1000)` samples over the x range
/// of `source`. The summed tones are normalized to unit peak (skipped when
/// silent), then multiplied by the envelope and the global amplitude scale.
pub fn synthesize(source: &[Point], config: &VibrationConfig) -> EngineResult<Synthesis> {
    if config.sampling_rate == 0 {
        return Err(EngineError::invalid_param(
            "sampling_rate",
            "must be at least 1",
        ));
    }
    let tones = config.enabled_tones();
    if tones.is_empty() {
        return Err(ValidationError::NoEnabledTones.into());
    }
    if source.len() < 2 {
        return Err(ValidationError::InsufficientPoints {
            required: 2,
            found: source.len(),
        }
        .into());
    }

    let (min_x, max_x) = x_bounds(source).unwrap_or((0.0, 0.0));
    let span = max_x - min_x;
    let sampling_rate = f64::from(config.sampling_rate);
    let n = (span * sampling_rate / 1000.0).round() as usize;
    if n == 0 {
        return Err(ValidationError::EmptyGrid {
            span,
            sampling_rate: config.sampling_rate,
        }
        .into());
    }

    let envelope = build_envelope(source, n)?;
    let mut oscillator = compose_oscillator(&envelope.x, &tones, sampling_rate);
    let peak = normalize_peak(&mut oscillator);

    let amplitude: Vec<f64> = envelope
        .y
        .iter()
        .zip(&oscillator)
        .map(|(env, osc)| env * osc * config.global_amplitude_scale)
        .collect();

    log::debug!(
        "synthesized {} samples from {} tones (oscillator peak {:.4})",
        n,
        tones.len(),
        peak
    );

    let signal = VibrationSignal {
        x: envelope.x.clone(),
        amplitude,
        sampling_rate: config.sampling_rate,
    };
    Ok(Synthesis { envelope, signal })
}

/// Holds the envelope and vibration of the latest request.
///
/// Both caches are replaced wholesale by every synthesis and must be
/// invalidated by the owner whenever the source curve changes.
#[derive(Debug, Clone, Default)]
pub struct VibrationSynthesizer {
    envelope: Option<Envelope>,
    signal: Option<VibrationSignal>,
}

impl VibrationSynthesizer {
    /// Creates an empty synthesizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesizes and caches the envelope and signal.
    ///
    /// On failure the previous caches are left as they were.
    pub fn generate(
        &mut self,
        source: &[Point],
        config: &VibrationConfig,
    ) -> EngineResult<&VibrationSignal> {
        let Synthesis { envelope, signal } = synthesize(source, config)?;
        self.envelope = Some(envelope);
        Ok(&*self.signal.insert(signal))
    }

    /// Computes and caches an envelope on the preview grid without
    /// synthesizing vibration.
    pub fn prepare_envelope(&mut self, source: &[Point]) -> EngineResult<&Envelope> {
        let envelope = build_envelope(source, ENVELOPE_PREVIEW_RESOLUTION)?;
        Ok(&*self.envelope.insert(envelope))
    }

    /// Cached envelope.
    pub fn envelope(&self) -> Option<&Envelope> {
        self.envelope.as_ref()
    }

    /// Cached vibration signal.
    pub fn signal(&self) -> Option<&VibrationSignal> {
        self.signal.as_ref()
    }

    /// Drops the cached envelope.
    pub fn clear_envelope(&mut self) {
        self.envelope = None;
    }

    /// Drops the cached vibration signal.
    pub fn clear_signal(&mut self) {
        self.signal = None;
    }

    /// Drops both caches.
    pub fn invalidate(&mut self) {
        self.envelope = None;
        self.signal = None;
    }
}
