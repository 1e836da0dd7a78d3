//! Vibration synthesis.
//!
//! A vibration is a sum of sine tones, normalized to unit peak and modulated
//! by an envelope evaluated from the curve.

mod oscillator;
mod synthesizer;
mod types;


pub use oscillator::{compose_oscillator, normalize_peak};
pub use synthesizer::{build_envelope, synthesize, VibrationSynthesizer, ENVELOPE_PREVIEW_RESOLUTION};
pub use types::{Envelope, FrequencyComponent, Synthesis, VibrationConfig, VibrationSignal};
