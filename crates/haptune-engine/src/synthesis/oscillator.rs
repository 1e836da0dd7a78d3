//! Sine tone summation and peak normalization.

use std::f64::consts::PI;

/// Sums `amplitude * sin(2π * frequency * x / sampling_rate)` over `tones`
/// at every grid position.
///
/// An empty tone list yields all zeros.
pub fn compose_oscillator(grid: &[f64], tones: &[(f64, f64)], sampling_rate: f64) -> Vec<f64> {
    let mut composite = vec![0.0; grid.len()];
    for &(frequency, amplitude) in tones {
        let omega = 2.0 * PI * frequency / sampling_rate;
        for (sample, &x) in composite.iter_mut().zip(grid) {
            *sample += amplitude * (omega * x).sin();
        }
    }
    composite
}

/// Scales `samples` so the peak absolute value is 1.0.
///
/// Silent input stays silent (no division by zero). Returns the peak found
/// before scaling.
pub fn normalize_peak(samples: &mut [f64]) -> f64 {
    let peak = samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f64, |a, b| a.max(b));

    if peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= peak;
        }
    }
    peak
}
