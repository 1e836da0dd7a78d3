//! Magnitude spectrum of a synthesized vibration.

use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

/// One-sided magnitude spectrum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Bin frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Bin magnitudes, scaled so a unit sine reads 1.0.
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns true if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of the strongest bin, DC excluded.
    pub fn dominant_frequency(&self) -> Option<f64> {
        if self.len() < 2 {
            return None;
        }
        let mut best = 1;
        for (i, &magnitude) in self.magnitudes.iter().enumerate().skip(2) {
            if magnitude > self.magnitudes[best] {
                best = i;
            }
        }
        Some(self.frequencies[best])
    }

    /// Half the sampling rate, the upper bound of the plotted range.
    pub fn nyquist(sampling_rate: u32) -> f64 {
        f64::from(sampling_rate) / 2.0
    }
}

/// Computes the one-sided DFT magnitude spectrum of `samples`.
///
/// Keeps the first `N / 2` bins. Bin `k` sits at `k * sampling_rate / N`
/// with magnitude `2 / N * |X_k|`. Empty input gives an empty spectrum.
pub fn magnitude_spectrum(samples: &[f64], sampling_rate: u32) -> Spectrum {
    let n = samples.len();
    if n == 0 {
        return Spectrum::default();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    let half = n / 2;
    let freq_resolution = f64::from(sampling_rate) / n as f64;
    let scale = 2.0 / n as f64;

    let frequencies = (0..half).map(|k| k as f64 * freq_resolution).collect();
    let magnitudes = buffer.iter().take(half).map(|c| c.norm() * scale).collect();

    log::debug!("computed {} spectrum bins at {:.3} Hz resolution", half, freq_resolution);

    Spectrum {
        frequencies,
        magnitudes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(frequency: f64, amplitude: f64, n: usize, rate: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * frequency * i as f64 / rate).sin())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let spectrum = magnitude_spectrum(&[], 1000);
        assert!(spectrum.is_empty());
        assert_eq!(spectrum.dominant_frequency(), None);
    }

    #[test]
    fn test_bin_count_and_nyquist_bound() {
        for n in [1, 2, 7, 400, 1001] {
            let samples = tone(50.0, 1.0, n, 1000.0);
            let spectrum = magnitude_spectrum(&samples, 1000);
            assert_eq!(spectrum.len(), n / 2);
            assert_eq!(spectrum.magnitudes.len(), n / 2);
            if let Some(&last) = spectrum.frequencies.last() {
                assert!(last < Spectrum::nyquist(1000));
            }
        }
    }

    #[test]
    fn test_pure_tone_peak() {
        let samples = tone(100.0, 1.0, 1000, 1000.0);
        let spectrum = magnitude_spectrum(&samples, 1000);
        assert_eq!(spectrum.dominant_frequency(), Some(100.0));
        assert!((spectrum.magnitudes[100] - 1.0).abs() < 1e-9);
        assert!(spectrum.magnitudes[99] < 1e-9);
    }

    #[test]
    fn test_two_tones() {
        let a = tone(120.0, 0.5, 2000, 2000.0);
        let b = tone(300.0, 1.5, 2000, 2000.0);
        let samples: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
        let spectrum = magnitude_spectrum(&samples, 2000);
        assert!((spectrum.magnitudes[120] - 0.5).abs() < 1e-9);
        assert!((spectrum.magnitudes[300] - 1.5).abs() < 1e-9);
        assert_eq!(spectrum.dominant_frequency(), Some(300.0));
    }

    #[test]
    fn test_dc_is_not_dominant() {
        let samples: Vec<f64> = tone(25.0, 0.1, 200, 1000.0)
            .into_iter()
            .map(|s| s + 3.0)
            .collect();
        let spectrum = magnitude_spectrum(&samples, 1000);
        assert!(spectrum.magnitudes[0] > spectrum.magnitudes[5]);
        assert_eq!(spectrum.dominant_frequency(), Some(25.0));
    }

    #[test]
    fn test_nyquist() {
        assert_eq!(Spectrum::nyquist(1000), 500.0);
        assert_eq!(Spectrum::nyquist(1), 0.5);
    }
}
