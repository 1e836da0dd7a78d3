//! Spectrum command implementation
//!
//! Synthesizes the vibration and reports its magnitude spectrum.

use anyhow::{Context, Result};
use colored::Colorize;
use haptune_engine::Spectrum;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{SpectralPeak, SpectrumResult};
use super::reporting::{self, open_session, Session};
use super::vibrate::prepare_source;
use crate::output;
use crate::settings::ConfigOverrides;

/// Default number of peaks reported.
pub const DEFAULT_PEAKS: usize = 5;

/// Run the spectrum command
///
/// # Arguments
/// * `input` - Path to the curve file
/// * `out` - Optional output path (`.json` or `.csv`)
/// * `interpolate` - Interpolate the curve before synthesis
/// * `peaks` - Number of strongest bins to report
/// * `overrides` - Config file and flag overrides
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    out: Option<&str>,
    interpolate: bool,
    peaks: usize,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        return reporting::emit_json(
            "spectrum",
            input,
            execute(input, out, interpolate, peaks, overrides),
        );
    }

    let start = Instant::now();
    let result = execute(input, out, interpolate, peaks, overrides)?;

    reporting::print_header("Analyzing", input, &result.source);
    println!(
        "{} {} bins from {} samples (Nyquist {} Hz)",
        "Spectrum:".dimmed(),
        result.bins,
        result.samples,
        result.nyquist
    );
    match result.dominant_frequency {
        Some(f) => println!("{} {:.2} Hz", "Dominant:".dimmed(), f),
        None => println!("{} {}", "Dominant:".dimmed(), "n/a".yellow()),
    }
    if !result.peaks.is_empty() {
        println!("\n{}", "Peaks:".cyan().bold());
        for peak in &result.peaks {
            println!("  {:>10.2} Hz  {:.4}", peak.frequency, peak.magnitude);
        }
    }
    if let Some(path) = &result.output {
        println!("\n{} {}", "Written to:".dimmed(), path);
    }

    reporting::print_success("Spectrum computed", start.elapsed().as_millis() as u64);
    Ok(ExitCode::SUCCESS)
}

/// The `count` strongest bins, DC excluded, strongest first. Ties keep
/// ascending frequency order.
pub fn strongest_bins(spectrum: &Spectrum, count: usize) -> Vec<SpectralPeak> {
    let mut bins: Vec<SpectralPeak> = spectrum
        .frequencies
        .iter()
        .zip(&spectrum.magnitudes)
        .skip(1)
        .map(|(&frequency, &magnitude)| SpectralPeak {
            frequency,
            magnitude,
        })
        .collect();
    bins.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    bins.truncate(count);
    bins
}

fn execute(
    input: &str,
    out: Option<&str>,
    interpolate: bool,
    peaks: usize,
    overrides: &ConfigOverrides,
) -> Result<SpectrumResult> {
    let Session { mut bench, source } = open_session(input, overrides)?;
    prepare_source(&mut bench, interpolate)?;

    let samples = bench.generate_vibration()?.len();
    let sampling_rate = bench.config().sampling_rate;
    let spectrum = bench
        .spectrum()
        .context("No vibration available for spectral analysis")?;

    if let Some(path) = out {
        output::write_spectrum(Path::new(path), &spectrum)?;
    }

    Ok(SpectrumResult {
        source,
        samples,
        bins: spectrum.len(),
        nyquist: Spectrum::nyquist(sampling_rate),
        dominant_frequency: spectrum.dominant_frequency(),
        peaks: strongest_bins(&spectrum, peaks),
        output: out.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strongest_bins() {
        let spectrum = Spectrum {
            frequencies: vec![0.0, 1.0, 2.0, 3.0, 4.0],
            magnitudes: vec![9.0, 0.5, 2.0, 0.5, 1.0],
        };
        let peaks = strongest_bins(&spectrum, 3);
        let freqs: Vec<f64> = peaks.iter().map(|p| p.frequency).collect();
        assert_eq!(freqs, vec![2.0, 4.0, 1.0]);
        assert!(strongest_bins(&Spectrum::default(), 3).is_empty());
    }
}
