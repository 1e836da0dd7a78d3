//! Vibrate command implementation
//!
//! Synthesizes the envelope-modulated vibration for a curve.

use anyhow::Result;
use colored::Colorize;
use haptune_engine::Workbench;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::VibrateResult;
use super::reporting::{self, open_session, Session};
use crate::output;
use crate::settings::ConfigOverrides;

/// Run the vibrate command
///
/// # Arguments
/// * `input` - Path to the curve file
/// * `out` - Optional output path (`.json` workbook or `.csv` table)
/// * `interpolate` - Interpolate the curve before synthesis
/// * `overrides` - Config file and flag overrides
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    out: Option<&str>,
    interpolate: bool,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        return reporting::emit_json(
            "vibrate",
            input,
            execute(input, out, interpolate, overrides),
        );
    }

    let start = Instant::now();
    let result = execute(input, out, interpolate, overrides)?;

    reporting::print_header("Synthesizing", input, &result.source);
    if result.interpolated {
        println!("{} yes", "Interpolated:".dimmed());
    }
    for tone in &result.tones {
        let state = if tone.enabled {
            "on".green()
        } else {
            "off".dimmed()
        };
        println!(
            "  {} {} Hz x {} [{}]",
            "tone".dimmed(),
            tone.frequency,
            tone.amplitude,
            state
        );
    }
    println!(
        "{} {} at {} per 1000 units",
        "Samples:".dimmed(),
        result.samples,
        result.sampling_rate
    );
    println!("{} {:.4}", "Peak:".dimmed(), result.peak);
    println!("{} {}", "Hash:".dimmed(), &result.content_hash[..16]);
    if let Some(path) = &result.output {
        println!("{} {}", "Written to:".dimmed(), path);
    }

    reporting::print_success("Vibration synthesized", start.elapsed().as_millis() as u64);
    Ok(ExitCode::SUCCESS)
}

/// Smooths and interpolates the curve when requested, so synthesis reads
/// the interpolated curve.
pub(crate) fn prepare_source(bench: &mut Workbench, interpolate: bool) -> Result<()> {
    if !interpolate {
        return Ok(());
    }
    if bench.config().smoothing_factor > 0.0 {
        bench.apply_smoothing()?;
    }
    bench.interpolate()?;
    Ok(())
}

fn execute(
    input: &str,
    out: Option<&str>,
    interpolate: bool,
    overrides: &ConfigOverrides,
) -> Result<VibrateResult> {
    let Session { mut bench, source } = open_session(input, overrides)?;
    prepare_source(&mut bench, interpolate)?;

    let tones = bench.config().frequency_components.clone();
    let signal = bench.generate_vibration()?;
    if let Some(path) = out {
        output::write_vibration(Path::new(path), signal)?;
    }

    Ok(VibrateResult {
        source,
        interpolated: interpolate,
        samples: signal.len(),
        sampling_rate: signal.sampling_rate,
        peak: signal.peak(),
        content_hash: signal.content_hash(),
        tones,
        output: out.map(str::to_string),
    })
}
