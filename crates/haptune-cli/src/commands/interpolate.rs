//! Interpolate command implementation
//!
//! Resamples the curve at the configured density, optionally through a
//! smoothing spline, and writes the result.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::InterpolateResult;
use super::reporting::{self, open_session, Session};
use crate::output;
use crate::settings::ConfigOverrides;

/// Run the interpolate command
///
/// # Arguments
/// * `input` - Path to the curve file
/// * `out` - Optional output path (`.json` workbook or `.csv` brace CSV)
/// * `overrides` - Config file and flag overrides
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    out: Option<&str>,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        return reporting::emit_json("interpolate", input, execute(input, out, overrides));
    }

    let start = Instant::now();
    let result = execute(input, out, overrides)?;

    reporting::print_header("Interpolating", input, &result.source);
    if result.smoothing_factor > 0.0 {
        println!("{} {}", "Smoothing:".dimmed(), result.smoothing_factor);
    }
    println!(
        "{} {} points ({} per unit)",
        "Interpolated:".dimmed(),
        result.output_points,
        result.points_per_unit
    );
    if let Some(path) = &result.output {
        println!("{} {}", "Written to:".dimmed(), path);
    }

    reporting::print_success(
        "Curve interpolated",
        start.elapsed().as_millis() as u64,
    );
    Ok(ExitCode::SUCCESS)
}

fn execute(
    input: &str,
    out: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<InterpolateResult> {
    let Session { mut bench, source } = open_session(input, overrides)?;

    if bench.config().smoothing_factor > 0.0 {
        bench.apply_smoothing()?;
    }
    let output_points = bench.interpolate()?;

    if let Some(path) = out {
        output::write_curve(Path::new(path), &bench)?;
    }

    Ok(InterpolateResult {
        source,
        output_points,
        points_per_unit: bench.config().points_per_unit,
        smoothing_factor: bench.config().smoothing_factor,
        output: out.map(str::to_string),
    })
}
