//! Inspect command implementation
//!
//! Reports how a curve would be fitted, its plot axes and any points with
//! nearly equal x. Optionally writes the dense preview curve.

use anyhow::Result;
use colored::Colorize;
use haptune_engine::{CurveFit, FitKind, NEAR_DUPLICATE_TOLERANCE};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::InspectResult;
use super::reporting::{self, open_session, Session};
use crate::output;
use crate::settings::ConfigOverrides;

/// Sheet name used when the preview is written as a workbook.
const PREVIEW_SHEET: &str = "Preview";

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the curve file
/// * `preview_out` - Optional path for the dense preview curve
/// * `overrides` - Config file and flag overrides
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    preview_out: Option<&str>,
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        return reporting::emit_json("inspect", input, execute(input, preview_out, overrides));
    }

    let start = Instant::now();
    let result = execute(input, preview_out, overrides)?;

    reporting::print_header("Inspecting", input, &result.source);
    println!("{} {}", "Fit:".dimmed(), result.fit);
    if let Some(axes) = &result.axes {
        println!(
            "{} x [{}, {}] step {}, y [{}, {}] step {}",
            "Axes:".dimmed(),
            axes.x_min,
            axes.x_max,
            axes.x_tick,
            axes.y_min,
            axes.y_max,
            axes.y_tick
        );
    }

    if !result.near_duplicates.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, j) in &result.near_duplicates {
            println!(
                "  {} points {} and {} are closer than {} in x",
                "!".yellow(),
                i,
                j,
                NEAR_DUPLICATE_TOLERANCE
            );
        }
    }
    if let Some(path) = preview_out {
        println!("{} {}", "Preview written to:".dimmed(), path);
    }

    reporting::print_success("Curve inspected", start.elapsed().as_millis() as u64);
    Ok(ExitCode::SUCCESS)
}

/// Human name of the estimator for a curve.
pub fn fit_name(kind: Option<FitKind>) -> &'static str {
    match kind {
        Some(FitKind::Linear) => "linear",
        Some(FitKind::InterpolatingSpline) => "interpolating_spline",
        Some(FitKind::SmoothingSpline) => "smoothing_spline",
        None => "none",
    }
}

fn execute(
    input: &str,
    preview_out: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<InspectResult> {
    let Session { bench, source } = open_session(input, overrides)?;
    let points = bench.point_set().points();
    let smoothing = bench.config().smoothing_factor;

    let kind = match CurveFit::fit(points, smoothing) {
        Ok(fit) => Some(fit.kind()),
        Err(e) => {
            log::warn!("curve cannot be fitted: {}", e);
            None
        }
    };

    if let Some(path) = preview_out {
        let preview = bench.preview()?;
        output::write_points(Path::new(path), PREVIEW_SHEET, &preview)?;
    }

    Ok(InspectResult {
        source,
        fit: fit_name(kind).to_string(),
        axes: bench.axis_range(),
        near_duplicates: bench
            .point_set()
            .near_duplicates(NEAR_DUPLICATE_TOLERANCE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_name() {
        assert_eq!(fit_name(Some(FitKind::Linear)), "linear");
        assert_eq!(fit_name(Some(FitKind::SmoothingSpline)), "smoothing_spline");
        assert_eq!(fit_name(None), "none");
    }
}
