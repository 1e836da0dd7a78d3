//! Downsample command implementation

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::DownsampleResult;
use super::reporting::{self, open_session, Session};
use crate::output;
use crate::settings::ConfigOverrides;

/// Run the downsample command
///
/// Keeps every n-th point of the loaded curve, starting with the first.
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
        return reporting::emit_json("downsample", input, execute(input, out, overrides));
    }

    let start = Instant::now();
    let result = execute(input, out, overrides)?;

    reporting::print_header("Downsampling", input, &result.source);
    println!(
        "{} {} of {} points (stride {})",
        "Kept:".dimmed(),
        result.kept_points,
        result.source.points,
        result.stride
    );
    if let Some(path) = &result.output {
        println!("{} {}", "Written to:".dimmed(), path);
    }

    reporting::print_success("Curve downsampled", start.elapsed().as_millis() as u64);
    Ok(ExitCode::SUCCESS)
}

fn execute(input: &str, out: Option<&str>, overrides: &ConfigOverrides) -> Result<DownsampleResult> {
    let Session { mut bench, source } = open_session(input, overrides)?;
    let kept_points = bench.downsample()?;

    if let Some(path) = out {
        output::write_curve(Path::new(path), &bench)?;
    }

    Ok(DownsampleResult {
        source,
        stride: bench.config().downsample_stride,
        kept_points,
        output: out.map(str::to_string),
    })
}
