use anyhow::{Context, Result};
use colored::Colorize;
use haptune_engine::Workbench;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{CommandOutput, JsonError, SourceInfo};
use crate::input::{load_curve, LoadResult};
use crate::settings::ConfigOverrides;

/// A workbench loaded with the input curve.
pub(crate) struct Session {
    pub bench: Workbench,
    pub source: SourceInfo,
}

/// Resolves the config and loads the curve into a fresh workbench.
pub(crate) fn open_session(input: &str, overrides: &ConfigOverrides) -> Result<Session> {
    let config = overrides.resolve()?;
    let LoadResult {
        points,
        format,
        source_hash,
    } = load_curve(Path::new(input))
        .with_context(|| format!("Failed to load curve file: {}", input))?;

    let source = SourceInfo {
        format,
        source_hash,
        points: points.len(),
    };
    let mut bench = Workbench::new(config)?;
    bench.load(points);
    Ok(Session { bench, source })
}

/// Prints the header shared by human-readable command output.
pub(crate) fn print_header(verb: &str, input: &str, source: &SourceInfo) {
    println!("{} {}", format!("{}:", verb).cyan().bold(), input);
    println!(
        "{} {} ({}), {} points",
        "Source:".dimmed(),
        source.format,
        &source.source_hash[..16],
        source.points
    );
}

/// Prints a JSON document for `outcome` and maps it to an exit code.
pub(crate) fn emit_json<T: Serialize>(
    command: &str,
    input: &str,
    outcome: Result<T>,
) -> Result<ExitCode> {
    let (output, code) = match outcome {
        Ok(result) => (
            CommandOutput::success(command, input, result),
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            CommandOutput::failure(command, input, vec![JsonError::from_anyhow(&e)]),
            ExitCode::from(1),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

/// Prints the closing success line.
pub(crate) fn print_success(message: &str, duration_ms: u64) {
    println!(
        "\n{} {} ({}ms)",
        "SUCCESS".green().bold(),
        message,
        duration_ms
    );
}

