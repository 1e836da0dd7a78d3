//! Brace CSV format.
//!
//! ```text
//! angle [] = {0.0, 10.0, 20.0}
//! amplitude [] = {0.0, 5.0, 0.0}
//! ```
//!
//! The first line holds x values, the second y values. Labels are ignored on
//! import: everything up to the last `=` is dropped.

use std::fs;
use std::path::Path;

use super::format_value;
use crate::error::{EngineError, EngineResult};
use crate::point::Point;

/// Parses brace CSV content into points in file order.
pub fn parse_brace_csv(content: &str) -> EngineResult<Vec<Point>> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (Some(x_line), Some(y_line)) = (lines.next(), lines.next()) else {
        return Err(EngineError::import_format(
            "expected two lines of values (angle and amplitude)",
        ));
    };

    let xs = parse_values(x_line.0 + 1, x_line.1)?;
    let ys = parse_values(y_line.0 + 1, y_line.1)?;
    if xs.len() != ys.len() {
        return Err(EngineError::import_format(format!(
            "line {} has {} values but line {} has {}",
            x_line.0 + 1,
            xs.len(),
            y_line.0 + 1,
            ys.len()
        )));
    }

    log::debug!("parsed {} points from brace CSV", xs.len());
    Ok(xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Point::new(x, y))
        .collect())
}

fn parse_values(line_no: usize, line: &str) -> EngineResult<Vec<f64>> {
    let (_, values) = line.trim().rsplit_once('=').ok_or_else(|| {
        EngineError::import_format(format!("line {}: missing '='", line_no))
    })?;
    let values = values.trim().replace('{', "").replace('}', "");

    values
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(EngineError::import_format(format!(
                    "line {}: invalid number '{}'",
                    line_no, token
                ))),
            }
        })
        .collect()
}

/// Formats points as brace CSV, values rounded to two decimals.
pub fn format_brace_csv(points: &[Point]) -> String {
    let xs: Vec<String> = points.iter().map(|p| format_value(p.x)).collect();
    let ys: Vec<String> = points.iter().map(|p| format_value(p.y)).collect();
    format!(
        "angle [] = {{{}}}\namplitude [] = {{{}}}\n",
        xs.join(", "),
        ys.join(", ")
    )
}

/// Reads a brace CSV file.
pub fn read_brace_csv(path: impl AsRef<Path>) -> EngineResult<Vec<Point>> {
    let content = fs::read_to_string(path)?;
    parse_brace_csv(&content)
}

/// Writes points to a brace CSV file.
pub fn write_brace_csv(path: impl AsRef<Path>, points: &[Point]) -> EngineResult<()> {
    fs::write(path, format_brace_csv(points))?;
    Ok(())
}
