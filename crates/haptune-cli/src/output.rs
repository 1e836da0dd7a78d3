//! Writing command results to files.
//!
//! The output format follows the file extension: `.json` writes a workbook
//! (or spectrum) as JSON, `.csv`/`.txt` writes the plain text rendering.

use anyhow::{bail, Context, Result};
use haptune_engine::io::{vibration_workbook, write_brace_csv, Sheet, Workbook};
use haptune_engine::{Point, Spectrum, VibrationSignal, Workbench};
use std::fs;
use std::path::Path;

/// Output file kinds, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Json,
    Text,
}

impl OutputKind {
    /// Detects the kind from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(OutputKind::Json),
            Some("csv") | Some("txt") => Ok(OutputKind::Text),
            _ => bail!(
                "Unsupported output extension for {} (expected .json, .csv or .txt)",
                path.display()
            ),
        }
    }
}

/// Writes the curve: a workbook with the interpolated and working curves,
/// or brace CSV of the working curve.
pub fn write_curve(path: &Path, bench: &Workbench) -> Result<()> {
    let kind = OutputKind::from_path(path)?;
    prepare(path)?;
    let written = match kind {
        OutputKind::Json => bench.export_curve_workbook().write(path),
        OutputKind::Text => write_brace_csv(path, bench.working_points()),
    };
    written.with_context(|| failed_write(path))?;
    log::debug!("wrote curve to {}", path.display());
    Ok(())
}

/// Writes a standalone point list as a one-sheet workbook or brace CSV.
pub fn write_points(path: &Path, sheet_name: &str, points: &[Point]) -> Result<()> {
    let kind = OutputKind::from_path(path)?;
    prepare(path)?;
    let written = match kind {
        OutputKind::Json => Workbook {
            sheets: vec![Sheet::from_points(sheet_name, "sample", "amplitude", points)],
        }
        .write(path),
        OutputKind::Text => write_brace_csv(path, points),
    };
    written.with_context(|| failed_write(path))?;
    log::debug!("wrote {} points to {}", points.len(), path.display());
    Ok(())
}

/// Writes a vibration as a workbook or a two-column table.
pub fn write_vibration(path: &Path, signal: &VibrationSignal) -> Result<()> {
    let workbook = vibration_workbook(signal);
    match OutputKind::from_path(path)? {
        OutputKind::Json => {
            prepare(path)?;
            workbook.write(path).with_context(|| failed_write(path))?;
        }
        OutputKind::Text => match workbook.sheets.first() {
            Some(sheet) => write_text(path, &sheet.to_csv())?,
            None => bail!("vibration workbook has no sheet"),
        },
    }
    log::debug!("wrote {} vibration samples to {}", signal.len(), path.display());
    Ok(())
}

/// Writes a spectrum as JSON or a `frequency,magnitude` table.
pub fn write_spectrum(path: &Path, spectrum: &Spectrum) -> Result<()> {
    let content = match OutputKind::from_path(path)? {
        OutputKind::Json => serde_json::to_string_pretty(spectrum)?,
        OutputKind::Text => spectrum_csv(spectrum),
    };
    write_text(path, &content)
}

/// Renders a spectrum as CSV at full precision.
pub fn spectrum_csv(spectrum: &Spectrum) -> String {
    let mut out = String::from("frequency,magnitude\n");
    for (f, m) in spectrum.frequencies.iter().zip(&spectrum.magnitudes) {
        out.push_str(&format!("{},{}\n", f, m));
    }
    out
}

fn failed_write(path: &Path) -> String {
    format!("Failed to write output file: {}", path.display())
}

/// Creates the parent directory of `path` if needed.
fn prepare(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    prepare(path)?;
    fs::write(path, content).with_context(|| failed_write(path))?;
    log::debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
