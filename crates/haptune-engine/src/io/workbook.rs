//! Workbook data model.
//!
//! A [`Workbook`] is an ordered list of named sheets with numeric columns.
//! Encoding it into an `.xlsx` container is left to the caller; the model
//! fixes sheet names, column names and rounding.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::format_value;
use crate::error::{EngineError, EngineResult};
use crate::point::{round2, Point};
use crate::point_set::PointSet;
use crate::synthesis::VibrationSignal;

/// Sheet holding the interpolated curve.
pub const INTERPOLATED_SHEET: &str = "Interpolated Points";
/// Sheet holding the working curve.
pub const ORIGINAL_SHEET: &str = "Original Points";
/// Sheet holding a vibration waveform.
pub const VIBRATION_SHEET: &str = "Vibration";

/// Sheet name preferred on import. The match is exact, so the capitalized
/// export name does not match.
const IMPORT_SHEET: &str = "original points";

/// A named table of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name.
    pub name: String,
    /// Column headers.
    pub columns: Vec<String>,
    /// Rows of values, one per column.
    pub rows: Vec<Vec<f64>>,
}

impl Sheet {
    /// Builds a two-column sheet from points, rounding to two decimals.
    pub fn from_points(name: &str, x_column: &str, y_column: &str, points: &[Point]) -> Self {
        Self {
            name: name.to_string(),
            columns: vec![x_column.to_string(), y_column.to_string()],
            rows: points
                .iter()
                .map(|p| vec![round2(p.x), round2(p.y)])
                .collect(),
        }
    }

    /// Reads the first two columns as `(x, y)` in row order.
    pub fn points(&self) -> EngineResult<Vec<Point>> {
        if self.columns.len() < 2 {
            return Err(EngineError::import_format(format!(
                "sheet '{}' must contain at least two columns (angle, amplitude)",
                self.name
            )));
        }
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| match row.as_slice() {
                [x, y, ..] => Ok(Point::new(*x, *y)),
                _ => Err(EngineError::import_format(format!(
                    "sheet '{}' row {} has fewer than two values",
                    self.name,
                    i + 1
                ))),
            })
            .collect()
    }

    /// Renders the sheet as a comma separated table with a header row.
    pub fn to_csv(&self) -> String {
        let mut out = self.columns.join(",");
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|&v| format_value(v)).collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in file order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Looks up a sheet by exact name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names in order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Points to load from this workbook: the sheet named "original points"
    /// if present, else the first sheet.
    pub fn import_points(&self) -> EngineResult<Vec<Point>> {
        let sheet = self
            .sheet(IMPORT_SHEET)
            .or_else(|| self.sheets.first())
            .ok_or_else(|| EngineError::import_format("workbook has no sheets"))?;
        log::debug!("importing points from sheet '{}'", sheet.name);
        sheet.points()
    }

    /// Parses a workbook from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::import_format(format!("invalid workbook: {}", e)))
    }

    /// Serializes the workbook as pretty JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::import_format(format!("cannot serialize workbook: {}", e)))
    }

    /// Reads a JSON workbook file.
    pub fn read(path: impl AsRef<Path>) -> EngineResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Writes the workbook as a JSON file.
    pub fn write(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Curve export: the interpolated curve (when present) followed by the
/// working curve.
pub fn curve_workbook(set: &PointSet) -> Workbook {
    let mut sheets = Vec::with_capacity(2);
    if let Some(interpolated) = set.interpolated() {
        sheets.push(Sheet::from_points(
            INTERPOLATED_SHEET,
            "sample",
            "amplitude",
            interpolated,
        ));
    }
    sheets.push(Sheet::from_points(
        ORIGINAL_SHEET,
        "sample",
        "amplitude",
        set.points(),
    ));
    Workbook { sheets }
}

/// Vibration export: a single sheet of samples.
pub fn vibration_workbook(signal: &VibrationSignal) -> Workbook {
    Workbook {
        sheets: vec![Sheet::from_points(
            VIBRATION_SHEET,
            "Sample",
            "Amplitude",
            &signal.points(),
        )],
    }
}
