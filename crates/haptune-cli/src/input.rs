//! Curve loading from brace CSV or workbook JSON files.
//!
//! Dispatches by file extension and returns the points together with the
//! source format and a content hash of the file.

use haptune_engine::io::{parse_brace_csv, Workbook};
use haptune_engine::{EngineError, Point};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Recognized brace CSV extensions.
pub const BRACE_CSV_EXTENSIONS: &[&str] = &["csv", "txt"];

/// Recognized workbook extensions.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["json"];

/// Identifies the format of a curve file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveFormat {
    /// Two-line `label = {..}` file.
    BraceCsv,
    /// Workbook serialized as JSON.
    Workbook,
}

impl CurveFormat {
    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if BRACE_CSV_EXTENSIONS.contains(&ext.as_str()) {
            Some(CurveFormat::BraceCsv)
        } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Some(CurveFormat::Workbook)
        } else {
            None
        }
    }

    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveFormat::BraceCsv => "brace_csv",
            CurveFormat::Workbook => "workbook",
        }
    }
}

impl std::fmt::Display for CurveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loaded curve.
#[derive(Debug)]
pub struct LoadResult {
    /// Points in file order.
    pub points: Vec<Point>,
    /// Source format.
    pub format: CurveFormat,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while loading a curve.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// File content is not a valid curve.
    Parse(EngineError),
}

impl InputError {
    /// Stable error code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::FileRead { .. } => crate::commands::json_output::error_codes::FILE_READ,
            InputError::UnknownExtension { .. } => {
                crate::commands::json_output::error_codes::UNKNOWN_EXTENSION
            }
            InputError::Parse(e) => e.code(),
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "Failed to read curve file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(
                    f,
                    "Unknown curve file extension '.{}' (expected .csv, .txt or .json)",
                    ext
                ),
                None => write!(
                    f,
                    "Curve file has no extension (expected .csv, .txt or .json)"
                ),
            },
            InputError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::Parse(e) => Some(e),
            InputError::UnknownExtension { .. } => None,
        }
    }
}

/// Loads a curve from `path`.
pub fn load_curve(path: &Path) -> Result<LoadResult, InputError> {
    let format = CurveFormat::from_path(path).ok_or_else(|| InputError::UnknownExtension {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_string()),
    })?;

    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let points = match format {
        CurveFormat::BraceCsv => parse_brace_csv(&content),
        CurveFormat::Workbook => Workbook::from_json(&content).and_then(|w| w.import_points()),
    }
    .map_err(InputError::Parse)?;

    log::debug!(
        "loaded {} points from {} ({})",
        points.len(),
        path.display(),
        format
    );

    Ok(LoadResult {
        points,
        format,
        source_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            CurveFormat::from_path(Path::new("curve.csv")),
            Some(CurveFormat::BraceCsv)
        );
        assert_eq!(
            CurveFormat::from_path(Path::new("curve.TXT")),
            Some(CurveFormat::BraceCsv)
        );
        assert_eq!(
            CurveFormat::from_path(Path::new("book.json")),
            Some(CurveFormat::Workbook)
        );
        assert_eq!(CurveFormat::from_path(Path::new("book.xlsx")), None);
        assert_eq!(CurveFormat::from_path(Path::new("curve")), None);
    }

    #[test]
    fn test_load_brace_csv() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("curve.csv");
        std::fs::write(&path, "angle [] = {0, 1, 2}\namplitude [] = {0, 5, 0}\n").unwrap();

        let result = load_curve(&path).unwrap();
        assert_eq!(result.format, CurveFormat::BraceCsv);
        assert_eq!(result.points.len(), 3);
        assert_eq!(result.points[1], Point::new(1.0, 5.0));
        assert_eq!(result.source_hash.len(), 64);
    }

    #[test]
    fn test_load_workbook() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("curve.json");
        let json = r#"{"sheets": [{"name": "original points", "columns": ["sample", "amplitude"], "rows": [[0.0, 1.0], [2.0, 3.0]]}]}"#;
        std::fs::write(&path, json).unwrap();

        let result = load_curve(&path).unwrap();
        assert_eq!(result.format, CurveFormat::Workbook);
        assert_eq!(
            result.points,
            vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0)]
        );
    }

    #[test]
    fn test_load_unknown_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("curve.xlsx");
        std::fs::write(&path, "binary").unwrap();

        let result = load_curve(&path);
        assert!(matches!(
            result,
            Err(InputError::UnknownExtension { extension: Some(ref ext) }) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_load_file_not_found() {
        let result = load_curve(Path::new("/nonexistent/curve.csv"));
        assert!(matches!(result, Err(InputError::FileRead { .. })));
    }

    #[test]
    fn test_load_malformed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.csv");
        std::fs::write(&path, "angle [] = {0, 1}\n").unwrap();

        let err = load_curve(&path).unwrap_err();
        assert_eq!(err.code(), "HAPTUNE_020");
    }
}
