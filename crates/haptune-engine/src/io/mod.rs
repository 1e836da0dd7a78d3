//! Curve import and export.
//!
//! Two formats are supported:
//! - the brace CSV format, two lines of `label = {v1, v2, ...}`
//! - a workbook data model with named sheets of numeric columns, handed to
//!   an external encoder or serialized as JSON
//!
//! All exported values are rounded to two decimals.

pub mod brace_csv;
pub mod workbook;

pub use brace_csv::{format_brace_csv, parse_brace_csv, read_brace_csv, write_brace_csv};
pub use workbook::{
    curve_workbook, vibration_workbook, Sheet, Workbook, INTERPOLATED_SHEET, ORIGINAL_SHEET,
    VIBRATION_SHEET,
};

/// Magnitude from which values are written in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e16;

/// Formats a value rounded to two decimals, shortest form, with a trailing
/// `.0` on integral values (`1.0`, `2.5`, `-0.33`) and a signed two-digit
/// exponent from 1e16 up (`1e+16`).
pub fn format_value(value: f64) -> String {
    let rounded = crate::point::round2(value);
    if !rounded.is_finite() {
        return format!("{}", rounded);
    }
    if rounded.abs() >= EXPONENT_THRESHOLD {
        let formatted = format!("{:e}", rounded);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e+{:0>2}", mantissa, exponent),
            None => formatted,
        };
    }
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.0), "1.0");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-0.3333), "-0.33");
        assert_eq!(format_value(12.3456), "12.35");
        assert_eq!(format_value(0.004), "0.0");
        assert_eq!(format_value(400.0), "400.0");
        assert_eq!(format_value(0.1), "0.1");
    }

    #[test]
    fn test_format_value_rounds_exact_binary_value() {
        let cases = [
            (0.125, "0.12"),
            (2.125, "2.12"),
            (2.675, "2.67"),
            (10.125, "10.12"),
            (-0.125, "-0.12"),
            (1.115, "1.11"),
            (0.375, "0.38"),
            (1.005, "1.0"),
            (99.995, "100.0"),
            (-0.001, "-0.0"),
        ];
        for (value, want) in cases {
            assert_eq!(format_value(value), want, "format_value({})", value);
        }
    }

    #[test]
    fn test_format_value_large_magnitudes() {
        assert_eq!(format_value(1e15), "1000000000000000.0");
        assert_eq!(format_value(1e16), "1e+16");
        assert_eq!(format_value(-2.5e20), "-2.5e+20");
        assert_eq!(format_value(1.5e300), "1.5e+300");
    }
}
