//! Automatic axis ranges for plotting a curve.

use serde::{Deserialize, Serialize};

use crate::point::{round2, x_bounds, y_bounds, Point};

/// Fraction of the data range added on each side.
const MARGIN_FRACTION: f64 = 0.05;

/// Axis limits and tick spacing for a curve plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_tick: f64,
    pub y_tick: f64,
}

impl AxisRange {
    /// Fits limits around `points` with a 5% margin, rounded to two decimals.
    ///
    /// A degenerate range gets a margin of 1 instead.
    pub fn fit(points: &[Point]) -> Option<Self> {
        let (x_min, x_max) = padded(x_bounds(points)?);
        let (y_min, y_max) = padded(y_bounds(points)?);
        Some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            x_tick: tick_interval(x_min, x_max),
            y_tick: tick_interval(y_min, y_max),
        })
    }
}

fn padded((min, max): (f64, f64)) -> (f64, f64) {
    let margin = if max != min {
        (max - min) * MARGIN_FRACTION
    } else {
        1.0
    };
    (round2(min - margin), round2(max + margin))
}

/// Tick spacing giving roughly ten ticks, snapped to one significant digit.
pub fn tick_interval(min: f64, max: f64) -> f64 {
    let raw = (max - min) / 10.0;
    if !(raw > 0.0 && raw.is_finite()) {
        return 0.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    round2((raw / magnitude).round() * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(AxisRange::fit(&[]), None);
    }

    #[test]
    fn test_margin_and_ticks() {
        let points = vec![
            Point::new(0.0, -5.0),
            Point::new(40.0, 5.0),
            Point::new(20.0, 0.0),
        ];
        let range = AxisRange::fit(&points).unwrap();
        assert_eq!(range.x_min, -2.0);
        assert_eq!(range.x_max, 42.0);
        assert_eq!(range.y_min, -5.5);
        assert_eq!(range.y_max, 5.5);
        // 44 / 10 = 4.4 -> 4
        assert_eq!(range.x_tick, 4.0);
        // 11 / 10 = 1.1 -> 1
        assert_eq!(range.y_tick, 1.0);
    }

    #[test]
    fn test_degenerate_range() {
        let range = AxisRange::fit(&[Point::ORIGIN]).unwrap();
        assert_eq!(range.x_min, -1.0);
        assert_eq!(range.x_max, 1.0);
        assert_eq!(range.y_min, -1.0);
        assert_eq!(range.y_max, 1.0);
        assert_eq!(range.x_tick, 0.2);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(0.0, 1000.0), 100.0);
        assert_eq!(tick_interval(0.0, 27.0), 3.0);
        assert_eq!(tick_interval(0.0, 0.5), 0.05);
        assert_eq!(tick_interval(0.0, 0.01), 0.0);
        assert_eq!(tick_interval(3.0, 3.0), 0.0);
    }
}
