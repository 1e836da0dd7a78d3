//! Piecewise-linear interpolation.

use crate::point::Point;

/// Piecewise-linear interpolant over points sorted by x.
///
/// Queries outside the data range return the nearest endpoint value.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolant {
    points: Vec<Point>,
}

impl LinearInterpolant {
    /// Creates an interpolant. `points` must be sorted by x and non-empty.
    pub(crate) fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Knots of the interpolant.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Evaluates at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // first index with knot x strictly greater than the query
        let hi = self.points.partition_point(|p| p.x <= x);
        let a = self.points[hi - 1];
        let b = self.points[hi];
        let t = (x - a.x) / (b.x - a.x);
        a.y + t * (b.y - a.y)
    }
}
