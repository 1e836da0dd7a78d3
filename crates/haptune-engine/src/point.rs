//! Curve points and small helpers over point sequences.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Tolerance below which two x coordinates are reported as near-duplicates.
pub const NEAR_DUPLICATE_TOLERANCE: f64 = 0.01;

/// A single curve sample: `x` is a sample index or abscissa, `y` an amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Abscissa.
    pub x: f64,
    /// Amplitude.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The default single point of an empty or reset curve.
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    /// Lexicographic ordering on (x, y) with a total order on floats.
    pub fn total_cmp(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }

    fn distance_squared(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Sorts points ascending by x (ties broken by y).
pub fn sort_points(points: &mut [Point]) {
    points.sort_by(Point::total_cmp);
}

/// Returns true if the x coordinates are strictly increasing.
pub fn is_strictly_increasing(points: &[Point]) -> bool {
    points.windows(2).all(|w| w[1].x > w[0].x)
}

/// Smallest and largest x of a point sequence.
pub fn x_bounds(points: &[Point]) -> Option<(f64, f64)> {
    let first = points.first()?;
    Some(points.iter().fold((first.x, first.x), |(lo, hi), p| {
        (lo.min(p.x), hi.max(p.x))
    }))
}

/// Smallest and largest y of a point sequence.
pub fn y_bounds(points: &[Point]) -> Option<(f64, f64)> {
    let first = points.first()?;
    Some(points.iter().fold((first.y, first.y), |(lo, hi), p| {
        (lo.min(p.y), hi.max(p.y))
    }))
}

/// Index pairs `(i, j)` with `i < j` whose x coordinates differ by less than
/// `tolerance`.
pub fn find_near_duplicates(points: &[Point], tolerance: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if (points[i].x - points[j].x).abs() < tolerance {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// The point closest to `(x, y)` by Euclidean distance. The first point wins ties.
pub fn closest_point(points: &[Point], x: f64, y: f64) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for p in points {
        let d = p.distance_squared(x, y);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((*p, d)),
        }
    }
    best.map(|(p, _)| p)
}

/// Digits past the decimal point used to render the exact binary value.
///
/// A double that is not exactly on a half-cent tie differs from it by at
/// least `ulp / 200`, far above `1e-40` for every value that can round up.
const EXACT_DIGITS: usize = 40;

/// Rounds to the two-decimal value nearest the exact binary number, ties to
/// even.
///
/// Works on the decimal expansion rather than `value * 100.0`, which adds
/// its own rounding error (2.675 is stored below the tie and rounds to 2.67).
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let expanded = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = expanded.split_once('.').unwrap_or((&expanded, ""));
    let frac = frac_part.as_bytes();
    let digit = |i: usize| frac.get(i).map_or(0, |d| d - b'0');

    let mut cents: u128 = match format!("{}{}{}", int_part, digit(0), digit(1)).parse() {
        Ok(cents) => cents,
        // beyond u128 cents: already an integer with no fractional part
        Err(_) => return value,
    };
    let round_up = match digit(2) {
        d if d > 5 => true,
        5 => frac.iter().skip(3).any(|&d| d != b'0') || cents % 2 == 1,
        _ => false,
    };
    if round_up {
        cents += 1;
    }

    let magnitude: f64 = format!("{}.{:02}", cents / 100, cents % 100)
        .parse()
        .unwrap_or(value.abs());
    magnitude.copysign(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_points_orders_by_x_then_y() {
        let mut points = vec![
            Point::new(2.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(1.0, -1.0),
        ];
        sort_points(&mut points);
        assert_eq!(
            points,
            vec![
                Point::new(1.0, -1.0),
                Point::new(1.0, 3.0),
                Point::new(2.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_strictly_increasing() {
        assert!(is_strictly_increasing(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]));
        assert!(!is_strictly_increasing(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0)]));
        assert!(is_strictly_increasing(&[]));
    }

    #[test]
    fn test_bounds() {
        let points = [Point::new(3.0, -2.0), Point::new(-1.0, 5.0)];
        assert_eq!(x_bounds(&points), Some((-1.0, 3.0)));
        assert_eq!(y_bounds(&points), Some((-2.0, 5.0)));
        assert_eq!(x_bounds(&[]), None);
    }

    #[test]
    fn test_near_duplicates() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.005, 1.0),
            Point::new(1.0, 0.0),
            Point::new(1.02, 0.0),
        ];
        assert_eq!(
            find_near_duplicates(&points, NEAR_DUPLICATE_TOLERANCE),
            vec![(0, 1)]
        );
    }

    #[test]
    fn test_closest_point() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 5.0), Point::new(20.0, 0.0)];
        assert_eq!(closest_point(&points, 9.0, 4.0), Some(Point::new(10.0, 5.0)));
        assert_eq!(closest_point(&points, 5.0, 2.5), Some(Point::new(0.0, 0.0)));
        assert_eq!(closest_point(&[], 0.0, 0.0), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(-0.336), -0.34);
        assert_eq!(round2(7.0), 7.0);
    }

    #[test]
    fn test_round2_uses_exact_binary_value() {
        // exact ties go to the even cent; near-ties follow the stored value
        let cases = [
            (0.125, 0.12),
            (2.125, 2.12),
            (10.125, 10.12),
            (-0.125, -0.12),
            (0.375, 0.38),
            (2.675, 2.67),
            (1.115, 1.11),
            (1.005, 1.0),
            (0.015, 0.01),
            (-2.675, -2.67),
            (99.995, 100.0),
            (0.5, 0.5),
        ];
        for (value, want) in cases {
            assert_eq!(round2(value), want, "round2({})", value);
        }
    }

    #[test]
    fn test_round2_extremes() {
        assert_eq!(round2(1e300), 1e300);
        assert_eq!(round2(-1e20), -1e20);
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
        assert!(round2(-0.001).is_sign_negative());
        assert_eq!(round2(1e-300), 0.0);
    }
}
