//! Cubic splines stored as knot values plus second derivatives.

use super::banded::solve_tridiagonal;
use crate::error::EngineResult;
use crate::point::Point;

/// Piecewise cubic with C2 continuity.
///
/// On each interval `[x_i, x_{i+1}]` the curve is determined by the values
/// `a_i`, `a_{i+1}` and the second derivatives `c_i`, `c_{i+1}` at its ends.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    second_derivatives: Vec<f64>,
    smoothing: f64,
}

impl CubicSpline {
    pub(crate) fn from_parts(
        knots: Vec<f64>,
        values: Vec<f64>,
        second_derivatives: Vec<f64>,
        smoothing: f64,
    ) -> Self {
        Self {
            knots,
            values,
            second_derivatives,
            smoothing,
        }
    }

    /// Interpolating spline with not-a-knot end conditions.
    ///
    /// Requires at least four points with strictly increasing x; the third
    /// derivative is continuous across the second and second-to-last knots.
    pub(crate) fn interpolating(points: &[Point]) -> EngineResult<Self> {
        let n = points.len() - 1;
        let x: Vec<f64> = points.iter().map(|p| p.x).collect();
        let y: Vec<f64> = points.iter().map(|p| p.y).collect();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

        // interior unknowns c_1 ..= c_{n-1}
        let m = n - 1;
        let mut sub = vec![0.0; m];
        let mut diag = vec![0.0; m];
        let mut sup = vec![0.0; m];
        let mut rhs = vec![0.0; m];
        for row in 0..m {
            let i = row + 1;
            sub[row] = h[i - 1];
            diag[row] = 2.0 * (h[i - 1] + h[i]);
            sup[row] = h[i];
            rhs[row] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        }

        // eliminate c_0 = c_1 (1 + h0/h1) - c_2 h0/h1
        let ratio_start = h[0] / h[1];
        diag[0] += h[0] * (1.0 + ratio_start);
        sup[0] -= h[0] * ratio_start;

        // eliminate c_n = c_{n-1} (1 + h_{n-1}/h_{n-2}) - c_{n-2} h_{n-1}/h_{n-2}
        let ratio_end = h[n - 1] / h[n - 2];
        diag[m - 1] += h[n - 1] * (1.0 + ratio_end);
        sub[m - 1] -= h[n - 1] * ratio_end;

        let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

        let mut c = vec![0.0; n + 1];
        c[1..n].copy_from_slice(&interior);
        c[0] = c[1] * (1.0 + ratio_start) - c[2] * ratio_start;
        c[n] = c[n - 1] * (1.0 + ratio_end) - c[n - 2] * ratio_end;

        Ok(Self::from_parts(x, y, c, 0.0))
    }

    /// Knot abscissae.
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Spline values at the knots.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Second derivatives at the knots.
    pub fn second_derivatives(&self) -> &[f64] {
        &self.second_derivatives
    }

    /// Smoothing factor the spline was fitted with (0 for interpolation).
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Fitted domain `[first knot, last knot]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Evaluates at `x`. Outside the domain the end polynomial is extended.
    pub fn evaluate(&self, x: f64) -> f64 {
        let last_interval = self.knots.len() - 2;
        let i = self
            .knots
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(last_interval);

        let h = self.knots[i + 1] - self.knots[i];
        let a = (self.knots[i + 1] - x) / h;
        let b = (x - self.knots[i]) / h;
        a * self.values[i]
            + b * self.values[i + 1]
            + ((a * a * a - a) * self.second_derivatives[i]
                + (b * b * b - b) * self.second_derivatives[i + 1])
                * (h * h)
                / 6.0
    }
}
