//! Continuous curve estimates from discrete points.
//!
//! Every consumer of the curve (resampling, envelopes, previews) goes through
//! [`CurveFit::fit`], which applies one policy:
//!
//! - fewer than 4 points, or x not strictly increasing: piecewise-linear
//! - otherwise a cubic spline; `s == 0` interpolates every point (not-a-knot
//!   ends), `s > 0` smooths with residual bound `s`

mod banded;
mod linear;
mod smoothing;
mod spline;

#[cfg(test)]
mod tests;

pub use linear::LinearInterpolant;
pub use spline::CubicSpline;

use crate::error::{EngineError, EngineResult, ValidationError};
use crate::point::{is_strictly_increasing, sort_points, Point};

/// Minimum number of points for the spline path.
pub const MIN_SPLINE_POINTS: usize = 4;

/// Which estimator a [`CurveFit`] ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitKind {
    /// Piecewise-linear through the points.
    Linear,
    /// Cubic spline through every point.
    InterpolatingSpline,
    /// Cubic smoothing spline.
    SmoothingSpline,
}

/// A fitted curve that can be evaluated at any x.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveFit {
    /// Piecewise-linear interpolation.
    Linear(LinearInterpolant),
    /// Cubic spline.
    Spline(CubicSpline),
}

impl CurveFit {
    /// Fits `points` with smoothing factor `s`.
    ///
    /// Points out of x order fall back to linear over the sorted points. Fails
    /// with a validation error for fewer
    /// than two points, and with a numerical error when the spline system
    /// cannot be solved.
    pub fn fit(points: &[Point], s: f64) -> EngineResult<Self> {
        if points.len() < 2 {
            return Err(ValidationError::InsufficientPoints {
                required: 2,
                found: points.len(),
            }
            .into());
        }
        if !s.is_finite() || s < 0.0 {
            return Err(EngineError::invalid_param(
                "smoothing_factor",
                format!("must be a non-negative number, got {}", s),
            ));
        }

        // the spline needs x strictly increasing in the order given
        if points.len() < MIN_SPLINE_POINTS || !is_strictly_increasing(points) {
            let mut sorted = points.to_vec();
            sort_points(&mut sorted);
            log::debug!("linear fit over {} points", sorted.len());
            return Ok(CurveFit::Linear(LinearInterpolant::new(sorted)));
        }
        Self::spline(points, s).map(CurveFit::Spline)
    }

    /// Fits a cubic spline, bypassing the linear fallback.
    ///
    /// Requires at least four points with strictly increasing x.
    pub fn spline(points: &[Point], s: f64) -> EngineResult<CubicSpline> {
        if points.len() < MIN_SPLINE_POINTS {
            return Err(ValidationError::InsufficientPoints {
                required: MIN_SPLINE_POINTS,
                found: points.len(),
            }
            .into());
        }
        if !is_strictly_increasing(points) {
            return Err(EngineError::fitting("x values must be strictly increasing"));
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(EngineError::fitting("points contain non-finite coordinates"));
        }

        if s == 0.0 {
            log::debug!("interpolating spline over {} points", points.len());
            CubicSpline::interpolating(points)
        } else {
            log::debug!("smoothing spline over {} points, s = {}", points.len(), s);
            smoothing::fit(points, s)
        }
    }

    /// Estimator used by this fit.
    pub fn kind(&self) -> FitKind {
        match self {
            CurveFit::Linear(_) => FitKind::Linear,
            CurveFit::Spline(spline) if spline.smoothing() > 0.0 => FitKind::SmoothingSpline,
            CurveFit::Spline(_) => FitKind::InterpolatingSpline,
        }
    }

    /// Returns true for either spline kind.
    pub fn is_spline(&self) -> bool {
        matches!(self, CurveFit::Spline(_))
    }

    /// Evaluates the curve at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            CurveFit::Linear(linear) => linear.evaluate(x),
            CurveFit::Spline(spline) => spline.evaluate(x),
        }
    }

    /// Evaluates the curve at every x in `xs`.
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

impl From<CubicSpline> for CurveFit {
    fn from(spline: CubicSpline) -> Self {
        CurveFit::Spline(spline)
    }
}

/// `n` evenly spaced values over `[start, end]`, both ends included.
///
/// `n == 0` yields an empty grid and `n == 1` yields `[start]`. The last
/// element is exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            grid[n - 1] = end;
            grid
        }
    }
}

/// Densely samples the fit of `points` for display.
pub fn preview_curve(points: &[Point], s: f64, resolution: usize) -> EngineResult<Vec<Point>> {
    let fit = CurveFit::fit(points, s)?;
    let (min_x, max_x) = crate::point::x_bounds(points).unwrap_or((0.0, 0.0));
    Ok(linspace(min_x, max_x, resolution)
        .into_iter()
        .map(|x| Point::new(x, fit.evaluate(x)))
        .collect())
}

/// Default resolution of [`preview_curve`].
pub const PREVIEW_RESOLUTION: usize = 500;
