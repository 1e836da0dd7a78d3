//! Point-density interpolation, stride downsampling and smoothing.
//!
//! These operate on a [`PointSet`] and only change it on success; a failed
//! call leaves every curve untouched.

use crate::error::{EngineError, EngineResult, ValidationError};
use crate::fitter::{linspace, CurveFit, MIN_SPLINE_POINTS};
use crate::point::{x_bounds, Point};
use crate::point_set::PointSet;

/// Resamples the curve at `points_per_unit` points per x unit and stores the
/// result as the interpolated curve.
///
/// The input is the interpolated curve if present, else the working curve,
/// else the original curve. A smoothing spline set by [`apply_smoothing`] is
/// used as the evaluator when present; otherwise the input is fitted fresh
/// with exact interpolation. Returns the number of points produced.
pub fn interpolate(set: &mut PointSet, points_per_unit: f64) -> EngineResult<usize> {
    if !points_per_unit.is_finite() || points_per_unit <= 0.0 {
        return Err(EngineError::invalid_param(
            "points_per_unit",
            format!("must be positive, got {}", points_per_unit),
        ));
    }

    let input: Vec<Point> = match set.interpolated() {
        Some(points) => points.to_vec(),
        None if !set.points().is_empty() => set.points().to_vec(),
        None => set.original().to_vec(),
    };
    if input.len() < MIN_SPLINE_POINTS {
        return Err(ValidationError::InsufficientPoints {
            required: MIN_SPLINE_POINTS,
            found: input.len(),
        }
        .into());
    }

    let (min_x, max_x) = x_bounds(&input).unwrap_or((0.0, 0.0));
    let total_samples = (((max_x - min_x) * points_per_unit).round() as usize).max(2);

    let fit: CurveFit = match set.smoothing_spline() {
        Some(spline) => spline.clone().into(),
        None => CurveFit::fit(&input, 0.0)?,
    };

    let resampled: Vec<Point> = linspace(min_x, max_x, total_samples)
        .into_iter()
        .map(|x| Point::new(x, fit.evaluate(x)))
        .collect();

    log::debug!(
        "interpolated {} points into {} over [{}, {}]",
        input.len(),
        total_samples,
        min_x,
        max_x
    );
    set.set_interpolated(resampled);
    Ok(total_samples)
}

/// Replaces the working curve with every `stride`-th original point,
/// starting at index 0. The last original point is not forced in.
///
/// Recorded in the undo history; the original curve is never modified.
/// Returns the number of points kept.
pub fn downsample(set: &mut PointSet, stride: usize) -> EngineResult<usize> {
    let original = set.original();
    if original.is_empty() {
        return Err(ValidationError::NoOriginalPoints.into());
    }
    if stride == 0 {
        return Err(EngineError::invalid_param(
            "downsample_stride",
            "must be at least 1",
        ));
    }
    if stride >= original.len() {
        return Err(ValidationError::StrideTooLarge {
            stride,
            available: original.len(),
        }
        .into());
    }

    let kept: Vec<Point> = original.iter().step_by(stride).copied().collect();
    if kept.len() < 2 {
        return Err(ValidationError::InsufficientResult { found: kept.len() }.into());
    }

    let count = kept.len();
    log::debug!(
        "downsampled {} original points with stride {} to {}",
        original.len(),
        stride,
        count
    );
    set.replace_points(kept);
    Ok(count)
}

/// Sets the smoothing factor and fits a smoothing spline over the working curve.
///
/// `s == 0` clears any stored smoothing spline. On failure the previous
/// smoothing state is kept.
pub fn apply_smoothing(set: &mut PointSet, s: f64) -> EngineResult<()> {
    if !s.is_finite() || s < 0.0 {
        return Err(EngineError::invalid_param(
            "smoothing_factor",
            format!("must be a non-negative number, got {}", s),
        ));
    }
    if s == 0.0 {
        set.set_smoothing(0.0, None);
        return Ok(());
    }

    let spline = CurveFit::spline(set.points(), s)?;
    set.set_smoothing(s, Some(spline));
    Ok(())
}
