//! Editable curve storage with undo history.
//!
//! A [`PointSet`] owns the working curve, the original curve captured at load
//! time, the undo history, the interpolated curve produced by the resampler
//! and the smoothing state. The working curve is sorted ascending by x after
//! every public mutation.

use crate::fitter::CubicSpline;
use crate::point::{closest_point, find_near_duplicates, sort_points, Point};

/// Ordered curve with undo history and derived resampling state.
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Vec<Point>,
    original: Vec<Point>,
    history: Vec<Vec<Point>>,
    interpolated: Option<Vec<Point>>,
    smoothing_factor: f64,
    smoothing_spline: Option<CubicSpline>,
}

impl Default for PointSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PointSet {
    /// Creates a point set holding the single default point `(0, 0)` as both
    /// the working and the original curve.
    pub fn new() -> Self {
        Self {
            points: vec![Point::ORIGIN],
            original: vec![Point::ORIGIN],
            history: Vec::new(),
            interpolated: None,
            smoothing_factor: 0.0,
            smoothing_spline: None,
        }
    }

    /// Creates a point set loaded with `points`.
    pub fn from_points(points: impl Into<Vec<Point>>) -> Self {
        let mut set = Self::new();
        set.load(points);
        set
    }

    /// The working curve, sorted by x.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The original curve captured at load time.
    pub fn original(&self) -> &[Point] {
        &self.original
    }

    /// The interpolated curve, if the resampler produced one.
    pub fn interpolated(&self) -> Option<&[Point]> {
        self.interpolated.as_deref()
    }

    /// Number of undo snapshots.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Smoothing factor used for previews and new smoothing splines.
    pub fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    /// Smoothing spline fitted by the last `apply_smoothing`, if still valid.
    pub fn smoothing_spline(&self) -> Option<&CubicSpline> {
        self.smoothing_spline.as_ref()
    }

    /// Input for downstream consumers: the interpolated curve if present,
    /// else the working curve.
    pub fn working_points(&self) -> &[Point] {
        match &self.interpolated {
            Some(points) if !points.is_empty() => points,
            _ => &self.points,
        }
    }

    /// Adds a point. Duplicate x values are accepted.
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.record_history();
        self.points.push(Point::new(x, y));
        self.after_edit();
        log::debug!("added point ({}, {}); {} points", x, y, self.points.len());
    }

    /// Deletes the first point equal to `point`; absent points are ignored.
    pub fn delete_point(&mut self, point: Point) {
        self.record_history();
        match self.points.iter().position(|p| *p == point) {
            Some(index) => {
                self.points.remove(index);
                log::debug!("deleted point ({}, {})", point.x, point.y);
            }
            None => log::debug!("point ({}, {}) not found; nothing deleted", point.x, point.y),
        }
        self.after_edit();
    }

    /// Replaces `old` with `new`. If `old` is absent, `new` is simply added.
    pub fn move_point(&mut self, old: Point, new: Point) {
        self.record_history();
        if let Some(index) = self.points.iter().position(|p| *p == old) {
            self.points.remove(index);
        }
        self.points.push(new);
        self.after_edit();
        log::debug!("moved point ({}, {}) to ({}, {})", old.x, old.y, new.x, new.y);
    }

    /// Restores the curve from before the latest recorded mutation.
    ///
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.points = snapshot;
                self.after_edit();
                log::debug!("undo restored {} points", self.points.len());
                true
            }
            None => {
                log::debug!("undo with empty history");
                false
            }
        }
    }

    /// Restores the original curve, or the default point if there is none.
    pub fn reset(&mut self) {
        self.points = if self.original.is_empty() {
            vec![Point::ORIGIN]
        } else {
            self.original.clone()
        };
        self.after_edit();
        log::debug!("reset to {} points", self.points.len());
    }

    /// Replaces both the working and the original curve. Not undoable.
    pub fn load(&mut self, points: impl Into<Vec<Point>>) {
        let mut points = points.into();
        sort_points(&mut points);
        self.original = points.clone();
        self.points = points;
        self.after_edit();
        log::debug!("loaded {} points", self.points.len());
    }

    /// Clears everything back to a blank session: no original curve, the
    /// default point, no history and no derived state.
    pub fn clear_all(&mut self) {
        self.original.clear();
        self.points = vec![Point::ORIGIN];
        self.history.clear();
        self.smoothing_factor = 0.0;
        self.after_edit();
        log::debug!("cleared all points and history");
    }

    /// Drops the interpolated curve so consumers fall back to the working curve.
    pub fn clear_interpolation(&mut self) {
        self.interpolated = None;
    }

    /// The point closest to `(x, y)`.
    pub fn closest_point(&self, x: f64, y: f64) -> Option<Point> {
        closest_point(&self.points, x, y)
    }

    /// Index pairs of working points whose x differ by less than `tolerance`.
    pub fn near_duplicates(&self, tolerance: f64) -> Vec<(usize, usize)> {
        find_near_duplicates(&self.points, tolerance)
    }

    /// Replaces the working curve as an undoable edit.
    pub(crate) fn replace_points(&mut self, points: Vec<Point>) {
        self.record_history();
        self.points = points;
        self.after_edit();
        log::debug!("replaced working curve with {} points", self.points.len());
    }

    pub(crate) fn set_interpolated(&mut self, points: Vec<Point>) {
        self.interpolated = if points.is_empty() { None } else { Some(points) };
    }

    pub(crate) fn set_smoothing(&mut self, factor: f64, spline: Option<CubicSpline>) {
        self.smoothing_factor = factor;
        self.smoothing_spline = spline;
    }

    fn record_history(&mut self) {
        self.history.push(self.points.clone());
    }

    fn after_edit(&mut self) {
        sort_points(&mut self.points);
        self.interpolated = None;
        self.smoothing_spline = None;
    }
}
