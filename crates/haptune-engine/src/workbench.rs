//! Editing session tying the curve, synthesis and configuration together.
//!
//! Every edit goes through [`Workbench`], which drops the cached envelope
//! and vibration after each successful change to the curve it is derived
//! from.

use crate::axes::AxisRange;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::fitter::{preview_curve, PREVIEW_RESOLUTION};
use crate::io::{curve_workbook, format_brace_csv, vibration_workbook, Workbook};
use crate::point::Point;
use crate::point_set::PointSet;
use crate::resample;
use crate::spectrum::{magnitude_spectrum, Spectrum};
use crate::synthesis::{Envelope, VibrationSignal, VibrationSynthesizer};

/// A curve editing session.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    points: PointSet,
    synthesizer: VibrationSynthesizer,
    config: EngineConfig,
}

impl Workbench {
    /// Creates a session with a validated config.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Curve state.
    pub fn point_set(&self) -> &PointSet {
        &self.points
    }

    /// Synthesis caches.
    pub fn synthesizer(&self) -> &VibrationSynthesizer {
        &self.synthesizer
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the configuration after validating it. Cached synthesis
    /// results are dropped since they may no longer match.
    pub fn set_config(&mut self, config: EngineConfig) -> EngineResult<()> {
        config.validate()?;
        self.config = config;
        self.invalidate_derived();
        Ok(())
    }

    /// The curve downstream consumers read: interpolated if present, else
    /// the working curve.
    pub fn working_points(&self) -> &[Point] {
        self.points.working_points()
    }

    /// Drops the cached envelope and vibration.
    pub fn invalidate_derived(&mut self) {
        self.synthesizer.invalidate();
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.points.add_point(x, y);
        self.invalidate_derived();
    }

    pub fn delete_point(&mut self, point: Point) {
        self.points.delete_point(point);
        self.invalidate_derived();
    }

    pub fn move_point(&mut self, old: Point, new: Point) {
        self.points.move_point(old, new);
        self.invalidate_derived();
    }

    /// Undoes the latest edit. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let restored = self.points.undo();
        if restored {
            self.invalidate_derived();
        }
        restored
    }

    pub fn reset(&mut self) {
        self.points.reset();
        self.invalidate_derived();
    }

    /// Loads a new curve, replacing the original.
    pub fn load(&mut self, points: impl Into<Vec<Point>>) {
        self.points.load(points);
        self.invalidate_derived();
    }

    pub fn clear_all(&mut self) {
        self.points.clear_all();
        self.invalidate_derived();
    }

    pub fn clear_interpolation(&mut self) {
        self.points.clear_interpolation();
        self.invalidate_derived();
    }

    /// Interpolates at the configured density.
    pub fn interpolate(&mut self) -> EngineResult<usize> {
        let points_per_unit = f64::from(self.config.points_per_unit);
        let count = keep_previous(
            "interpolation",
            resample::interpolate(&mut self.points, points_per_unit),
        )?;
        self.invalidate_derived();
        Ok(count)
    }

    /// Downsamples the original curve at the configured stride.
    pub fn downsample(&mut self) -> EngineResult<usize> {
        let stride = self.config.downsample_stride as usize;
        let count = keep_previous("downsampling", resample::downsample(&mut self.points, stride))?;
        self.invalidate_derived();
        Ok(count)
    }

    /// Fits the configured smoothing factor over the working curve.
    pub fn apply_smoothing(&mut self) -> EngineResult<()> {
        let s = self.config.smoothing_factor;
        keep_previous("smoothing", resample::apply_smoothing(&mut self.points, s))?;
        self.invalidate_derived();
        Ok(())
    }

    /// Sets the smoothing factor and applies it.
    pub fn set_smoothing_factor(&mut self, s: f64) -> EngineResult<()> {
        keep_previous("smoothing", resample::apply_smoothing(&mut self.points, s))?;
        self.config.smoothing_factor = s;
        self.invalidate_derived();
        Ok(())
    }

    /// Synthesizes vibration from the working curve with the configured
    /// tones. On failure the previous signal stays cached.
    pub fn generate_vibration(&mut self) -> EngineResult<&VibrationSignal> {
        let config = self.config.vibration_config();
        let result = self
            .synthesizer
            .generate(self.points.working_points(), &config);
        keep_previous("vibration synthesis", result)
    }

    /// Evaluates the envelope alone on the preview grid.
    pub fn prepare_envelope(&mut self) -> EngineResult<&Envelope> {
        let result = self
            .synthesizer
            .prepare_envelope(self.points.working_points());
        keep_previous("envelope", result)
    }

    /// Spectrum of the cached vibration, if one has been generated.
    pub fn spectrum(&self) -> Option<Spectrum> {
        self.synthesizer
            .signal()
            .map(|signal| magnitude_spectrum(&signal.amplitude, signal.sampling_rate))
    }

    /// Dense display curve through the working curve with the configured
    /// smoothing factor.
    pub fn preview(&self) -> EngineResult<Vec<Point>> {
        preview_curve(
            self.points.points(),
            self.config.smoothing_factor,
            PREVIEW_RESOLUTION,
        )
    }

    /// Axis limits fitted around the working curve.
    pub fn axis_range(&self) -> Option<AxisRange> {
        AxisRange::fit(self.points.points())
    }

    /// Brace CSV rendering of the working curve.
    pub fn export_brace_csv(&self) -> String {
        format_brace_csv(self.working_points())
    }

    /// Workbook with the interpolated and working curves.
    pub fn export_curve_workbook(&self) -> Workbook {
        curve_workbook(&self.points)
    }

    /// Workbook with the cached vibration, if any.
    pub fn export_vibration_workbook(&self) -> Option<Workbook> {
        self.synthesizer.signal().map(vibration_workbook)
    }
}

fn keep_previous<T>(operation: &str, result: EngineResult<T>) -> EngineResult<T> {
    if let Err(e) = &result {
        log::warn!(
            "{} failed [{}]: {}; keeping previous result",
            operation,
            e.code(),
            e
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::FrequencyComponent;

    fn hump() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, -5.0),
            Point::new(40.0, 0.0),
        ]
    }

    fn loaded() -> Workbench {
        let mut bench = Workbench::default();
        bench.load(hump());
        bench
    }

    #[test]
    fn test_new_validates_config() {
        let config = EngineConfig {
            sampling_rate: 0,
            ..EngineConfig::default()
        };
        assert!(Workbench::new(config).is_err());
        assert!(Workbench::new(EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_edits_invalidate_vibration() {
        let mut bench = loaded();
        bench.generate_vibration().unwrap();
        assert!(bench.synthesizer().signal().is_some());

        bench.add_point(50.0, 1.0);
        assert!(bench.synthesizer().signal().is_none());
        assert!(bench.synthesizer().envelope().is_none());

        bench.generate_vibration().unwrap();
        assert!(bench.undo());
        assert!(bench.synthesizer().signal().is_none());
    }

    #[test]
    fn test_undo_without_history_keeps_cache() {
        let mut bench = loaded();
        bench.generate_vibration().unwrap();
        assert!(!bench.undo());
        assert!(bench.synthesizer().signal().is_some());
    }

    #[test]
    fn test_interpolate_uses_config_density() {
        let mut bench = loaded();
        assert_eq!(bench.interpolate().unwrap(), 400);
        assert_eq!(bench.working_points().len(), 400);

        // vibration reads the interpolated curve
        let len = bench.generate_vibration().unwrap().len();
        assert_eq!(len, 40);
    }

    #[test]
    fn test_failed_interpolation_keeps_previous_result() {
        let mut bench = Workbench::default();
        bench.add_point(1.0, 1.0);
        bench.generate_vibration().unwrap();

        assert!(bench.interpolate().is_err());
        assert!(bench.point_set().interpolated().is_none());
        assert!(bench.synthesizer().signal().is_some());
    }

    #[test]
    fn test_failed_vibration_keeps_previous_signal() {
        let mut bench = loaded();
        let hash = bench.generate_vibration().unwrap().content_hash();

        let config = EngineConfig {
            frequency_components: vec![FrequencyComponent::new(100.0, 1.0).disabled()],
            ..EngineConfig::default()
        };
        bench.config = config;
        assert!(bench.generate_vibration().is_err());
        assert_eq!(bench.synthesizer().signal().unwrap().content_hash(), hash);
    }

    #[test]
    fn test_downsample_uses_config_stride() {
        let points: Vec<Point> = (0..100).map(|i| Point::new(i as f64, 0.0)).collect();
        let config = EngineConfig {
            downsample_stride: 20,
            ..EngineConfig::default()
        };
        let mut bench = Workbench::new(config).unwrap();
        bench.load(points);
        assert_eq!(bench.downsample().unwrap(), 5);
        assert_eq!(bench.point_set().points()[0], Point::new(0.0, 0.0));
        assert!(bench.undo());
        assert_eq!(bench.point_set().points().len(), 100);
    }

    #[test]
    fn test_smoothing_factor() {
        let mut bench = loaded();
        bench.set_smoothing_factor(2.0).unwrap();
        assert_eq!(bench.config().smoothing_factor, 2.0);
        assert!(bench.point_set().smoothing_spline().is_some());

        assert!(bench.set_smoothing_factor(-1.0).is_err());
        assert_eq!(bench.config().smoothing_factor, 2.0);
        assert!(bench.point_set().smoothing_spline().is_some());

        bench.set_smoothing_factor(0.0).unwrap();
        assert!(bench.point_set().smoothing_spline().is_none());
    }

    #[test]
    fn test_spectrum_needs_signal() {
        let mut bench = loaded();
        assert!(bench.spectrum().is_none());
        bench.generate_vibration().unwrap();
        let spectrum = bench.spectrum().unwrap();
        assert_eq!(spectrum.len(), 20);
    }

    #[test]
    fn test_exports() {
        let mut bench = loaded();
        assert!(bench.export_vibration_workbook().is_none());
        assert!(bench
            .export_brace_csv()
            .starts_with("angle [] = {0.0, 10.0, 20.0"));

        bench.interpolate().unwrap();
        assert_eq!(bench.export_curve_workbook().sheets.len(), 2);
        bench.generate_vibration().unwrap();
        assert!(bench.export_vibration_workbook().is_some());
    }

    #[test]
    fn test_preview_and_axes() {
        let bench = loaded();
        assert_eq!(bench.preview().unwrap().len(), PREVIEW_RESOLUTION);
        let range = bench.axis_range().unwrap();
        assert_eq!(range.x_min, -2.0);
        assert_eq!(range.x_max, 42.0);
    }
}
