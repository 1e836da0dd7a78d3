//! Tests for the curve fitting policy.

use super::*;
use crate::error::EngineError;

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&p| Point::from(p)).collect()
}

fn assert_close(got: f64, want: f64, tol: f64) {
    assert!(
        (got - want).abs() <= tol,
        "expected {}, got {} (tolerance {})",
        want,
        got,
        tol
    );
}

#[test]
fn test_three_points_use_linear() {
    let points = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, -5.0)]);
    let fit = CurveFit::fit(&points, 0.0).unwrap();
    assert_eq!(fit.kind(), FitKind::Linear);

    // piecewise-linear values on the grid
    let grid = linspace(0.0, 20.0, 9);
    let expected = [0.0, 1.25, 2.5, 3.75, 5.0, 2.5, 0.0, -2.5, -5.0];
    for (x, want) in grid.iter().zip(expected) {
        assert_close(fit.evaluate(*x), want, 1e-12);
    }
}

#[test]
fn test_linear_clamps_outside_hull() {
    let points = pts(&[(0.0, 1.0), (1.0, 3.0)]);
    let fit = CurveFit::fit(&points, 0.0).unwrap();
    assert_eq!(fit.evaluate(-5.0), 1.0);
    assert_eq!(fit.evaluate(7.0), 3.0);
}

#[test]
fn test_duplicate_x_falls_back_to_linear() {
    let points = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0), (2.0, 0.0), (3.0, 1.0)]);
    let fit = CurveFit::fit(&points, 0.0).unwrap();
    assert_eq!(fit.kind(), FitKind::Linear);
    assert_close(fit.evaluate(2.5), 0.5, 1e-12);
}

#[test]
fn test_unsorted_input_falls_back_to_linear() {
    let points = pts(&[(30.0, -5.0), (0.0, 0.0), (20.0, 0.0), (10.0, 5.0)]);
    let fit = CurveFit::fit(&points, 0.0).unwrap();
    assert_eq!(fit.kind(), FitKind::Linear);
    // interpolates the sorted points
    assert_close(fit.evaluate(10.0), 5.0, 1e-12);
    assert_close(fit.evaluate(5.0), 2.5, 1e-12);
    assert_close(fit.evaluate(25.0), -2.5, 1e-12);
}

#[test]
fn test_sorted_input_with_same_points_uses_spline() {
    let points = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0), (30.0, -5.0)]);
    assert_eq!(
        CurveFit::fit(&points, 0.0).unwrap().kind(),
        FitKind::InterpolatingSpline
    );
}

#[test]
fn test_too_few_points() {
    let err = CurveFit::fit(&pts(&[(0.0, 0.0)]), 0.0).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::InsufficientPoints {
            required: 2,
            found: 1
        })
    ));
}

#[test]
fn test_negative_smoothing_rejected() {
    let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
    assert!(CurveFit::fit(&points, -1.0).is_err());
    assert!(CurveFit::fit(&points, f64::NAN).is_err());
}

#[test]
fn test_interpolating_spline_passes_through_points() {
    let points = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0), (30.0, -5.0), (40.0, 0.0)]);
    let fit = CurveFit::fit(&points, 0.0).unwrap();
    assert_eq!(fit.kind(), FitKind::InterpolatingSpline);
    for p in &points {
        assert_close(fit.evaluate(p.x), p.y, 1e-9);
    }
}

#[test]
fn test_four_points_reproduce_their_cubic() {
    let f = |x: f64| x * x * x - 2.0 * x + 1.0;
    let points: Vec<Point> = [0.0, 1.0, 3.0, 4.0]
        .iter()
        .map(|&x| Point::new(x, f(x)))
        .collect();
    let fit = CurveFit::fit(&points, 0.0).unwrap();
    for x in [0.5, 2.0, 2.75, 3.5] {
        assert_close(fit.evaluate(x), f(x), 1e-9);
    }
}

#[test]
fn test_not_a_knot_reproduces_cubic_on_uneven_grid() {
    let f = |x: f64| 0.5 * x * x * x - x * x + 3.0;
    let xs = [-2.0, -1.5, 0.0, 0.25, 1.0, 2.5, 4.0];
    let points: Vec<Point> = xs.iter().map(|&x| Point::new(x, f(x))).collect();
    let fit = CurveFit::fit(&points, 0.0).unwrap();
    for x in linspace(-2.0, 4.0, 37) {
        assert_close(fit.evaluate(x), f(x), 1e-8);
    }
}

#[test]
fn test_five_samples_of_a_cubic_are_reproduced_exactly() {
    let f = |x: f64| 2.0 * x * x * x - 3.0 * x * x + 0.5 * x - 4.0;
    let points: Vec<Point> = [0.0, 1.0, 2.5, 3.0, 5.0]
        .iter()
        .map(|&x| Point::new(x, f(x)))
        .collect();
    let spline = CurveFit::spline(&points, 0.0).unwrap();
    assert_eq!(spline.domain(), (0.0, 5.0));
    assert_eq!(spline.knots(), &[0.0, 1.0, 2.5, 3.0, 5.0]);
    assert_eq!(spline.values().len(), 5);

    // f'' = 12x - 6 at every knot
    for (x, c) in spline.knots().iter().zip(spline.second_derivatives()) {
        assert_close(*c, 12.0 * x - 6.0, 1e-9);
    }
    for x in linspace(0.0, 5.0, 41) {
        assert_close(spline.evaluate(x), f(x), 1e-9);
    }
}

#[test]
fn test_not_a_knot_third_derivative_is_continuous_at_inner_ends() {
    let points = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0), (30.0, -5.0), (40.0, 0.0), (55.0, 2.0)]);
    let spline = CurveFit::spline(&points, 0.0).unwrap();
    let x = spline.knots();
    let c = spline.second_derivatives();
    let third = |i: usize| (c[i + 1] - c[i]) / (x[i + 1] - x[i]);
    let n = x.len() - 1;

    assert_close(third(0), third(1), 1e-12);
    assert_close(third(n - 2), third(n - 1), 1e-12);
    // a natural spline would have zero curvature at the ends
    assert!(c[0].abs() > 1e-3);
    for (value, p) in spline.values().iter().zip(&points) {
        assert_close(*value, p.y, 1e-12);
    }
}

#[test]
fn test_smoothing_spline_respects_residual_bound() {
    let points: Vec<Point> = (0..12)
        .map(|i| {
            let x = i as f64;
            let noise = if i % 2 == 0 { 0.4 } else { -0.4 };
            Point::new(x, (x / 2.0).sin() * 3.0 + noise)
        })
        .collect();
    let s = 1.0;
    let fit = CurveFit::fit(&points, s).unwrap();
    assert_eq!(fit.kind(), FitKind::SmoothingSpline);

    let residual: f64 = points
        .iter()
        .map(|p| (fit.evaluate(p.x) - p.y).powi(2))
        .sum();
    assert!(residual <= s * (1.0 + 1e-9), "residual {} exceeds {}", residual, s);
    assert!(residual >= s * (1.0 - 2e-3), "residual {} far below {}", residual, s);
}

#[test]
fn test_large_smoothing_gives_least_squares_line() {
    let points = pts(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0), (4.0, 2.0)]);
    let fit = CurveFit::fit(&points, 1e6).unwrap();

    // least squares: slope 0.5, intercept 0.6
    for x in [0.0, 1.5, 4.0] {
        assert_close(fit.evaluate(x), 0.6 + 0.5 * x, 1e-9);
    }
}

#[test]
fn test_smoothing_collinear_points_stays_on_line() {
    let points = pts(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]);
    let fit = CurveFit::fit(&points, 0.5).unwrap();
    assert_close(fit.evaluate(1.5), 4.0, 1e-9);
}

#[test]
fn test_spline_rejects_non_finite() {
    let points = pts(&[(0.0, 0.0), (1.0, f64::INFINITY), (2.0, 0.0), (3.0, 1.0)]);
    let err = CurveFit::fit(&points, 0.0).unwrap_err();
    assert_eq!(err.category(), "numerical");
}

#[test]
fn test_linspace() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    let grid = linspace(0.0, 40.0, 400);
    assert_eq!(grid.len(), 400);
    assert_eq!(grid[0], 0.0);
    assert_eq!(grid[399], 40.0);
}

#[test]
fn test_preview_curve() {
    let points = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0), (30.0, -5.0)]);
    let preview = preview_curve(&points, 0.0, PREVIEW_RESOLUTION).unwrap();
    assert_eq!(preview.len(), 500);
    assert_eq!(preview[0].x, 0.0);
    assert_eq!(preview[499].x, 30.0);
    assert_close(preview[499].y, -5.0, 1e-9);
}
