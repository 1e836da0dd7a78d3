//! Cubic smoothing spline with a residual bound.
//!
//! Finds the natural cubic spline `f` minimizing `∫ f''²` subject to
//! `Σ (f(x_i) - y_i)² <= s`. For a Lagrange parameter `p` the interior
//! unknowns solve `(QᵀQ + p T) u = Qᵀy`; the knot values are `y - Q u`, the
//! second derivatives `p u`, and the residual `‖Q u‖²` decreases from the
//! least-squares line residual at `p = 0` towards zero as `p` grows.

use super::banded::Pentadiagonal;
use super::spline::CubicSpline;
use crate::error::{EngineError, EngineResult};
use crate::point::Point;

/// Relative tolerance on the residual bound.
const RESIDUAL_TOLERANCE: f64 = 1e-3;

/// Upper bound on bracketing and bisection steps.
const MAX_ITERATIONS: usize = 200;

/// Banded pieces of the smoothing system for one point set.
struct SmoothingSystem {
    y: Vec<f64>,
    /// Column `j` of Q holds `qa[j]`, `qb[j]`, `qc[j]` in rows `j`, `j+1`, `j+2`.
    qa: Vec<f64>,
    qb: Vec<f64>,
    qc: Vec<f64>,
    qtq: Pentadiagonal,
    t_diag: Vec<f64>,
    t_off: Vec<f64>,
    qty: Vec<f64>,
}

/// Solution of the system for a particular `p`.
struct Solution {
    u: Vec<f64>,
    qu: Vec<f64>,
    residual: f64,
}

impl SmoothingSystem {
    fn new(points: &[Point]) -> Self {
        let x: Vec<f64> = points.iter().map(|p| p.x).collect();
        let y: Vec<f64> = points.iter().map(|p| p.y).collect();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let m = points.len() - 2;

        let mut qa = vec![0.0; m];
        let mut qb = vec![0.0; m];
        let mut qc = vec![0.0; m];
        let mut t_diag = vec![0.0; m];
        let mut t_off = vec![0.0; m];
        let mut qty = vec![0.0; m];
        for j in 0..m {
            qa[j] = 1.0 / h[j];
            qc[j] = 1.0 / h[j + 1];
            qb[j] = -qa[j] - qc[j];
            t_diag[j] = (h[j] + h[j + 1]) / 3.0;
            t_off[j] = if j + 1 < m { h[j + 1] / 6.0 } else { 0.0 };
            qty[j] = (y[j + 2] - y[j + 1]) / h[j + 1] - (y[j + 1] - y[j]) / h[j];
        }

        let mut qtq = Pentadiagonal::zeros(m);
        for j in 0..m {
            qtq.diag[j] = qa[j] * qa[j] + qb[j] * qb[j] + qc[j] * qc[j];
            if j + 1 < m {
                qtq.off1[j] = qb[j] * qa[j + 1] + qc[j] * qb[j + 1];
            }
            if j + 2 < m {
                qtq.off2[j] = qc[j] * qa[j + 2];
            }
        }

        Self {
            y,
            qa,
            qb,
            qc,
            qtq,
            t_diag,
            t_off,
            qty,
        }
    }

    fn solve(&self, p: f64) -> EngineResult<Solution> {
        let mut matrix = self.qtq.clone();
        for j in 0..matrix.diag.len() {
            matrix.diag[j] += p * self.t_diag[j];
            matrix.off1[j] += p * self.t_off[j];
        }
        let u = matrix.solve(&self.qty)?;

        let mut qu = vec![0.0; self.y.len()];
        for (j, &uj) in u.iter().enumerate() {
            qu[j] += self.qa[j] * uj;
            qu[j + 1] += self.qb[j] * uj;
            qu[j + 2] += self.qc[j] * uj;
        }
        let residual = qu.iter().map(|v| v * v).sum();
        Ok(Solution { u, qu, residual })
    }

    /// Natural scale of `p` where both matrix terms have similar weight.
    fn p_scale(&self) -> f64 {
        let qtq_trace: f64 = self.qtq.diag.iter().sum();
        let t_trace: f64 = self.t_diag.iter().sum();
        qtq_trace / t_trace
    }

    fn into_spline(self, points: &[Point], p: f64, solution: Solution, s: f64) -> CubicSpline {
        let knots: Vec<f64> = points.iter().map(|pt| pt.x).collect();
        let values: Vec<f64> = self
            .y
            .iter()
            .zip(&solution.qu)
            .map(|(y, qu)| y - qu)
            .collect();
        let mut second = vec![0.0; knots.len()];
        for (j, uj) in solution.u.iter().enumerate() {
            second[j + 1] = p * uj;
        }
        CubicSpline::from_parts(knots, values, second, s)
    }
}

/// Fits the smoothing spline. `points` are sorted, strictly increasing,
/// at least four long, and `s > 0`.
pub(crate) fn fit(points: &[Point], s: f64) -> EngineResult<CubicSpline> {
    let system = SmoothingSystem::new(points);

    let line = system.solve(0.0)?;
    if line.residual <= s {
        log::debug!(
            "smoothing bound {} admits the least-squares line (residual {})",
            s,
            line.residual
        );
        return Ok(system.into_spline(points, 0.0, line, s));
    }

    // bracket the root of residual(p) = s in log space
    let scale = system.p_scale();
    if !scale.is_finite() || scale <= 0.0 {
        return Err(EngineError::fitting("degenerate knot spacing"));
    }
    let mut lo = scale;
    let mut hi = scale;
    let mut iterations = 0;
    while system.solve(hi)?.residual > s {
        hi *= 10.0;
        iterations += 1;
        if iterations > MAX_ITERATIONS || !hi.is_finite() {
            return Err(EngineError::fitting(format!(
                "smoothing factor {} is too small to satisfy",
                s
            )));
        }
    }
    while system.solve(lo)?.residual <= s {
        lo /= 10.0;
        iterations += 1;
        if iterations > MAX_ITERATIONS || lo == 0.0 {
            return Err(EngineError::fitting(format!(
                "could not bracket smoothing parameter for s = {}",
                s
            )));
        }
    }

    // residual(lo) > s >= residual(hi)
    let mut best_p = hi;
    let mut best = system.solve(hi)?;
    for _ in 0..MAX_ITERATIONS {
        if (best.residual - s).abs() <= RESIDUAL_TOLERANCE * s {
            break;
        }
        let mid = (lo * hi).sqrt();
        let candidate = system.solve(mid)?;
        if candidate.residual > s {
            lo = mid;
        } else {
            hi = mid;
            best_p = mid;
            best = candidate;
        }
        if hi / lo < 1.0 + 1e-12 {
            break;
        }
    }

    log::debug!(
        "smoothing spline: p = {:.6e}, residual = {:.6e}, bound = {}",
        best_p,
        best.residual,
        s
    );
    Ok(system.into_spline(points, best_p, best, s))
}
