//! Banded linear solvers used by the spline fits.

use crate::error::{EngineError, EngineResult};

/// Pivots smaller than this are treated as singular.
const PIVOT_EPSILON: f64 = 1e-300;

/// Solves a tridiagonal system with the Thomas algorithm.
///
/// `sub[i]` multiplies `u[i - 1]` in row `i` (`sub[0]` is ignored), `diag[i]`
/// multiplies `u[i]` and `sup[i]` multiplies `u[i + 1]` (last entry ignored).
pub(crate) fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> EngineResult<Vec<f64>> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    for i in 0..n {
        let (lower, prev_c, prev_d) = if i == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (sub[i], c_prime[i - 1], d_prime[i - 1])
        };
        let pivot = diag[i] - lower * prev_c;
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPSILON {
            return Err(EngineError::fitting(format!(
                "singular tridiagonal system at row {}",
                i
            )));
        }
        c_prime[i] = if i + 1 < n { sup[i] / pivot } else { 0.0 };
        d_prime[i] = (rhs[i] - lower * prev_d) / pivot;
    }

    let mut solution = vec![0.0; n];
    for i in (0..n).rev() {
        let next = if i + 1 < n { solution[i + 1] } else { 0.0 };
        solution[i] = d_prime[i] - c_prime[i] * next;
    }
    Ok(solution)
}

/// Symmetric positive definite matrix with two off-diagonals.
#[derive(Debug, Clone)]
pub(crate) struct Pentadiagonal {
    /// Main diagonal.
    pub diag: Vec<f64>,
    /// First off-diagonal, `m[j][j + 1]`.
    pub off1: Vec<f64>,
    /// Second off-diagonal, `m[j][j + 2]`.
    pub off2: Vec<f64>,
}

impl Pentadiagonal {
    pub(crate) fn zeros(n: usize) -> Self {
        Self {
            diag: vec![0.0; n],
            off1: vec![0.0; n],
            off2: vec![0.0; n],
        }
    }

    /// Solves `m * u = rhs` by banded Cholesky factorization.
    pub(crate) fn solve(&self, rhs: &[f64]) -> EngineResult<Vec<f64>> {
        let n = self.diag.len();
        let mut l0 = vec![0.0; n];
        let mut l1 = vec![0.0; n];
        let mut l2 = vec![0.0; n];

        for j in 0..n {
            let mut pivot = self.diag[j];
            if j >= 1 {
                pivot -= l1[j - 1] * l1[j - 1];
            }
            if j >= 2 {
                pivot -= l2[j - 2] * l2[j - 2];
            }
            if !pivot.is_finite() || pivot <= PIVOT_EPSILON {
                return Err(EngineError::fitting(format!(
                    "matrix is not positive definite at row {}",
                    j
                )));
            }
            l0[j] = pivot.sqrt();

            if j + 1 < n {
                let mut below = self.off1[j];
                if j >= 1 {
                    below -= l2[j - 1] * l1[j - 1];
                }
                l1[j] = below / l0[j];
            }
            if j + 2 < n {
                l2[j] = self.off2[j] / l0[j];
            }
        }

        let mut z = vec![0.0; n];
        for j in 0..n {
            let mut acc = rhs[j];
            if j >= 1 {
                acc -= l1[j - 1] * z[j - 1];
            }
            if j >= 2 {
                acc -= l2[j - 2] * z[j - 2];
            }
            z[j] = acc / l0[j];
        }

        let mut u = vec![0.0; n];
        for j in (0..n).rev() {
            let mut acc = z[j];
            if j + 1 < n {
                acc -= l1[j] * u[j + 1];
            }
            if j + 2 < n {
                acc -= l2[j] * u[j + 2];
            }
            u[j] = acc / l0[j];
        }
        Ok(u)
    }
}
