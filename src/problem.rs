//! The penalized negative log-likelihood as pure functions of the weights.
//!
//! [`Problem`] borrows the design matrix, the positive-class indicator
//! derived from the labels, and the penalty, and evaluates the objective,
//! gradient and Hessian at any explicit weight vector. Diagnostic probing of
//! the objective surface therefore never needs to touch model state.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::config::Penalty;
use crate::math::logistic;

/// Probability clamp applied by `probabilities`.
///
/// Keeps every probability inside `[MIN_PROB, 1 − MIN_PROB]` so downstream
/// log-likelihood terms never evaluate ln(0).
pub const MIN_PROB: f64 = 1e-15;

/// A bound binary classification problem.
///
/// `y_pos[i]` is 1.0 where sample `i` carries the positive (lexicographically
/// larger) class label and 0.0 otherwise.
pub(crate) struct Problem<'a, 'p> {
    x: ArrayView2<'a, f64>,
    y_pos: Array1<f64>,
    penalty: &'p Penalty,
}

impl<'a, 'p> Problem<'a, 'p> {
    pub(crate) fn new(x: ArrayView2<'a, f64>, y_pos: Array1<f64>, penalty: &'p Penalty) -> Self {
        debug_assert_eq!(x.nrows(), y_pos.len());
        Self { x, y_pos, penalty }
    }

    /// Number of weight dimensions.
    pub(crate) fn dim(&self) -> usize {
        self.x.ncols()
    }

    /// P(y = positive | x) per row, σ(X·w) clamped into
    /// `[min_prob, 1 − min_prob]`.
    pub(crate) fn probabilities_with_floor(
        &self,
        w: ArrayView1<'_, f64>,
        min_prob: f64,
    ) -> Array1<f64> {
        let xw = self.x.dot(&w);
        xw.mapv(|a| logistic(a).clamp(min_prob, 1.0 - min_prob))
    }

    pub(crate) fn probabilities(&self, w: ArrayView1<'_, f64>) -> Array1<f64> {
        self.probabilities_with_floor(w, MIN_PROB)
    }

    /// Negative regularized log-likelihood.
    ///
    /// −Σ_{y=pos} ln(p) − Σ_{y=neg} ln(1−p) + ½·Σ_j λ_j w_j², evaluated on
    /// the clamped probabilities so perfectly separated samples contribute a
    /// large finite loss instead of infinity.
    pub(crate) fn objective(&self, w: ArrayView1<'_, f64>) -> f64 {
        let p = self.probabilities(w);
        let mut loss = 0.0;
        for (pi, yi) in p.iter().zip(self.y_pos.iter()) {
            if *yi == 1.0 {
                loss -= pi.ln();
            } else {
                loss -= (1.0 - pi).ln();
            }
        }
        let regularizer: f64 = w
            .iter()
            .enumerate()
            .map(|(j, wj)| 0.5 * self.penalty.at(j) * wj * wj)
            .sum();
        loss + regularizer
    }

    /// Gradient ∂L/∂w = Xᵀ(p − 1[y=pos]) + λ ⊙ w, length D.
    pub(crate) fn gradient(&self, w: ArrayView1<'_, f64>) -> Array1<f64> {
        let p = self.probabilities(w);
        let residual = &p - &self.y_pos;
        let mut g = self.x.t().dot(&residual);
        for (j, gj) in g.iter_mut().enumerate() {
            *gj += self.penalty.at(j) * w[j];
        }
        g
    }

    /// Hessian ∂²L/∂w² = Xᵀ diag(p(1−p)) X + diag(λ), D×D.
    ///
    /// Built by scaling rows of X by p(1−p) rather than materializing the
    /// N×N diagonal. Both terms are PSD, so IRLS steps stay well-posed up to
    /// numerical conditioning.
    pub(crate) fn hessian(&self, w: ArrayView1<'_, f64>) -> Array2<f64> {
        let p = self.probabilities(w);
        let mut weighted = self.x.to_owned();
        for (mut row, pi) in weighted.rows_mut().into_iter().zip(p.iter()) {
            let ri = pi * (1.0 - pi);
            row.mapv_inplace(|v| v * ri);
        }
        let mut h = self.x.t().dot(&weighted);
        for j in 0..h.nrows() {
            h[[j, j]] += self.penalty.at(j);
        }
        h
    }
}
