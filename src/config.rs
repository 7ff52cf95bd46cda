//! Training configuration for the logistic regression model.

use ndarray::Array1;

use crate::error::{Error, Result};

/// Optimization scheme used by `fit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizerKind {
    /// Iteratively Reweighted Least Squares, equivalent to Newton-Raphson on
    /// the logistic log-likelihood. Solves `H·Δ = g` by least squares each
    /// iteration.
    #[default]
    Irls,

    /// First-order steepest descent with a geometrically decaying learning
    /// rate.
    SteepestDescent,
}

/// L2 penalty strength, either shared across dimensions or per-dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Penalty {
    /// One λ applied to every weight.
    Scalar(f64),
    /// One λ per weight dimension (length must equal the feature count).
    PerDimension(Array1<f64>),
}

impl Penalty {
    /// Penalty strength for dimension `j`.
    #[inline]
    pub fn at(&self, j: usize) -> f64 {
        match self {
            Penalty::Scalar(lambda) => *lambda,
            Penalty::PerDimension(lambdas) => lambdas[j],
        }
    }

    /// Validates the penalty against the feature count `d`.
    pub fn validate(&self, d: usize) -> Result<()> {
        match self {
            Penalty::Scalar(_) => Ok(()),
            Penalty::PerDimension(lambdas) if lambdas.len() == d => Ok(()),
            Penalty::PerDimension(lambdas) => Err(Error::ShapeMismatch {
                expected: format!("penalty vector of length {d}"),
                got: format!("length {}", lambdas.len()),
            }),
        }
    }
}

impl From<f64> for Penalty {
    fn from(lambda: f64) -> Self {
        Penalty::Scalar(lambda)
    }
}

impl From<Array1<f64>> for Penalty {
    fn from(lambdas: Array1<f64>) -> Self {
        Penalty::PerDimension(lambdas)
    }
}

/// Verbosity of training progress output (emitted through the `log` facade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// No progress output.
    Silent,
    /// Periodic progress lines and a final summary.
    #[default]
    Info,
    /// A progress line for every iteration.
    Debug,
}

/// Hyperparameters for [`LogisticRegression`](crate::LogisticRegression).
///
/// Construct with struct-update syntax:
///
/// ```
/// use logreg::{LogisticRegressionConfig, OptimizerKind};
///
/// let config = LogisticRegressionConfig {
///     lambda: 1e-2.into(),
///     optimizer: OptimizerKind::SteepestDescent,
///     learning_rate: 1e-3,
///     ..Default::default()
/// };
/// ```
///
/// The bundle is immutable for the duration of one fit; the decaying
/// learning rate is tracked inside the fit loop, not written back here.
#[derive(Debug, Clone)]
pub struct LogisticRegressionConfig {
    /// L2 regularization strength λ.
    pub lambda: Penalty,

    /// Convergence tolerance on the gradient L2 norm.
    pub tol: f64,

    /// Maximum number of optimizer iterations. Exhausting the cap is normal
    /// non-convergent termination, not an error.
    pub max_iter: usize,

    /// Update rule used each iteration.
    pub optimizer: OptimizerKind,

    /// Initial step size (steepest descent only).
    pub learning_rate: f64,

    /// Geometric learning-rate decay factor (steepest descent only).
    pub decay_rate: f64,

    /// Record per-iteration {objective, weights, gradient} snapshots.
    pub record_trace: bool,

    /// Training progress verbosity.
    pub verbosity: Verbosity,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            lambda: Penalty::Scalar(1e-3),
            tol: 1e-5,
            max_iter: 100,
            optimizer: OptimizerKind::Irls,
            learning_rate: 1e-4,
            decay_rate: 1e-5,
            record_trace: false,
            verbosity: Verbosity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn default_config() {
        let config = LogisticRegressionConfig::default();
        assert_eq!(config.lambda, Penalty::Scalar(1e-3));
        assert_eq!(config.tol, 1e-5);
        assert_eq!(config.max_iter, 100);
        assert_eq!(config.optimizer, OptimizerKind::Irls);
        assert!(!config.record_trace);
    }

    #[test]
    fn struct_update_construction() {
        let config = LogisticRegressionConfig {
            max_iter: 500,
            optimizer: OptimizerKind::SteepestDescent,
            ..Default::default()
        };
        assert_eq!(config.max_iter, 500);
        assert_eq!(config.tol, 1e-5);
    }

    #[test]
    fn per_dimension_penalty_validates_length() {
        let penalty = Penalty::PerDimension(array![1.0, 2.0, 3.0]);
        assert!(penalty.validate(3).is_ok());
        assert!(penalty.validate(2).is_err());
        assert_eq!(penalty.at(1), 2.0);
    }

    #[test]
    fn scalar_penalty_is_uniform() {
        let penalty: Penalty = 0.5.into();
        assert!(penalty.validate(10).is_ok());
        assert_eq!(penalty.at(0), 0.5);
        assert_eq!(penalty.at(9), 0.5);
    }
}
