//! The public logistic regression model.
//!
//! [`LogisticRegression`] is an explicit state machine: it starts unfitted,
//! and operations that need weights or class labels return
//! [`Error::NotFitted`] until a `fit` succeeds. A successful fit replaces the
//! fitted state wholesale, so refitting the same instance is well-defined.

use std::collections::BTreeSet;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::config::LogisticRegressionConfig;
use crate::error::{Error, Result};
use crate::problem::{Problem, MIN_PROB};
use crate::trainer::{self, FitSummary};

/// Default decision threshold for [`LogisticRegression::predict`].
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// State populated by a successful fit.
#[derive(Debug, Clone)]
struct Fitted<L> {
    weights: Array1<f64>,
    /// Sorted distinct labels; `class_labels[1]` is the positive class.
    class_labels: [L; 2],
}

/// Regularized binary logistic regression classifier.
///
/// Trains by IRLS/Newton-Raphson or steepest descent according to the
/// configured [`OptimizerKind`](crate::OptimizerKind). The label type `L` is
/// any totally ordered, clonable type; the lexicographically larger of the
/// two distinct labels observed at fit time is the positive class.
///
/// # Example
///
/// ```
/// use logreg::{LogisticRegression, LogisticRegressionConfig};
/// use ndarray::array;
///
/// let x = array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 0.0, 1.0]];
/// let y = vec!["B", "M", "M", "B"];
///
/// let mut model = LogisticRegression::new(LogisticRegressionConfig::default());
/// let summary = model.fit(x.view(), &y).unwrap();
/// assert!(summary.converged);
///
/// let predictions = model.predict(x.view()).unwrap();
/// assert_eq!(predictions, y);
/// ```
#[derive(Debug, Clone)]
pub struct LogisticRegression<L> {
    config: LogisticRegressionConfig,
    fitted: Option<Fitted<L>>,
}

impl<L> Default for LogisticRegression<L> {
    fn default() -> Self {
        Self::new(LogisticRegressionConfig::default())
    }
}

impl<L> LogisticRegression<L> {
    /// Creates an unfitted model with the given hyperparameters.
    pub fn new(config: LogisticRegressionConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// The hyperparameter bundle this model was constructed with.
    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    /// Whether a fit has completed on this instance.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn fitted(&self) -> Result<&Fitted<L>> {
        self.fitted.as_ref().ok_or(Error::NotFitted)
    }

    /// The fitted weight vector.
    pub fn weights(&self) -> Result<&Array1<f64>> {
        Ok(&self.fitted()?.weights)
    }

    /// The sorted class labels; index 1 is the positive class.
    pub fn class_labels(&self) -> Result<&[L; 2]> {
        Ok(&self.fitted()?.class_labels)
    }
}

impl<L: Ord + Clone> LogisticRegression<L> {
    /// Fits the model from zero-initialized weights.
    ///
    /// Validates that `y` holds at most two distinct values, then iterates
    /// the configured update rule until the objective reaches zero, the
    /// gradient L2 norm falls below the tolerance, or `max_iter` steps ran.
    /// Exhausting `max_iter` still returns `Ok` with
    /// [`converged`](FitSummary::converged) unset.
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[L]) -> Result<FitSummary> {
        let w0 = Array1::zeros(x.ncols());
        self.fit_with_initial(x, y, w0)
    }

    /// Fits the model from a caller-supplied initial weight vector.
    pub fn fit_with_initial(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: &[L],
        w_init: Array1<f64>,
    ) -> Result<FitSummary> {
        check_rows(x, y.len())?;
        if y.is_empty() {
            return Err(Error::EmptyTrainingData);
        }
        if w_init.len() != x.ncols() {
            return Err(Error::ShapeMismatch {
                expected: format!("initial weights of length {}", x.ncols()),
                got: format!("length {}", w_init.len()),
            });
        }
        self.config.lambda.validate(x.ncols())?;

        let class_labels = extract_class_labels(y)?;
        let y_pos = positive_indicator(y, &class_labels[1]);
        let problem = Problem::new(x, y_pos, &self.config.lambda);

        let mut weights = w_init;
        let summary = trainer::run(&problem, &mut weights, &self.config)?;

        self.fitted = Some(Fitted {
            weights,
            class_labels,
        });
        Ok(summary)
    }

    /// P(y = positive class | x) for each row, clamped into
    /// `[1e-15, 1 − 1e-15]`.
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        self.predict_proba_with_floor(x, MIN_PROB)
    }

    /// [`predict_proba`](Self::predict_proba) with an explicit clamp floor.
    pub fn predict_proba_with_floor(
        &self,
        x: ArrayView2<'_, f64>,
        min_prob: f64,
    ) -> Result<Array1<f64>> {
        let fitted = self.fitted()?;
        check_cols(x, fitted.weights.len())?;
        let xw = x.dot(&fitted.weights);
        Ok(xw.mapv(|a| crate::math::logistic(a).clamp(min_prob, 1.0 - min_prob)))
    }

    /// Predicted class label per row at the default 0.5 threshold.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<L>> {
        self.predict_with_threshold(x, DEFAULT_THRESHOLD)
    }

    /// Predicted class label per row: positive when the probability is at
    /// least `threshold`, negative otherwise.
    pub fn predict_with_threshold(
        &self,
        x: ArrayView2<'_, f64>,
        threshold: f64,
    ) -> Result<Vec<L>> {
        let proba = self.predict_proba(x)?;
        let fitted = self.fitted()?;
        Ok(proba
            .iter()
            .map(|&p| {
                if p >= threshold {
                    fitted.class_labels[1].clone()
                } else {
                    fitted.class_labels[0].clone()
                }
            })
            .collect())
    }

    /// Negative regularized log-likelihood at the fitted weights.
    pub fn objective(&self, x: ArrayView2<'_, f64>, y: &[L]) -> Result<f64> {
        let fitted = self.fitted()?;
        let w = fitted.weights.clone();
        self.objective_at(x, y, w.view())
    }

    /// Gradient of the objective at the fitted weights (length D).
    pub fn gradient(&self, x: ArrayView2<'_, f64>, y: &[L]) -> Result<Array1<f64>> {
        let fitted = self.fitted()?;
        let w = fitted.weights.clone();
        self.gradient_at(x, y, w.view())
    }

    /// Hessian of the objective at the fitted weights (D×D, PSD).
    pub fn hessian(&self, x: ArrayView2<'_, f64>, y: &[L]) -> Result<Array2<f64>> {
        let fitted = self.fitted()?;
        let w = fitted.weights.clone();
        self.hessian_at(x, y, w.view())
    }

    /// Objective at an explicit weight vector.
    ///
    /// Pure: probing the objective surface at arbitrary points never touches
    /// the fitted weights, so no overwrite-and-restore is ever needed.
    pub fn objective_at(
        &self,
        x: ArrayView2<'_, f64>,
        y: &[L],
        w: ArrayView1<'_, f64>,
    ) -> Result<f64> {
        Ok(self.problem_for(x, y, w.len())?.objective(w))
    }

    /// Gradient at an explicit weight vector. Pure.
    pub fn gradient_at(
        &self,
        x: ArrayView2<'_, f64>,
        y: &[L],
        w: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>> {
        Ok(self.problem_for(x, y, w.len())?.gradient(w))
    }

    /// Hessian at an explicit weight vector. Pure.
    pub fn hessian_at(
        &self,
        x: ArrayView2<'_, f64>,
        y: &[L],
        w: ArrayView1<'_, f64>,
    ) -> Result<Array2<f64>> {
        Ok(self.problem_for(x, y, w.len())?.hessian(w))
    }

    /// Binds (x, y) into a problem using the fitted class designation.
    fn problem_for<'a, 'p>(
        &'p self,
        x: ArrayView2<'a, f64>,
        y: &[L],
        w_len: usize,
    ) -> Result<Problem<'a, 'p>> {
        let fitted = self.fitted()?;
        check_rows(x, y.len())?;
        check_cols(x, w_len)?;
        let y_pos = positive_indicator(y, &fitted.class_labels[1]);
        Ok(Problem::new(x, y_pos, &self.config.lambda))
    }
}

/// Sorted distinct labels of `y`; fatal when more than two are present.
///
/// A single distinct label is accepted degenerately: both slots hold that
/// label and every sample counts as positive.
fn extract_class_labels<L: Ord + Clone>(y: &[L]) -> Result<[L; 2]> {
    let distinct: BTreeSet<&L> = y.iter().collect();
    match distinct.len() {
        0 => Err(Error::EmptyTrainingData),
        1 => {
            let only = (*distinct.iter().next().unwrap()).clone();
            Ok([only.clone(), only])
        }
        2 => {
            let mut iter = distinct.into_iter();
            let negative = iter.next().unwrap().clone();
            let positive = iter.next().unwrap().clone();
            Ok([negative, positive])
        }
        found => Err(Error::TooManyClasses { found }),
    }
}

/// 1.0 where the label equals the positive class, 0.0 elsewhere.
fn positive_indicator<L: Ord>(y: &[L], positive: &L) -> Array1<f64> {
    Array1::from_iter(y.iter().map(|l| if l == positive { 1.0 } else { 0.0 }))
}

fn check_rows(x: ArrayView2<'_, f64>, y_len: usize) -> Result<()> {
    if x.nrows() != y_len {
        return Err(Error::ShapeMismatch {
            expected: format!("{} labels for {} rows", x.nrows(), x.nrows()),
            got: format!("{y_len} labels"),
        });
    }
    Ok(())
}

fn check_cols(x: ArrayView2<'_, f64>, w_len: usize) -> Result<()> {
    if x.ncols() != w_len {
        return Err(Error::ShapeMismatch {
            expected: format!("{w_len} feature columns"),
            got: format!("{} columns", x.ncols()),
        });
    }
    Ok(())
}
