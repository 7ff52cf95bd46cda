//! Error types for model fitting and inference.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the model and the scalar math utilities.
///
/// Numerical-instability risks (sigmoid overflow, log of zero, near-singular
/// Hessians) are mitigated inside the math itself and never surface here.
/// Non-convergence at `max_iter` is a normal termination, not an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The label vector contains more than two distinct values.
    #[error("expected at most 2 distinct class labels, found {found}")]
    TooManyClasses { found: usize },

    /// The training set has no samples.
    #[error("training data is empty")]
    EmptyTrainingData,

    /// An operation requiring a fitted model was called before `fit`.
    #[error("model is not fitted; call fit() first")]
    NotFitted,

    /// Dimension disagreement between inputs, weights, or hyperparameters.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// The root-finder interval does not bracket a sign change.
    #[error("no root bracketed in [{lo}, {hi}]")]
    NoBracket { lo: f64, hi: f64 },

    /// The least-squares solver failed internally.
    #[error("linear solve failed: {0}")]
    LinearSolve(String),
}
