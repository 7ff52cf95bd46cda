//! logreg: binary logistic regression with second-order training.
//!
//! A small classification toolkit built around a regularized logistic
//! regression model trained by Newton-Raphson/IRLS or steepest descent.
//!
//! # Key Types
//!
//! - [`LogisticRegression`] - the model, with fit/predict and diagnostics
//! - [`LogisticRegressionConfig`] / [`OptimizerKind`] / [`Penalty`] - training
//!   configuration
//! - [`FitSummary`] / [`FitTrace`] - per-fit outcome and optional
//!   per-iteration diagnostics
//! - [`data`] - CSV loading and deterministic train/test splitting
//! - [`math`] - the numerically-stabilized sigmoid and its inverses
//!
//! # Training
//!
//! ```
//! use logreg::{LogisticRegression, LogisticRegressionConfig, OptimizerKind};
//! use ndarray::array;
//!
//! let x = array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 0.0, 1.0]];
//! let y = vec!["B", "M", "M", "B"];
//!
//! let config = LogisticRegressionConfig {
//!     lambda: 1e-3.into(),
//!     optimizer: OptimizerKind::Irls,
//!     ..Default::default()
//! };
//! let mut model = LogisticRegression::new(config);
//! let summary = model.fit(x.view(), &y).unwrap();
//! assert!(summary.converged);
//! assert_eq!(model.predict(x.view()).unwrap(), y);
//! ```
//!
//! The optimizer is single-threaded and synchronous; independent model
//! instances may be fit concurrently on independent threads, sharing
//! read-only inputs.

pub mod config;
pub mod data;
pub mod error;
pub mod math;
pub mod model;
pub mod testing;
pub mod trainer;

mod problem;
mod solve;

pub use config::{LogisticRegressionConfig, OptimizerKind, Penalty, Verbosity};
pub use error::{Error, Result};
pub use model::{LogisticRegression, DEFAULT_THRESHOLD};
pub use problem::MIN_PROB;
pub use trainer::{FitSummary, FitTrace, TraceStep, MIN_LEARNING_RATE};
