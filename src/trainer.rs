//! The iterative fitting loop and its two update rules.
//!
//! One [`run`] call drives the optimizer from an initial weight vector to
//! convergence or the iteration cap. Each iteration performs exactly one
//! update step; the step returns the gradient it used so the convergence
//! check never recomputes it.

use ndarray::Array1;

use crate::config::{LogisticRegressionConfig, OptimizerKind, Verbosity};
use crate::error::Result;
use crate::problem::Problem;
use crate::solve;

/// Floor for the decaying steepest-descent learning rate. Prevents the rate
/// from shrinking to numerically useless magnitudes on long runs.
pub const MIN_LEARNING_RATE: f64 = 1e-6;

/// Interval between Info-level progress lines.
const LOG_EVERY: usize = 100;

/// One recorded optimizer iteration.
#[derive(Debug, Clone)]
pub struct TraceStep {
    /// Objective value after the update.
    pub objective: f64,
    /// Weight vector after the update.
    pub weights: Array1<f64>,
    /// Gradient that produced the update.
    pub gradient: Array1<f64>,
}

/// Ordered per-iteration diagnostics, recorded when
/// [`record_trace`](LogisticRegressionConfig::record_trace) is set.
///
/// Instrumentation only; the fit does not depend on it.
#[derive(Debug, Clone)]
pub struct FitTrace {
    /// Objective at the initial weights, before any update.
    pub initial_objective: f64,
    /// One snapshot per iteration, appended before each convergence check.
    pub steps: Vec<TraceStep>,
    /// Gradient at the final weights, evaluated after the loop exits.
    pub final_gradient: Array1<f64>,
}

/// Outcome of one fit.
#[derive(Debug, Clone)]
pub struct FitSummary {
    /// Number of update steps performed.
    pub n_iter: usize,
    /// Whether the loop exited on the tolerance/objective condition rather
    /// than the iteration cap.
    pub converged: bool,
    /// Objective at the final weights.
    pub final_objective: f64,
    /// Gradient L2 norm at the last update, +∞ if no step ran.
    pub final_grad_norm: f64,
    /// Per-iteration diagnostics, when requested.
    pub trace: Option<FitTrace>,
}

/// Runs the optimizer on `problem`, mutating `w` in place.
///
/// Iterates while the objective is positive, the gradient L2 norm exceeds
/// the tolerance, and the iteration cap is not reached. Hitting `max_iter`
/// is normal non-convergent termination; the weights reached so far stand.
pub(crate) fn run(
    problem: &Problem<'_, '_>,
    w: &mut Array1<f64>,
    config: &LogisticRegressionConfig,
) -> Result<FitSummary> {
    let mut learning_rate = config.learning_rate;
    let mut n_iter = 0;
    let mut grad_norm = f64::INFINITY;
    let mut objective = problem.objective(w.view());
    let initial_objective = objective;
    let mut steps = Vec::new();

    while objective > 0.0 && grad_norm > config.tol && n_iter < config.max_iter {
        let gradient = update_step(problem, w, &mut learning_rate, config)?;
        grad_norm = gradient.dot(&gradient).sqrt();
        objective = problem.objective(w.view());
        n_iter += 1;

        if config.record_trace {
            steps.push(TraceStep {
                objective,
                weights: w.clone(),
                gradient,
            });
        }
        if config.verbosity >= Verbosity::Debug {
            log::debug!(
                "[iteration {n_iter}] objective: {objective:.3e}, gradient l2 norm: {grad_norm:.3e}"
            );
        } else if config.verbosity >= Verbosity::Info && n_iter % LOG_EVERY == 0 {
            log::info!(
                "[iteration {n_iter}] objective: {objective:.3e}, gradient l2 norm: {grad_norm:.3e}"
            );
        }
    }

    let converged = n_iter < config.max_iter || grad_norm <= config.tol || objective <= 0.0;
    if config.verbosity >= Verbosity::Info {
        log::info!(
            "fit finished after {n_iter} iterations (converged: {converged}), \
             objective: {objective:.3e}, gradient l2 norm: {grad_norm:.3e}"
        );
    }

    let trace = config.record_trace.then(|| FitTrace {
        initial_objective,
        steps,
        final_gradient: problem.gradient(w.view()),
    });

    Ok(FitSummary {
        n_iter,
        converged,
        final_objective: objective,
        final_grad_norm: grad_norm,
        trace,
    })
}

/// Computes and applies a single optimization step, returning the gradient
/// used for it.
fn update_step(
    problem: &Problem<'_, '_>,
    w: &mut Array1<f64>,
    learning_rate: &mut f64,
    config: &LogisticRegressionConfig,
) -> Result<Array1<f64>> {
    let gradient = problem.gradient(w.view());
    let step = match config.optimizer {
        OptimizerKind::Irls => {
            let hessian = problem.hessian(w.view());
            solve::least_squares(hessian.view(), gradient.view())?
        }
        OptimizerKind::SteepestDescent => {
            let step = &gradient * *learning_rate;
            *learning_rate = MIN_LEARNING_RATE.max((1.0 - config.decay_rate) * *learning_rate);
            step
        }
    };
    *w -= &step;
    Ok(gradient)
}
