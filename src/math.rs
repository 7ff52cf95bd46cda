//! Scalar math utilities: the logistic sigmoid and its inverse.
//!
//! The sigmoid clamps its input before exponentiating so that extreme linear
//! predictors saturate instead of overflowing. The inverse is available both
//! in closed form ([`logit`]) and via a bracketing root-finder
//! ([`logit_via_root_finding`]) as a cross-check for arguments where the
//! closed form loses precision near the boundaries.

use ndarray::{Array, Dimension};

use crate::error::{Error, Result};

/// Largest sigmoid input before exponentiating.
///
/// `exp(709.8)` overflows f64; the lower tail needs no clamp because exp of a
/// very negative number underflows safely to 0.
pub const SIGMOID_INPUT_MAX: f64 = 709.7;

/// Interval searched by [`logit_via_root_finding`].
const LOGIT_BRACKET: (f64, f64) = (-10.0, 10.0);

/// Absolute x-tolerance of the bisection root-finder.
const ROOT_XTOL: f64 = 2e-12;

/// Iteration cap of the bisection root-finder.
const ROOT_MAX_ITER: usize = 100;

/// The logistic sigmoid σ(a) = exp(a) / (1 + exp(a)).
///
/// The input is clamped to [`SIGMOID_INPUT_MAX`] so the result saturates at
/// 1.0 for large arguments instead of producing NaN from inf/inf.
#[inline]
pub fn logistic(a: f64) -> f64 {
    let a = a.min(SIGMOID_INPUT_MAX);
    let expa = a.exp();
    expa / (1.0 + expa)
}

/// Elementwise [`logistic`] over a dense array of any dimension.
///
/// Preserves the shape of the input.
pub fn logistic_array<D: Dimension>(a: &Array<f64, D>) -> Array<f64, D> {
    a.mapv(logistic)
}

/// The logit, ln(p) − ln(1 − p), inverse of [`logistic`].
///
/// Returns ±infinity at p = 0 or p = 1 and NaN outside [0, 1]; callers must
/// keep probabilities strictly inside (0, 1). `predict_proba` clamps its
/// output for exactly this reason.
#[inline]
pub fn logit(p: f64) -> f64 {
    p.ln() - (1.0 - p).ln()
}

/// Inverse sigmoid computed by bisection on `p − logistic(x) = 0` over
/// [−10, 10].
///
/// Returns exactly `0.0` for p = 0.5 as a shortcut. Fails with
/// [`Error::NoBracket`] when the interval does not bracket a root, which for
/// in-domain inputs means p was outside (logistic(−10), logistic(10)).
pub fn logit_via_root_finding(p: f64) -> Result<f64> {
    if p == 0.5 {
        return Ok(0.0);
    }
    let (lo, hi) = LOGIT_BRACKET;
    bisect(|x| p - logistic(x), lo, hi, ROOT_XTOL, ROOT_MAX_ITER)
}

/// Bisection root-finder on a bracketing interval.
///
/// Requires `f(lo)` and `f(hi)` to have opposite signs; halves the interval
/// until its width falls below `xtol` or `max_iter` halvings were performed.
fn bisect<F>(f: F, mut lo: f64, mut hi: f64, xtol: f64, max_iter: usize) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let mut flo = f(lo);
    let fhi = f(hi);
    if flo == 0.0 {
        return Ok(lo);
    }
    if fhi == 0.0 {
        return Ok(hi);
    }
    if flo.signum() == fhi.signum() {
        return Err(Error::NoBracket { lo, hi });
    }

    let mut mid = 0.5 * (lo + hi);
    for _ in 0..max_iter {
        mid = 0.5 * (lo + hi);
        let fmid = f(mid);
        if fmid == 0.0 || hi - lo < xtol {
            return Ok(mid);
        }
        if fmid.signum() == flo.signum() {
            lo = mid;
            flo = fmid;
        } else {
            hi = mid;
        }
    }
    Ok(mid)
}
