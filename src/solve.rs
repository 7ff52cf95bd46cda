//! Dense least-squares solve for the Newton system.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Singular values below this threshold are treated as zero by the SVD
/// solve, which turns a near-singular system into its minimum-norm
/// least-squares solution.
const SVD_EPS: f64 = 1e-12;

/// Solves `H·Δ = g` in the least-squares sense via SVD.
///
/// Deliberately avoids forming `H⁻¹`: the Hessian of a poorly conditioned
/// fit can be near-singular, and the pseudo-inverse behavior of the SVD
/// solve keeps the step finite. A large ill-conditioned step is left to the
/// convergence loop to absorb.
pub(crate) fn least_squares(h: ArrayView2<'_, f64>, g: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
    let d = h.nrows();
    debug_assert_eq!(h.ncols(), d);
    debug_assert_eq!(g.len(), d);

    let h_na = DMatrix::from_fn(d, d, |i, j| h[[i, j]]);
    let g_na = DVector::from_fn(d, |i, _| g[i]);

    let svd = h_na.svd(true, true);
    let delta = svd
        .solve(&g_na, SVD_EPS)
        .map_err(|msg| Error::LinearSolve(msg.to_string()))?;

    Ok(Array1::from_iter(delta.iter().copied()))
}
