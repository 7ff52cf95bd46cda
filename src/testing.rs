//! Synthetic data helpers for tests and benchmarks.

use ndarray::Array2;
use rand::prelude::*;

use crate::data::with_bias_column;

/// Random dense design matrix with entries uniform in `[min, max]`.
pub fn random_design_matrix(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> Array2<f64> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    Array2::from_shape_fn((rows, cols), |_| min + rng.gen::<f64>() * width)
}

/// Labels synthesized from the sign of a linear score over the features.
///
/// Rows scoring above zero get `labels[1]`, the rest `labels[0]`.
pub fn labels_from_linear_score<L: Clone>(
    x: &Array2<f64>,
    weights: &[f64],
    labels: [L; 2],
) -> Vec<L> {
    assert_eq!(x.ncols(), weights.len());
    x.rows()
        .into_iter()
        .map(|row| {
            let score: f64 = row.iter().zip(weights).map(|(xi, wi)| xi * wi).sum();
            if score > 0.0 {
                labels[1].clone()
            } else {
                labels[0].clone()
            }
        })
        .collect()
}

/// Linearly separable two-class 2D dataset with a bias column.
///
/// Two Gaussian-ish blobs displaced along both axes, labeled "B" (negative,
/// left blob) and "M" (positive, right blob). Returns the N×3 design matrix
/// (last column ones) and the labels.
pub fn separable_blobs(rows_per_class: usize, seed: u64) -> (Array2<f64>, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = rows_per_class * 2;
    let mut x = Array2::zeros((n, 2));
    let mut labels = Vec::with_capacity(n);

    for i in 0..n {
        let positive = i % 2 == 1;
        let center = if positive { 2.0 } else { -2.0 };
        x[[i, 0]] = center + rng.gen::<f64>() - 0.5;
        x[[i, 1]] = center + rng.gen::<f64>() - 0.5;
        labels.push(if positive { "M".to_owned() } else { "B".to_owned() });
    }

    (with_bias_column(&x), labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_matrix_is_seeded_and_bounded() {
        let a = random_design_matrix(5, 3, 7, -1.0, 1.0);
        let b = random_design_matrix(5, 3, 7, -1.0, 1.0);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn blobs_are_separable_by_construction() {
        let (x, labels) = separable_blobs(20, 3);
        assert_eq!(x.nrows(), 40);
        assert_eq!(x.ncols(), 3);
        for (row, label) in x.rows().into_iter().zip(&labels) {
            // The two blobs never cross zero on either coordinate.
            if label == "M" {
                assert!(row[0] > 0.0 && row[1] > 0.0);
            } else {
                assert!(row[0] < 0.0 && row[1] < 0.0);
            }
            assert_eq!(row[2], 1.0);
        }
    }

    #[test]
    fn linear_score_labels_split_on_sign() {
        let x = random_design_matrix(10, 2, 1, -1.0, 1.0);
        let labels = labels_from_linear_score(&x, &[1.0, 0.0], ["neg", "pos"]);
        for (row, label) in x.rows().into_iter().zip(&labels) {
            assert_eq!(*label, if row[0] > 0.0 { "pos" } else { "neg" });
        }
    }
}
