//! Thin data-loading collaborator: CSV input and train/test splitting.
//!
//! The optimizer itself performs no I/O; this module produces the design
//! matrix and label vector the caller feeds into
//! [`LogisticRegression::fit`](crate::LogisticRegression::fit). Splits are
//! deterministic under a fixed seed so experiments reproduce exactly.

use std::io;
use std::path::Path;

use ndarray::{Array2, Axis};
use rand::prelude::*;

/// Errors produced while loading or splitting a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("non-numeric value in column {column}, row {row}")]
    NonNumeric { column: String, row: usize },

    #[error("the table contains no data rows")]
    EmptyTable,

    #[error("label count ({labels}) does not match row count ({rows})")]
    RowCountMismatch { rows: usize, labels: usize },

    #[error("test fraction must lie in (0, 1), got {0}")]
    InvalidFraction(f64),
}

/// A loaded classification table: numeric features plus one label column.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    /// Names of the feature columns, in design-matrix column order.
    pub feature_names: Vec<String>,
    /// N×D design matrix (no bias column; see [`with_bias_column`]).
    pub x: Array2<f64>,
    /// One label per row, as read from the label column.
    pub labels: Vec<String>,
}

/// Loads a headed CSV file into a [`CsvDataset`].
///
/// `label_column` names the class column. `feature_columns`, when given,
/// selects those columns in order; otherwise every non-label column is used
/// in header order. Every selected cell must parse as `f64`.
pub fn load_csv(
    path: impl AsRef<Path>,
    label_column: &str,
    feature_columns: Option<&[&str]>,
) -> Result<CsvDataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let label_idx = headers
        .iter()
        .position(|h| h == label_column)
        .ok_or_else(|| DataError::MissingColumn(label_column.to_owned()))?;

    let feature_idx: Vec<usize> = match feature_columns {
        Some(names) => names
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| DataError::MissingColumn((*name).to_owned()))
            })
            .collect::<Result<_, _>>()?,
        None => (0..headers.len()).filter(|&i| i != label_idx).collect(),
    };
    let feature_names: Vec<String> = feature_idx.iter().map(|&i| headers[i].clone()).collect();

    let mut values = Vec::new();
    let mut labels = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        labels.push(record[label_idx].to_owned());
        for (&col, name) in feature_idx.iter().zip(&feature_names) {
            let cell = &record[col];
            let value: f64 = cell.trim().parse().map_err(|_| DataError::NonNumeric {
                column: name.clone(),
                row,
            })?;
            values.push(value);
        }
    }
    if labels.is_empty() {
        return Err(DataError::EmptyTable);
    }

    let n_rows = labels.len();
    let n_cols = feature_idx.len();
    let x = Array2::from_shape_vec((n_rows, n_cols), values)
        .expect("row-major cell count matches rows × columns");

    Ok(CsvDataset {
        feature_names,
        x,
        labels,
    })
}

/// Appends a constant bias column of ones to the design matrix.
pub fn with_bias_column(x: &Array2<f64>) -> Array2<f64> {
    let mut out = Array2::ones((x.nrows(), x.ncols() + 1));
    out.slice_mut(ndarray::s![.., ..x.ncols()]).assign(x);
    out
}

/// A deterministic train/test partition of a dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit<L> {
    pub x_train: Array2<f64>,
    pub y_train: Vec<L>,
    pub x_test: Array2<f64>,
    pub y_test: Vec<L>,
}

/// Splits rows into train and test partitions by a shuffled index permutation.
///
/// The same `seed` always yields the same partition. `test_fraction` is the
/// share of rows assigned to the test side (rounded to the nearest row).
pub fn train_test_split<L: Clone>(
    x: &Array2<f64>,
    labels: &[L],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit<L>, DataError> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(DataError::InvalidFraction(test_fraction));
    }
    let n_rows = x.nrows();
    if n_rows == 0 {
        return Err(DataError::EmptyTable);
    }
    if labels.len() != n_rows {
        return Err(DataError::RowCountMismatch {
            rows: n_rows,
            labels: labels.len(),
        });
    }

    let mut idx: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let test_len = ((n_rows as f64) * test_fraction).round() as usize;
    let test_len = test_len.min(n_rows);
    let (test_idx, train_idx) = idx.split_at(test_len);

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_idx),
        y_train: train_idx.iter().map(|&i| labels[i].clone()).collect(),
        x_test: x.select(Axis(0), test_idx),
        y_test: test_idx.iter().map(|&i| labels[i].clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("logreg-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_features_and_labels() {
        let path = write_temp_csv(
            "basic.csv",
            "diagnosis,concavity_mean,texture_mean\nM,0.3,21.0\nB,0.1,14.5\n",
        );
        let data = load_csv(&path, "diagnosis", None).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.feature_names, vec!["concavity_mean", "texture_mean"]);
        assert_eq!(data.labels, vec!["M", "B"]);
        assert_eq!(data.x, array![[0.3, 21.0], [0.1, 14.5]]);
    }

    #[test]
    fn selects_feature_columns_in_given_order() {
        let path = write_temp_csv(
            "select.csv",
            "id,diagnosis,a,b\n1,M,0.1,0.2\n2,B,0.3,0.4\n",
        );
        let data = load_csv(&path, "diagnosis", Some(&["b", "a"])).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.feature_names, vec!["b", "a"]);
        assert_eq!(data.x, array![[0.2, 0.1], [0.4, 0.3]]);
    }

    #[test]
    fn missing_column_is_reported() {
        let path = write_temp_csv("missing.csv", "a,b\n1,2\n");
        let err = load_csv(&path, "diagnosis", None).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, DataError::MissingColumn(name) if name == "diagnosis"));
    }

    #[test]
    fn non_numeric_cell_is_reported_with_location() {
        let path = write_temp_csv("nan.csv", "y,a\nM,1.0\nB,oops\n");
        let err = load_csv(&path, "y", None).unwrap_err();
        std::fs::remove_file(&path).ok();
        match err {
            DataError::NonNumeric { column, row } => {
                assert_eq!(column, "a");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bias_column_is_appended_as_ones() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let with_bias = with_bias_column(&x);
        assert_eq!(with_bias, array![[1.0, 2.0, 1.0], [3.0, 4.0, 1.0]]);
    }

    #[test]
    fn split_is_deterministic_and_partitions_all_rows() {
        let x = Array2::from_shape_fn((10, 2), |(i, j)| (i * 2 + j) as f64);
        let labels: Vec<String> = (0..10).map(|i| format!("l{i}")).collect();

        let a = train_test_split(&x, &labels, 0.3, 1).unwrap();
        let b = train_test_split(&x, &labels, 0.3, 1).unwrap();
        assert_eq!(a.y_train, b.y_train);
        assert_eq!(a.y_test, b.y_test);
        assert_eq!(a.x_test, b.x_test);

        assert_eq!(a.x_test.nrows(), 3);
        assert_eq!(a.x_train.nrows(), 7);
        let mut all: Vec<String> = a.y_train.iter().chain(a.y_test.iter()).cloned().collect();
        all.sort();
        let mut expected = labels.clone();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn different_seeds_differ() {
        let x = Array2::from_shape_fn((20, 1), |(i, _)| i as f64);
        let labels: Vec<usize> = (0..20).collect();
        let a = train_test_split(&x, &labels, 0.3, 1).unwrap();
        let b = train_test_split(&x, &labels, 0.3, 2).unwrap();
        assert_ne!(a.y_test, b.y_test);
    }

    #[test]
    fn invalid_fraction_is_rejected() {
        let x = array![[1.0], [2.0]];
        let labels = vec!["a", "b"];
        assert!(matches!(
            train_test_split(&x, &labels, 0.0, 1),
            Err(DataError::InvalidFraction(_))
        ));
        assert!(matches!(
            train_test_split(&x, &labels, 1.0, 1),
            Err(DataError::InvalidFraction(_))
        ));
    }
}
