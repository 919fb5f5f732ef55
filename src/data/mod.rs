//! Loading and preparing the labeled training sets.
//!
//! The Iris loader reproduces the classic two-class setup: the first 100 rows of the UCI
//! table (setosa and versicolor), sepal length and petal length as features, setosa mapped
//! to -1 and everything else to +1.

pub mod synthetic;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use num_traits::Float;
use thiserror::Error;

use crate::common_types::{Dataset, Label};
use crate::error::{ClassifierError, ClassifierResult};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("expected at least {expected} data rows, found {found}")]
    TooFewRows { expected: usize, found: usize },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Which part of the Iris table becomes the training set.
#[derive(Debug, Clone, PartialEq)]
pub struct IrisOptions {
    /// Number of leading data rows to keep.
    pub rows: usize,
    /// Zero-based numeric columns used as features.
    pub feature_columns: Vec<usize>,
    /// Species mapped to `Label::Negative`; every other species is `Label::Positive`.
    pub negative_class: String,
}

impl Default for IrisOptions {
    fn default() -> Self {
        IrisOptions {
            rows: 100,
            feature_columns: vec![0, 2], // sepal length, petal length
            negative_class: "Iris-setosa".to_string(),
        }
    }
}

/// Column holding the species name in the UCI file.
const IRIS_LABEL_COLUMN: usize = 4;

/// Reads `iris.data` from disk with the default two-class selection.
pub fn load_iris_csv<P: AsRef<Path>>(path: P) -> Result<Dataset<f64>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = parse_iris(BufReader::new(file), &IrisOptions::default())?;
    info!("loaded {} samples from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parses comma-separated Iris rows from any reader. Blank lines are skipped.
pub fn parse_iris<R: BufRead>(reader: R, options: &IrisOptions) -> Result<Dataset<f64>, DatasetError> {
    let mut features = Vec::with_capacity(options.rows);
    let mut labels = Vec::with_capacity(options.rows);

    for (idx, line) in reader.lines().enumerate() {
        if labels.len() == options.rows {
            break;
        }
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let species = fields.get(IRIS_LABEL_COLUMN).ok_or_else(|| DatasetError::Parse {
            line: line_no,
            reason: format!("expected at least {} columns, found {}", IRIS_LABEL_COLUMN + 1, fields.len()),
        })?;

        let mut row = Vec::with_capacity(options.feature_columns.len());
        for &col in &options.feature_columns {
            let raw = fields.get(col).ok_or_else(|| DatasetError::Parse {
                line: line_no,
                reason: format!("missing column {col}"),
            })?;
            let value = raw.parse::<f64>().map_err(|e| DatasetError::Parse {
                line: line_no,
                reason: format!("column {col} ({raw:?}): {e}"),
            })?;
            row.push(value);
        }

        let label = if *species == options.negative_class {
            Label::Negative
        } else {
            Label::Positive
        };
        features.push(row);
        labels.push(label);
    }

    if labels.len() < options.rows {
        return Err(DatasetError::TooFewRows {
            expected: options.rows,
            found: labels.len(),
        });
    }
    debug!(
        "parsed iris subset: {} negative, {} positive",
        labels.iter().filter(|l| **l == Label::Negative).count(),
        labels.iter().filter(|l| **l == Label::Positive).count()
    );
    Ok(Dataset::new(features, labels)?)
}

/// Per-column mean and (population) standard deviation.
pub fn column_stats<F: Float>(rows: &[Vec<F>]) -> Vec<(F, F)> {
    let width = rows.first().map_or(0, Vec::len);
    let n = match F::from(rows.len()) {
        Some(n) if !rows.is_empty() => n,
        _ => return vec![(F::zero(), F::zero()); width],
    };
    (0..width)
        .map(|j| {
            let mean = rows.iter().fold(F::zero(), |acc, r| acc + r[j]) / n;
            let var = rows.iter().fold(F::zero(), |acc, r| {
                let d = r[j] - mean;
                acc + d * d
            }) / n;
            (mean, var.sqrt())
        })
        .collect()
}

/// Returns a copy with every feature column scaled to zero mean and unit variance.
/// Constant columns are only centered.
pub fn standardize<F: Float>(dataset: &Dataset<F>) -> ClassifierResult<Dataset<F>> {
    let stats = column_stats(dataset.features());
    let features = dataset
        .features()
        .iter()
        .map(|row| {
            row.iter()
                .zip(stats.iter())
                .map(|(&x, &(mean, std))| if std > F::zero() { (x - mean) / std } else { x - mean })
                .collect()
        })
        .collect();
    Dataset::new(features, dataset.labels().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "5.1,3.5,1.4,0.2,Iris-setosa\n\
                          4.9,3.0,1.4,0.2,Iris-setosa\n\
                          \n\
                          7.0,3.2,4.7,1.4,Iris-versicolor\n\
                          6.4,3.2,4.5,1.5,Iris-versicolor\n\
                          6.3,3.3,6.0,2.5,Iris-virginica\n";

    fn options(rows: usize) -> IrisOptions {
        IrisOptions {
            rows,
            ..IrisOptions::default()
        }
    }

    #[test]
    fn test_parse_iris_selects_columns_and_labels() {
        let data = parse_iris(Cursor::new(SAMPLE), &options(4)).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.features()[0], vec![5.1, 1.4]);
        assert_eq!(data.features()[2], vec![7.0, 4.7]);
        assert_eq!(
            data.labels(),
            &[Label::Negative, Label::Negative, Label::Positive, Label::Positive]
        );
    }

    #[test]
    fn test_parse_iris_stops_after_requested_rows() {
        // Reading stops once three samples are collected.
        let data = parse_iris(Cursor::new(SAMPLE), &options(3)).unwrap();
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_parse_iris_too_few_rows() {
        let err = parse_iris(Cursor::new(SAMPLE), &IrisOptions::default()).unwrap_err();
        assert!(matches!(err, DatasetError::TooFewRows { expected: 100, found: 5 }));
    }

    #[test]
    fn test_parse_iris_reports_bad_number() {
        let input = "5.1,3.5,abc,0.2,Iris-setosa\n";
        let err = parse_iris(Cursor::new(input), &options(1)).unwrap_err();
        match err {
            DatasetError::Parse { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("column 2"), "{}", reason);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_iris_reports_short_row() {
        let err = parse_iris(Cursor::new("5.1,3.5\n"), &options(1)).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_iris_csv("/nonexistent/iris.data").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_standardize_centers_and_scales() {
        let data = Dataset::new(
            vec![vec![1.0, 5.0], vec![3.0, 5.0], vec![5.0, 5.0]],
            vec![Label::Negative, Label::Positive, Label::Positive],
        )
        .unwrap();
        let scaled = standardize(&data).unwrap();
        let stats = column_stats(scaled.features());

        assert!(stats[0].0.abs() < 1e-12);
        assert!((stats[0].1 - 1.0).abs() < 1e-12);
        // Constant column: centered, not scaled.
        assert!(scaled.features().iter().all(|r| r[1] == 0.0));
        assert_eq!(scaled.labels(), data.labels());
    }
}
