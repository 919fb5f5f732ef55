//! This module contains the data structures shared by the classifiers, the dataset loaders
//! and the plotting code.

use std::fmt;

use num_traits::Float;

use crate::error::{ClassifierError, ClassifierResult};

/// Binary class label. The numeric encoding used by the learning rules is -1 / +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Both labels, in ascending numeric order.
    pub const ALL: [Label; 2] = [Label::Negative, Label::Positive];

    /// Numeric value of the label (-1 or +1) in the feature type.
    pub fn value<F: Float>(self) -> F {
        match self {
            Label::Negative => -F::one(),
            Label::Positive => F::one(),
        }
    }

    /// Unit step: non-negative inputs map to `Positive`, everything else (NaN included) to `Negative`.
    pub fn from_net_input<F: Float>(net_input: F) -> Self {
        if net_input >= F::zero() {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Label::Negative => -1,
            Label::Positive => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

impl TryFrom<i64> for Label {
    type Error = ClassifierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(ClassifierError::InvalidLabel {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<f64> for Label {
    type Error = ClassifierError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == -1.0 {
            Ok(Label::Negative)
        } else if value == 1.0 {
            Ok(Label::Positive)
        } else {
            Err(ClassifierError::InvalidLabel {
                value: value.to_string(),
            })
        }
    }
}

/// Represents a single data point, with features and a label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPoint<F> {
    pub features: Vec<F>,
    pub label: Label,
}

impl<F> DataPoint<F> {
    pub fn new(features: Vec<F>, label: Label) -> Self {
        DataPoint { features, label }
    }
}

/// A labeled training set stored as a feature matrix (one row per sample) and a label vector.
///
/// Construction through [`Dataset::new`] guarantees that the two have the same length and
/// that every row has the same number of features.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset<F> {
    features: Vec<Vec<F>>,
    labels: Vec<Label>,
}

impl<F: Float> Dataset<F> {
    pub fn new(features: Vec<Vec<F>>, labels: Vec<Label>) -> ClassifierResult<Self> {
        check_matrix(&features, Some(labels.len()))?;
        Ok(Dataset { features, labels })
    }

    pub fn from_points(points: Vec<DataPoint<F>>) -> ClassifierResult<Self> {
        let (features, labels): (Vec<Vec<F>>, Vec<Label>) = points.into_iter().map(|p| (p.features, p.label)).unzip();
        Dataset::new(features, labels)
    }

    pub fn features(&self) -> &[Vec<F>] {
        &self.features
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of features per sample (0 for an empty dataset).
    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Feature rows belonging to one class, in dataset order.
    pub fn rows_with_label(&self, label: Label) -> Vec<&[F]> {
        self.features
            .iter()
            .zip(self.labels.iter())
            .filter(|(_, l)| **l == label)
            .map(|(row, _)| row.as_slice())
            .collect()
    }
}

/// Checks that every row has the width of the first one and, if given, that the row count
/// matches `expected_rows`. Returns the common width.
pub(crate) fn check_matrix<F>(rows: &[Vec<F>], expected_rows: Option<usize>) -> ClassifierResult<usize> {
    if let Some(expected) = expected_rows {
        if rows.len() != expected {
            return Err(ClassifierError::shape(expected, rows.len(), "number of feature rows vs labels"));
        }
    }
    let width = rows.first().map_or(0, Vec::len);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(ClassifierError::shape(width, row.len(), format!("feature row {i}")));
        }
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_values_and_conversions() {
        assert_eq!(Label::Negative.value::<f64>(), -1.0);
        assert_eq!(Label::Positive.value::<f32>(), 1.0_f32);
        assert_eq!(Label::try_from(-1_i64).unwrap(), Label::Negative);
        assert_eq!(Label::try_from(1.0_f64).unwrap(), Label::Positive);
        assert!(matches!(
            Label::try_from(0_i64),
            Err(ClassifierError::InvalidLabel { .. })
        ));
        assert!(Label::try_from(0.5_f64).is_err());
        assert_eq!(Label::Positive.to_string(), "1");
        assert_eq!(Label::Negative.to_string(), "-1");
    }

    #[test]
    fn test_unit_step_threshold() {
        assert_eq!(Label::from_net_input(0.0_f64), Label::Positive);
        assert_eq!(Label::from_net_input(-1e-12_f64), Label::Negative);
        assert_eq!(Label::from_net_input(f64::NAN), Label::Negative);
    }

    #[test]
    fn test_dataset_rejects_ragged_rows() {
        let result = Dataset::new(vec![vec![1.0, 2.0], vec![3.0]], vec![Label::Positive, Label::Negative]);
        assert!(matches!(
            result,
            Err(ClassifierError::ShapeMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_dataset_rejects_label_count_mismatch() {
        let result = Dataset::new(vec![vec![1.0, 2.0]], vec![Label::Positive, Label::Negative]);
        assert!(matches!(result, Err(ClassifierError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_rows_with_label() {
        let data = Dataset::from_points(vec![
            DataPoint::new(vec![0.0, 1.0], Label::Negative),
            DataPoint::new(vec![2.0, 3.0], Label::Positive),
            DataPoint::new(vec![4.0, 5.0], Label::Negative),
        ])
        .unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.n_features(), 2);
        let negatives = data.rows_with_label(Label::Negative);
        assert_eq!(negatives, vec![&[0.0, 1.0][..], &[4.0, 5.0][..]]);
    }
}
