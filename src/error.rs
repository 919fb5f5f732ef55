//! Error types shared by the linear classifiers and the decision-region grid.

use thiserror::Error;

/// Result alias used throughout the classifier modules.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    /// Feature/label counts disagree, or a feature vector has the wrong dimensionality.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        expected: usize,
        found: usize,
        context: String,
    },

    /// `predict`, `activation` or a learned-parameter accessor was called before `fit`.
    #[error("model is not fitted; call fit() before {operation}")]
    UninitializedModel { operation: String },

    #[error("invalid hyperparameter {name} = {value}: {reason}")]
    InvalidHyperparameter {
        name: String,
        value: String,
        reason: String,
    },

    /// Training set without samples or without features.
    #[error("training data must contain at least one sample with at least one feature")]
    EmptyDataset,

    #[error("invalid class label {value}; expected -1 or +1")]
    InvalidLabel { value: String },

    /// A feature value is infinite where a bounded range is required.
    #[error("non-finite feature value in {context}")]
    NonFiniteFeature { context: String },
}

impl ClassifierError {
    pub(crate) fn shape(expected: usize, found: usize, context: impl Into<String>) -> Self {
        ClassifierError::ShapeMismatch {
            expected,
            found,
            context: context.into(),
        }
    }

    pub(crate) fn unfitted(operation: impl Into<String>) -> Self {
        ClassifierError::UninitializedModel {
            operation: operation.into(),
        }
    }
}
