//! Shared pieces of the linear classifiers: hyperparameters, the unfitted/fitted state,
//! input validation and the net-input computation.

pub mod adaline;
pub mod perceptron;

use std::fmt::Debug;

use num_traits::Float;

use crate::common_types::{check_matrix, Label};
use crate::error::{ClassifierError, ClassifierResult};

pub use adaline::Adaline;
pub use perceptron::Perceptron;

/// Anything that maps feature rows to binary class labels.
///
/// The decision-region grid only needs this, never the learned weights.
pub trait BinaryClassifier<F> {
    fn predict(&self, features: &[Vec<F>]) -> ClassifierResult<Vec<Label>>;
}

/// Learning rate and number of passes over the training set. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperparameters<F> {
    eta: F,
    epochs: usize,
}

impl<F: Float + Debug> Hyperparameters<F> {
    /// Validates and stores the hyperparameters.
    ///
    /// `eta` must be finite and non-negative. A zero learning rate is accepted: it trains a
    /// model that never moves away from the zero weight vector, which is useful as a baseline.
    /// `epochs` must be at least 1.
    pub fn new(eta: F, epochs: usize) -> ClassifierResult<Self> {
        if !eta.is_finite() || eta < F::zero() {
            return Err(ClassifierError::InvalidHyperparameter {
                name: "eta".to_string(),
                value: format!("{eta:?}"),
                reason: "learning rate must be a finite, non-negative number".to_string(),
            });
        }
        if epochs == 0 {
            return Err(ClassifierError::InvalidHyperparameter {
                name: "epochs".to_string(),
                value: epochs.to_string(),
                reason: "at least one epoch is required".to_string(),
            });
        }
        Ok(Hyperparameters { eta, epochs })
    }

    pub fn eta(&self) -> F {
        self.eta
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }
}

/// Learned parameters of a classifier. `H` is the per-epoch metric recorded during training.
#[derive(Debug, Clone, PartialEq)]
pub enum FitState<F, H> {
    Unfitted,
    Fitted {
        /// Bias at index 0, then one weight per feature.
        weights: Vec<F>,
        history: Vec<H>,
    },
}

impl<F, H> FitState<F, H> {
    pub fn is_fitted(&self) -> bool {
        matches!(self, FitState::Fitted { .. })
    }

    pub(crate) fn weights(&self, operation: &str) -> ClassifierResult<&[F]> {
        match self {
            FitState::Fitted { weights, .. } => Ok(weights),
            FitState::Unfitted => Err(ClassifierError::unfitted(operation)),
        }
    }

    pub(crate) fn history(&self, operation: &str) -> ClassifierResult<&[H]> {
        match self {
            FitState::Fitted { history, .. } => Ok(history),
            FitState::Unfitted => Err(ClassifierError::unfitted(operation)),
        }
    }
}

// --- Helpers for vector operations ---

fn dot_product<F: Float>(a: &[F], b: &[F]) -> F {
    a.iter().zip(b.iter()).fold(F::zero(), |acc, (&x, &y)| acc + x * y)
}

/// `weights[0] + features · weights[1..]`. The caller guarantees matching lengths.
pub(crate) fn net_input<F: Float>(weights: &[F], features: &[F]) -> F {
    weights[0] + dot_product(features, &weights[1..])
}

/// Validates a training set and returns its feature dimensionality.
///
/// Nothing is mutated here, so a failing `fit` leaves the previous model in place.
pub(crate) fn validate_training_set<F>(features: &[Vec<F>], labels: &[Label]) -> ClassifierResult<usize> {
    if features.len() != labels.len() {
        return Err(ClassifierError::shape(
            labels.len(),
            features.len(),
            "number of feature rows vs labels",
        ));
    }
    let n_features = check_matrix(features, None)?;
    if features.is_empty() || n_features == 0 {
        return Err(ClassifierError::EmptyDataset);
    }
    Ok(n_features)
}

/// Checks that a sample has one feature per non-bias weight.
pub(crate) fn check_sample_width<F>(weights: &[F], sample: &[F], context: impl Into<String>) -> ClassifierResult<()> {
    let expected = weights.len() - 1;
    if sample.len() != expected {
        return Err(ClassifierError::shape(expected, sample.len(), context));
    }
    Ok(())
}

pub(crate) fn check_input_width<F>(weights: &[F], features: &[Vec<F>]) -> ClassifierResult<()> {
    for (i, row) in features.iter().enumerate() {
        check_sample_width(weights, row, format!("input row {i}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyperparameters_validation() {
        let params = Hyperparameters::new(0.1_f64, 10).unwrap();
        assert_eq!(params.eta(), 0.1);
        assert_eq!(params.epochs(), 10);

        assert!(Hyperparameters::new(0.0_f64, 1).is_ok());
        assert!(matches!(
            Hyperparameters::new(-0.1_f64, 10),
            Err(ClassifierError::InvalidHyperparameter { ref name, .. }) if name == "eta"
        ));
        assert!(matches!(
            Hyperparameters::new(f64::NAN, 10),
            Err(ClassifierError::InvalidHyperparameter { .. })
        ));
        assert!(matches!(
            Hyperparameters::new(0.1_f32, 0),
            Err(ClassifierError::InvalidHyperparameter { ref name, .. }) if name == "epochs"
        ));
    }

    #[test]
    fn test_net_input_includes_bias() {
        let weights = vec![0.5, 2.0, -1.0];
        assert!((net_input(&weights, &[1.0, 3.0]) - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_validate_training_set() {
        let x = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let y = vec![Label::Negative, Label::Positive];
        assert_eq!(validate_training_set(&x, &y).unwrap(), 2);

        assert!(matches!(
            validate_training_set(&x, &y[..1]),
            Err(ClassifierError::ShapeMismatch { expected: 1, found: 2, .. })
        ));
        let empty: Vec<Vec<f64>> = Vec::new();
        assert_eq!(validate_training_set(&empty, &[]), Err(ClassifierError::EmptyDataset));
        let no_features: Vec<Vec<f64>> = vec![vec![]];
        assert_eq!(
            validate_training_set(&no_features, &[Label::Positive]),
            Err(ClassifierError::EmptyDataset)
        );
    }

    #[test]
    fn test_fit_state_guards_unfitted_access() {
        let state: FitState<f64, usize> = FitState::Unfitted;
        assert!(!state.is_fitted());
        assert!(matches!(
            state.weights("predict"),
            Err(ClassifierError::UninitializedModel { .. })
        ));
        assert!(state.history("errors").is_err());
    }
}
