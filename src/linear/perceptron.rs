//! Rosenblatt's perceptron: online, mistake-driven weight updates with a unit-step activation.

use std::fmt::Debug;

use log::{debug, info};
use num_traits::Float;

use super::{check_input_width, check_sample_width, net_input, validate_training_set, BinaryClassifier, FitState, Hyperparameters};
use crate::common_types::Label;
use crate::error::ClassifierResult;

/// Perceptron classifier.
///
/// Weights start at zero and are updated after every sample whose prediction is wrong,
/// so training is fully deterministic for a given sample order.
#[derive(Debug, Clone)]
pub struct Perceptron<F> {
    params: Hyperparameters<F>,
    /// Weights and per-epoch misclassification counts, populated by `fit`.
    state: FitState<F, usize>,
}

impl<F: Float + Debug> Perceptron<F> {
    pub fn new(eta: F, epochs: usize) -> ClassifierResult<Self> {
        Ok(Self::with_params(Hyperparameters::new(eta, epochs)?))
    }

    pub fn with_params(params: Hyperparameters<F>) -> Self {
        Perceptron {
            params,
            state: FitState::Unfitted,
        }
    }

    pub fn params(&self) -> &Hyperparameters<F> {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_fitted()
    }

    /// Trains from scratch on `features` (one row per sample) and `labels`.
    ///
    /// For every epoch the samples are visited in order; each one is classified with the
    /// current weights and, if `eta * (target - predicted)` is non-zero, the weights move
    /// by that amount times the sample (the bias by the amount alone) and the mistake is
    /// counted. The count for each epoch is appended to the history.
    ///
    /// Any previous model is replaced. If the input is rejected the previous model is kept.
    pub fn fit(&mut self, features: &[Vec<F>], labels: &[Label]) -> ClassifierResult<&mut Self> {
        let n_features = validate_training_set(features, labels)?;
        let eta = self.params.eta();
        let epochs = self.params.epochs();

        let mut weights = vec![F::zero(); n_features + 1];
        let mut errors: Vec<usize> = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let mut mistakes = 0;
            for (sample, &target) in features.iter().zip(labels.iter()) {
                let predicted = Label::from_net_input(net_input(&weights, sample));
                let update = eta * (target.value::<F>() - predicted.value::<F>());
                if update != F::zero() {
                    weights[0] = weights[0] + update;
                    for (w, &x) in weights[1..].iter_mut().zip(sample.iter()) {
                        *w = *w + update * x;
                    }
                    mistakes += 1;
                }
            }
            debug!("perceptron epoch {}/{}: {} misclassifications", epoch + 1, epochs, mistakes);
            errors.push(mistakes);
        }

        info!(
            "perceptron trained on {} samples x {} features for {} epochs, final misclassifications: {}",
            features.len(),
            n_features,
            epochs,
            errors.last().copied().unwrap_or_default()
        );
        self.state = FitState::Fitted {
            weights,
            history: errors,
        };
        Ok(self)
    }

    /// Raw `w · x + b` for one sample.
    pub fn net_input(&self, sample: &[F]) -> ClassifierResult<F> {
        let weights = self.state.weights("net_input")?;
        check_sample_width(weights, sample, "net_input sample")?;
        Ok(net_input(weights, sample))
    }

    /// Class label for every row: `Positive` when the net input is >= 0.
    pub fn predict(&self, features: &[Vec<F>]) -> ClassifierResult<Vec<Label>> {
        let weights = self.state.weights("predict")?;
        check_input_width(weights, features)?;
        Ok(features
            .iter()
            .map(|row| Label::from_net_input(net_input(weights, row)))
            .collect())
    }

    /// Learned weights, bias first.
    pub fn weights(&self) -> ClassifierResult<&[F]> {
        self.state.weights("weights")
    }

    /// Misclassifications per epoch.
    pub fn errors(&self) -> ClassifierResult<&[usize]> {
        self.state.history("errors")
    }
}

impl<F: Float + Debug> BinaryClassifier<F> for Perceptron<F> {
    fn predict(&self, features: &[Vec<F>]) -> ClassifierResult<Vec<Label>> {
        Perceptron::predict(self, features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;

    fn labels(values: &[i64]) -> Vec<Label> {
        values.iter().map(|&v| Label::try_from(v).unwrap()).collect()
    }

    fn and_gate() -> (Vec<Vec<f64>>, Vec<Label>) {
        let x = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        (x, labels(&[-1, -1, -1, 1]))
    }

    fn two_clusters() -> (Vec<Vec<f64>>, Vec<Label>) {
        let x = vec![
            vec![1.0, 1.0],
            vec![1.5, 0.5],
            vec![0.5, 1.5],
            vec![1.0, 0.0],
            vec![4.0, 4.0],
            vec![4.5, 3.5],
            vec![3.5, 4.5],
            vec![5.0, 4.0],
        ];
        (x, labels(&[-1, -1, -1, -1, 1, 1, 1, 1]))
    }

    #[test]
    fn test_and_gate_converges() {
        let (x, y) = and_gate();
        let mut classifier = Perceptron::new(0.1, 10).unwrap();
        classifier.fit(&x, &y).unwrap();

        let errors = classifier.errors().unwrap();
        assert_eq!(errors.len(), 10);
        assert_eq!(*errors.last().unwrap(), 0);
        assert_eq!(classifier.predict(&x).unwrap(), y);

        let expected = [-0.4, 0.4, 0.2];
        for (w, e) in classifier.weights().unwrap().iter().zip(expected.iter()) {
            assert!((w - e).abs() < 1e-9, "weight {} vs expected {}", w, e);
        }
    }

    #[test]
    fn test_separable_clusters_reach_zero_mistakes() {
        let (x, y) = two_clusters();
        let mut classifier = Perceptron::new(0.1, 10).unwrap();
        classifier.fit(&x, &y).unwrap();

        let errors = classifier.errors().unwrap();
        assert!(errors.iter().any(|&e| e == 0));
        assert_eq!(errors.last(), Some(&0));
        assert_eq!(classifier.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_zero_eta_leaves_weights_at_zero() {
        let (x, y) = two_clusters();
        let mut classifier = Perceptron::new(0.0, 25).unwrap();
        classifier.fit(&x, &y).unwrap();
        assert!(classifier.weights().unwrap().iter().all(|&w| w == 0.0));
        // No update happens, so nothing is counted as a mistake.
        assert!(classifier.errors().unwrap().iter().all(|&e| e == 0));
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let classifier = Perceptron::<f64>::new(0.1, 10).unwrap();
        assert!(!classifier.is_fitted());
        assert!(matches!(
            classifier.predict(&[vec![1.0, 2.0]]),
            Err(ClassifierError::UninitializedModel { .. })
        ));
        assert!(classifier.weights().is_err());
        assert!(classifier.errors().is_err());
        assert!(classifier.net_input(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_refit_is_deterministic() {
        let (x, y) = two_clusters();
        let mut classifier = Perceptron::new(0.1, 10).unwrap();
        classifier.fit(&x, &y).unwrap();
        let first_weights = classifier.weights().unwrap().to_vec();
        let first_errors = classifier.errors().unwrap().to_vec();

        // Train on something else in between to make sure nothing leaks into the next fit.
        let (and_x, and_y) = and_gate();
        classifier.fit(&and_x, &and_y).unwrap();

        classifier.fit(&x, &y).unwrap();
        assert_eq!(classifier.weights().unwrap(), first_weights.as_slice());
        assert_eq!(classifier.errors().unwrap(), first_errors.as_slice());
    }

    #[test]
    fn test_shape_mismatch_keeps_previous_model() {
        let (x, y) = and_gate();
        let mut classifier = Perceptron::new(0.1, 10).unwrap();
        classifier.fit(&x, &y).unwrap();
        let before = classifier.weights().unwrap().to_vec();

        let result = classifier.fit(&x, &y[..3]);
        assert!(matches!(result, Err(ClassifierError::ShapeMismatch { .. })));
        assert_eq!(classifier.weights().unwrap(), before.as_slice());
        assert_eq!(classifier.errors().unwrap().len(), 10);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let x = vec![vec![0.0, 1.0], vec![1.0]];
        let mut classifier = Perceptron::new(0.1, 5).unwrap();
        assert!(matches!(
            classifier.fit(&x, &labels(&[-1, 1])),
            Err(ClassifierError::ShapeMismatch { .. })
        ));
        assert!(!classifier.is_fitted());
    }

    #[test]
    fn test_predict_is_binary_and_idempotent() {
        let (x, y) = two_clusters();
        let mut classifier = Perceptron::new(0.1, 10).unwrap();
        classifier.fit(&x, &y).unwrap();

        let probe = vec![vec![-100.0, 3.0], vec![0.0, 0.0], vec![2.5, 2.5], vec![1e6, -1e6]];
        let first = classifier.predict(&probe).unwrap();
        for _ in 0..5 {
            assert_eq!(classifier.predict(&probe).unwrap(), first);
        }
        assert!(first.iter().all(|l| l.as_i8() == 1 || l.as_i8() == -1));
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let (x, y) = and_gate();
        let mut classifier = Perceptron::new(0.1, 10).unwrap();
        classifier.fit(&x, &y).unwrap();
        assert!(matches!(
            classifier.predict(&[vec![1.0, 2.0, 3.0]]),
            Err(ClassifierError::ShapeMismatch { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn test_net_input_matches_weights() {
        let (x, y) = and_gate();
        let mut classifier = Perceptron::new(0.1, 10).unwrap();
        classifier.fit(&x, &y).unwrap();
        let z = classifier.net_input(&[1.0, 1.0]).unwrap();
        assert!((z - 0.2).abs() < 1e-9);
    }
}
