//! ADAptive LInear NEuron (Widrow-Hoff rule) trained with batch gradient descent.
//!
//! Unlike the perceptron, the error that drives the update is measured on the linear
//! (identity) activation, and one aggregate step is taken per epoch over the whole
//! training set. Thresholding is only applied when predicting class labels.

use std::fmt::Debug;

use log::{debug, info, warn};
use num_traits::Float;

use super::{check_input_width, check_sample_width, net_input, validate_training_set, BinaryClassifier, FitState, Hyperparameters};
use crate::common_types::Label;
use crate::error::ClassifierResult;

#[derive(Debug, Clone)]
pub struct Adaline<F> {
    params: Hyperparameters<F>,
    /// Weights and per-epoch cost (half the sum of squared errors), populated by `fit`.
    state: FitState<F, F>,
}

impl<F: Float + Debug> Adaline<F> {
    pub fn new(eta: F, epochs: usize) -> ClassifierResult<Self> {
        Ok(Self::with_params(Hyperparameters::new(eta, epochs)?))
    }

    pub fn with_params(params: Hyperparameters<F>) -> Self {
        Adaline {
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

    /// Trains from scratch with full-batch gradient descent.
    ///
    /// Each epoch computes the linear output for all samples with the weights as they were at
    /// the start of the epoch, then applies
    /// `w[1..] += eta * Xᵀ·errors`, `w[0] += eta * Σ errors` and records
    /// `cost = Σ errors² / 2`.
    ///
    /// The cost is non-increasing only when `eta` is small enough for the data scale; a
    /// diverging run is reported through the log but still completes all epochs.
    pub fn fit(&mut self, features: &[Vec<F>], labels: &[Label]) -> ClassifierResult<&mut Self> {
        let n_features = validate_training_set(features, labels)?;
        let eta = self.params.eta();
        let epochs = self.params.epochs();
        let two = F::one() + F::one();

        let mut weights = vec![F::zero(); n_features + 1];
        let mut cost: Vec<F> = Vec::with_capacity(epochs);
        let mut warned = false;

        for epoch in 0..epochs {
            let errors: Vec<F> = features
                .iter()
                .zip(labels.iter())
                .map(|(sample, target)| target.value::<F>() - net_input(&weights, sample))
                .collect();

            // Xᵀ·errors, one component per feature.
            for j in 0..n_features {
                let gradient = features
                    .iter()
                    .zip(errors.iter())
                    .fold(F::zero(), |acc, (sample, &e)| acc + sample[j] * e);
                weights[j + 1] = weights[j + 1] + eta * gradient;
            }
            let error_sum = errors.iter().fold(F::zero(), |acc, &e| acc + e);
            weights[0] = weights[0] + eta * error_sum;

            let epoch_cost = errors.iter().fold(F::zero(), |acc, &e| acc + e * e) / two;
            debug!("adaline epoch {}/{}: cost {:?}", epoch + 1, epochs, epoch_cost);

            if !warned {
                let diverging = !epoch_cost.is_finite()
                    || cost.last().is_some_and(|&previous| epoch_cost > previous);
                if diverging {
                    warn!(
                        "adaline cost increased at epoch {} ({:?}); eta = {:?} is likely too large for this data",
                        epoch + 1,
                        epoch_cost,
                        eta
                    );
                    warned = true;
                }
            }
            cost.push(epoch_cost);
        }

        info!(
            "adaline trained on {} samples x {} features for {} epochs, final cost: {:?}",
            features.len(),
            n_features,
            epochs,
            cost.last()
        );
        self.state = FitState::Fitted {
            weights,
            history: cost,
        };
        Ok(self)
    }

    /// Raw `w · x + b` for one sample.
    pub fn net_input(&self, sample: &[F]) -> ClassifierResult<F> {
        let weights = self.state.weights("net_input")?;
        check_sample_width(weights, sample, "net_input sample")?;
        Ok(net_input(weights, sample))
    }

    /// Linear (identity) activation for every row, i.e. the unthresholded net input.
    pub fn activation(&self, features: &[Vec<F>]) -> ClassifierResult<Vec<F>> {
        let weights = self.state.weights("activation")?;
        check_input_width(weights, features)?;
        Ok(features.iter().map(|row| net_input(weights, row)).collect())
    }

    /// Class label for every row: `Positive` when the activation is >= 0.
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

    /// Cost (half the sum of squared errors) per epoch.
    pub fn cost(&self) -> ClassifierResult<&[F]> {
        self.state.history("cost")
    }
}

impl<F: Float + Debug> BinaryClassifier<F> for Adaline<F> {
    fn predict(&self, features: &[Vec<F>]) -> ClassifierResult<Vec<Label>> {
        Adaline::predict(self, features)
    }
}
