//! Seeded two-cluster datasets for demos and tests.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common_types::{Dataset, Label};
use crate::error::{ClassifierError, ClassifierResult};

/// Generates `n_per_class` 2-D points around (0, 0) labeled -1, followed by `n_per_class`
/// points around (`separation`, `separation`) labeled +1.
///
/// Each coordinate is drawn uniformly from `center ± spread`. The classes are linearly
/// separable (by `x + y = separation`) whenever `spread < separation / 2`.
pub fn two_clusters(n_per_class: usize, separation: f64, spread: f64, seed: u64) -> ClassifierResult<Dataset<f64>> {
    if n_per_class == 0 {
        return Err(ClassifierError::EmptyDataset);
    }
    if !separation.is_finite() {
        return Err(ClassifierError::InvalidHyperparameter {
            name: "separation".to_string(),
            value: separation.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    if !spread.is_finite() || spread < 0.0 {
        return Err(ClassifierError::InvalidHyperparameter {
            name: "spread".to_string(),
            value: spread.to_string(),
            reason: "must be finite and non-negative".to_string(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(2 * n_per_class);
    let mut labels = Vec::with_capacity(2 * n_per_class);

    for (label, center) in [(Label::Negative, 0.0), (Label::Positive, separation)] {
        for _ in 0..n_per_class {
            let x = center + rng.gen_range(-spread..=spread);
            let y = center + rng.gen_range(-spread..=spread);
            features.push(vec![x, y]);
            labels.push(label);
        }
    }
    debug!("generated {} synthetic samples (seed {})", labels.len(), seed);
    Dataset::new(features, labels)
}
