//! Decision-region maps for 2-D training sets.
//!
//! [`DecisionGrid`] samples a classifier on a regular grid covering the data (padded by one
//! unit on every side). It only calls `predict`, so any [`BinaryClassifier`] can be drawn.
//! The PNG renderers live in [`render`] and need the `plot` feature.

#[cfg(feature = "plot")]
pub mod render;

use ordered_float::OrderedFloat;

use crate::common_types::Label;
use crate::error::{ClassifierError, ClassifierResult};
use crate::linear::BinaryClassifier;

/// Grid step used by the demo plots.
pub const DEFAULT_RESOLUTION: f64 = 0.02;

/// Padding added around the data bounds on both axes.
const GRID_PADDING: f64 = 1.0;

/// Upper bound on the number of grid cells, to keep a tiny resolution from exhausting memory.
const MAX_GRID_CELLS: usize = 4_000_000;

/// Predicted labels over a regular 2-D grid, stored row-major (`ys` outer, `xs` inner).
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionGrid {
    pub resolution: f64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    labels: Vec<Label>,
}

impl DecisionGrid {
    /// Samples `classifier` on `[min - 1, max + 1)` of both feature axes with step `resolution`.
    pub fn compute<C>(features: &[Vec<f64>], classifier: &C, resolution: f64) -> ClassifierResult<Self>
    where
        C: BinaryClassifier<f64> + ?Sized,
    {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(ClassifierError::InvalidHyperparameter {
                name: "resolution".to_string(),
                value: resolution.to_string(),
                reason: "grid step must be a positive, finite number".to_string(),
            });
        }
        if features.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }
        for (i, row) in features.iter().enumerate() {
            if row.len() != 2 {
                return Err(ClassifierError::shape(2, row.len(), format!("decision grid row {i}")));
            }
        }

        let (x_min, x_max) = finite_axis_bounds(features, 0)?;
        let (y_min, y_max) = finite_axis_bounds(features, 1)?;
        let (x_start, x_stop) = (x_min - GRID_PADDING, x_max + GRID_PADDING);
        let (y_start, y_stop) = (y_min - GRID_PADDING, y_max + GRID_PADDING);

        // Sized before allocating.
        let nx = axis_len(x_start, x_stop, resolution);
        let ny = axis_len(y_start, y_stop, resolution);
        let cells = nx * ny;
        if !(cells <= MAX_GRID_CELLS as f64) {
            return Err(ClassifierError::InvalidHyperparameter {
                name: "resolution".to_string(),
                value: resolution.to_string(),
                reason: format!("grid would have {cells:.0} cells (limit {MAX_GRID_CELLS})"),
            });
        }
        let xs = arange(x_start, x_stop, resolution, nx as usize);
        let ys = arange(y_start, y_stop, resolution, ny as usize);

        let points: Vec<Vec<f64>> = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| vec![x, y]))
            .collect();
        let labels = classifier.predict(&points)?;
        if labels.len() != points.len() {
            return Err(ClassifierError::shape(points.len(), labels.len(), "decision grid predictions"));
        }

        Ok(DecisionGrid {
            resolution,
            xs,
            ys,
            labels,
        })
    }

    /// `(rows, columns)`, i.e. `(ys.len(), xs.len())`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    pub fn label_at(&self, row: usize, col: usize) -> Option<Label> {
        if row >= self.ys.len() || col >= self.xs.len() {
            return None;
        }
        self.labels.get(row * self.xs.len() + col).copied()
    }

    /// Every cell as `(x, y, label)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, Label)> + '_ {
        self.ys.iter().enumerate().flat_map(move |(r, &y)| {
            self.xs
                .iter()
                .enumerate()
                .map(move |(c, &x)| (x, y, self.labels[r * self.xs.len() + c]))
        })
    }
}

/// Minimum and maximum of one feature column, ignoring NaNs.
pub(crate) fn axis_bounds(rows: &[Vec<f64>], col: usize) -> Option<(f64, f64)> {
    let values = || rows.iter().filter_map(|r| r.get(col)).filter(|v| !v.is_nan()).map(|&v| OrderedFloat(v));
    let min = values().min()?;
    let max = values().max()?;
    Some((min.0, max.0))
}

/// Like [`axis_bounds`], but a column without values is `EmptyDataset` and an infinite
/// bound is `NonFiniteFeature`.
pub(crate) fn finite_axis_bounds(rows: &[Vec<f64>], col: usize) -> ClassifierResult<(f64, f64)> {
    let (min, max) = axis_bounds(rows, col).ok_or(ClassifierError::EmptyDataset)?;
    if !(min.is_finite() && max.is_finite()) {
        return Err(ClassifierError::NonFiniteFeature {
            context: format!("bounds of feature column {col}"),
        });
    }
    Ok((min, max))
}

/// Number of points `arange` produces for `[start, stop)`, as a float so huge spans don't overflow.
fn axis_len(start: f64, stop: f64, step: f64) -> f64 {
    ((stop - start) / step).ceil().max(0.0)
}

/// `start, start + step, ...` strictly below `stop`, at most `len` values.
fn arange(start: f64, stop: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|k| start + k as f64 * step)
        .take_while(|&v| v < stop)
        .collect()
}
