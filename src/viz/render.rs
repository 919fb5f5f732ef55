//! PNG rendering with `plotters`. Every function takes its data explicitly and writes one file.

use std::fmt::Display;
use std::path::Path;

use log::info;
use plotters::coord::types::RangedCoordf64;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use thiserror::Error;

use super::{finite_axis_bounds, DecisionGrid};
use crate::common_types::{Dataset, Label};
use crate::error::ClassifierError;

const PLOT_SIZE: (u32, u32) = (800, 600);
const MARKER_SIZE: i32 = 4;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to render {path}: {message}")]
    Render { path: String, message: String },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

fn render_error<E: Display>(path: &Path, err: E) -> PlotError {
    PlotError::Render {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Axis descriptions and legend entries for the 2-D plots.
#[derive(Debug, Clone)]
pub struct PlotLabels {
    pub x_desc: String,
    pub y_desc: String,
    pub negative: String,
    pub positive: String,
}

impl PlotLabels {
    fn class_name(&self, label: Label) -> &str {
        match label {
            Label::Negative => &self.negative,
            Label::Positive => &self.positive,
        }
    }
}

fn class_color(label: Label) -> RGBColor {
    match label {
        Label::Negative => RED,
        Label::Positive => BLUE,
    }
}

/// Data bounds of both axes, widened by `pad`.
fn padded_ranges(dataset: &Dataset<f64>, pad: f64) -> Result<((f64, f64), (f64, f64)), PlotError> {
    let x = finite_axis_bounds(dataset.features(), 0)?;
    let y = finite_axis_bounds(dataset.features(), 1)?;
    Ok(((x.0 - pad, x.1 + pad), (y.0 - pad, y.1 + pad)))
}

fn require_2d(dataset: &Dataset<f64>) -> Result<(), PlotError> {
    if dataset.n_features() != 2 {
        return Err(ClassifierError::ShapeMismatch {
            expected: 2,
            found: dataset.n_features(),
            context: "plotted feature columns".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Draws the samples of both classes onto an existing chart.
fn draw_samples<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    dataset: &Dataset<f64>,
    labels: &PlotLabels,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    for label in Label::ALL {
        let color = class_color(label);
        let rows = dataset.rows_with_label(label);
        match label {
            Label::Negative => {
                chart
                    .draw_series(rows.iter().map(|r| Circle::new((r[0], r[1]), MARKER_SIZE, color.filled())))?
                    .label(labels.class_name(label))
                    .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled()));
            }
            Label::Positive => {
                chart
                    .draw_series(
                        rows.iter()
                            .map(|r| Cross::new((r[0], r[1]), MARKER_SIZE, color.stroke_width(2))),
                    )?
                    .label(labels.class_name(label))
                    .legend(move |(x, y)| Cross::new((x, y), MARKER_SIZE, color.stroke_width(2)));
            }
        }
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
}

/// Scatter plot of the raw training set.
pub fn plot_dataset(path: &Path, dataset: &Dataset<f64>, labels: &PlotLabels) -> Result<(), PlotError> {
    require_2d(dataset)?;
    let ((x0, x1), (y0, y1)) = padded_ranges(dataset, 0.5)?;

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error(path, e))?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Training data", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| render_error(path, e))?;
    chart
        .configure_mesh()
        .x_desc(labels.x_desc.as_str())
        .y_desc(labels.y_desc.as_str())
        .draw()
        .map_err(|e| render_error(path, e))?;
    draw_samples(&mut chart, dataset, labels).map_err(|e| render_error(path, e))?;
    root.present().map_err(|e| render_error(path, e))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Line plot of a per-epoch training metric, epochs numbered from 1.
pub fn plot_history(path: &Path, caption: &str, y_desc: &str, history: &[f64]) -> Result<(), PlotError> {
    if history.is_empty() {
        return Err(ClassifierError::EmptyDataset.into());
    }
    // Non-finite entries (a diverged run) are left out of both the range and the line.
    let finite = || history.iter().copied().filter(|v| v.is_finite());
    let y_min = finite().fold(0.0_f64, f64::min);
    let y_max = finite().fold(0.0_f64, f64::max);
    let pad = if y_max > y_min { 0.1 * (y_max - y_min) } else { 1.0 };
    let y_min = if y_min < 0.0 { y_min - pad } else { y_min };
    let y_max = y_max + pad;
    let x_max = history.len() as f64 + 0.5;
    let points: Vec<(f64, f64)> = history
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| ((i + 1) as f64, v))
        .collect();

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error(path, e))?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5..x_max, y_min..y_max)
        .map_err(|e| render_error(path, e))?;
    chart
        .configure_mesh()
        .x_desc("Epochs")
        .y_desc(y_desc)
        .draw()
        .map_err(|e| render_error(path, e))?;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &GREEN))
        .map_err(|e| render_error(path, e))?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, MARKER_SIZE, GREEN.filled())))
        .map_err(|e| render_error(path, e))?;
    root.present().map_err(|e| render_error(path, e))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Shaded decision regions with the training samples drawn on top.
pub fn plot_decision_regions(
    path: &Path,
    dataset: &Dataset<f64>,
    grid: &DecisionGrid,
    labels: &PlotLabels,
) -> Result<(), PlotError> {
    require_2d(dataset)?;
    let (Some(&x0), Some(&y0)) = (grid.xs.first(), grid.ys.first()) else {
        return Err(ClassifierError::EmptyDataset.into());
    };
    let x1 = grid.xs.last().map_or(x0, |&x| x + grid.resolution);
    let y1 = grid.ys.last().map_or(y0, |&y| y + grid.resolution);
    let step = grid.resolution;

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error(path, e))?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Decision regions", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| render_error(path, e))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(labels.x_desc.as_str())
        .y_desc(labels.y_desc.as_str())
        .draw()
        .map_err(|e| render_error(path, e))?;
    chart
        .draw_series(grid.cells().map(|(x, y, label)| {
            Rectangle::new([(x, y), (x + step, y + step)], class_color(label).mix(0.4).filled())
        }))
        .map_err(|e| render_error(path, e))?;
    draw_samples(&mut chart, dataset, labels).map_err(|e| render_error(path, e))?;
    root.present().map_err(|e| render_error(path, e))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> PlotLabels {
        PlotLabels {
            x_desc: "x".to_string(),
            y_desc: "y".to_string(),
            negative: "neg".to_string(),
            positive: "pos".to_string(),
        }
    }

    // Input validation happens before any file is created, so these need no fonts or disk.

    #[test]
    fn test_plot_dataset_requires_two_features() {
        let data = Dataset::new(vec![vec![1.0, 2.0, 3.0]], vec![Label::Positive]).unwrap();
        let err = plot_dataset(Path::new("unused.png"), &data, &labels()).unwrap_err();
        assert!(matches!(err, PlotError::Classifier(ClassifierError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_plot_dataset_rejects_infinite_values() {
        let data = Dataset::new(
            vec![vec![0.0, 1.0], vec![f64::INFINITY, 2.0]],
            vec![Label::Negative, Label::Positive],
        )
        .unwrap();
        let err = plot_dataset(Path::new("unused.png"), &data, &labels()).unwrap_err();
        assert!(matches!(err, PlotError::Classifier(ClassifierError::NonFiniteFeature { .. })));
    }

    #[test]
    fn test_plot_history_requires_entries() {
        let err = plot_history(Path::new("unused.png"), "cost", "cost", &[]).unwrap_err();
        assert!(matches!(err, PlotError::Classifier(ClassifierError::EmptyDataset)));
    }

    #[test]
    fn test_class_names() {
        let l = labels();
        assert_eq!(l.class_name(Label::Negative), "neg");
        assert_eq!(l.class_name(Label::Positive), "pos");
        assert_ne!(class_color(Label::Negative).rgb(), class_color(Label::Positive).rgb());
    }
}
