//! Trains the perceptron and/or ADALINE on a 2-D dataset and writes the plots:
//! raw data, per-epoch history, decision regions.
//!
//! `RUST_LOG=debug` prints the per-epoch metrics as well.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use linear_classifiers::data::{self, synthetic};
use linear_classifiers::viz::render::{plot_dataset, plot_decision_regions, plot_history, PlotLabels};
use linear_classifiers::viz::{DecisionGrid, DEFAULT_RESOLUTION};
use linear_classifiers::{Adaline, Dataset, Perceptron};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Model {
    Perceptron,
    Adaline,
    Both,
}

#[derive(Debug, Parser)]
#[command(about = "Train linear classifiers and plot their decision regions")]
struct Args {
    /// Iris `iris.data` file; a seeded synthetic two-cluster set is used when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Directory for the PNG files.
    #[arg(long, default_value = "plots")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Model::Both)]
    model: Model,

    /// Perceptron learning rate.
    #[arg(long, default_value_t = 0.1)]
    perceptron_eta: f64,

    /// ADALINE learning rate.
    #[arg(long, default_value_t = 0.01)]
    adaline_eta: f64,

    #[arg(long, default_value_t = 10)]
    epochs: usize,

    /// Scale features to zero mean and unit variance before training.
    #[arg(long)]
    standardize: bool,

    /// Seed for the synthetic dataset.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: f64,
}

fn load(args: &Args) -> Result<(Dataset<f64>, PlotLabels)> {
    let (dataset, labels) = match &args.data {
        Some(path) => {
            let dataset = data::load_iris_csv(path).with_context(|| format!("loading {}", path.display()))?;
            let labels = PlotLabels {
                x_desc: "Sepal length [cm]".to_string(),
                y_desc: "Petal length [cm]".to_string(),
                negative: "setosa".to_string(),
                positive: "versicolor".to_string(),
            };
            (dataset, labels)
        }
        None => {
            info!("no --data given, generating synthetic clusters (seed {})", args.seed);
            let dataset = synthetic::two_clusters(50, 4.0, 1.5, args.seed)?;
            let labels = PlotLabels {
                x_desc: "x1".to_string(),
                y_desc: "x2".to_string(),
                negative: "-1".to_string(),
                positive: "+1".to_string(),
            };
            (dataset, labels)
        }
    };

    if args.standardize {
        let scaled = data::standardize(&dataset)?;
        let labels = PlotLabels {
            x_desc: format!("{} [standardized]", labels.x_desc),
            y_desc: format!("{} [standardized]", labels.y_desc),
            ..labels
        };
        return Ok((scaled, labels));
    }
    Ok((dataset, labels))
}

fn run_perceptron(args: &Args, dataset: &Dataset<f64>, labels: &PlotLabels, out_dir: &Path) -> Result<()> {
    let mut classifier = Perceptron::new(args.perceptron_eta, args.epochs)?;
    classifier.fit(dataset.features(), dataset.labels())?;

    let errors: Vec<f64> = classifier.errors()?.iter().map(|&e| e as f64).collect();
    plot_history(
        &out_dir.join("perceptron_errors.png"),
        "Perceptron",
        "Number of misclassifications",
        &errors,
    )?;

    let grid = DecisionGrid::compute(dataset.features(), &classifier, args.resolution)?;
    plot_decision_regions(&out_dir.join("perceptron_regions.png"), dataset, &grid, labels)?;
    info!("perceptron weights: {:?}", classifier.weights()?);
    Ok(())
}

fn run_adaline(args: &Args, dataset: &Dataset<f64>, labels: &PlotLabels, out_dir: &Path) -> Result<()> {
    let mut classifier = Adaline::new(args.adaline_eta, args.epochs)?;
    classifier.fit(dataset.features(), dataset.labels())?;

    // Cost can span many orders of magnitude when eta is too large.
    let log_cost: Vec<f64> = classifier.cost()?.iter().map(|c| c.max(f64::MIN_POSITIVE).log10()).collect();
    plot_history(
        &out_dir.join("adaline_cost.png"),
        "ADALINE",
        "log10(Sum-squared-error)",
        &log_cost,
    )?;

    let grid = DecisionGrid::compute(dataset.features(), &classifier, args.resolution)?;
    plot_decision_regions(&out_dir.join("adaline_regions.png"), dataset, &grid, labels)?;
    info!("adaline weights: {:?}", classifier.weights()?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    fs::create_dir_all(&args.out_dir).with_context(|| format!("creating {}", args.out_dir.display()))?;
    let (dataset, labels) = load(&args)?;
    plot_dataset(&args.out_dir.join("data.png"), &dataset, &labels)?;

    if matches!(args.model, Model::Perceptron | Model::Both) {
        run_perceptron(&args, &dataset, &labels, &args.out_dir).context("perceptron")?;
    }
    if matches!(args.model, Model::Adaline | Model::Both) {
        run_adaline(&args, &dataset, &labels, &args.out_dir).context("adaline")?;
    }
    info!("plots written to {}", args.out_dir.display());
    Ok(())
}
