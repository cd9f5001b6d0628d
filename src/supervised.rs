//! Supervised separation of gneiss and marl with a perceptron

use linfa::dataset::Records;
use linfa::traits::{Fit, Predict, Transformer};
use linfa::Dataset;
use log::info;
use ndarray::{Array1, Array2, Ix1};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use rockclass_datasets::SPZ;
use rockclass_perceptron::Perceptron;

use crate::error::Result;
use crate::hyperparams::{PlotValidParams, SupervisedValidParams};
use crate::metrics_classification::accuracy_percent;
use crate::plot::{self, ClassificationFigure, C1, LIMEGREEN};
use crate::preprocessing::{combine, select_features, MaxScaler};
use crate::split::TrainTestSplit;

/// Ring area around misclassified test samples in square points
const WRONG_MARKER_AREA: f64 = 130.;

/// Normalized two-feature data and its train/test split
#[derive(Clone, Debug)]
pub struct SupervisedData {
    /// All samples after scaling, restricted to the selected features
    pub normalized: Dataset<f64, usize, Ix1>,
    pub train: Dataset<f64, usize, Ix1>,
    pub test: Dataset<f64, usize, Ix1>,
}

/// A trained perceptron and how it fared on the test split
#[derive(Clone, Debug)]
pub struct SupervisedOutcome {
    pub model: Perceptron<f64>,
    pub prediction: Array1<usize>,
    /// Test accuracy in percent, rounded to one decimal
    pub accuracy: f64,
}

impl SupervisedValidParams {
    /// Label, scale and split the two class tables.
    ///
    /// Scaling uses the maxima of the full combined set, so train and test share one scale.
    pub fn prepare(&self, class_a: &Array2<f64>, class_b: &Array2<f64>) -> Result<SupervisedData> {
        let combined = combine(class_a, class_b)?;

        let scaler = if self.flip_spz() {
            MaxScaler::new().flip(SPZ)
        } else {
            MaxScaler::new()
        };
        let scaled = scaler.fit(&combined)?.transform(combined);
        let normalized = select_features(&scaled, &self.features())?;

        let split = TrainTestSplit::new(normalized.nsamples(), self.test_ratio(), self.split_seed())?;
        let (train, test) = split.apply(&normalized)?;

        Ok(SupervisedData {
            normalized,
            train,
            test,
        })
    }

    /// Train the perceptron on the training split and score it on the test split
    pub fn classify(&self, data: &SupervisedData) -> Result<SupervisedOutcome> {
        let rng = Xoshiro256Plus::seed_from_u64(self.perceptron_seed());
        let model = Perceptron::params_with_rng(rng)
            .max_n_epochs(self.n_epochs())
            .fit(&data.train)?;

        let prediction = model.predict(data.test.records());
        let accuracy = accuracy_percent(&prediction, data.test.targets())?;
        info!(
            "perceptron after {} epochs: {}% test accuracy",
            model.n_epochs(),
            accuracy
        );

        Ok(SupervisedOutcome {
            model,
            prediction,
            accuracy,
        })
    }
}

/// Run the supervised stage and draw its figures.
///
/// Writes `supervised_normalized.jpg`, `supervised_train-test.jpg` and
/// `supervised_epoch{N}.jpg` into the output directory of `plot`.
pub fn run(
    params: &SupervisedValidParams,
    plot: &PlotValidParams,
    class_a: &Array2<f64>,
    class_b: &Array2<f64>,
) -> Result<SupervisedOutcome> {
    let data = params.prepare(class_a, class_b)?;
    let features = params.features();

    plot::plot_normalized(
        plot,
        data.normalized.records().view(),
        features,
        "supervised_normalized.jpg",
    )?;
    plot::plot_train_test(
        plot,
        data.train.records().view(),
        data.test.records().view(),
        features,
        "supervised_train-test.jpg",
    )?;

    let outcome = params.classify(&data)?;

    plot::plot_classification(
        plot,
        &ClassificationFigure {
            file_name: format!("supervised_epoch{}.jpg", params.n_epochs()),
            title: format!(
                "epoch: {}, accuracy: {:.1}%",
                params.n_epochs(),
                outcome.accuracy
            ),
            features,
            records: data.test.records().view(),
            predicted: outcome.prediction.view(),
            truth: data.test.targets().view(),
            background: Some(data.train.records().view()),
            class_colors: [LIMEGREEN, C1],
            wrong_marker_area: WRONG_MARKER_AREA,
        },
    )?;

    Ok(outcome)
}
