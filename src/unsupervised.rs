//! Unsupervised separation of gneiss and marl with three clustering algorithms
//!
//! Cluster ids carry no meaning of their own, so every labelling is compared to the known rock
//! types with its polarity corrected (see [`correct_polarity`]).

use std::collections::HashMap;
use std::fmt;

use linfa::traits::{Fit, Predict, Transformer};
use kodama::{linkage, Method};
use linfa::{Dataset, DatasetBase};
use linfa_clustering::KMeans;
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView2, Ix1};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use rockclass_meanshift::MeanShift;

use crate::error::Result;
use crate::hyperparams::{PlotValidParams, UnsupervisedValidParams};
use crate::metrics_classification::correct_polarity;
use crate::plot::{self, ClassificationFigure, C0, C1};
use crate::preprocessing::{combine, select_features, MaxScaler};
use crate::split::shuffle;

/// Ring area around wrongly clustered samples in square points
const WRONG_MARKER_AREA: f64 = 90.;

/// The clustering algorithms compared on the rock data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    KMeans,
    MeanShift,
    AgglomerativeClustering,
}

impl Algorithm {
    /// All algorithms in the order they are reported
    pub const ALL: [Algorithm; 3] = [
        Algorithm::KMeans,
        Algorithm::MeanShift,
        Algorithm::AgglomerativeClustering,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::KMeans => "KMeans",
            Algorithm::MeanShift => "MeanShift",
            Algorithm::AgglomerativeClustering => "AgglomerativeClustering",
        }
    }

    /// Name of the figure showing this algorithm's result
    pub fn file_name(&self) -> String {
        format!("unsupervised_{}.jpg", self.name())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized two-feature data, before and after shuffling
#[derive(Clone, Debug)]
pub struct UnsupervisedData {
    pub normalized: Dataset<f64, usize, Ix1>,
    pub shuffled: Dataset<f64, usize, Ix1>,
}

/// Outcome of one clustering algorithm
#[derive(Clone, Debug)]
pub struct Clustering {
    pub algorithm: Algorithm,
    /// Cluster ids after polarity correction, aligned with the shuffled data
    pub labels: Array1<usize>,
    /// Accuracy in percent, rounded to one decimal
    pub accuracy: f64,
}

impl UnsupervisedValidParams {
    /// Label, scale, reduce to the selected features and shuffle.
    ///
    /// No column is mirrored here.
    pub fn prepare(&self, class_a: &Array2<f64>, class_b: &Array2<f64>) -> Result<UnsupervisedData> {
        let combined = combine(class_a, class_b)?;
        let scaled = MaxScaler::new().fit(&combined)?.transform(combined);
        let normalized = select_features(&scaled, &self.features())?;
        let shuffled = shuffle(&normalized, self.shuffle_seed());

        Ok(UnsupervisedData {
            normalized,
            shuffled,
        })
    }

    /// Raw cluster ids of `records` as found by `algorithm`
    pub fn cluster(&self, algorithm: Algorithm, records: &Array2<f64>) -> Result<Array1<usize>> {
        let labels = match algorithm {
            Algorithm::KMeans => {
                let rng = Xoshiro256Plus::seed_from_u64(self.kmeans_seed());
                let model = KMeans::params_with_rng(self.n_clusters(), rng)
                    .fit(&DatasetBase::from(records.clone()))?;
                model.predict(records)
            }
            Algorithm::MeanShift => {
                let model = MeanShift::params(self.bandwidth()).fit(&DatasetBase::from(records.clone()))?;
                info!("mean shift found {} clusters", model.n_clusters());
                model.predict(records)
            }
            Algorithm::AgglomerativeClustering => ward_labels(records.view(), self.n_clusters()),
        };

        Ok(labels)
    }

    /// Cluster the shuffled data and score the labelling against the rock types
    pub fn score(&self, algorithm: Algorithm, data: &UnsupervisedData) -> Result<Clustering> {
        let raw = self.cluster(algorithm, data.shuffled.records())?;
        let (accuracy, labels) = correct_polarity(&raw, data.shuffled.targets())?;
        info!("{}: {}% accuracy", algorithm, accuracy);

        Ok(Clustering {
            algorithm,
            labels,
            accuracy,
        })
    }
}

/// Ward linkage on euclidean distances, cut once at most `n_clusters` clusters remain.
///
/// Cluster ids are ordered by the first sample they contain.
fn ward_labels(records: ArrayView2<f64>, n_clusters: usize) -> Array1<usize> {
    let n_samples = records.nrows();
    if n_samples < 2 {
        return Array1::zeros(n_samples);
    }

    // condensed upper triangle, row by row
    let mut distance = Vec::with_capacity(n_samples * (n_samples - 1) / 2);
    for (i, a) in records.outer_iter().enumerate() {
        for b in records.outer_iter().skip(i + 1) {
            let d2 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f64>();
            distance.push(d2.sqrt());
        }
    }
    let dendrogram = linkage(&mut distance, n_samples, Method::Ward);

    // merged clusters are labelled n_samples, n_samples + 1, ... in step order
    let mut clusters = (0..n_samples).map(|i| (i, vec![i])).collect::<HashMap<_, _>>();
    let mut next_id = n_samples;
    for step in dendrogram.steps() {
        if clusters.len() <= n_clusters {
            break;
        }
        let mut ids = clusters.remove(&step.cluster1).unwrap_or_default();
        ids.extend(clusters.remove(&step.cluster2).unwrap_or_default());
        clusters.insert(next_id, ids);
        next_id += 1;
    }

    let mut members = clusters.into_values().collect::<Vec<_>>();
    members.sort_by_key(|ids| ids.iter().copied().min());
    debug!("ward linkage cut into {} clusters", members.len());

    let mut labels = Array1::zeros(n_samples);
    for (label, ids) in members.iter().enumerate() {
        for id in ids {
            labels[*id] = label;
        }
    }
    labels
}

/// Run every clustering algorithm and draw the figures.
///
/// Writes `unsupervised_normalized.jpg` and one `unsupervised_{name}.jpg` per algorithm into the
/// output directory of `plot`.
pub fn run(
    params: &UnsupervisedValidParams,
    plot: &PlotValidParams,
    class_a: &Array2<f64>,
    class_b: &Array2<f64>,
) -> Result<Vec<Clustering>> {
    let data = params.prepare(class_a, class_b)?;
    let features = params.features();

    plot::plot_normalized(
        plot,
        data.normalized.records().view(),
        features,
        "unsupervised_normalized.jpg",
    )?;

    let mut results = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL.iter().copied() {
        let clustering = params.score(algorithm, &data)?;
        plot::plot_classification(
            plot,
            &ClassificationFigure {
                file_name: algorithm.file_name(),
                title: format!("{}: accuracy {:.1}%", algorithm, clustering.accuracy),
                features,
                records: data.shuffled.records().view(),
                predicted: clustering.labels.view(),
                truth: data.shuffled.targets().view(),
                background: None,
                class_colors: [C0, C1],
                wrong_marker_area: WRONG_MARKER_AREA,
            },
        )?;
        results.push(clustering);
    }

    Ok(results)
}
