//! # Mean shift
//!
//! `rockclass-meanshift` implements mean shift clustering with a flat kernel on top of the
//! [`linfa`](https://crates.io/crates/linfa) traits and the range queries of `linfa-nn`.
//!
//! Mean shift does not need the number of clusters up front. Each observation is repeatedly moved
//! to the mean of all observations within `bandwidth`, dense regions attract the seeds and the
//! points they settle on become the cluster centers. Clusters are numbered by decreasing size.
//!
//! ## Example
//!
//! ```
//! use linfa::prelude::*;
//! use ndarray::array;
//! use rockclass_meanshift::MeanShift;
//!
//! let observations = array![[0.0, 0.1], [0.1, 0.0], [0.05, 0.05], [0.9, 1.0], [1.0, 0.9]];
//! let model = MeanShift::params(0.33)
//!     .fit(&DatasetBase::from(observations.clone()))
//!     .unwrap();
//! assert_eq!(model.n_clusters(), 2);
//! assert_eq!(model.predict(&observations), array![0, 0, 0, 1, 1]);
//! ```
mod algorithm;
mod error;
mod hyperparams;

pub use error::{MeanShiftError, MeanShiftParamsError, Result};
pub use hyperparams::{MeanShiftParams, MeanShiftValidParams};

use linfa::Float;
use linfa_nn::{CommonNearestNeighbour, NearestNeighbour};
use ndarray::{Array1, Array2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Cluster centers found by mean shift
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct MeanShift<F: Float> {
    cluster_centers: Array2<F>,
    intensities: Array1<usize>,
}

impl<F: Float> MeanShift<F> {
    /// Configure mean shift with the radius of the flat kernel
    ///
    /// Defaults are provided for the optional parameters:
    /// * `max_n_iterations = 300`
    /// * `tolerance = 1e-3`
    /// * `nn_algo = KdTree`
    pub fn params(bandwidth: F) -> MeanShiftParams<F, CommonNearestNeighbour> {
        MeanShiftParams::new(bandwidth, CommonNearestNeighbour::KdTree)
    }

    /// Configure mean shift with a custom nearest neighbour algorithm
    pub fn params_with<N: NearestNeighbour>(bandwidth: F, nn_algo: N) -> MeanShiftParams<F, N> {
        MeanShiftParams::new(bandwidth, nn_algo)
    }

    /// Cluster centers, shape `(n_clusters, n_features)`, the row index is the cluster id
    pub fn cluster_centers(&self) -> &Array2<F> {
        &self.cluster_centers
    }

    /// Number of observations that were averaged into each center
    pub fn intensities(&self) -> &Array1<usize> {
        &self.intensities
    }

    pub fn n_clusters(&self) -> usize {
        self.cluster_centers.nrows()
    }
}
