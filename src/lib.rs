//! `rockclass` separates two rock types, gneiss and marl, from their geomechanical properties.
//!
//! It is a small teaching pipeline in the spirit of the [`linfa`](https://crates.io/crates/linfa)
//! ecosystem: a synthetic dataset of uniaxial compressive strength (UCS), tensile strength (SPZ)
//! and density (DENS) is generated, scaled into the unit range and then classified twice.
//!
//! * [`supervised`] trains a [`Perceptron`](rockclass_perceptron::Perceptron) on a seeded
//!   train/test split.
//! * [`unsupervised`] clusters the shuffled data with k-means, mean shift and agglomerative
//!   clustering and scores each labelling after correcting its polarity.
//!
//! Every stage draws its figures with [`plotters`](https://crates.io/crates/plotters) into an
//! output directory. The binaries `generate-data`, `plot-data`, `supervised` and `unsupervised`
//! drive the stages from the command line.
//!
//! ## Example
//!
//! ```
//! use linfa::ParamGuard;
//! use rockclass::prelude::*;
//! use rockclass_datasets::generate::GeneratorParams;
//!
//! let (gneiss, marl) = GeneratorParams::default().generate();
//! let params = SupervisedParams::default().check().unwrap();
//! let data = params.prepare(&gneiss, &marl).unwrap();
//! let outcome = params.classify(&data).unwrap();
//! assert!(outcome.accuracy >= 0. && outcome.accuracy <= 100.);
//! ```

pub mod error;
mod hyperparams;
mod metrics_classification;
pub mod plot;
pub mod prelude;
pub mod preprocessing;
pub mod split;
pub mod supervised;
pub mod unsupervised;

pub use error::{Error, Result};
pub use hyperparams::{
    PlotParams, PlotValidParams, SupervisedParams, SupervisedValidParams, UnsupervisedParams,
    UnsupervisedValidParams,
};

/// Accuracy and label polarity helpers
pub mod metrics {
    pub use crate::metrics_classification::{
        accuracy, accuracy_percent, correct_polarity, flip_binary_labels, round_percent,
    };
}
