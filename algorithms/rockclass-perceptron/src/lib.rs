//! # Perceptron
//!
//! ## The Big Picture
//!
//! `rockclass-perceptron` provides the classical Rosenblatt perceptron for binary classification,
//! written against the [`linfa`](https://crates.io/crates/linfa) traits so it can be fitted on a
//! [`Dataset`](linfa::Dataset) and used with `predict` like any other linfa model.
//!
//! ## Current state
//!
//! The model learns a separating hyperplane `w·x + b` by stochastic updates on misclassified
//! samples. Training runs for a fixed number of epochs, visiting the samples in a new random
//! order on every epoch. Targets must be `0` or `1`.
//!
//! ## Example
//!
//! ```
//! use linfa::prelude::*;
//! use ndarray::array;
//! use rockclass_perceptron::Perceptron;
//!
//! let dataset = Dataset::new(
//!     array![[0.1, 0.2], [0.2, 0.1], [0.9, 0.8], [0.8, 0.9]],
//!     array![0, 0, 1, 1],
//! );
//! let model = Perceptron::params().max_n_epochs(30).fit(&dataset).unwrap();
//! let prediction = model.predict(dataset.records());
//! assert_eq!(prediction, array![0, 0, 1, 1]);
//! ```
mod algorithm;
mod error;
mod hyperparams;

pub use error::{PerceptronError, PerceptronParamsError, Result};
pub use hyperparams::{PerceptronParams, PerceptronValidParams};

use linfa::Float;
use ndarray::{Array1, ArrayBase, Data, Ix2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A fitted perceptron, the hyperplane `weights · x + intercept = 0` separating class `0` from
/// class `1`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Perceptron<F: Float> {
    pub(crate) weights: Array1<F>,
    pub(crate) intercept: F,
    pub(crate) n_epochs: usize,
}

impl<F: Float> Perceptron<F> {
    /// Create default hyperparameters, shuffling with a `Xoshiro256Plus` seeded with `42`
    pub fn params() -> PerceptronParams<F, Xoshiro256Plus> {
        PerceptronParams::new(Xoshiro256Plus::seed_from_u64(42))
    }

    /// Create default hyperparameters with a custom random number generator
    pub fn params_with_rng<R: Rng>(rng: R) -> PerceptronParams<F, R> {
        PerceptronParams::new(rng)
    }

    /// An untrained model with all weights and the intercept at zero
    pub fn new(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features),
            intercept: F::zero(),
            n_epochs: 0,
        }
    }

    pub fn weights(&self) -> &Array1<F> {
        &self.weights
    }

    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// Number of epochs the model was trained for
    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    /// Signed score `w·x + b` of every row of `x`
    pub fn decision_function<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        x.dot(&self.weights) + self.intercept
    }
}
