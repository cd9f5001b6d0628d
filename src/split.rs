//! Seeded row permutations for train/test splitting and shuffling

use linfa::dataset::Records;
use linfa::Dataset;
use log::debug;
use ndarray::{Axis, Ix1};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use crate::error::{Error, Result};

/// A permutation of `0..n` drawn from a `Xoshiro256Plus` seeded with `seed`
pub fn permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let mut indices = (0..n).collect::<Vec<_>>();
    indices.shuffle(&mut rng);
    indices
}

/// Rows of `dataset` at `indices`, in that order
pub fn select_rows(
    dataset: &Dataset<f64, usize, Ix1>,
    indices: &[usize],
) -> Dataset<f64, usize, Ix1> {
    Dataset::new(
        dataset.records().select(Axis(0), indices),
        dataset.targets().select(Axis(0), indices),
    )
    .with_feature_names(dataset.feature_names())
}

/// Reorder all rows of `dataset` with a seeded permutation
pub fn shuffle(dataset: &Dataset<f64, usize, Ix1>, seed: u64) -> Dataset<f64, usize, Ix1> {
    let order = permutation(dataset.nsamples(), seed);
    select_rows(dataset, &order)
}

/// Disjoint train and test row positions
///
/// The rows are permuted with the given seed, the first `floor(test_ratio * n)` positions of the
/// permutation form the test set and the remaining ones the training set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainTestSplit {
    test: Vec<usize>,
    train: Vec<usize>,
}

impl TrainTestSplit {
    pub fn new(n_samples: usize, test_ratio: f64, seed: u64) -> Result<Self> {
        if !test_ratio.is_finite() || test_ratio <= 0. || test_ratio >= 1. {
            return Err(Error::SplitRatio(test_ratio));
        }

        let mut train = permutation(n_samples, seed);
        let n_test = (n_samples as f64 * test_ratio).floor() as usize;
        let test = train.drain(..n_test).collect();
        debug!(
            "split {} rows into {} train and {} test rows",
            n_samples,
            train.len(),
            n_test
        );

        Ok(Self { test, train })
    }

    pub fn test_indices(&self) -> &[usize] {
        &self.test
    }

    pub fn train_indices(&self) -> &[usize] {
        &self.train
    }

    /// Split `dataset` into `(train, test)`
    pub fn apply(
        &self,
        dataset: &Dataset<f64, usize, Ix1>,
    ) -> Result<(Dataset<f64, usize, Ix1>, Dataset<f64, usize, Ix1>)> {
        let n_samples = self.test.len() + self.train.len();
        if dataset.nsamples() != n_samples {
            return Err(Error::MismatchedShapes(n_samples, dataset.nsamples()));
        }

        Ok((
            select_rows(dataset, &self.train),
            select_rows(dataset, &self.test),
        ))
    }
}
