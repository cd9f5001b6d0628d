//! Seeded sampling of synthetic rock property tables

use log::debug;
use ndarray::{Array, Array1, Array2};
use ndarray_rand::{rand_distr::StandardNormal, RandomExt};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{RockClass, FEATURE_NAMES};

/// Mean and standard deviation of one measured property
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalParams {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Draw `n` values from `N(mean, std_dev)` and replace each by its absolute value.
    ///
    /// The result follows a folded normal distribution: whenever a noticeable share of the
    /// Gaussian mass lies below zero the sample mean is biased upwards. The parameters are not
    /// validated, a negative `std_dev` mirrors the spread and gives the same folded
    /// distribution.
    pub fn sample_folded<R: Rng>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        let z: Array1<f64> = Array::random_using(n, StandardNormal, rng);
        z.mapv(|z| (self.mean + self.std_dev * z).abs())
    }
}

/// Per-property distributions of one rock type
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct RockClassParams {
    /// Unconfined compressive strength in MPa
    pub ucs: NormalParams,
    /// Tensile strength in MPa
    pub spz: NormalParams,
    /// Density in g/cm³
    pub dens: NormalParams,
}

impl RockClassParams {
    pub fn new(ucs: NormalParams, spz: NormalParams, dens: NormalParams) -> Self {
        Self { ucs, spz, dens }
    }

    /// Statistical values of gneiss, based on experience rather than a specific project
    pub fn gneiss() -> Self {
        Self::new(
            NormalParams::new(94.5, 50.),
            NormalParams::new(9.5, 4.35),
            NormalParams::new(2.77, 0.118),
        )
    }

    /// Statistical values of marl, based on experience rather than a specific project
    pub fn marl() -> Self {
        Self::new(
            NormalParams::new(4.86, 8.5),
            NormalParams::new(2., 2.2),
            NormalParams::new(2.29, 0.14),
        )
    }

    /// Property distributions in column order `UCS, SPZ, DENS`
    pub fn properties(&self) -> [&NormalParams; 3] {
        [&self.ucs, &self.spz, &self.dens]
    }

    /// Generate a `(n_samples, 3)` table with columns `UCS, SPZ, DENS`.
    ///
    /// Columns are drawn one after another from `rng`, so the table depends on the order in
    /// which classes share the generator.
    pub fn sample<R: Rng>(&self, n_samples: usize, rng: &mut R) -> Array2<f64> {
        let mut table = Array2::zeros((n_samples, FEATURE_NAMES.len()));
        for (mut column, property) in table.columns_mut().into_iter().zip(self.properties()) {
            column.assign(&property.sample_folded(n_samples, rng));
        }
        table
    }
}

/// Complete configuration of the synthetic data generator
///
/// Defaults reproduce the teaching dataset: 350 gneiss and 175 marl samples drawn with seed 7.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorParams {
    pub class_a: RockClassParams,
    pub class_b: RockClassParams,
    pub n_class_a: usize,
    pub n_class_b: usize,
    pub seed: u64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            class_a: RockClass::Gneiss.params(),
            class_b: RockClass::Marl.params(),
            n_class_a: 350,
            n_class_b: 175,
            seed: 7,
        }
    }
}

impl GeneratorParams {
    /// Set the number of class A (gneiss) samples
    pub fn n_class_a(mut self, n: usize) -> Self {
        self.n_class_a = n;
        self
    }

    /// Set the number of class B (marl) samples
    pub fn n_class_b(mut self, n: usize) -> Self {
        self.n_class_b = n;
        self
    }

    /// Set the seed of the sampling generator
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the distributions of both classes
    pub fn classes(mut self, class_a: RockClassParams, class_b: RockClassParams) -> Self {
        self.class_a = class_a;
        self.class_b = class_b;
        self
    }

    /// Sample both class tables from a single generator seeded with `seed`, class A first
    pub fn generate(&self) -> (Array2<f64>, Array2<f64>) {
        let mut rng = Xoshiro256Plus::seed_from_u64(self.seed);
        let class_a = self.class_a.sample(self.n_class_a, &mut rng);
        let class_b = self.class_b.sample(self.n_class_b, &mut rng);
        debug!(
            "sampled {} + {} rows with seed {}",
            class_a.nrows(),
            class_b.nrows(),
            self.seed
        );

        (class_a, class_b)
    }
}
