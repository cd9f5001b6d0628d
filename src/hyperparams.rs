//! Configuration of the classification stages
//!
//! Every stage is configured through an unchecked parameter set which is validated with
//! [`ParamGuard`] before use. The `Default` of each set reproduces the teaching setup.

use std::path::{Path, PathBuf};

use linfa::ParamGuard;
use rockclass_datasets::{FEATURE_NAMES, SPZ, UCS};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn check_features(features: &[usize; 2]) -> Result<()> {
    if let Some(unknown) = features.iter().find(|f| **f >= FEATURE_NAMES.len()) {
        return Err(Error::UnknownFeature(*unknown));
    }
    if features[0] == features[1] {
        return Err(Error::Parameters(format!(
            "features must be distinct, got {:?}",
            features
        )));
    }
    Ok(())
}

/// Validated configuration of the supervised stage
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct SupervisedValidParams {
    test_ratio: f64,
    split_seed: u64,
    n_epochs: usize,
    perceptron_seed: u64,
    features: [usize; 2],
    flip_spz: bool,
}

/// Configuration of the supervised stage
///
/// Defaults:
/// * `test_ratio = 0.2`
/// * `split_seed = 0`
/// * `n_epochs = 30`
/// * `perceptron_seed = 0`
/// * `features = [UCS, SPZ]`
/// * `flip_spz = true`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct SupervisedParams(SupervisedValidParams);

impl Default for SupervisedParams {
    fn default() -> Self {
        Self(SupervisedValidParams {
            test_ratio: 0.2,
            split_seed: 0,
            n_epochs: 30,
            perceptron_seed: 0,
            features: [UCS, SPZ],
            flip_spz: true,
        })
    }
}

impl SupervisedParams {
    /// Fraction of rows held out for testing
    pub fn test_ratio(mut self, test_ratio: f64) -> Self {
        self.0.test_ratio = test_ratio;
        self
    }

    pub fn split_seed(mut self, seed: u64) -> Self {
        self.0.split_seed = seed;
        self
    }

    /// Number of passes of the perceptron over the training split
    pub fn n_epochs(mut self, n_epochs: usize) -> Self {
        self.0.n_epochs = n_epochs;
        self
    }

    /// Seed of the per-epoch shuffle of the perceptron
    pub fn perceptron_seed(mut self, seed: u64) -> Self {
        self.0.perceptron_seed = seed;
        self
    }

    /// Columns used as the two classifier inputs, also the plot axes
    pub fn features(mut self, features: [usize; 2]) -> Self {
        self.0.features = features;
        self
    }

    /// Whether the tensile strength is negated and shifted to start at zero before scaling
    pub fn flip_spz(mut self, flip_spz: bool) -> Self {
        self.0.flip_spz = flip_spz;
        self
    }
}

impl ParamGuard for SupervisedParams {
    type Checked = SupervisedValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let ratio = self.0.test_ratio;
        if !ratio.is_finite() || ratio <= 0. || ratio >= 1. {
            return Err(Error::SplitRatio(ratio));
        }
        if self.0.n_epochs == 0 {
            return Err(Error::Parameters("n_epochs cannot be 0".into()));
        }
        check_features(&self.0.features)?;
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl SupervisedValidParams {
    pub fn test_ratio(&self) -> f64 {
        self.test_ratio
    }

    pub fn split_seed(&self) -> u64 {
        self.split_seed
    }

    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    pub fn perceptron_seed(&self) -> u64 {
        self.perceptron_seed
    }

    pub fn features(&self) -> [usize; 2] {
        self.features
    }

    pub fn flip_spz(&self) -> bool {
        self.flip_spz
    }
}

/// Validated configuration of the unsupervised stage
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct UnsupervisedValidParams {
    shuffle_seed: u64,
    kmeans_seed: u64,
    n_clusters: usize,
    bandwidth: f64,
    features: [usize; 2],
}

/// Configuration of the unsupervised stage
///
/// Defaults:
/// * `shuffle_seed = 0`
/// * `kmeans_seed = 0`
/// * `n_clusters = 2` for k-means and agglomerative clustering
/// * `bandwidth = 0.33` for mean shift
/// * `features = [UCS, SPZ]`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct UnsupervisedParams(UnsupervisedValidParams);

impl Default for UnsupervisedParams {
    fn default() -> Self {
        Self(UnsupervisedValidParams {
            shuffle_seed: 0,
            kmeans_seed: 0,
            n_clusters: 2,
            bandwidth: 0.33,
            features: [UCS, SPZ],
        })
    }
}

impl UnsupervisedParams {
    /// Seed of the row shuffle applied before clustering
    pub fn shuffle_seed(mut self, seed: u64) -> Self {
        self.0.shuffle_seed = seed;
        self
    }

    pub fn kmeans_seed(mut self, seed: u64) -> Self {
        self.0.kmeans_seed = seed;
        self
    }

    pub fn n_clusters(mut self, n_clusters: usize) -> Self {
        self.0.n_clusters = n_clusters;
        self
    }

    pub fn bandwidth(mut self, bandwidth: f64) -> Self {
        self.0.bandwidth = bandwidth;
        self
    }

    pub fn features(mut self, features: [usize; 2]) -> Self {
        self.0.features = features;
        self
    }
}

impl ParamGuard for UnsupervisedParams {
    type Checked = UnsupervisedValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_clusters == 0 {
            return Err(Error::Parameters("n_clusters cannot be 0".into()));
        }
        if !self.0.bandwidth.is_finite() || self.0.bandwidth <= 0. {
            return Err(Error::Parameters(format!(
                "bandwidth must be positive, got {}",
                self.0.bandwidth
            )));
        }
        check_features(&self.0.features)?;
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl UnsupervisedValidParams {
    pub fn shuffle_seed(&self) -> u64 {
        self.shuffle_seed
    }

    pub fn kmeans_seed(&self) -> u64 {
        self.kmeans_seed
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn features(&self) -> [usize; 2] {
        self.features
    }
}

/// Validated rendering settings
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct PlotValidParams {
    output_dir: PathBuf,
    dpi: u32,
    figure_size: (f64, f64),
    grid_figure_size: (f64, f64),
    label_size: f64,
    point_size: f64,
}

/// Rendering settings shared by all figures
///
/// Sizes follow print conventions: figures in inches, fonts in points and markers as an area in
/// square points. Everything is converted to pixels through `dpi`.
///
/// Defaults:
/// * `output_dir = "."`
/// * `dpi = 600`
/// * `figure_size = (9, 6)`
/// * `grid_figure_size = (12, 8)` for the overview grid
/// * `label_size = 20`
/// * `point_size = 80`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct PlotParams(PlotValidParams);

impl Default for PlotParams {
    fn default() -> Self {
        Self(PlotValidParams {
            output_dir: PathBuf::from("."),
            dpi: 600,
            figure_size: (9., 6.),
            grid_figure_size: (12., 8.),
            label_size: 20.,
            point_size: 80.,
        })
    }
}

impl PlotParams {
    pub fn output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.0.output_dir = output_dir.into();
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.0.dpi = dpi;
        self
    }

    pub fn figure_size(mut self, width: f64, height: f64) -> Self {
        self.0.figure_size = (width, height);
        self
    }

    pub fn grid_figure_size(mut self, width: f64, height: f64) -> Self {
        self.0.grid_figure_size = (width, height);
        self
    }

    pub fn label_size(mut self, label_size: f64) -> Self {
        self.0.label_size = label_size;
        self
    }

    pub fn point_size(mut self, point_size: f64) -> Self {
        self.0.point_size = point_size;
        self
    }
}

impl ParamGuard for PlotParams {
    type Checked = PlotValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let positive = |v: f64| v.is_finite() && v > 0.;
        let p = &self.0;
        if p.dpi == 0 {
            Err(Error::Parameters("dpi cannot be 0".into()))
        } else if !(positive(p.figure_size.0) && positive(p.figure_size.1)) {
            Err(Error::Parameters(format!(
                "invalid figure size {:?}",
                p.figure_size
            )))
        } else if !(positive(p.grid_figure_size.0) && positive(p.grid_figure_size.1)) {
            Err(Error::Parameters(format!(
                "invalid figure size {:?}",
                p.grid_figure_size
            )))
        } else if !(positive(p.label_size) && positive(p.point_size)) {
            Err(Error::Parameters(
                "label and point size must be positive".into(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl PlotValidParams {
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of `file_name` inside the output directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Pixel dimensions of a figure given in inches
    pub fn pixels(&self, (width, height): (f64, f64)) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        ((width * dpi).round() as u32, (height * dpi).round() as u32)
    }

    /// Pixel dimensions of a single chart
    pub fn figure_pixels(&self) -> (u32, u32) {
        self.pixels(self.figure_size)
    }

    /// Pixel dimensions of the overview grid
    pub fn grid_figure_pixels(&self) -> (u32, u32) {
        self.pixels(self.grid_figure_size)
    }

    /// Convert a length in points into pixels
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.
    }

    /// Font height of axis labels and titles in pixels
    pub fn label_font(&self) -> u32 {
        self.points_to_pixels(self.label_size).round() as u32
    }

    /// Radius in pixels of a marker whose area is `area` square points
    pub fn marker_radius(&self, area: f64) -> i32 {
        self.points_to_pixels((area / std::f64::consts::PI).sqrt())
            .round()
            .max(1.) as i32
    }

    /// Radius in pixels of a regular scatter marker
    pub fn point_radius(&self) -> i32 {
        self.marker_radius(self.point_size)
    }
}
