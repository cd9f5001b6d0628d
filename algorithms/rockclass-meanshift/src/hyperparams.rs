use crate::error::MeanShiftParamsError;
use linfa::{Float, ParamGuard};
use linfa_nn::NearestNeighbour;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for the execution of
/// the [mean shift algorithm](crate::MeanShift).
pub struct MeanShiftValidParams<F: Float, N: NearestNeighbour> {
    pub(crate) bandwidth: F,
    pub(crate) max_n_iterations: usize,
    pub(crate) tolerance: F,
    pub(crate) nn_algo: N,
}

#[derive(Clone, Debug, PartialEq)]
/// Helper struct for building a set of [mean shift hyperparameters](MeanShiftValidParams)
pub struct MeanShiftParams<F: Float, N: NearestNeighbour>(pub(crate) MeanShiftValidParams<F, N>);

impl<F: Float, N: NearestNeighbour> MeanShiftParams<F, N> {
    pub(crate) fn new(bandwidth: F, nn_algo: N) -> Self {
        Self(MeanShiftValidParams {
            bandwidth,
            max_n_iterations: 300,
            tolerance: F::cast(1e-3),
            nn_algo,
        })
    }

    /// Set the radius of the flat kernel
    pub fn bandwidth(mut self, bandwidth: F) -> Self {
        self.0.bandwidth = bandwidth;
        self
    }

    /// Set the maximum number of mean updates per seed
    pub fn max_n_iterations(mut self, max_n_iterations: usize) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }

    /// Set the convergence tolerance, relative to the bandwidth.
    ///
    /// A seed stops moving once its shift is at most `tolerance * bandwidth`.
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Set the nearest neighbour algorithm used for range queries
    pub fn nn_algo(mut self, nn_algo: N) -> Self {
        self.0.nn_algo = nn_algo;
        self
    }
}

impl<F: Float, N: NearestNeighbour> ParamGuard for MeanShiftParams<F, N> {
    type Checked = MeanShiftValidParams<F, N>;
    type Error = MeanShiftParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if !self.0.bandwidth.is_finite() || self.0.bandwidth <= F::zero() {
            Err(MeanShiftParamsError::Bandwidth)
        } else if self.0.max_n_iterations == 0 {
            Err(MeanShiftParamsError::MaxIterations)
        } else if !self.0.tolerance.is_finite() || self.0.tolerance <= F::zero() {
            Err(MeanShiftParamsError::Tolerance)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, N: NearestNeighbour> MeanShiftValidParams<F, N> {
    pub fn bandwidth(&self) -> F {
        self.bandwidth
    }

    pub fn max_n_iterations(&self) -> usize {
        self.max_n_iterations
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// Absolute shift below which a seed counts as converged
    pub fn stop_threshold(&self) -> F {
        self.tolerance * self.bandwidth
    }

    pub fn nn_algo(&self) -> &N {
        &self.nn_algo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeanShift;

    #[test]
    fn bandwidth_must_be_positive() {
        let res = MeanShift::params(0.0).check();
        assert!(matches!(res, Err(MeanShiftParamsError::Bandwidth)));

        let res = MeanShift::params(f64::NAN).check();
        assert!(matches!(res, Err(MeanShiftParamsError::Bandwidth)));
    }

    #[test]
    fn max_n_iterations_cannot_be_zero() {
        let res = MeanShift::params(0.5).max_n_iterations(0).check();
        assert!(matches!(res, Err(MeanShiftParamsError::MaxIterations)));
    }

    #[test]
    fn tolerance_must_be_positive() {
        let res = MeanShift::params(0.5).tolerance(-1.).check();
        assert!(matches!(res, Err(MeanShiftParamsError::Tolerance)));
    }

    #[test]
    fn stop_threshold_scales_with_bandwidth() {
        let params = MeanShift::<f64>::params(0.5).check().unwrap();
        assert_eq!(params.max_n_iterations(), 300);
        assert!((params.stop_threshold() - 5e-4).abs() < 1e-12);
    }
}
