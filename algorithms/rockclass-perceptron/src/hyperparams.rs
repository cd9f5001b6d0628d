use crate::error::PerceptronParamsError;
use linfa::{Float, ParamGuard};
use rand::Rng;

/// A verified hyper-parameter set ready for the estimation of a [`Perceptron`](crate::Perceptron)
///
/// See [`PerceptronParams`] for more information.
#[derive(Clone, Debug, PartialEq)]
pub struct PerceptronValidParams<F: Float, R: Rng> {
    pub(crate) max_n_epochs: usize,
    pub(crate) learning_rate: F,
    pub(crate) fit_intercept: bool,
    pub(crate) shuffle: bool,
    pub(crate) rng: R,
}

/// Helper struct to construct a set of [valid hyperparameters](PerceptronValidParams) for the
/// [`Perceptron`](crate::Perceptron) using the builder pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct PerceptronParams<F: Float, R: Rng>(pub(crate) PerceptronValidParams<F, R>);

impl<F: Float, R: Rng> PerceptronParams<F, R> {
    /// Create hyperparameters with the given random number generator
    ///
    /// Defaults are provided for the optional parameters:
    /// * `max_n_epochs = 1000`
    /// * `learning_rate = 1.0`
    /// * `fit_intercept = true`
    /// * `shuffle = true`
    pub fn new(rng: R) -> Self {
        Self(PerceptronValidParams {
            max_n_epochs: 1000,
            learning_rate: F::one(),
            fit_intercept: true,
            shuffle: true,
            rng,
        })
    }

    /// Set the number of passes over the training data.
    ///
    /// Training always runs for exactly this many epochs.
    pub fn max_n_epochs(mut self, max_n_epochs: usize) -> Self {
        self.0.max_n_epochs = max_n_epochs;
        self
    }

    /// Set the step applied on every misclassified sample.
    ///
    /// Defaults to `1.0`, must be positive and finite.
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Whether to learn a bias term besides the feature weights
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }

    /// Whether to visit the training samples in a fresh random order on every epoch
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.0.shuffle = shuffle;
        self
    }

    /// Set the random number generator used for shuffling
    pub fn rng(mut self, rng: R) -> Self {
        self.0.rng = rng;
        self
    }
}

impl<F: Float, R: Rng> ParamGuard for PerceptronParams<F, R> {
    type Checked = PerceptronValidParams<F, R>;
    type Error = PerceptronParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.max_n_epochs == 0 {
            Err(PerceptronParamsError::MaxEpochs)
        } else if !self.0.learning_rate.is_finite() || self.0.learning_rate <= F::zero() {
            Err(PerceptronParamsError::LearningRate(
                self.0.learning_rate.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng> PerceptronValidParams<F, R> {
    pub fn max_n_epochs(&self) -> usize {
        self.max_n_epochs
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Perceptron;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<PerceptronParams<f64, Xoshiro256Plus>>();
        has_autotraits::<PerceptronValidParams<f64, Xoshiro256Plus>>();
    }

    #[test]
    fn max_n_epochs_cannot_be_zero() {
        let res = Perceptron::<f64>::params().max_n_epochs(0).check();
        assert!(matches!(res, Err(PerceptronParamsError::MaxEpochs)));
    }

    #[test]
    fn learning_rate_has_to_be_positive() {
        let res = Perceptron::<f64>::params().learning_rate(0.).check();
        assert!(matches!(res, Err(PerceptronParamsError::LearningRate(_))));

        let res = Perceptron::<f64>::params().learning_rate(f64::INFINITY).check();
        assert!(matches!(res, Err(PerceptronParamsError::LearningRate(_))));
    }

    #[test]
    fn defaults_are_valid() {
        let params = Perceptron::<f64>::params().check().unwrap();
        assert_eq!(params.max_n_epochs(), 1000);
        assert_eq!(params.learning_rate(), 1.);
        assert!(params.fit_intercept());
        assert!(params.shuffle());
    }
}
