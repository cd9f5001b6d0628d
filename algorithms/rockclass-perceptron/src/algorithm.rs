use crate::error::{PerceptronError, Result};
use crate::hyperparams::PerceptronValidParams;
use crate::Perceptron;
use linfa::dataset::AsSingleTargets;
use linfa::traits::{Fit, PredictInplace};
use linfa::{DatasetBase, Float};
use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix2, Zip};
use rand::seq::SliceRandom;
use rand::Rng;

impl<F, R, D, T> Fit<ArrayBase<D, Ix2>, T, PerceptronError> for PerceptronValidParams<F, R>
where
    F: Float,
    R: Rng + Clone,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = usize>,
{
    type Object = Perceptron<F>;

    /// Fit a perceptron given a feature matrix `x` and a binary target `y`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)` and the target variable
    /// `y` shape `(n_samples)` with values in `{0, 1}`.
    ///
    /// Weights and intercept start at zero. On every epoch the samples are visited in a freshly
    /// shuffled order and every sample with `y · (w·x + b) <= 0`, where `y` is mapped to `±1`,
    /// moves the hyperplane by `learning_rate · y · x`.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let x = dataset.records();
        let y = dataset.as_single_targets();

        if x.nrows() != y.len() {
            return Err(PerceptronError::MismatchedShapes(x.nrows(), y.len()));
        }
        if x.nrows() == 0 {
            return Err(linfa::Error::NotEnoughSamples.into());
        }

        let signs = y
            .iter()
            .map(|label| match label {
                0 => Ok(-F::one()),
                1 => Ok(F::one()),
                other => Err(PerceptronError::InvalidTarget(*other)),
            })
            .collect::<Result<Vec<F>>>()?;

        let mut model = Perceptron::new(x.ncols());
        let mut rng = self.rng.clone();
        let mut order: Vec<usize> = (0..x.nrows()).collect();

        for epoch in 1..=self.max_n_epochs {
            if self.shuffle {
                order.shuffle(&mut rng);
            }

            let mut n_updates = 0;
            for &idx in &order {
                let sample = x.row(idx);
                let sign = signs[idx];
                let margin = sign * (sample.dot(&model.weights) + model.intercept);
                // a NaN margin counts as misclassified
                if margin.is_nan() || margin <= F::zero() {
                    let step = self.learning_rate * sign;
                    model.weights.scaled_add(step, &sample);
                    if self.fit_intercept {
                        model.intercept += step;
                    }
                    n_updates += 1;
                }
            }

            if !model.intercept.is_finite() || model.weights.iter().any(|w| !w.is_finite()) {
                return Err(PerceptronError::NotFinite(epoch));
            }
            model.n_epochs = epoch;
            debug!("epoch {}: {} updates", epoch, n_updates);
        }

        Ok(model)
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<usize>>
    for Perceptron<F>
{
    /// Assign class `1` to every sample strictly on the positive side of the hyperplane and `0`
    /// otherwise.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<usize>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );
        assert_eq!(
            x.ncols(),
            self.weights.len(),
            "Number of data features must match the number of features the model was trained with."
        );

        let scores = self.decision_function(x);
        Zip::from(&scores).and(y).for_each(|score, label| {
            *label = if *score > F::zero() { 1 } else { 0 };
        });
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<usize> {
        Array1::zeros(x.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PerceptronParamsError;
    use approx::assert_abs_diff_eq;
    use linfa::traits::Predict;
    use linfa::{Dataset, ParamGuard};
    use ndarray::{array, Array2, Ix1};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    fn separable(n: usize, seed: u64) -> Dataset<f64, usize, Ix1> {
        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let mut records = Array2::random_using((n, 2), Uniform::new(0., 1.), &mut rng);
        let mut targets = Array1::zeros(n);
        for (i, mut row) in records.rows_mut().into_iter().enumerate() {
            // keep a margin around the line x0 + x1 = 1
            if i % 2 == 0 {
                row.mapv_inplace(|v| v * 0.4);
            } else {
                row.mapv_inplace(|v| 0.6 + v * 0.4);
                targets[i] = 1;
            }
        }
        Dataset::new(records, targets)
    }

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<Perceptron<f64>>();
    }

    #[test]
    fn separates_linearly_separable_data() {
        let dataset = separable(200, 42);
        let model = Perceptron::params().max_n_epochs(300).fit(&dataset).unwrap();
        let prediction = model.predict(dataset.records());
        assert_eq!(&prediction, dataset.targets());
        assert_eq!(model.n_epochs(), 300);
    }

    #[test]
    fn single_update_from_zero_weights() {
        // the first sample always triggers an update since the margin starts at zero
        let dataset = Dataset::new(array![[2., 3.]], array![1]);
        let model = Perceptron::params()
            .max_n_epochs(1)
            .fit(&dataset)
            .unwrap();
        assert_abs_diff_eq!(model.weights(), &array![2., 3.]);
        assert_abs_diff_eq!(model.intercept(), 1.);

        let dataset = Dataset::new(array![[2., 3.]], array![0]);
        let model = Perceptron::params()
            .max_n_epochs(1)
            .fit_intercept(false)
            .fit(&dataset)
            .unwrap();
        assert_abs_diff_eq!(model.weights(), &array![-2., -3.]);
        assert_abs_diff_eq!(model.intercept(), 0.);
    }

    #[test]
    fn zero_score_is_class_zero() {
        let model = Perceptron::<f64>::new(2);
        let prediction = model.predict(&array![[1., 1.], [0., 0.]]);
        assert_eq!(prediction, array![0, 0]);
    }

    #[test]
    fn training_is_reproducible_with_seed() {
        let dataset = separable(100, 7);
        let rng = Xoshiro256Plus::seed_from_u64(0);
        let a = Perceptron::params_with_rng(rng.clone())
            .max_n_epochs(5)
            .fit(&dataset)
            .unwrap();
        let b = Perceptron::params_with_rng(rng)
            .max_n_epochs(5)
            .fit(&dataset)
            .unwrap();
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.intercept(), b.intercept());
    }

    #[test]
    fn rejects_non_binary_targets() {
        let dataset = Dataset::new(array![[1., 0.], [0., 1.]], array![0, 2]);
        let res = Perceptron::params().fit(&dataset);
        assert!(matches!(res, Err(PerceptronError::InvalidTarget(2))));
    }

    #[test]
    fn rejects_empty_dataset() {
        let dataset = Dataset::new(Array2::<f64>::zeros((0, 2)), Array1::<usize>::zeros(0));
        let res = Perceptron::params().fit(&dataset);
        assert!(matches!(
            res,
            Err(PerceptronError::LinfaError(linfa::Error::NotEnoughSamples))
        ));
    }

    #[test]
    fn rejects_invalid_params() {
        let dataset = separable(10, 1);
        let res = Perceptron::params().max_n_epochs(0).fit(&dataset);
        assert!(matches!(
            res,
            Err(PerceptronError::InvalidParams(PerceptronParamsError::MaxEpochs))
        ));
    }

    #[test]
    fn non_finite_input_is_reported() {
        let dataset = Dataset::new(array![[f64::INFINITY, 1.], [0., 1.]], array![1, 0]);
        let res = Perceptron::params().shuffle(false).fit(&dataset);
        assert!(matches!(res, Err(PerceptronError::NotFinite(1))));

        let dataset = Dataset::new(array![[f64::NAN, 1.]], array![1]);
        let res = Perceptron::params().shuffle(false).fit(&dataset);
        assert!(matches!(res, Err(PerceptronError::NotFinite(1))));
    }

    #[test]
    fn checked_params_fit_directly() {
        let dataset = separable(50, 3);
        let params = Perceptron::params().max_n_epochs(10).check().unwrap();
        let model = params.fit(&dataset).unwrap();
        assert_eq!(model.weights().len(), 2);
    }
}
