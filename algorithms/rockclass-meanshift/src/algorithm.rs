use std::cmp::Ordering;

use crate::error::{MeanShiftError, Result};
use crate::hyperparams::MeanShiftValidParams;
use crate::MeanShift;
use linfa::traits::{Fit, PredictInplace};
use linfa::{DatasetBase, Float};
use linfa_nn::distance::{Distance, L2Dist};
use linfa_nn::{NearestNeighbour, NearestNeighbourIndex};
use log::debug;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix2, Zip};

/// A converged seed: its final position and how many observations were averaged into it
#[derive(Debug)]
struct Candidate<F> {
    center: Array1<F>,
    intensity: usize,
}

/// Order by intensity first, then lexicographically by position
fn by_intensity_then_center<F: Float>(a: &Candidate<F>, b: &Candidate<F>) -> Ordering {
    a.intensity.cmp(&b.intensity).then_with(|| {
        a.center
            .iter()
            .zip(b.center.iter())
            .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    })
}

impl<F: Float, N: NearestNeighbour> MeanShiftValidParams<F, N> {
    /// Move `seed` to the mean of the observations within `bandwidth` until it settles.
    ///
    /// Returns `None` if the seed has no observation in range.
    fn shift_seed(
        &self,
        index: &dyn NearestNeighbourIndex<F>,
        seed: ArrayView1<F>,
    ) -> Result<Option<Candidate<F>>> {
        let stop_threshold = self.stop_threshold();
        let mut center = seed.to_owned();
        let mut intensity = 0;

        for _ in 0..self.max_n_iterations {
            let within = index.within_range(center.view(), self.bandwidth)?;
            if within.is_empty() {
                break;
            }

            let mut mean = Array1::zeros(center.len());
            for (point, _) in &within {
                mean += point;
            }
            mean /= F::cast(within.len());

            let shift = L2Dist.distance(mean.view(), center.view());
            center = mean;
            intensity = within.len();
            if shift <= stop_threshold {
                break;
            }
        }

        if intensity == 0 {
            Ok(None)
        } else {
            Ok(Some(Candidate { center, intensity }))
        }
    }
}

impl<F: Float, D: Data<Elem = F>, T, N: NearestNeighbour>
    Fit<ArrayBase<D, Ix2>, T, MeanShiftError> for MeanShiftValidParams<F, N>
{
    type Object = MeanShift<F>;

    /// Every observation is used as a seed and shifted towards the densest region around it.
    /// Converged seeds are ranked by intensity and any seed closer than `bandwidth` to a higher
    /// ranked one is discarded, the survivors are the cluster centers.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let observations = dataset.records();
        if observations.nrows() == 0 {
            return Err(linfa::Error::NotEnoughSamples.into());
        }

        let index = self.nn_algo.from_batch(observations, L2Dist)?;
        let mut candidates = Vec::with_capacity(observations.nrows());
        for seed in observations.rows() {
            if let Some(candidate) = self.shift_seed(&*index, seed)? {
                candidates.push(candidate);
            }
        }
        if candidates.is_empty() {
            return Err(MeanShiftError::NoPointsInBandwidth(
                self.bandwidth.to_f32().unwrap_or(f32::NAN),
            ));
        }

        // highest intensity first
        candidates.sort_by(|a, b| by_intensity_then_center(b, a));

        let mut sorted = Array2::zeros((candidates.len(), observations.ncols()));
        for (mut row, candidate) in sorted.rows_mut().into_iter().zip(&candidates) {
            row.assign(&candidate.center);
        }

        let mut unique = vec![true; candidates.len()];
        let center_index = self.nn_algo.from_batch(&sorted, L2Dist)?;
        for i in 0..candidates.len() {
            if unique[i] {
                for (_, j) in center_index.within_range(sorted.row(i), self.bandwidth)? {
                    unique[j] = false;
                }
                unique[i] = true;
            }
        }

        let kept: Vec<usize> = (0..candidates.len()).filter(|i| unique[*i]).collect();
        let intensities = kept.iter().map(|i| candidates[*i].intensity).collect();
        let cluster_centers = sorted.select(Axis(0), &kept);
        debug!(
            "{} seeds converged to {} cluster centers",
            candidates.len(),
            kept.len()
        );

        Ok(MeanShift {
            cluster_centers,
            intensities,
        })
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<usize>> for MeanShift<F> {
    /// Assign every observation to its nearest cluster center
    fn predict_inplace(&self, observations: &ArrayBase<D, Ix2>, memberships: &mut Array1<usize>) {
        assert_eq!(
            observations.nrows(),
            memberships.len(),
            "The number of data points must match the number of memberships."
        );

        Zip::from(observations.rows())
            .and(memberships)
            .for_each(|observation, membership| {
                *membership = self.closest_center(observation);
            });
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<usize> {
        Array1::zeros(x.nrows())
    }
}

impl<F: Float> MeanShift<F> {
    fn closest_center(&self, observation: ArrayView1<F>) -> usize {
        let mut closest = 0;
        let mut minimum = F::infinity();
        for (i, center) in self.cluster_centers.rows().into_iter().enumerate() {
            let distance = L2Dist.rdistance(center, observation);
            if distance < minimum {
                minimum = distance;
                closest = i;
            }
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeanShiftParamsError;
    use approx::assert_abs_diff_eq;
    use linfa::traits::Predict;
    use linfa::ParamGuard;
    use ndarray::{array, concatenate};
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand_xoshiro::Xoshiro256Plus;

    fn two_squares() -> Array2<f64> {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let low = Array2::random_using((60, 2), Uniform::new(0., 0.1), &mut rng);
        let high = Array2::random_using((40, 2), Uniform::new(0.9, 1.), &mut rng);
        concatenate![Axis(0), low, high]
    }

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<MeanShift<f64>>();
    }

    #[test]
    fn finds_two_separated_blobs() {
        let records = two_squares();
        let model = MeanShift::params(0.33)
            .fit(&DatasetBase::from(records.clone()))
            .unwrap();

        assert_eq!(model.n_clusters(), 2);
        // the larger blob wins the first id
        assert_eq!(model.intensities(), &array![60, 40]);
        assert!(model.cluster_centers().row(0).iter().all(|v| *v < 0.1));
        assert!(model.cluster_centers().row(1).iter().all(|v| *v > 0.9));

        let memberships = model.predict(&records);
        assert!(memberships.iter().take(60).all(|m| *m == 0));
        assert!(memberships.iter().skip(60).all(|m| *m == 1));
    }

    #[test]
    fn single_point_is_its_own_center() {
        let records = array![[0.25, 0.75]];
        let model = MeanShift::params(0.33)
            .fit(&DatasetBase::from(records.clone()))
            .unwrap();
        assert_abs_diff_eq!(model.cluster_centers(), &records);
        assert_eq!(model.intensities(), &array![1]);
    }

    #[test]
    fn far_points_form_own_clusters() {
        let records = array![[0., 0.], [1., 1.], [2., 2.]];
        let model = MeanShift::params(0.33)
            .fit(&DatasetBase::from(records.clone()))
            .unwrap();
        // equal intensities fall back to descending positions
        assert_abs_diff_eq!(
            model.cluster_centers(),
            &array![[2., 2.], [1., 1.], [0., 0.]]
        );
        assert_eq!(model.predict(&records), array![2, 1, 0]);
    }

    #[test]
    fn close_points_merge() {
        let records = array![[0., 0.], [0.1, 0.], [0.2, 0.]];
        let model = MeanShift::params(0.33)
            .fit(&DatasetBase::from(records.clone()))
            .unwrap();
        assert_eq!(model.n_clusters(), 1);
        assert_abs_diff_eq!(
            model.cluster_centers(),
            &array![[0.1, 0.]],
            epsilon = 1e-12
        );
        assert_eq!(model.predict(&records), array![0, 0, 0]);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let records = Array2::<f64>::zeros((0, 2));
        let res = MeanShift::params(0.33).fit(&DatasetBase::from(records));
        assert!(matches!(
            res,
            Err(MeanShiftError::LinfaError(linfa::Error::NotEnoughSamples))
        ));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let records = array![[0., 0.]];
        let res = MeanShift::params(-1.).fit(&DatasetBase::from(records));
        assert!(matches!(
            res,
            Err(MeanShiftError::InvalidParams(MeanShiftParamsError::Bandwidth))
        ));
    }

    #[test]
    fn max_one_iteration_keeps_first_mean() {
        let records = array![[0., 0.], [0.3, 0.], [0.6, 0.]];
        let model = MeanShift::params(0.33)
            .max_n_iterations(1)
            .check()
            .unwrap()
            .fit(&DatasetBase::from(records))
            .unwrap();
        // after one step the seeds sit at 0.15, 0.3 and 0.45, all within bandwidth of 0.3
        assert_eq!(model.n_clusters(), 1);
        assert_eq!(model.intensities(), &array![3]);
        assert_abs_diff_eq!(model.cluster_centers(), &array![[0.3, 0.]], epsilon = 1e-12);
    }
}
