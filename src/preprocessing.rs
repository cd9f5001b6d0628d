//! Assembling the labelled rock dataset and scaling it into the unit range

use std::iter;

use linfa::dataset::{DatasetBase, Records};
use linfa::traits::{Fit, Transformer};
use linfa::{Dataset, Float};
use log::debug;
use ndarray::{concatenate, Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2, Zip};
use rockclass_datasets::{RockClass, FEATURE_NAMES};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stack the gneiss table on top of the marl table and label the rows.
///
/// Class A rows come first and are labelled `0`, class B rows follow with label `1`. Both
/// tables must carry the columns `UCS, SPZ, DENS`.
pub fn combine(
    class_a: &Array2<f64>,
    class_b: &Array2<f64>,
) -> Result<Dataset<f64, usize, Ix1>> {
    for table in &[class_a, class_b] {
        if table.ncols() != FEATURE_NAMES.len() {
            return Err(Error::MismatchedShapes(FEATURE_NAMES.len(), table.ncols()));
        }
    }

    let records =
        concatenate(Axis(0), &[class_a.view(), class_b.view()]).map_err(linfa::Error::from)?;
    let targets = iter::repeat(RockClass::Gneiss.label())
        .take(class_a.nrows())
        .chain(iter::repeat(RockClass::Marl.label()).take(class_b.nrows()))
        .collect::<Array1<usize>>();
    debug!(
        "combined {} gneiss and {} marl rows",
        class_a.nrows(),
        class_b.nrows()
    );

    Ok(Dataset::new(records, targets).with_feature_names(FEATURE_NAMES.to_vec()))
}

/// Keep only the given feature columns, in the given order
pub fn select_features(
    dataset: &Dataset<f64, usize, Ix1>,
    features: &[usize],
) -> Result<Dataset<f64, usize, Ix1>> {
    if let Some(unknown) = features.iter().find(|f| **f >= dataset.nfeatures()) {
        return Err(Error::UnknownFeature(*unknown));
    }

    let names = dataset.feature_names();
    let names = features
        .iter()
        .map(|f| names[*f].clone())
        .collect::<Vec<_>>();
    let records = dataset.records().select(Axis(1), features);

    Ok(Dataset::new(records, dataset.targets().to_owned()).with_feature_names(names))
}

/// Scales every feature by its maximum over the whole dataset.
///
/// Optionally one column is mirrored first (`x ↦ max(x) - x`) so that its smallest value maps to
/// zero and its largest to one. The classic use is the tensile strength, which then grows in the
/// opposite direction of the compressive strength.
///
/// Only records are scaled, targets pass through untouched. A column whose maximum is zero is
/// left as it is.
///
/// ### Example
///
/// ```rust
/// use linfa::traits::{Fit, Transformer};
/// use linfa::Dataset;
/// use ndarray::array;
/// use rockclass::preprocessing::MaxScaler;
///
/// let dataset = Dataset::new(array![[2., 4.], [1., 8.]], array![0, 1]);
/// let scaler = MaxScaler::new().flip(1).fit(&dataset).unwrap();
/// let scaled = scaler.transform(dataset);
/// assert_eq!(scaled.records(), &array![[1., 1.], [0.5, 0.]]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaxScaler {
    flip: Option<usize>,
}

impl MaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror `column` before scaling
    pub fn flip(mut self, column: usize) -> Self {
        self.flip = Some(column);
        self
    }
}

fn column_max<F: Float, I: IntoIterator<Item = F>>(values: I) -> F {
    values
        .into_iter()
        .fold(F::neg_infinity(), |max, v| if v > max { v } else { max })
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, Error> for MaxScaler {
    type Object = FittedMaxScaler<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let records = dataset.records();
        if records.nsamples() == 0 {
            return Err(Error::EmptyDataset);
        }

        let mut maxima = records
            .columns()
            .into_iter()
            .map(|column| column_max(column.iter().copied()))
            .collect::<Array1<F>>();

        let flip = match self.flip {
            Some(col) if col >= records.ncols() => return Err(Error::UnknownFeature(col)),
            Some(col) => {
                let shift = maxima[col];
                // the mirrored column peaks where the original had its minimum
                maxima[col] = column_max(records.column(col).iter().map(|v| shift - *v));
                Some((col, shift))
            }
            None => None,
        };

        Ok(FittedMaxScaler { flip, maxima })
    }
}

/// The fitted column maxima and the optional mirror of a [`MaxScaler`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedMaxScaler<F: Float> {
    flip: Option<(usize, F)>,
    maxima: Array1<F>,
}

impl<F: Float> FittedMaxScaler<F> {
    /// Column maxima after mirroring, the divisors of the scaling
    pub fn maxima(&self) -> &Array1<F> {
        &self.maxima
    }

    /// Mirrored column and the value it is mirrored at
    pub fn flip(&self) -> Option<(usize, F)> {
        self.flip
    }
}

impl<F: Float> Transformer<Array2<F>, Array2<F>> for FittedMaxScaler<F> {
    /// Panics if the number of columns differs from the fitted data
    fn transform(&self, x: Array2<F>) -> Array2<F> {
        assert_eq!(
            x.ncols(),
            self.maxima.len(),
            "Number of features must match the number of features the scaler was fitted with."
        );

        let mut x = x;
        if let Some((col, shift)) = self.flip {
            x.column_mut(col).mapv_inplace(|v| shift - v);
        }
        Zip::from(x.columns_mut())
            .and(&self.maxima)
            .for_each(|mut column, &max| {
                if max != F::zero() {
                    column.mapv_inplace(|v| v / max);
                }
            });
        x
    }
}

impl<F: Float, D: Data<Elem = F>, T>
    Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>>
    for FittedMaxScaler<F>
{
    /// Substitutes the records of the dataset with their scaled version, keeping feature names
    fn transform(&self, x: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let names = x.feature_names();
        let scaled = self.transform(x.records.to_owned());
        x.with_records(scaled).with_feature_names(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, s};
    use rockclass_datasets::generate::GeneratorParams;
    use rockclass_datasets::{SPZ, UCS};

    fn rock_dataset() -> Dataset<f64, usize, Ix1> {
        let (gneiss, marl) = GeneratorParams::default().generate();
        combine(&gneiss, &marl).unwrap()
    }

    #[test]
    fn combine_stacks_and_labels() {
        let dataset = rock_dataset();
        assert_eq!(dataset.nsamples(), 525);
        assert_eq!(dataset.feature_names(), vec!["UCS", "SPZ", "DENS"]);

        let targets = dataset.targets();
        assert!(targets.slice(s![..350]).iter().all(|t| *t == 0));
        assert!(targets.slice(s![350..]).iter().all(|t| *t == 1));
    }

    #[test]
    fn combine_with_empty_class() {
        let marl = array![[1., 2., 3.]];
        let dataset = combine(&Array2::zeros((0, 3)), &marl).unwrap();
        assert_eq!(dataset.nsamples(), 1);
        assert_eq!(dataset.targets(), &array![1]);
    }

    #[test]
    fn combine_rejects_wrong_columns() {
        let res = combine(&Array2::zeros((2, 2)), &Array2::zeros((2, 3)));
        assert!(matches!(res, Err(Error::MismatchedShapes(3, 2))));
    }

    #[test]
    fn select_features_keeps_order_and_names() {
        let dataset = rock_dataset();
        let selected = select_features(&dataset, &[SPZ, UCS]).unwrap();
        assert_eq!(selected.feature_names(), vec!["SPZ", "UCS"]);
        assert_eq!(selected.records().column(0), dataset.records().column(SPZ));
        assert_eq!(selected.targets(), dataset.targets());

        assert!(matches!(
            select_features(&dataset, &[UCS, 7]),
            Err(Error::UnknownFeature(7))
        ));
    }

    #[test]
    fn every_feature_peaks_at_one() {
        let dataset = rock_dataset();
        let targets = dataset.targets().to_owned();
        for scaler in &[MaxScaler::new(), MaxScaler::new().flip(SPZ)] {
            let scaled = scaler.fit(&dataset).unwrap().transform(dataset.clone());
            for column in scaled.records().columns() {
                assert_abs_diff_eq!(column_max(column.iter().copied()), 1., epsilon = 1e-12);
                assert!(column.iter().all(|v| *v <= 1.));
            }
            assert_eq!(scaled.targets(), &targets);
        }
    }

    #[test]
    fn scaling_keeps_feature_names() {
        let dataset = rock_dataset();
        let scaled = MaxScaler::new()
            .flip(SPZ)
            .fit(&dataset)
            .unwrap()
            .transform(dataset);
        assert_eq!(scaled.feature_names(), vec!["UCS", "SPZ", "DENS"]);

        let selected = select_features(&scaled, &[UCS, SPZ]).unwrap();
        assert_eq!(selected.feature_names(), vec!["UCS", "SPZ"]);
    }

    #[test]
    fn flipped_column_starts_at_zero() {
        let dataset = rock_dataset();
        let scaler = MaxScaler::new().flip(SPZ).fit(&dataset).unwrap();
        let scaled = scaler.transform(dataset.clone());

        let spz = scaled.records().column(SPZ);
        let min = spz.iter().copied().fold(f64::INFINITY, f64::min);
        assert_abs_diff_eq!(min, 0.);

        // the strongest sample ends up at zero, the weakest at one
        let original = dataset.records().column(SPZ);
        let strongest = original
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, v)| if *v > best.1 { (i, *v) } else { best })
            .0;
        assert_abs_diff_eq!(spz[strongest], 0.);
    }

    #[test]
    fn label_column_survives_scaling_as_record() {
        // scaling a 0/1 label like any other column leaves it intact as long as one row is 1
        let dataset = rock_dataset();
        let labels = dataset.targets().mapv(|t| t as f64).insert_axis(Axis(1));
        let records = concatenate![Axis(1), dataset.records().view(), labels.view()];
        let with_labels = DatasetBase::from(records);

        let scaled = MaxScaler::new().fit(&with_labels).unwrap().transform(with_labels);
        assert_eq!(scaled.records().column(3), labels.column(0));
    }

    #[test]
    fn zero_column_is_left_unscaled() {
        let dataset = Dataset::new(array![[0., 2.], [0., 4.]], array![0, 1]);
        let scaler = MaxScaler::new().fit(&dataset).unwrap();
        assert_eq!(scaler.maxima(), &array![0., 4.]);
        let scaled = scaler.transform(dataset);
        assert_eq!(scaled.records(), &array![[0., 0.5], [0., 1.]]);
    }

    #[test]
    fn constant_flipped_column_becomes_zero() {
        let dataset = Dataset::new(array![[3., 1.], [3., 2.]], array![0, 1]);
        let scaled = MaxScaler::new()
            .flip(0)
            .fit(&dataset)
            .unwrap()
            .transform(dataset);
        assert_eq!(scaled.records().column(0), array![0., 0.]);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let dataset = Dataset::new(Array2::<f64>::zeros((0, 3)), Array1::<usize>::zeros(0));
        let res: Result<FittedMaxScaler<f64>> = MaxScaler::new().fit(&dataset);
        assert!(matches!(res, Err(Error::EmptyDataset)));
    }

    #[test]
    fn flip_of_unknown_column_is_rejected() {
        let dataset = Dataset::new(array![[1., 2.]], array![0]);
        let res: Result<FittedMaxScaler<f64>> = MaxScaler::new().flip(2).fit(&dataset);
        assert!(matches!(res, Err(Error::UnknownFeature(2))));
    }
}
