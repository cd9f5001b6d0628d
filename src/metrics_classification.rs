//! Scoring of binary rock classifications
//!
//! Accuracies are reported as percentages rounded to one decimal, e.g. `96.2`. Cluster ids carry
//! no meaning on their own, so clusterings are scored after choosing the better of the two
//! possible id assignments.
use ndarray::{Array1, ArrayBase, Data, Ix1, Zip};

use crate::error::{Error, Result};

/// Fraction of positions where `prediction` equals `ground_truth`
pub fn accuracy<S, T>(prediction: &ArrayBase<S, Ix1>, ground_truth: &ArrayBase<T, Ix1>) -> Result<f64>
where
    S: Data<Elem = usize>,
    T: Data<Elem = usize>,
{
    if prediction.len() != ground_truth.len() {
        return Err(Error::MismatchedShapes(ground_truth.len(), prediction.len()));
    }
    if prediction.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut n_correct = 0usize;
    Zip::from(prediction)
        .and(ground_truth)
        .for_each(|p, t| n_correct += usize::from(p == t));

    Ok(n_correct as f64 / prediction.len() as f64)
}

/// Round a fraction to three decimals and express it in percent
pub fn round_percent(fraction: f64) -> f64 {
    (fraction * 1000.).round() / 10.
}

/// Accuracy in percent, rounded to one decimal
pub fn accuracy_percent<S, T>(
    prediction: &ArrayBase<S, Ix1>,
    ground_truth: &ArrayBase<T, Ix1>,
) -> Result<f64>
where
    S: Data<Elem = usize>,
    T: Data<Elem = usize>,
{
    accuracy(prediction, ground_truth).map(round_percent)
}

/// Swap the ids `0` and `1`, any other id is kept
pub fn flip_binary_labels<S: Data<Elem = usize>>(labels: &ArrayBase<S, Ix1>) -> Array1<usize> {
    labels.mapv(|label| match label {
        0 => 1,
        1 => 0,
        other => other,
    })
}

/// Score a clustering against the true labels, independent of how the ids were assigned.
///
/// If the rounded accuracy is below 50% the ids `0` and `1` are swapped and the clustering is
/// scored once more. Returns the better accuracy in percent together with the labels achieving
/// it. For two clusters the result is never below 50%.
pub fn correct_polarity<S, T>(
    prediction: &ArrayBase<S, Ix1>,
    ground_truth: &ArrayBase<T, Ix1>,
) -> Result<(f64, Array1<usize>)>
where
    S: Data<Elem = usize>,
    T: Data<Elem = usize>,
{
    let raw = accuracy_percent(prediction, ground_truth)?;
    if raw >= 50. {
        return Ok((raw, prediction.to_owned()));
    }

    let flipped = flip_binary_labels(prediction);
    let corrected = accuracy_percent(&flipped, ground_truth)?;
    if corrected > raw {
        Ok((corrected, flipped))
    } else {
        Ok((raw, prediction.to_owned()))
    }
}
