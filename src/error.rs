//! Error types of the rockclass pipeline
//!

use std::path::PathBuf;

use linfa_clustering::KMeansError;
use plotters::drawing::DrawingAreaErrorKind;
use rockclass_datasets::DatasetError;
use rockclass_meanshift::MeanShiftError;
use rockclass_perceptron::PerceptronError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("test ratio must lie in (0, 1), got {0}")]
    SplitRatio(f64),
    #[error("the dataset is empty")]
    EmptyDataset,
    #[error("expected {0} entries, found {1}")]
    MismatchedShapes(usize, usize),
    #[error("feature column {0} does not exist")]
    UnknownFeature(usize),
    #[error("could not create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("plotting failed: {0}")]
    Plot(String),
    #[error(transparent)]
    Perceptron(#[from] PerceptronError),
    #[error(transparent)]
    MeanShift(#[from] MeanShiftError),
    #[error(transparent)]
    KMeans(#[from] KMeansError),
    #[error(transparent)]
    Linfa(#[from] linfa::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Error::Plot(err.to_string())
    }
}
