use linfa_nn::{BuildError, NnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeanShiftError>;

/// An error when constructing invalid hyperparameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeanShiftParamsError {
    #[error("bandwidth must be positive and finite")]
    Bandwidth,
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
    #[error("tolerance must be positive and finite")]
    Tolerance,
}

/// An error when fitting with mean shift
#[derive(Error, Debug)]
pub enum MeanShiftError {
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] MeanShiftParamsError),
    /// None of the seeds had a single point within `bandwidth`
    #[error("no point was within bandwidth {0}, try a larger bandwidth")]
    NoPointsInBandwidth(f32),
    #[error("nearest neighbour index: {0}")]
    NnBuild(#[from] BuildError),
    #[error("nearest neighbour query: {0}")]
    NnQuery(#[from] NnError),
    #[error(transparent)]
    LinfaError(#[from] linfa::error::Error),
}
