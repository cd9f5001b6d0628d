use thiserror::Error;

/// Simplified `Result` using [`PerceptronError`](crate::PerceptronError) as error type
pub type Result<T> = std::result::Result<T, PerceptronError>;

/// An error when constructing invalid hyperparameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerceptronParamsError {
    #[error("max_n_epochs cannot be 0")]
    MaxEpochs,
    #[error("learning rate should be positive and finite, but is {0}")]
    LearningRate(f32),
}

/// An error when fitting a perceptron
#[derive(Error, Debug)]
pub enum PerceptronError {
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] PerceptronParamsError),
    /// Targets of a binary perceptron have to be `0` or `1`
    #[error("perceptron targets must be 0 or 1, found {0}")]
    InvalidTarget(usize),
    #[error("the number of records ({0}) does not match the number of targets ({1})")]
    MismatchedShapes(usize, usize),
    /// Training blew the weights up, the input most likely contains non-finite values
    #[error("weights are no longer finite after epoch {0}")]
    NotFinite(usize),
    #[error(transparent)]
    LinfaError(#[from] linfa::error::Error),
}
