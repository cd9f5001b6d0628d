//! rockclass prelude.
//!
//! The parameter sets, pipeline entry points and helpers most binaries need, importable as a
//! group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::hyperparams::{
    PlotParams, PlotValidParams, SupervisedParams, SupervisedValidParams, UnsupervisedParams,
    UnsupervisedValidParams,
};

#[doc(no_inline)]
pub use crate::metrics_classification::{accuracy_percent, correct_polarity};

#[doc(no_inline)]
pub use crate::preprocessing::{combine, select_features, FittedMaxScaler, MaxScaler};

#[doc(no_inline)]
pub use crate::split::TrainTestSplit;

#[doc(no_inline)]
pub use crate::supervised::{SupervisedData, SupervisedOutcome};

#[doc(no_inline)]
pub use crate::unsupervised::{Algorithm, Clustering, UnsupervisedData};
