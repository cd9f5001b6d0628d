//! Error definitions for reading and writing rock tables

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Read(#[from] ndarray_csv::ReadError),
    #[error("unexpected table header {found:?}, expected {expected:?}")]
    Header {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("rock tables have {expected} property columns, got {found}")]
    NColumns { expected: usize, found: usize },
}
