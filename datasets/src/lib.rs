//! `rockclass-datasets` synthesizes the toy geomechanical dataset used throughout `rockclass`.
//!
//! ## The Big Picture
//!
//! Two common rock types, gneiss and marl, are described by three measured properties:
//!
//! * `UCS`: unconfined compressive strength \[MPa\]
//! * `SPZ`: tensile strength \[MPa\]
//! * `DENS`: density \[g/cm³\]
//!
//! Every property of a rock type is drawn from its own normal distribution and folded to
//! non-negative values. The tables are persisted as CSV files (`gneiss.csv`, `marl.csv`) with the
//! header `UCS,SPZ,DENS`, which is the only hand-off between the generator and the
//! classification stages.
//!
//! ## Generating the tables
//!
//! ```
//! use rockclass_datasets::generate::GeneratorParams;
//!
//! let (gneiss, marl) = GeneratorParams::default().generate();
//! assert_eq!(gneiss.dim(), (350, 3));
//! assert_eq!(marl.dim(), (175, 3));
//! ```

mod dataset;
mod error;
pub mod generate;

use std::fmt;

pub use dataset::{array_from_csv, array_to_csv, read_rock_csv, write_rock_csv};
pub use error::{DatasetError, Result};
use generate::RockClassParams;

/// Column names of every rock table, in storage order
pub const FEATURE_NAMES: [&str; 3] = ["UCS", "SPZ", "DENS"];

/// Column of the unconfined compressive strength
pub const UCS: usize = 0;
/// Column of the tensile strength
pub const SPZ: usize = 1;
/// Column of the density
pub const DENS: usize = 2;

/// The two rock types separated by the classifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RockClass {
    Gneiss,
    Marl,
}

impl RockClass {
    /// Class label used in targets, gneiss is `0` and marl is `1`
    pub fn label(&self) -> usize {
        match self {
            RockClass::Gneiss => 0,
            RockClass::Marl => 1,
        }
    }

    /// Name of the CSV file holding this class
    pub fn file_name(&self) -> &'static str {
        match self {
            RockClass::Gneiss => "gneiss.csv",
            RockClass::Marl => "marl.csv",
        }
    }

    /// Documented property distributions of this class
    pub fn params(&self) -> RockClassParams {
        match self {
            RockClass::Gneiss => RockClassParams::gneiss(),
            RockClass::Marl => RockClassParams::marl(),
        }
    }
}

impl fmt::Display for RockClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RockClass::Gneiss => write!(f, "gneiss"),
            RockClass::Marl => write!(f, "marl"),
        }
    }
}
