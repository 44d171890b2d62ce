//! Grid-based spatial subsampling of scattered measurements.
//!
//! Maps scattered `(x, y, value)` measurements in the unit square onto a
//! fixed-resolution grid by nearest-grid-point assignment, averaging values
//! that collide on the same cell, then re-linearizes the populated cells
//! into a reduced training set of `(grid coordinate, averaged value)` pairs.
//!
//! Only strictly positive values participate: non-positive measurements are
//! filtered on the way in, and empty cells (which default to the neutral
//! value 0) are excluded from the derived set on the way out.

mod error;
mod grid;
mod io;

pub use error::{Result, SubsampleError};
pub use grid::{subsample, Grid, SubsampleConfig, Subsampled};
pub use io::{read_csv_matrix, write_csv_matrix};
