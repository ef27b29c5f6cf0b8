//! Typed errors for the layout engine and table loading.
//!
//! Rendering and the CLI work with `anyhow::Result`; these enums are the
//! library-level precondition failures callers may want to match on.

use thiserror::Error;

/// Failures raised by the label layout helpers.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The element count is not a multiple of the requested group size.
    #[error("number of elements ({len}) must be a multiple of the group size ({size})")]
    ChunkSize { len: usize, size: usize },
    /// A group size of zero was requested.
    #[error("group size must be greater than zero")]
    ZeroGroupSize,
    /// Magnitude rounding is undefined for zero.
    #[error("cannot round 0 to a power-of-ten boundary")]
    ZeroMagnitude,
    /// A NaN or infinite value reached the layout engine.
    #[error("non-finite value in label layout: {0}")]
    NonFinite(f64),
}

/// Failures raised while building or loading a [`Table`](crate::models::Table).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("table has no rows or no columns")]
    Empty,
    #[error("column '{column}' has {got} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
    #[error("row {row}, column '{column}': cannot parse '{raw}' as a number")]
    Parse {
        row: usize,
        column: String,
        raw: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
