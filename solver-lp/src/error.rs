//! Error types for the LP backend.

use thiserror::Error;

/// Errors reported by an LP backend.
///
/// These signal misuse of the interface (bad indices, inconsistent array
/// lengths). A solve that ends without a definite answer is not an error;
/// it is reported through the status queries of [`crate::LpInterface`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    /// Row index out of range.
    #[error("Row index {index} out of range ({nrows} rows)")]
    RowOutOfRange {
        /// Offending index.
        index: usize,
        /// Current row count.
        nrows: usize,
    },

    /// Column index out of range.
    #[error("Column index {index} out of range ({ncols} columns)")]
    ColOutOfRange {
        /// Offending index.
        index: usize,
        /// Current column count.
        ncols: usize,
    },

    /// Parallel input arrays disagree in length.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Bounds or sides with lower > upper, or NaN values.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Solution queried before a successful solve.
    #[error("No solution available")]
    NoSolution,
}

/// Result type for LP backend operations.
pub type LpResult<T> = Result<T, LpError>;
