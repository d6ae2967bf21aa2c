//! Error types for the indicator constraint handler.

use solver_lp::LpError;
use thiserror::Error;

/// Errors that can occur in the indicator constraint handler.
#[derive(Error, Debug)]
pub enum IndicatorError {
    /// Invalid input data (non-binary indicator, missing slack, unknown variable).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Incompatible parameter combination.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The alternative LP could not be solved reliably and no cut was produced.
    #[error("Alternative LP error: {0}")]
    LpError(String),

    /// Constraint text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// LP backend error.
    #[error("LP backend error: {0}")]
    Lp(#[from] LpError),
}

/// Result type for indicator handler operations.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
