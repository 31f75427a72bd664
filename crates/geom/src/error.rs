//! Geometry and unit conversion error types

use thiserror::Error;

/// Geometry operation result type
pub type GeomResult<T> = Result<T, GeomError>;

/// Geometry and unit conversion errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeomError {
    #[error("Empty measurement value")]
    EmptyValue,

    #[error("Invalid measurement value: {0}")]
    InvalidValue(String),

    #[error("Expected 1, 2, or 4 margin values, got {0}")]
    BadMarginCount(usize),

    #[error("Expected 1 or 2 spacing values, got {0}")]
    BadSpacingCount(usize),
}
