//! Layout error types

use kontura_geom::GeomError;
use thiserror::Error;

/// Layout operation result type
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Layout errors
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Area not found: {0}")]
    AreaNotFound(u32),

    #[error("Invalid grid shape {rows}x{columns}: rows and columns must be at least 1")]
    InvalidGridShape { rows: u32, columns: u32 },

    #[error("Split percent out of range: {0} (expected 0-100)")]
    InvalidSplitPercent(u32),

    #[error("Expected {expected} child areas, got {actual}")]
    ChildCountMismatch { expected: usize, actual: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Measurement error: {0}")]
    Geom(#[from] GeomError),
}
