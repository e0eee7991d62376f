use thiserror::Error;

/// Failures surfaced by grid construction, resizing and (de)serialization.
///
/// Out-of-range cell access is deliberately not represented here; it is a
/// silent no-op so drag gestures can run off the edge of the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("grid of {cells} cells exceeds the maximum of {max}")]
    TooManyCells { cells: usize, max: usize },

    #[error("grid data length is {actual}, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
