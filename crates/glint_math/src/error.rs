use thiserror::Error;

/// Errors raised when constructing math primitives from invalid input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("zero-length vector is not allowed")]
    ZeroVector,

    #[error("vector components must be finite")]
    NonFinite,

    #[error("invalid box on axis {axis}: min {min} is greater than max {max}")]
    InvalidBox { axis: usize, min: f64, max: f64 },
}

/// Result type for math construction.
pub type Result<T> = std::result::Result<T, MathError>;
