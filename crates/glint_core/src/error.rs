use glint_math::MathError;
use thiserror::Error;

/// Errors that can occur while constructing shapes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("height must be positive and finite, got {0}")]
    InvalidHeight(f64),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertices are collinear or repeated")]
    DegenerateVertices,

    #[error("vertex {0} does not lie in the polygon plane")]
    NonPlanarPolygon(usize),

    #[error("polygon is not convex at vertex {0}")]
    NonConvexPolygon(usize),

    #[error("math error: {0}")]
    Math(#[from] MathError),
}

/// Result type for geometry construction.
pub type Result<T> = std::result::Result<T, GeometryError>;
