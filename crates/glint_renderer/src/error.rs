use glint_math::MathError;
use thiserror::Error;

/// Errors raised while building a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("missing camera parameter: {0}")]
    Missing(&'static str),

    #[error("camera directions must be orthogonal")]
    NotOrthogonal,

    #[error("camera directions must be unit length")]
    NotNormalized,

    #[error("invalid view plane: {0}")]
    InvalidViewport(&'static str),

    #[error("anti-aliasing grid size must be at least 1, got {0}")]
    InvalidSupersampling(u32),

    #[error("math error: {0}")]
    Math(#[from] MathError),
}

/// Errors raised while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}
