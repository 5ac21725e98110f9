//! Error types for the rasterizer

use thiserror::Error;

pub type RasterResult<T> = Result<T, RasterError>;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("invalid framebuffer size {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
