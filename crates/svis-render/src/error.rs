//! Error types for render passes

use svis_data::EphemerisError;
use svis_raster::RasterError;
use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("degenerate camera: {0}")]
    DegenerateCamera(String),

    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
