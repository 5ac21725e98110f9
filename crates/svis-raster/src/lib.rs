//! Software rasterizer for the orbit maps
//!
//! Everything draws into a [`Framebuffer`] of RGB bytes which is written out
//! as a plain-text PPM. Drawing clips silently at the screen edge.

pub mod color;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod ppm;

pub use color::Rgb;
pub use error::{RasterError, RasterResult};
pub use framebuffer::Framebuffer;
pub use ppm::{save_ppm, write_ppm};
