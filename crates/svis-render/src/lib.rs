//! Cameras, scene assembly and render passes for svis orbit maps

pub mod camera;
pub mod composer;
pub mod config;
pub mod error;
pub mod scene;

pub use camera::{auto_frame_distance, framed_radius, Camera, CameraMode};
pub use composer::{build_camera, render_all_modes, render_frame, render_pass, DrawStats, OutputLayout, RenderReport};
pub use config::{CustomOffset, RenderConfig};
pub use error::{RenderError, RenderResult};
pub use scene::{MajorBodyView, Scene, STAR_MAGNITUDE_LIMIT};
