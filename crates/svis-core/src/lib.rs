//! Core value types for the svis map renderer: vectors, angles, bodies and frames.

pub mod angles;
pub mod bodies;
pub mod constants;
pub mod coordinates;
pub mod frames;

pub use angles::{normalize_angle, parse_dec_deg, parse_ra_deg, AngleParseError};
pub use bodies::{parse_carrier, Anchor, MajorBody, UnknownBody, PLANET_FRAMING_RADII_KM};
pub use coordinates::Vec3;
