//! Two-body orbit mechanics: osculating elements, orbit curves and
//! mean planetary elements.

pub mod curve;
pub mod elements;
pub mod planets;

pub use curve::{sample_orbit_curve, OrbitCurve};
pub use elements::{elements_to_state, state_to_elements, OrbitalElements};
pub use planets::{heliocentric_state, jd_to_jc, MeanElements};
