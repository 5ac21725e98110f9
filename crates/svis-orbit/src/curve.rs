//! Orbit curves: a closed polyline traced through true anomaly
//!
//! No special handling for open orbits. Hyperbolic and parabolic inputs
//! produce non-finite or negative-radius points which the camera later culls.

use crate::elements::{perifocal_to_reference, state_to_elements};
use svis_core::Vec3;
use std::f64::consts::TAU;
use tracing::debug;

/// Sampled orbit, first and last points coincide
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitCurve {
    points: Vec<Vec3>,
}

impl OrbitCurve {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs, the polyline's segments
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Largest distance from the reference pole among finite points
    pub fn max_planar_radius(&self) -> f64 {
        self.points
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| p.planar_radius())
            .fold(0.0, f64::max)
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Osculating orbit through a state (km, km/s) about a body with `mu`
    pub fn from_state(position: Vec3, velocity: Vec3, mu: f64, samples: usize) -> OrbitCurve {
        let el = state_to_elements(position, velocity, mu);
        sample_orbit_curve(
            el.semi_major_axis,
            el.eccentricity,
            el.inclination_deg,
            el.ascending_node_deg,
            el.arg_periapsis_deg,
            samples,
        )
    }
}

/// Trace `samples + 1` points of the conic r(ν) = a(1 - e²)/(1 + e cos ν)
/// for ν evenly spaced over [0, 2π], rotated into the reference frame.
pub fn sample_orbit_curve(
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
    ascending_node_deg: f64,
    arg_periapsis_deg: f64,
    samples: usize,
) -> OrbitCurve {
    let samples = samples.max(1);
    let p = semi_major_axis * (1.0 - eccentricity * eccentricity);

    let mut points = Vec::with_capacity(samples + 1);
    for k in 0..samples {
        let nu = TAU * k as f64 / samples as f64;
        let (sin_nu, cos_nu) = nu.sin_cos();
        let r = p / (1.0 + eccentricity * cos_nu);
        points.push(perifocal_to_reference(
            r * cos_nu,
            r * sin_nu,
            inclination_deg,
            ascending_node_deg,
            arg_periapsis_deg,
        ));
    }
    points.push(points[0]);

    if eccentricity >= 1.0 {
        debug!(eccentricity, "sampling open orbit, out-of-range points will be culled");
    }

    OrbitCurve { points }
}
