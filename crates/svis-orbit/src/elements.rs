//! Osculating Keplerian elements from a Cartesian state and back
//!
//! Angles are carried in degrees, lengths in km, velocities in km/s. The
//! reference frame is whatever the input state is expressed in; the renderer
//! feeds ecliptic J2000 vectors.

use svis_core::constants::{PARABOLIC_SMA_SENTINEL, PARABOLIC_TOLERANCE, UNDEFINED_MEAN_ANOMALY};
use svis_core::Vec3;
use std::f64::consts::{PI, TAU};

/// Below this the node vector or eccentricity vector is treated as zero
const DEGENERATE_EPS: f64 = 1e-12;

/// Classical osculating elements
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (km), negative for hyperbolic orbits,
    /// `PARABOLIC_SMA_SENTINEL` for parabolic ones
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    /// Longitude of the ascending node, [0, 360)
    pub ascending_node_deg: f64,
    /// Argument of periapsis, [0, 360)
    pub arg_periapsis_deg: f64,
    pub true_anomaly_deg: f64,
    /// Mean anomaly, `UNDEFINED_MEAN_ANOMALY` for parabolic orbits
    pub mean_anomaly_deg: f64,
}

impl OrbitalElements {
    pub fn is_parabolic(&self) -> bool {
        (self.eccentricity - 1.0).abs() <= PARABOLIC_TOLERANCE
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.eccentricity > 1.0 + PARABOLIC_TOLERANCE
    }

    /// Semi-latus rectum p = a(1 - e²)
    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }
}

fn clamped_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// Derive osculating elements from a position (km) and velocity (km/s)
/// around a central body with gravitational parameter `mu` (km³/s²).
///
/// Degenerate geometry does not fail: equatorial orbits report Ω = 0,
/// circular orbits ω = 0, and the true anomaly then falls back to the
/// angle between the position and velocity directions. A radial or
/// motionless state has no orbit normal and reports i = 0, ν = 0 where the
/// geometry leaves them undefined.
pub fn state_to_elements(position: Vec3, velocity: Vec3, mu: f64) -> OrbitalElements {
    let r = position.magnitude();
    let v = velocity.magnitude();

    let h = position.cross(velocity);
    let h_mag = h.magnitude();
    let node = Vec3::Z.cross(h);
    let n_mag = node.magnitude();

    let radial = if r > 0.0 { position / r } else { Vec3::ZERO };
    let e_vec = velocity.cross(h) / mu - radial;
    let e = e_vec.magnitude();

    let energy = v * v / 2.0 - mu / r;
    let semi_major_axis = if (e - 1.0).abs() > PARABOLIC_TOLERANCE {
        -mu / (2.0 * energy)
    } else {
        PARABOLIC_SMA_SENTINEL
    };

    let inclination = if h_mag <= DEGENERATE_EPS { 0.0 } else { clamped_acos(h.z / h_mag) };

    let equatorial = n_mag <= DEGENERATE_EPS * h_mag.max(1.0);
    let circular = e <= DEGENERATE_EPS;

    let ascending_node = if equatorial {
        0.0
    } else {
        let omega = clamped_acos(node.x / n_mag);
        if node.y < 0.0 { TAU - omega } else { omega }
    };

    let arg_periapsis = if equatorial || circular {
        0.0
    } else {
        let w = clamped_acos(node.dot(e_vec) / (n_mag * e));
        if e_vec.z < 0.0 { TAU - w } else { w }
    };

    let true_anomaly = if circular {
        if r * v <= 0.0 {
            0.0
        } else {
            clamped_acos(position.dot(velocity) / (r * v))
        }
    } else {
        let nu = clamped_acos(e_vec.dot(position) / (e * r));
        if position.dot(velocity) < 0.0 { TAU - nu } else { nu }
    };

    let mean_anomaly_deg = if e < 1.0 - PARABOLIC_TOLERANCE {
        let mut ecc = 2.0 * ((true_anomaly / 2.0).tan() * ((1.0 - e) / (1.0 + e)).sqrt()).atan();
        if ecc < 0.0 {
            ecc += TAU;
        }
        (ecc - e * ecc.sin()).to_degrees()
    } else if e > 1.0 + PARABOLIC_TOLERANCE {
        let f = 2.0 * ((true_anomaly / 2.0).tan() * ((e - 1.0) / (e + 1.0)).sqrt()).atanh();
        (e * f.sinh() - f).to_degrees()
    } else {
        UNDEFINED_MEAN_ANOMALY
    };

    OrbitalElements {
        semi_major_axis,
        eccentricity: e,
        inclination_deg: inclination.to_degrees(),
        ascending_node_deg: ascending_node.to_degrees(),
        arg_periapsis_deg: arg_periapsis.to_degrees(),
        true_anomaly_deg: true_anomaly.to_degrees(),
        mean_anomaly_deg,
    }
}

/// Rotate a point of the orbital plane (x toward periapsis) into the
/// reference frame: by ω within the plane, tilt by i about the line of
/// nodes, then precess by Ω about the reference pole.
pub fn perifocal_to_reference(
    x: f64,
    y: f64,
    inclination_deg: f64,
    ascending_node_deg: f64,
    arg_periapsis_deg: f64,
) -> Vec3 {
    let (sin_w, cos_w) = arg_periapsis_deg.to_radians().sin_cos();
    let (sin_i, cos_i) = inclination_deg.to_radians().sin_cos();
    let (sin_o, cos_o) = ascending_node_deg.to_radians().sin_cos();

    let x1 = x * cos_w - y * sin_w;
    let y1 = x * sin_w + y * cos_w;

    let y2 = y1 * cos_i;
    let z2 = y1 * sin_i;

    Vec3::from_cartesian(x1 * cos_o - y2 * sin_o, x1 * sin_o + y2 * cos_o, z2)
}

/// Cartesian state (km, km/s) for a set of closed-orbit elements
pub fn elements_to_state(elements: &OrbitalElements, mu: f64) -> (Vec3, Vec3) {
    let e = elements.eccentricity;
    let nu = elements.true_anomaly_deg.to_radians();
    let p = elements.semi_latus_rectum();
    let r = p / (1.0 + e * nu.cos());
    let k = (mu / p).sqrt();

    let angles = (
        elements.inclination_deg,
        elements.ascending_node_deg,
        elements.arg_periapsis_deg,
    );
    let position = perifocal_to_reference(r * nu.cos(), r * nu.sin(), angles.0, angles.1, angles.2);
    let velocity = perifocal_to_reference(-k * nu.sin(), k * (e + nu.cos()), angles.0, angles.1, angles.2);
    (position, velocity)
}

/// Solve Kepler's equation M = E - e sin E for the eccentric anomaly (rad)
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let m = svis_core::normalize_angle(mean_anomaly);

    // Newton-Raphson iteration
    let mut ea = if e < 0.8 { m } else { PI };
    for _ in 0..50 {
        let delta = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// True anomaly (rad) from eccentric anomaly
pub fn true_from_eccentric(eccentric_anomaly: f64, e: f64) -> f64 {
    // tan(ν/2) = sqrt((1+e)/(1-e)) tan(E/2)
    let half_nu = ((1.0 + e) / (1.0 - e)).sqrt() * (eccentric_anomaly / 2.0).tan();
    svis_core::normalize_angle(2.0 * half_nu.atan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use svis_core::constants::{AU_KM, MU_SUN};

    fn angle_diff_deg(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_earth_like_state_is_near_circular() {
        let el = state_to_elements(
            Vec3::from_cartesian(1.496e8, 0.0, 0.0),
            Vec3::from_cartesian(0.0, 29.78, 0.0),
            MU_SUN,
        );
        assert_abs_diff_eq!(el.semi_major_axis, 1.496e8, epsilon = 0.01 * 1.496e8);
        assert!(el.eccentricity < 0.02);
        assert_abs_diff_eq!(el.inclination_deg, 0.0, epsilon = 1e-9);
        assert_eq!(el.ascending_node_deg, 0.0);
        assert_eq!(el.arg_periapsis_deg, 0.0);
    }

    #[test]
    fn test_exactly_circular_falls_back_to_position_velocity_angle() {
        let r = AU_KM;
        let v = (MU_SUN / r).sqrt();
        let el = state_to_elements(Vec3::from_cartesian(r, 0.0, 0.0), Vec3::from_cartesian(0.0, v, 0.0), MU_SUN);
        assert!(el.eccentricity < 1e-9);
        assert_abs_diff_eq!(el.semi_major_axis, r, epsilon = 1e-3);
        assert_abs_diff_eq!(el.true_anomaly_deg, 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hyperbolic_state() {
        let r = AU_KM;
        let v = 1.5 * (2.0 * MU_SUN / r).sqrt();
        let el = state_to_elements(Vec3::from_cartesian(r, 0.0, 0.0), Vec3::from_cartesian(0.0, v, 0.0), MU_SUN);
        assert!(el.eccentricity > 1.0);
        assert!(el.semi_major_axis < 0.0);
        assert!(el.is_hyperbolic());
        // At periapsis the hyperbolic anomaly is zero
        assert_abs_diff_eq!(el.mean_anomaly_deg, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parabolic_state_uses_sentinels() {
        let r = AU_KM;
        let v = (2.0 * MU_SUN / r).sqrt();
        let el = state_to_elements(Vec3::from_cartesian(r, 0.0, 0.0), Vec3::from_cartesian(0.0, v, 0.0), MU_SUN);
        assert!(el.is_parabolic());
        assert_eq!(el.semi_major_axis, PARABOLIC_SMA_SENTINEL);
        assert_eq!(el.mean_anomaly_deg, UNDEFINED_MEAN_ANOMALY);
    }

    #[test]
    fn test_retrograde_inclination() {
        let el = state_to_elements(
            Vec3::from_cartesian(AU_KM, 0.0, 0.0),
            Vec3::from_cartesian(0.0, -29.0, 1.0),
            MU_SUN,
        );
        assert!(el.inclination_deg > 90.0);
    }

    #[test]
    fn test_radial_state_has_finite_angles() {
        let el = state_to_elements(Vec3::from_cartesian(1e8, 0.0, 0.0), Vec3::from_cartesian(10.0, 0.0, 0.0), MU_SUN);
        assert_eq!(el.inclination_deg, 0.0);
        assert_eq!(el.ascending_node_deg, 0.0);
        assert_eq!(el.arg_periapsis_deg, 0.0);
        assert!(el.true_anomaly_deg.is_finite());
        assert!(el.eccentricity.is_finite());
    }

    #[test]
    fn test_motionless_state_has_finite_angles() {
        let el = state_to_elements(Vec3::from_cartesian(AU_KM, 0.0, 0.0), Vec3::ZERO, MU_SUN);
        assert_eq!(el.inclination_deg, 0.0);
        assert!(el.true_anomaly_deg.is_finite());
        assert!(el.arg_periapsis_deg.is_finite());

        // Sitting on the focus: no direction at all
        let el = state_to_elements(Vec3::ZERO, Vec3::from_cartesian(0.0, 1.0, 0.0), MU_SUN);
        assert_eq!(el.inclination_deg, 0.0);
        assert_eq!(el.true_anomaly_deg, 0.0);
    }

    #[test]
    fn test_kepler_solver_endpoints() {
        assert_abs_diff_eq!(solve_kepler(0.0, 0.0167), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(solve_kepler(PI, 0.0167), PI, epsilon = 1e-12);

        let m = PI / 4.0;
        let ea = solve_kepler(m, 0.0);
        assert_abs_diff_eq!(ea, m, epsilon = 1e-12);
        assert_abs_diff_eq!(true_from_eccentric(ea, 0.0), m, epsilon = 1e-12);
    }

    #[test]
    fn test_kepler_solver_high_eccentricity() {
        let e = 0.95;
        for m in [0.1, 1.0, 2.5, 5.0] {
            let ea = solve_kepler(m, e);
            assert_abs_diff_eq!(ea - e * ea.sin(), m, epsilon = 1e-10);
        }
    }

    proptest! {
        #[test]
        fn prop_elements_roundtrip(
            a in 0.3f64..40.0,
            e in 0.01f64..0.9,
            i in 1.0f64..179.0,
            node in 0.0f64..360.0,
            peri in 0.0f64..360.0,
            nu in 0.0f64..360.0,
        ) {
            let elements = OrbitalElements {
                semi_major_axis: a * AU_KM,
                eccentricity: e,
                inclination_deg: i,
                ascending_node_deg: node,
                arg_periapsis_deg: peri,
                true_anomaly_deg: nu,
                mean_anomaly_deg: 0.0,
            };
            let (r, v) = elements_to_state(&elements, MU_SUN);
            let back = state_to_elements(r, v, MU_SUN);

            prop_assert!((back.semi_major_axis / elements.semi_major_axis - 1.0).abs() < 1e-8);
            prop_assert!((back.eccentricity - e).abs() < 1e-8);
            prop_assert!((back.inclination_deg - i).abs() < 1e-6);
            prop_assert!(angle_diff_deg(back.ascending_node_deg, node) < 1e-5);
            prop_assert!(angle_diff_deg(back.arg_periapsis_deg, peri) < 1e-4);
            prop_assert!(angle_diff_deg(back.true_anomaly_deg, nu) < 1e-4);

            // Mean anomaly must agree with Kepler's equation
            let ea = solve_kepler(back.mean_anomaly_deg.to_radians(), e);
            let nu_again = true_from_eccentric(ea, e).to_degrees();
            prop_assert!(angle_diff_deg(nu_again, nu) < 1e-4);
        }
    }
}
