//! Mean planetary elements with linear secular rates
//!
//! Keplerian elements for approximate positions of the major planets
//! (Standish, JPL), valid 1800 AD - 2050 AD. Positions are heliocentric
//! ecliptic J2000; each planet stands in for its system barycenter.

use crate::elements::{elements_to_state, solve_kepler, true_from_eccentric, OrbitalElements};
use svis_core::constants::{AU_KM, MU_SUN};
use svis_core::{normalize_angle, MajorBody, Vec3};

/// Julian date of J2000.0
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean elements at J2000. Distances in AU, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeanElements {
    pub a: f64,
    pub e: f64,
    pub i: f64,
    /// Mean longitude
    pub l: f64,
    /// Longitude of perihelion
    pub varpi: f64,
    /// Longitude of ascending node
    pub omega: f64,
}

/// Rates per Julian century, same units as `MeanElements`
pub type SecularRates = MeanElements;

const fn el(a: f64, e: f64, i: f64, l: f64, varpi: f64, omega: f64) -> MeanElements {
    MeanElements { a, e, i, l, varpi, omega }
}

/// (elements, rates) for a planet; None for the Sun
pub fn mean_elements(body: MajorBody) -> Option<(MeanElements, SecularRates)> {
    let pair = match body {
        MajorBody::Sun => return None,
        MajorBody::Mercury => (
            el(0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593),
            el(0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081),
        ),
        MajorBody::Venus => (
            el(0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255),
            el(0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418),
        ),
        MajorBody::Earth => (
            el(1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0),
            el(0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0),
        ),
        MajorBody::Mars => (
            el(1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891),
            el(0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343),
        ),
        MajorBody::Jupiter => (
            el(5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909),
            el(-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106),
        ),
        MajorBody::Saturn => (
            el(9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448),
            el(-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794),
        ),
        MajorBody::Uranus => (
            el(19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503),
            el(-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589),
        ),
        MajorBody::Neptune => (
            el(30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574),
            el(0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.01262724),
        ),
    };
    Some(pair)
}

/// Convert a Julian date to Julian centuries from J2000
pub fn jd_to_jc(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

impl MeanElements {
    /// Propagate with secular rates to `jc` centuries past J2000
    pub fn propagate(&self, rates: &SecularRates, jc: f64) -> MeanElements {
        MeanElements {
            a: self.a + rates.a * jc,
            e: (self.e + rates.e * jc).clamp(0.0, 0.99),
            i: self.i + rates.i * jc,
            l: self.l + rates.l * jc,
            varpi: self.varpi + rates.varpi * jc,
            omega: self.omega + rates.omega * jc,
        }
    }

    /// Osculating elements in km and degrees, true anomaly from Kepler's equation
    pub fn to_osculating(&self) -> OrbitalElements {
        let mean_anomaly = normalize_angle((self.l - self.varpi).to_radians());
        let ea = solve_kepler(mean_anomaly, self.e);
        let nu = true_from_eccentric(ea, self.e);

        OrbitalElements {
            semi_major_axis: self.a * AU_KM,
            eccentricity: self.e,
            inclination_deg: self.i,
            ascending_node_deg: self.omega.rem_euclid(360.0),
            arg_periapsis_deg: (self.varpi - self.omega).rem_euclid(360.0),
            true_anomaly_deg: nu.to_degrees(),
            mean_anomaly_deg: mean_anomaly.to_degrees(),
        }
    }
}

/// Heliocentric ecliptic J2000 state (km, km/s) of a planet at a Julian date
pub fn heliocentric_state(body: MajorBody, jd: f64) -> Option<(Vec3, Vec3)> {
    let (elements, rates) = mean_elements(body)?;
    let osc = elements.propagate(&rates, jd_to_jc(jd)).to_osculating();
    Some(elements_to_state(&osc, MU_SUN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sun_has_no_elements() {
        assert!(mean_elements(MajorBody::Sun).is_none());
        assert!(heliocentric_state(MajorBody::Sun, J2000_JD).is_none());
    }

    #[test]
    fn test_every_planet_has_a_bound_orbit() {
        for &body in MajorBody::planets() {
            let (el, _) = mean_elements(body).unwrap();
            assert!(el.a > 0.0 && el.e < 1.0, "{body}");
        }
    }

    #[test]
    fn test_earth_distance_at_j2000() {
        let (r, v) = heliocentric_state(MajorBody::Earth, J2000_JD).unwrap();
        let dist_au = r.magnitude() / AU_KM;
        // Early January, close to perihelion
        assert!(dist_au > 0.98 && dist_au < 0.99, "{dist_au}");
        assert_abs_diff_eq!(v.magnitude(), 30.2, epsilon = 0.3);
        assert!(r.z.abs() < 1e-3 * AU_KM);
    }

    #[test]
    fn test_earth_longitude_at_j2000() {
        // The Sun sits near ecliptic longitude 280° on 2000-01-01, Earth opposite
        let (r, _) = heliocentric_state(MajorBody::Earth, J2000_JD).unwrap();
        let lon = r.y.atan2(r.x).to_degrees().rem_euclid(360.0);
        assert_abs_diff_eq!(lon, 100.4, epsilon = 1.0);
    }

    #[test]
    fn test_planet_distances_within_orbit_bounds() {
        let jd = J2000_JD + 5_000.0;
        for &body in MajorBody::planets() {
            let (el, _) = mean_elements(body).unwrap();
            let (r, _) = heliocentric_state(body, jd).unwrap();
            let d = r.magnitude() / AU_KM;
            assert!(d >= el.a * (1.0 - el.e) * 0.99 && d <= el.a * (1.0 + el.e) * 1.01, "{body}: {d}");
        }
    }

    #[test]
    fn test_propagation_advances_mean_longitude() {
        let (el, rates) = mean_elements(MajorBody::Mars).unwrap();
        let later = el.propagate(&rates, 0.01);
        assert_abs_diff_eq!(later.l - el.l, 191.4030268499, epsilon = 1e-9);
    }
}
