//! Major-body ephemerides
//!
//! Two sources behind one trait: SPK kernels read through ANISE (a pure Rust
//! replacement for NASA SPICE), and an analytic fallback built from mean
//! planetary elements that needs no data files.

use crate::error::EphemerisError;
use hifitime::Epoch;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use svis_core::frames::{equatorial_to_ecliptic_j2000, rotate};
use svis_core::{MajorBody, Vec3};

/// Position (km) and velocity (km/s)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl BodyState {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// This state expressed relative to another one
    pub fn relative_to(&self, origin: &BodyState) -> BodyState {
        BodyState {
            position: self.position - origin.position,
            velocity: self.velocity - origin.velocity,
        }
    }

    pub fn rotated(&self, m: &Matrix3<f64>) -> BodyState {
        BodyState {
            position: rotate(m, self.position),
            velocity: rotate(m, self.velocity),
        }
    }
}

/// Source of Sun and planet-barycenter states
pub trait EphemerisSource {
    /// Short name for logs
    fn name(&self) -> &str;

    /// States of every `MajorBody`, in `MajorBody::ALL` order, relative to
    /// the solar system barycenter in the equatorial J2000 frame
    fn major_body_states(&self, epoch: Epoch) -> Result<Vec<(MajorBody, BodyState)>, EphemerisError>;

    /// Rotation from equatorial J2000 into the ecliptic working frame at `epoch`
    fn equatorial_to_ecliptic(&self, _epoch: Epoch) -> Matrix3<f64> {
        equatorial_to_ecliptic_j2000()
    }
}

/// Which ephemeris source to build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisKind {
    #[default]
    Spk,
    Analytic,
}

impl fmt::Display for EphemerisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spk => f.write_str("spk"),
            Self::Analytic => f.write_str("analytic"),
        }
    }
}

impl FromStr for EphemerisKind {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spk" | "spice" | "kernels" => Ok(Self::Spk),
            "analytic" | "kepler" => Ok(Self::Analytic),
            other => Err(EphemerisError::Unavailable(other.to_string())),
        }
    }
}

/// Mean-element ephemeris: Sun fixed at the origin, planets on Keplerian
/// orbits with linear secular drift
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisSource for AnalyticEphemeris {
    fn name(&self) -> &str {
        "analytic"
    }

    fn major_body_states(&self, epoch: Epoch) -> Result<Vec<(MajorBody, BodyState)>, EphemerisError> {
        let jd = epoch.to_jde_tdb_days();
        let ecl_to_equ = equatorial_to_ecliptic_j2000().transpose();

        MajorBody::all()
            .iter()
            .map(|&body| {
                if body == MajorBody::Sun {
                    return Ok((body, BodyState::default()));
                }
                let (position, velocity) = svis_orbit::heliocentric_state(body, jd)
                    .ok_or_else(|| EphemerisError::BodyNotFound(body.to_string()))?;
                Ok((body, BodyState::new(position, velocity).rotated(&ecl_to_equ)))
            })
            .collect()
    }
}

#[cfg(feature = "spk")]
pub use spk::SpkEphemeris;

#[cfg(feature = "spk")]
mod spk {
    use super::{BodyState, EphemerisError, EphemerisSource, Epoch, MajorBody, Vec3};
    use anise::prelude::{Almanac, Frame, SPK};
    use anyhow::Result;
    use std::path::{Path, PathBuf};

    /// Kernel-backed ephemeris
    pub struct SpkEphemeris {
        almanac: Almanac,
    }

    fn spk_error(path: &Path, e: impl std::fmt::Display) -> EphemerisError {
        EphemerisError::SpkLoadError(format!("{:?}: {}", path, e))
    }

    /// Parse one kernel and register it with `almanac`
    fn add_kernel(almanac: Almanac, path: &Path) -> Result<Almanac, EphemerisError> {
        let name = path.to_str().ok_or_else(|| spk_error(path, "path is not valid UTF-8"))?;
        let spk = SPK::load(name).map_err(|e| spk_error(path, e))?;
        let almanac = almanac.with_spk(spk).map_err(|e| spk_error(path, e))?;
        tracing::debug!("kernel {:?} registered", path);
        Ok(almanac)
    }

    impl SpkEphemeris {
        /// Build an almanac from the given kernels, in order
        pub fn load(spk_paths: &[PathBuf]) -> Result<Self> {
            let almanac = spk_paths
                .iter()
                .try_fold(Almanac::default(), |almanac, path| add_kernel(almanac, path))?;
            tracing::info!("{} SPK kernel(s) loaded", spk_paths.len());
            Ok(Self { almanac })
        }

        /// Load every `.bsp` kernel found directly inside `dir`
        pub fn load_dir(dir: &Path) -> Result<Self> {
            let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
                .map_err(|e| EphemerisError::SpkLoadError(format!("{:?}: {}", dir, e)))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("bsp"))
                })
                .collect();
            paths.sort();

            if paths.is_empty() {
                anyhow::bail!("no SPK kernels (*.bsp) found in {:?}", dir);
            }
            Self::load(&paths)
        }

        fn body_state(&self, body: MajorBody, epoch: Epoch) -> Result<BodyState, EphemerisError> {
            let body_frame = Frame::from_ephem_j2000(body.naif_id());
            let ssb_frame = Frame::from_ephem_j2000(0);

            // No aberration correction for a map
            let state = self.almanac.translate(body_frame, ssb_frame, epoch, None)
                .map_err(|e| EphemerisError::BodyNotFound(format!("{}: {}", body, e)))?;

            Ok(BodyState::new(
                Vec3::from_cartesian(state.radius_km.x, state.radius_km.y, state.radius_km.z),
                Vec3::from_cartesian(state.velocity_km_s.x, state.velocity_km_s.y, state.velocity_km_s.z),
            ))
        }
    }

    impl EphemerisSource for SpkEphemeris {
        fn name(&self) -> &str {
            "spk"
        }

        fn major_body_states(&self, epoch: Epoch) -> Result<Vec<(MajorBody, BodyState)>, EphemerisError> {
            MajorBody::all()
                .iter()
                .map(|&body| Ok((body, self.body_state(body, epoch)?)))
                .collect()
        }
    }
}

/// Build the configured source. `kernels` is only read for `Spk`.
pub fn open_ephemeris(kind: EphemerisKind, kernels: &std::path::Path) -> anyhow::Result<Box<dyn EphemerisSource>> {
    match kind {
        EphemerisKind::Analytic => Ok(Box::new(AnalyticEphemeris::new())),
        #[cfg(feature = "spk")]
        EphemerisKind::Spk => Ok(Box::new(SpkEphemeris::load_dir(kernels)?)),
        #[cfg(not(feature = "spk"))]
        EphemerisKind::Spk => {
            let _ = kernels;
            Err(EphemerisError::Unavailable(kind.to_string()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use svis_core::constants::AU_KM;

    fn j2000() -> Epoch {
        Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0)
    }

    #[test]
    fn test_analytic_returns_every_body_in_order() {
        let states = AnalyticEphemeris::new().major_body_states(j2000()).unwrap();
        let bodies: Vec<MajorBody> = states.iter().map(|(b, _)| *b).collect();
        assert_eq!(bodies, MajorBody::ALL.to_vec());
        assert_eq!(states[0].1, BodyState::default());
    }

    #[test]
    fn test_analytic_states_are_equatorial() {
        let eph = AnalyticEphemeris::new();
        let epoch = j2000();
        let states = eph.major_body_states(epoch).unwrap();
        let m = eph.equatorial_to_ecliptic(epoch);

        // Earth sits in the ecliptic plane once rotated back
        let earth = states[3].1.rotated(&m);
        assert!(earth.position.z.abs() < 1e-4 * AU_KM);
        // ...but not in the equatorial one
        assert!(states[3].1.position.z.abs() > 0.1 * AU_KM);

        let jupiter_au = states[5].1.position.magnitude() / AU_KM;
        assert!(jupiter_au > 4.9 && jupiter_au < 5.5);
    }

    #[test]
    fn test_relative_state() {
        let a = BodyState::new(Vec3::from_cartesian(5.0, 5.0, 5.0), Vec3::from_cartesian(1.0, 1.0, 1.0));
        let b = BodyState::new(Vec3::from_cartesian(1.0, 2.0, 3.0), Vec3::from_cartesian(1.0, 0.0, 0.0));
        let rel = a.relative_to(&b);
        assert_eq!(rel.position, Vec3::from_cartesian(4.0, 3.0, 2.0));
        assert_eq!(rel.velocity, Vec3::from_cartesian(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let s = BodyState::new(Vec3::from_cartesian(1.0e8, -2.0e7, 3.0e7), Vec3::from_cartesian(3.0, 20.0, -1.0));
        let r = s.rotated(&equatorial_to_ecliptic_j2000());
        assert_abs_diff_eq!(r.position.magnitude(), s.position.magnitude(), epsilon = 1e-6);
        assert_abs_diff_eq!(r.velocity.magnitude(), s.velocity.magnitude(), epsilon = 1e-12);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("SPK".parse::<EphemerisKind>().unwrap(), EphemerisKind::Spk);
        assert_eq!("analytic".parse::<EphemerisKind>().unwrap(), EphemerisKind::Analytic);
        assert!("horizons".parse::<EphemerisKind>().is_err());
        assert_eq!(EphemerisKind::default(), EphemerisKind::Spk);
    }

    #[test]
    fn test_open_analytic_needs_no_files() {
        let eph = open_ephemeris(EphemerisKind::Analytic, std::path::Path::new("does/not/exist")).unwrap();
        assert_eq!(eph.name(), "analytic");
    }

    #[cfg(feature = "spk")]
    #[test]
    fn test_spk_dir_without_kernels_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SpkEphemeris::load_dir(dir.path()).is_err());
        assert!(open_ephemeris(EphemerisKind::Spk, &dir.path().join("missing")).is_err());
    }

    #[cfg(feature = "spk")]
    #[test]
    fn test_corrupt_kernel_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("de440s.bsp"), b"not a DAF file at all").unwrap();
        let err = SpkEphemeris::load_dir(dir.path()).err().unwrap();
        assert!(err.to_string().contains("de440s.bsp"));
    }
}
