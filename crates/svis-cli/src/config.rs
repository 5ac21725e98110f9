//! Run configuration: defaults, then an optional JSON file, then flags

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use svis_data::EphemerisKind;
use svis_render::RenderConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub state_vectors: PathBuf,
    pub ephemeris: EphemerisKind,
    /// Directory of SPK kernels, read when `ephemeris` is `spk`
    pub kernels: PathBuf,
    /// `None` disables the star field
    pub catalog: Option<PathBuf>,
    pub prefix: String,
    pub output_dir: PathBuf,
    #[serde(flatten)]
    pub render: RenderConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            state_vectors: PathBuf::from("state_vectors.txt"),
            ephemeris: EphemerisKind::Spk,
            kernels: PathBuf::from("data/SPICE/"),
            catalog: Some(PathBuf::from("data/Tycho2.csv")),
            prefix: "map_".to_string(),
            output_dir: PathBuf::from("."),
            render: RenderConfig::default(),
        }
    }
}

impl RunConfig {
    /// Read a JSON file; keys it leaves out keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        if self.render.width == 0 || self.render.height == 0 {
            anyhow::bail!("screen size must be positive, got {}x{}", self.render.width, self.render.height);
        }
        if !(0.0..180.0).contains(&self.render.fov_deg) || self.render.fov_deg == 0.0 {
            anyhow::bail!("field of view must be between 0 and 180 degrees, got {}", self.render.fov_deg);
        }
        if self.render.mu.is_nan() || self.render.mu <= 0.0 {
            anyhow::bail!("gravitational parameter must be positive, got {}", self.render.mu);
        }
        Ok(())
    }
}

/// `None` (any case) or an empty string turns the catalog off
pub fn parse_catalog(text: &str) -> Option<PathBuf> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use svis_core::Anchor;

    #[test]
    fn test_defaults() {
        let c = RunConfig::default();
        assert_eq!(c.prefix, "map_");
        assert_eq!(c.catalog, Some(PathBuf::from("data/Tycho2.csv")));
        assert_eq!(c.ephemeris, EphemerisKind::Spk);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_json_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ephemeris": "analytic", "catalog": null, "width": 320, "carrier": "MP", "custom_offset": {{"ra_deg": 10}}}}"#
        )
        .unwrap();

        let c = RunConfig::load(file.path()).unwrap();
        assert_eq!(c.ephemeris, EphemerisKind::Analytic);
        assert_eq!(c.catalog, None);
        assert_eq!(c.render.width, 320);
        assert_eq!(c.render.height, 480);
        assert_eq!(c.render.carrier, Some(Anchor::TrackedBody));
        assert_eq!(c.render.custom_offset.ra_deg, 10.0);
        assert_eq!(c.render.custom_offset.dec_deg, 45.0);
        assert_eq!(c.prefix, "map_");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(RunConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_validation() {
        let mut c = RunConfig::default();
        c.render.width = 0;
        assert!(c.validate().is_err());

        let mut c = RunConfig::default();
        c.render.fov_deg = 180.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_parse_catalog() {
        assert_eq!(parse_catalog("None"), None);
        assert_eq!(parse_catalog("none"), None);
        assert_eq!(parse_catalog("stars.csv"), Some(PathBuf::from("stars.csv")));
    }
}
