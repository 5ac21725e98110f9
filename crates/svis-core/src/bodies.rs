//! Major bodies of the scene and the anchors a camera can attach to
//!
//! Physical data from the NASA planetary fact sheets, marker colours are the
//! palette used for the rendered maps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sun plus the eight planet system barycenters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorBody {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl MajorBody {
    pub const ALL: [MajorBody; 9] = [
        Self::Sun, Self::Mercury, Self::Venus, Self::Earth, Self::Mars,
        Self::Jupiter, Self::Saturn, Self::Uranus, Self::Neptune,
    ];

    pub fn all() -> &'static [MajorBody] {
        &Self::ALL
    }

    /// Planets only (no Sun)
    pub fn planets() -> &'static [MajorBody] {
        &Self::ALL[1..]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// NAIF ID (Sun itself, planets by system barycenter)
    pub fn naif_id(&self) -> i32 {
        match self {
            Self::Sun => 10,
            Self::Mercury => 1,
            Self::Venus => 2,
            Self::Earth => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
        }
    }

    /// Mean physical radius in km
    pub fn radius_km(&self) -> f64 {
        match self {
            Self::Sun => 695_508.0,
            Self::Mercury => 2_439.5,
            Self::Venus => 6_052.0,
            Self::Earth => 6_378.0,
            Self::Mars => 3_396.0,
            Self::Jupiter => 71_492.0,
            Self::Saturn => 60_268.0,
            Self::Uranus => 25_559.0,
            Self::Neptune => 24_764.0,
        }
    }

    /// Marker and orbit colour (RGB)
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Sun => [255, 245, 200],
            Self::Mercury => [169, 169, 169],
            Self::Venus => [255, 238, 219],
            Self::Earth => [100, 149, 237],
            Self::Mars => [188, 39, 50],
            Self::Jupiter => [218, 165, 105],
            Self::Saturn => [210, 180, 140],
            Self::Uranus => [173, 216, 230],
            Self::Neptune => [72, 61, 139],
        }
    }

    /// Minimum marker radius in pixels
    pub fn marker_floor_px(&self) -> f64 {
        match self {
            Self::Sun => 5.0,
            _ => 3.0,
        }
    }

    /// Whether the orbit curve is derived from the Sun-relative state rather
    /// than the barycentric one. Innermost bodies wobble visibly otherwise.
    pub fn sun_relative_orbit(&self) -> bool {
        matches!(self, Self::Sun | Self::Mercury | Self::Venus)
    }
}

impl fmt::Display for MajorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ascending table of planetary orbit extents (km) used to frame the overview cameras
pub const PLANET_FRAMING_RADII_KM: [f64; 8] = [
    69.8e6, 108.9e6, 152.1e6, 249.3e6, 816.4e6, 1506.5e6, 3001.4e6, 4558.9e6,
];

/// Something a custom camera can look at or ride along with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anchor {
    #[serde(alias = "SOLAR_SYSTEM_BARYCENTER")]
    Barycenter,
    Sun,
    #[serde(alias = "MERCURY_BARYCENTER")]
    Mercury,
    #[serde(alias = "VENUS_BARYCENTER")]
    Venus,
    #[serde(alias = "EARTH_BARYCENTER")]
    Earth,
    #[serde(alias = "MARS_BARYCENTER")]
    Mars,
    #[serde(alias = "JUPITER_BARYCENTER")]
    Jupiter,
    #[serde(alias = "SATURN_BARYCENTER")]
    Saturn,
    #[serde(alias = "URANUS_BARYCENTER")]
    Uranus,
    #[serde(alias = "NEPTUNE_BARYCENTER")]
    Neptune,
    #[serde(alias = "MP")]
    TrackedBody,
}

impl Anchor {
    pub fn major_body(&self) -> Option<MajorBody> {
        match self {
            Self::Sun => Some(MajorBody::Sun),
            Self::Mercury => Some(MajorBody::Mercury),
            Self::Venus => Some(MajorBody::Venus),
            Self::Earth => Some(MajorBody::Earth),
            Self::Mars => Some(MajorBody::Mars),
            Self::Jupiter => Some(MajorBody::Jupiter),
            Self::Saturn => Some(MajorBody::Saturn),
            Self::Uranus => Some(MajorBody::Uranus),
            Self::Neptune => Some(MajorBody::Neptune),
            Self::Barycenter | Self::TrackedBody => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Barycenter => "SOLAR_SYSTEM_BARYCENTER",
            Self::TrackedBody => "MP",
            Self::Sun => "SUN",
            Self::Mercury => "MERCURY_BARYCENTER",
            Self::Venus => "VENUS_BARYCENTER",
            Self::Earth => "EARTH_BARYCENTER",
            Self::Mars => "MARS_BARYCENTER",
            Self::Jupiter => "JUPITER_BARYCENTER",
            Self::Saturn => "SATURN_BARYCENTER",
            Self::Uranus => "URANUS_BARYCENTER",
            Self::Neptune => "NEPTUNE_BARYCENTER",
        }
    }
}

impl From<MajorBody> for Anchor {
    fn from(body: MajorBody) -> Self {
        match body {
            MajorBody::Sun => Self::Sun,
            MajorBody::Mercury => Self::Mercury,
            MajorBody::Venus => Self::Venus,
            MajorBody::Earth => Self::Earth,
            MajorBody::Mars => Self::Mars,
            MajorBody::Jupiter => Self::Jupiter,
            MajorBody::Saturn => Self::Saturn,
            MajorBody::Uranus => Self::Uranus,
            MajorBody::Neptune => Self::Neptune,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown body '{0}'")]
pub struct UnknownBody(pub String);

impl FromStr for Anchor {
    type Err = UnknownBody;

    /// Accepts the upper-case kernel names (`EARTH_BARYCENTER`, `MP`, ...) and
    /// short lower-case names (`earth`, `tracked`, `ssb`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase();
        let key = key.strip_suffix("_BARYCENTER").unwrap_or(&key);
        let anchor = match key {
            "SOLAR_SYSTEM" | "SSB" | "BARYCENTER" => Self::Barycenter,
            "MP" | "TRACKED" | "TRACKED_BODY" => Self::TrackedBody,
            "SUN" => Self::Sun,
            "MERCURY" => Self::Mercury,
            "VENUS" => Self::Venus,
            "EARTH" => Self::Earth,
            "MARS" => Self::Mars,
            "JUPITER" => Self::Jupiter,
            "SATURN" => Self::Saturn,
            "URANUS" => Self::Uranus,
            "NEPTUNE" => Self::Neptune,
            _ => return Err(UnknownBody(s.to_string())),
        };
        Ok(anchor)
    }
}

/// Parse a carrier selector: `None` (any case) means a camera fixed in space
pub fn parse_carrier(s: &str) -> Result<Option<Anchor>, UnknownBody> {
    if s.trim().eq_ignore_ascii_case("none") || s.trim().is_empty() {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}
