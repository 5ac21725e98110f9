//! Render settings shared by every pass

use serde::{Deserialize, Serialize};
use svis_core::constants::{AU_KM, MU_SUN};
use svis_core::{Anchor, Vec3};

/// Spherical placement of the fixed custom camera, relative to the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomOffset {
    pub distance_au: f64,
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl Default for CustomOffset {
    fn default() -> Self {
        Self { distance_au: 15.0, ra_deg: 45.0, dec_deg: 45.0 }
    }
}

impl CustomOffset {
    /// Camera position (km): opposite the RA/DEC direction so that the
    /// camera looks toward it
    pub fn position(&self) -> Vec3 {
        -Vec3::from_spherical_degrees(self.ra_deg, self.dec_deg) * (self.distance_au * AU_KM)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fov_deg: f64,
    pub width: usize,
    pub height: usize,
    /// What the custom camera looks at
    pub center: Anchor,
    /// What the custom camera rides with; `None` keeps it at `custom_offset`
    pub carrier: Option<Anchor>,
    pub custom_offset: CustomOffset,
    /// Gravitational parameter for every orbit curve (km³/s²)
    pub mu: f64,
    /// Red crosshair at the centre of the custom view
    pub crosshair: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            width: 640,
            height: 480,
            center: Anchor::Barycenter,
            carrier: None,
            custom_offset: CustomOffset::default(),
            mu: MU_SUN,
            crosshair: false,
        }
    }
}

impl RenderConfig {
    pub fn fov_rad(&self) -> f64 {
        self.fov_deg.to_radians()
    }
}
