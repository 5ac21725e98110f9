//! Pinhole camera: placement modes and perspective projection
//!
//! The basis is `{right, up, view_axis}` with the camera looking along
//! `-view_axis`. Screen row 0 is the top of the image.

use crate::error::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use svis_core::{Vec3, PLANET_FRAMING_RADII_KM};

/// Extra room around the framed orbit
pub const FRAMING_MARGIN: f64 = 1.33;

/// Horizontal share of a unit look direction below which it counts as vertical
const VERTICAL_TOLERANCE: f64 = 1e-9;

/// The three views rendered for every sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    TopDown,
    EdgeOn,
    Custom,
}

impl CameraMode {
    pub const ALL: [CameraMode; 3] = [Self::TopDown, Self::EdgeOn, Self::Custom];

    /// Directory and file-name tag
    pub fn name(&self) -> &'static str {
        match self {
            Self::TopDown => "topdown",
            Self::EdgeOn => "edgeon",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub view_axis: Vec3,
    /// Field of view in radians
    pub fov: f64,
    pub width: usize,
    pub height: usize,
}

/// Radius that frames an orbit reaching `max_radius_km` from the pole:
/// the next larger planetary orbit (or the orbit itself beyond Neptune),
/// plus margin
pub fn framed_radius(max_radius_km: f64) -> f64 {
    let next = PLANET_FRAMING_RADII_KM
        .iter()
        .copied()
        .find(|&r| r > max_radius_km)
        .unwrap_or(max_radius_km);
    next * FRAMING_MARGIN
}

/// Camera distance at which `framed_radius(max_radius_km)` fills half the field of view
pub fn auto_frame_distance(max_radius_km: f64, fov: f64) -> f64 {
    framed_radius(max_radius_km) / (fov / 2.0).tan()
}

impl Camera {
    /// Looking down on the reference plane from +z
    pub fn top_down(distance: f64, fov: f64, width: usize, height: usize) -> Self {
        Self {
            position: Vec3::from_cartesian(0.0, 0.0, distance),
            right: Vec3::X,
            up: Vec3::Y,
            view_axis: Vec3::Z,
            fov,
            width,
            height,
        }
    }

    /// In the reference plane on +x, looking back at the origin
    pub fn edge_on(distance: f64, fov: f64, width: usize, height: usize) -> Self {
        Self {
            position: Vec3::from_cartesian(distance, 0.0, 0.0),
            right: Vec3::Y,
            up: Vec3::Z,
            view_axis: Vec3::X,
            fov,
            width,
            height,
        }
    }

    /// Camera at `position` aimed at `target`. The right vector is the
    /// horizontal look direction turned 90° about the pole, so a vertical
    /// look direction has no basis.
    pub fn look_at(position: Vec3, target: Vec3, fov: f64, width: usize, height: usize) -> RenderResult<Self> {
        let forward = (target - position)
            .normalize()
            .ok_or_else(|| RenderError::DegenerateCamera("camera sits on its target".into()))?;
        let forward_xy = Some(forward.xy())
            .filter(|xy| xy.magnitude() > VERTICAL_TOLERANCE)
            .and_then(|xy| xy.normalize())
            .ok_or_else(|| RenderError::DegenerateCamera("look direction is vertical".into()))?;

        let right_candidate = Vec3::from_cartesian(-forward_xy.y, forward_xy.x, 0.0);
        let degenerate = || RenderError::DegenerateCamera("basis does not span".into());
        let up = forward.cross(right_candidate).normalize().ok_or_else(degenerate)?;
        let right = up.cross(forward).normalize().ok_or_else(degenerate)?;

        Ok(Self { position, right, up, view_axis: -forward, fov, width, height })
    }

    pub fn forward(&self) -> Vec3 {
        -self.view_axis
    }

    /// Focal length in pixels, fitted to the shorter screen side
    pub fn focal_length(&self) -> f64 {
        self.width.min(self.height) as f64 / (2.0 * (self.fov / 2.0).tan())
    }

    /// Project a camera-relative vector; None when it is not strictly in
    /// front of the camera or the result is not finite
    fn project_relative(&self, rel: Vec3) -> Option<(i32, i32)> {
        let depth = rel.dot(self.forward());
        if depth.is_nan() || depth <= 0.0 {
            return None;
        }
        let f = self.focal_length();
        let px = f * rel.dot(self.right) / depth;
        let py = f * rel.dot(self.up) / depth;

        let sx = (self.width / 2) as f64 + px;
        let sy = (self.height / 2) as f64 - py;
        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        Some((sx.round() as i32, sy.round() as i32))
    }

    /// Screen pixel of a world point, None if culled
    pub fn project(&self, world: Vec3) -> Option<(i32, i32)> {
        self.project_relative(world - self.position)
    }

    /// Screen pixel of a direction at infinity (stars); the camera position drops out
    pub fn project_direction(&self, direction: Vec3) -> Option<(i32, i32)> {
        self.project_relative(direction)
    }

    /// Apparent radius in pixels of a sphere of `radius` centred at `center`.
    /// NaN when the camera is inside the sphere.
    pub fn apparent_radius_px(&self, center: Vec3, radius: f64) -> f64 {
        let distance = (center - self.position).magnitude();
        self.focal_length() * (radius / distance).asin().tan()
    }

    /// True when the basis is orthonormal to `tol`
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let unit = |v: Vec3| (v.magnitude() - 1.0).abs() <= tol;
        unit(self.right)
            && unit(self.up)
            && unit(self.view_axis)
            && self.right.dot(self.up).abs() <= tol
            && self.right.dot(self.view_axis).abs() <= tol
            && self.up.dot(self.view_axis).abs() <= tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use svis_core::constants::AU_KM;

    const FOV: f64 = std::f64::consts::FRAC_PI_3;

    #[test]
    fn test_framing_picks_next_planet() {
        // A 1 AU orbit sits inside Earth's aphelion
        assert_abs_diff_eq!(framed_radius(1.496e8), 152.1e6 * FRAMING_MARGIN, epsilon = 1.0);
        // Beyond Neptune the orbit itself is used
        assert_abs_diff_eq!(framed_radius(6.0e9), 6.0e9 * FRAMING_MARGIN, epsilon = 1.0);
        // Exactly on a table entry moves to the next one
        assert_abs_diff_eq!(framed_radius(152.1e6), 249.3e6 * FRAMING_MARGIN, epsilon = 1.0);
    }

    #[test]
    fn test_auto_frame_distance_fills_half_fov() {
        let d = auto_frame_distance(1.496e8, FOV);
        let edge = framed_radius(1.496e8);
        assert_abs_diff_eq!((edge / d).atan(), FOV / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_top_down_projection() {
        let cam = Camera::top_down(10.0, FOV, 640, 480);
        assert_eq!(cam.project(Vec3::ZERO), Some((320, 240)));

        // +x to the right, +y up the screen
        let (x, y) = cam.project(Vec3::from_cartesian(1.0, 1.0, 0.0)).unwrap();
        assert!(x > 320 && y < 240);
        assert!(cam.is_orthonormal(1e-12));
    }

    #[test]
    fn test_edge_on_sees_plane_as_line() {
        let cam = Camera::edge_on(10.0 * AU_KM, FOV, 640, 480);
        for k in 0..8 {
            let a = k as f64 * 0.7;
            let p = Vec3::from_cartesian(AU_KM * a.cos(), AU_KM * a.sin(), 0.0);
            let (_, y) = cam.project(p).unwrap();
            assert_eq!(y, 240);
        }
        assert!(cam.is_orthonormal(1e-12));
    }

    #[test]
    fn test_focal_length_uses_shorter_side() {
        let cam = Camera::top_down(1.0, FOV, 640, 480);
        assert_abs_diff_eq!(cam.focal_length(), 480.0 / (2.0 * (FOV / 2.0).tan()), epsilon = 1e-12);
        let tall = Camera::top_down(1.0, FOV, 300, 900);
        assert_abs_diff_eq!(tall.focal_length(), 300.0 / (2.0 * (FOV / 2.0).tan()), epsilon = 1e-12);
    }

    #[test]
    fn test_look_at_centres_target() {
        let target = Vec3::from_cartesian(AU_KM, 2.0 * AU_KM, 0.1 * AU_KM);
        let position = Vec3::from_cartesian(-5.0 * AU_KM, -3.0 * AU_KM, 4.0 * AU_KM);
        let cam = Camera::look_at(position, target, FOV, 640, 480).unwrap();
        assert_eq!(cam.project(target), Some((320, 240)));
        assert!(cam.is_orthonormal(1e-9));
        // Up keeps a positive pole component
        assert!(cam.up.z > 0.0);
    }

    #[test]
    fn test_look_at_degenerate_cases() {
        let p = Vec3::from_cartesian(0.0, 0.0, 5.0);
        assert!(matches!(
            Camera::look_at(p, Vec3::ZERO, FOV, 640, 480),
            Err(RenderError::DegenerateCamera(_))
        ));
        assert!(matches!(
            Camera::look_at(p, p, FOV, 640, 480),
            Err(RenderError::DegenerateCamera(_))
        ));
    }

    #[test]
    fn test_point_on_camera_plane_is_culled() {
        let cam = Camera::top_down(10.0, FOV, 640, 480);
        assert_eq!(cam.project(Vec3::from_cartesian(3.0, 0.0, 10.0)), None);
        assert_eq!(cam.project(Vec3::from_cartesian(f64::NAN, 0.0, 0.0)), None);
        assert_eq!(cam.project(Vec3::from_cartesian(f64::INFINITY, 0.0, 0.0)), None);
    }

    #[test]
    fn test_direction_projection_ignores_position() {
        let near = Camera::top_down(1.0, FOV, 640, 480);
        let far = Camera::top_down(1.0e12, FOV, 640, 480);
        let dir = Vec3::from_cartesian(0.1, -0.2, -1.0);
        assert_eq!(near.project_direction(dir), far.project_direction(dir));
        assert_eq!(near.project_direction(-dir), None);
    }

    #[test]
    fn test_apparent_radius() {
        let cam = Camera::top_down(1000.0, FOV, 640, 480);
        let r = cam.apparent_radius_px(Vec3::ZERO, 10.0);
        assert_abs_diff_eq!(r, cam.focal_length() * (0.01f64).asin().tan(), epsilon = 1e-9);
        assert!(cam.apparent_radius_px(Vec3::ZERO, 5000.0).is_nan());
    }

    proptest! {
        #[test]
        fn prop_points_behind_camera_are_culled(
            cx in -1e9f64..1e9, cy in -1e9f64..1e9, cz in -1e9f64..1e9,
            tx in -1e9f64..1e9, ty in -1e9f64..1e9, tz in -1e9f64..1e9,
            a in -1e9f64..1e9, b in -1e9f64..1e9, back in 0.0f64..1e9,
        ) {
            let position = Vec3::from_cartesian(cx, cy, cz);
            let target = Vec3::from_cartesian(tx, ty, tz);
            if let Ok(cam) = Camera::look_at(position, target, FOV, 640, 480) {
                // Anywhere on or behind the camera plane
                let p = position + cam.right * a + cam.up * b - cam.forward() * back;
                prop_assume!((p - position).dot(cam.forward()) <= 0.0);
                prop_assert_eq!(cam.project(p), None);
            }
        }

        #[test]
        fn prop_custom_basis_is_orthonormal(
            cx in -1e9f64..1e9, cy in -1e9f64..1e9, cz in -1e9f64..1e9,
        ) {
            let position = Vec3::from_cartesian(cx, cy, cz);
            prop_assume!(position.xy().magnitude() > 10.0);
            let cam = Camera::look_at(position, Vec3::ZERO, FOV, 640, 480).unwrap();
            prop_assert!(cam.is_orthonormal(1e-9));
        }
    }
}
