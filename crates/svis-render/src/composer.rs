//! Render passes: one framebuffer per (sample, camera mode), drawn back to front

use crate::camera::{auto_frame_distance, Camera, CameraMode};
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::scene::Scene;
use std::path::{Path, PathBuf};
use svis_orbit::OrbitCurve;
use svis_raster::{save_ppm, Framebuffer, Rgb};
use tracing::{debug, info, warn};

const STAR_RADIUS_PX: i32 = 1;
const TRACKED_MARKER_RADIUS_PX: i32 = 3;
const LABEL_OFFSET_PX: i32 = 10;

/// Where the images of each mode go
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub prefix: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self { root: root.into(), prefix: prefix.into() }
    }

    /// `<root>/map_<mode>`
    pub fn dir(&self, mode: CameraMode) -> PathBuf {
        self.root.join(format!("map_{}", mode.name()))
    }

    /// `<root>/map_<mode>/<prefix><stem>_<mode>.ppm`
    pub fn path(&self, mode: CameraMode, stem: &str) -> PathBuf {
        self.dir(mode).join(format!("{}{}_{}.ppm", self.prefix, stem, mode.name()))
    }

    pub fn create_dirs(&self) -> RenderResult<()> {
        for mode in CameraMode::ALL {
            let dir = self.dir(mode);
            std::fs::create_dir_all(&dir)?;
            debug!("output directory {:?}", dir);
        }
        Ok(())
    }
}

/// What one pass put on screen
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub stars_drawn: usize,
    pub segments_drawn: usize,
    pub markers_drawn: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    pub mode: CameraMode,
    pub path: PathBuf,
    pub stats: DrawStats,
}

/// Place the camera for `mode`
pub fn build_camera(scene: &Scene, mode: CameraMode, config: &RenderConfig) -> RenderResult<Camera> {
    let fov = config.fov_rad();
    let (w, h) = (config.width, config.height);
    match mode {
        CameraMode::TopDown | CameraMode::EdgeOn => {
            let distance = auto_frame_distance(scene.tracked_orbit.max_planar_radius(), fov);
            Ok(if mode == CameraMode::TopDown {
                Camera::top_down(distance, fov, w, h)
            } else {
                Camera::edge_on(distance, fov, w, h)
            })
        }
        CameraMode::Custom => {
            let position = match config.carrier {
                Some(carrier) => scene.anchor_position(carrier),
                None => config.custom_offset.position(),
            };
            let target = scene.anchor_position(config.center);
            Camera::look_at(position, target, fov, w, h)
        }
    }
}

/// Draw every adjacent pair whose endpoints both project
fn draw_curve(fb: &mut Framebuffer, camera: &Camera, curve: &OrbitCurve, color: Rgb) -> usize {
    let mut drawn = 0;
    for (a, b) in curve.segments() {
        if let (Some((x0, y0)), Some((x1, y1))) = (camera.project(a), camera.project(b)) {
            fb.draw_line(x0, y0, x1, y1, color);
            drawn += 1;
        }
    }
    drawn
}

/// Rasterize one view of the scene into a fresh framebuffer
pub fn render_frame(scene: &Scene, camera: &Camera, config: &RenderConfig, mode: CameraMode) -> RenderResult<(Framebuffer, DrawStats)> {
    let mut fb = Framebuffer::new(config.width, config.height)?;
    let mut stats = DrawStats::default();

    for &direction in &scene.stars {
        if let Some((x, y)) = camera.project_direction(direction) {
            fb.draw_circle(x, y, STAR_RADIUS_PX, Rgb::STAR);
            stats.stars_drawn += 1;
        }
    }

    stats.segments_drawn += draw_curve(&mut fb, camera, &scene.tracked_orbit, Rgb::GREEN);
    for view in &scene.bodies {
        if let Some(orbit) = &view.orbit {
            stats.segments_drawn += draw_curve(&mut fb, camera, orbit, Rgb::from(view.body.color()));
        }
    }

    if let Some((x, y)) = camera.project(scene.tracked.position) {
        fb.draw_circle(x, y, TRACKED_MARKER_RADIUS_PX, Rgb::WHITE);
        stats.markers_drawn += 1;
    }

    for view in &scene.bodies {
        let Some((x, y)) = camera.project(view.state.position) else {
            continue;
        };
        // f64::max drops the NaN of a camera inside the body
        let radius = view
            .body
            .marker_floor_px()
            .max(camera.apparent_radius_px(view.state.position, view.body.radius_km()));
        fb.draw_circle(x, y, radius as i32, Rgb::from(view.body.color()));
        stats.markers_drawn += 1;
    }

    fb.draw_text(LABEL_OFFSET_PX, LABEL_OFFSET_PX, &scene.timestamp, Rgb::RED);

    if mode == CameraMode::Custom && config.crosshair {
        fb.draw_crosshair(Rgb::RED);
    }

    Ok((fb, stats))
}

/// Render one mode and write it to `path`
pub fn render_pass(scene: &Scene, mode: CameraMode, config: &RenderConfig, path: &Path) -> RenderResult<RenderReport> {
    let camera = build_camera(scene, mode, config)?;
    let (fb, stats) = render_frame(scene, &camera, config, mode)?;
    save_ppm(&fb, path)?;

    debug!(
        mode = %mode,
        stars = stats.stars_drawn,
        segments = stats.segments_drawn,
        markers = stats.markers_drawn,
        "wrote {:?}",
        path
    );
    Ok(RenderReport { mode, path: path.to_path_buf(), stats })
}

/// Render all three modes for one scene. A failed pass is logged and skipped.
pub fn render_all_modes(scene: &Scene, config: &RenderConfig, layout: &OutputLayout, stem: &str) -> Vec<RenderResult<RenderReport>> {
    CameraMode::ALL
        .iter()
        .map(|&mode| {
            let path = layout.path(mode, stem);
            let result = render_pass(scene, mode, config, &path);
            match &result {
                Ok(report) => info!("  {} -> {:?}", mode, report.path),
                Err(e) => warn!(mode = %mode, error = %e, "render pass failed"),
            }
            result
        })
        .collect()
}
