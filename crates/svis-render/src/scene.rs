//! Per-timestep scene: every body and curve in the ecliptic working frame
//!
//! Built once per sample and shared read-only by the three camera passes.

use crate::error::RenderResult;
use svis_core::constants::DEFAULT_ORBIT_SAMPLES;
use svis_core::frames::rotate;
use svis_core::{Anchor, MajorBody, Vec3};
use svis_data::{BodyState, EphemerisSource, StarCatalog, TrackedState};
use svis_orbit::OrbitCurve;
use tracing::debug;

/// Stars dimmer than this are left out of the background
pub const STAR_MAGNITUDE_LIMIT: f64 = 6.0;

#[derive(Clone, Debug)]
pub struct MajorBodyView {
    pub body: MajorBody,
    pub state: BodyState,
    /// None for the Sun, whose orbit is never drawn
    pub orbit: Option<OrbitCurve>,
}

#[derive(Clone, Debug)]
pub struct Scene {
    /// Label text, the feed's UTC token
    pub timestamp: String,
    pub tracked: BodyState,
    pub tracked_orbit: OrbitCurve,
    /// In `MajorBody::ALL` order
    pub bodies: Vec<MajorBodyView>,
    /// Unit directions of the visible stars
    pub stars: Vec<Vec3>,
}

impl Scene {
    /// Rotate the tracked state, the major-body states and the star field
    /// into the ecliptic frame and trace every orbit
    pub fn build(
        sample: &TrackedState,
        ephemeris: &dyn EphemerisSource,
        catalog: &StarCatalog,
        mu: f64,
    ) -> RenderResult<Self> {
        let to_ecliptic = ephemeris.equatorial_to_ecliptic(sample.epoch);

        let tracked = BodyState::new(sample.position, sample.velocity).rotated(&to_ecliptic);
        let tracked_orbit = OrbitCurve::from_state(tracked.position, tracked.velocity, mu, DEFAULT_ORBIT_SAMPLES);

        let states: Vec<(MajorBody, BodyState)> = ephemeris
            .major_body_states(sample.epoch)?
            .into_iter()
            .map(|(body, state)| (body, state.rotated(&to_ecliptic)))
            .collect();
        let sun = states
            .iter()
            .find(|(body, _)| *body == MajorBody::Sun)
            .map(|(_, state)| *state)
            .unwrap_or_default();

        let bodies = states
            .into_iter()
            .map(|(body, state)| {
                let orbit = (body != MajorBody::Sun).then(|| {
                    // Inner orbits stay Sun-relative and are not moved back
                    let basis = if body.sun_relative_orbit() { state.relative_to(&sun) } else { state };
                    OrbitCurve::from_state(basis.position, basis.velocity, mu, DEFAULT_ORBIT_SAMPLES)
                });
                MajorBodyView { body, state, orbit }
            })
            .collect();

        let stars: Vec<Vec3> = catalog
            .brighter_than(STAR_MAGNITUDE_LIMIT)
            .map(|star| rotate(&to_ecliptic, star.direction()))
            .collect();

        debug!(
            timestamp = %sample.timestamp,
            ephemeris = ephemeris.name(),
            stars = stars.len(),
            "scene built"
        );

        Ok(Self {
            timestamp: sample.timestamp.clone(),
            tracked,
            tracked_orbit,
            bodies,
            stars,
        })
    }

    pub fn body(&self, body: MajorBody) -> Option<&MajorBodyView> {
        self.bodies.iter().find(|view| view.body == body)
    }

    /// World position of an anchor at this instant
    pub fn anchor_position(&self, anchor: Anchor) -> Vec3 {
        match anchor {
            Anchor::Barycenter => Vec3::ZERO,
            Anchor::TrackedBody => self.tracked.position,
            other => other
                .major_body()
                .and_then(|body| self.body(body))
                .map(|view| view.state.position)
                .unwrap_or(Vec3::ZERO),
        }
    }
}
