//! The free-floating jelly ring
//!
//! A fixed-size circular array of radial springs, one per `angle_step`
//! degrees. Each tick every spring relaxes toward the ring radius on its
//! own, then trades a fraction of its displacement difference with both
//! angular neighbors, so a splash on one spring ripples around the ring
//! over successive ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spring::Spring;
use crate::consts::{DEFAULT_DAMPENING, DEFAULT_SPREAD, DEFAULT_TENSION};
use crate::error::JellyError;
use crate::polar_offset;

/// One boundary sample, read-only view for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSample {
    /// Current radial displacement of the spring
    pub value: f32,
    /// Fixed angular direction of the spring, radians
    pub angle: f32,
    /// `value` resolved to an offset vector from the ring center
    pub offset: Vec2,
}

/// A deformable ring of coupled radial springs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JellyRing {
    pub(crate) center: Vec2,
    pub(crate) springs: Vec<Spring>,
    angle_step: u32,
    radius: f32,
    /// Fraction of a value-difference transferred to each neighbor per tick
    pub spread: f32,
}

impl JellyRing {
    /// Build a ring of `360 / angle_step` springs at rest at `radius`.
    ///
    /// An `angle_step` that does not evenly divide 360 is accepted but
    /// truncates the spring count, leaving an angular gap before the seam;
    /// this is logged rather than rejected.
    pub fn new(center: Vec2, radius: f32, angle_step: u32) -> Result<Self, JellyError> {
        if angle_step == 0 || angle_step > 360 {
            return Err(JellyError::InvalidAngleStep { step: angle_step });
        }
        if 360 % angle_step != 0 {
            log::warn!(
                "angle step {} does not divide 360; ring covers only {} degrees",
                angle_step,
                (360 / angle_step) * angle_step
            );
        }

        let count = (360 / angle_step) as usize;
        let mut ring = Self {
            center,
            springs: vec![Spring::default(); count],
            angle_step,
            radius: 0.0,
            spread: DEFAULT_SPREAD,
        };
        ring.set_tension(DEFAULT_TENSION);
        ring.set_dampening(DEFAULT_DAMPENING);
        ring.set_radius(radius)?;
        Ok(ring)
    }

    /// Retarget every spring to a new rest radius.
    ///
    /// A spring whose `value` is still 0 has never been initialized and
    /// snaps to the new radius; a spring already oscillating keeps its
    /// current displacement and relaxes toward the new rest value.
    pub fn set_radius(&mut self, radius: f32) -> Result<(), JellyError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(JellyError::InvalidRadius { radius });
        }
        self.radius = radius;
        for s in &mut self.springs {
            s.rest_value = radius;
            if s.value == 0.0 {
                s.value = radius;
            }
        }
        Ok(())
    }

    /// Broadcast a new tension to every spring
    pub fn set_tension(&mut self, tension: f32) {
        for s in &mut self.springs {
            s.tension = tension;
        }
    }

    /// Broadcast a new dampening to every spring
    pub fn set_dampening(&mut self, dampening: f32) {
        for s in &mut self.springs {
            s.dampening = dampening;
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn angle_step(&self) -> u32 {
        self.angle_step
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Read-only view of the springs, in ring order
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Fixed angular direction of spring `i`, radians
    #[inline]
    pub fn angle_of(&self, index: usize) -> f32 {
        ((index as u32 * self.angle_step) as f32).to_radians()
    }

    /// Map a world-space contact point to the nearest spring index.
    ///
    /// Returns `None` when the point lies on or outside the ring radius;
    /// otherwise the wrapped index and the point's distance from center.
    pub(crate) fn contact_index(&self, point: Vec2) -> Option<(usize, f32)> {
        let d = point - self.center;
        let dist = d.length();
        if dist >= self.radius {
            return None;
        }
        let angle_deg = d.y.atan2(d.x).to_degrees();
        let index = (angle_deg / self.angle_step as f32).round() as i32;
        let count = self.springs.len() as i32;
        Some((index.rem_euclid(count) as usize, dist))
    }

    /// Splash: inject an inward velocity impulse at the spring nearest to
    /// `point`, proportional to how deep inside the ring the point is.
    ///
    /// Points on or outside the ring are a no-op. Only one spring is hit;
    /// neighbors pick the disturbance up through propagation on the
    /// following ticks.
    pub fn splash(&mut self, point: Vec2) {
        if let Some((index, dist)) = self.contact_index(point) {
            self.springs[index].velocity = dist - self.radius;
        }
    }

    /// Advance the ring by one tick: per-spring relaxation, then neighbor
    /// propagation.
    ///
    /// Propagation is two-pass. Pass A perturbs neighbor velocities for
    /// every spring while recording the deltas; pass B commits the same
    /// deltas to neighbor values, skipping the two seam springs. The pass
    /// split and the seam asymmetry are part of the observed wave shape;
    /// collapsing them changes the numbers.
    pub fn advance(&mut self) {
        for s in &mut self.springs {
            s.advance();
        }

        let n = self.springs.len();
        let mut left_deltas = vec![0.0_f32; n];
        let mut right_deltas = vec![0.0_f32; n];

        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            left_deltas[i] = self.spread * (self.springs[i].value - self.springs[prev].value);
            self.springs[prev].velocity += left_deltas[i];
            right_deltas[i] = self.spread * (self.springs[i].value - self.springs[next].value);
            self.springs[next].velocity += right_deltas[i];
        }

        for i in 1..n.saturating_sub(1) {
            self.springs[i - 1].value += left_deltas[i];
            self.springs[i + 1].value += right_deltas[i];
        }
    }

    /// Ordered boundary samples for rendering
    pub fn samples(&self) -> impl Iterator<Item = RingSample> + '_ {
        self.springs.iter().enumerate().map(|(i, s)| {
            let angle = self.angle_of(i);
            RingSample {
                value: s.value,
                angle,
                offset: polar_offset(s.value, angle),
            }
        })
    }

    /// World-space position of boundary sample `i`
    pub fn surface_point(&self, index: usize) -> Vec2 {
        let i = index % self.springs.len();
        self.center + polar_offset(self.springs[i].value, self.angle_of(i))
    }

    /// Triangle-list vertices for a fan over the whole body: for each
    /// adjacent pair of boundary points, the triangle `(p_i, p_{i+1},
    /// center)`, wrapping at the seam. Colors are up to the renderer.
    pub fn fan_vertices(&self) -> Vec<Vec2> {
        let n = self.springs.len();
        let mut verts = Vec::with_capacity(n * 3);
        for i in 0..n {
            verts.push(self.surface_point(i));
            verts.push(self.surface_point((i + 1) % n));
            verts.push(self.center);
        }
        verts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn four_spring_ring() -> JellyRing {
        // Springs at 0, 90, 180, 270 degrees
        JellyRing::new(Vec2::new(400.0, 300.0), 100.0, 90).unwrap()
    }

    #[test]
    fn test_construction() {
        let ring = four_spring_ring();
        assert_eq!(ring.spring_count(), 4);
        assert_eq!(ring.radius(), 100.0);
        for s in ring.springs() {
            assert_eq!(s.rest_value, 100.0);
            assert_eq!(s.value, 100.0);
            assert_eq!(s.velocity, 0.0);
        }
    }

    #[test]
    fn test_non_divisor_step_truncates() {
        // 360 / 7 = 51 springs, covering 357 degrees
        let ring = JellyRing::new(Vec2::ZERO, 50.0, 7).unwrap();
        assert_eq!(ring.spring_count(), 51);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(matches!(
            JellyRing::new(Vec2::ZERO, 0.0, 1),
            Err(JellyError::InvalidRadius { .. })
        ));
        assert!(matches!(
            JellyRing::new(Vec2::ZERO, -5.0, 1),
            Err(JellyError::InvalidRadius { .. })
        ));
        assert!(matches!(
            JellyRing::new(Vec2::ZERO, f32::NAN, 1),
            Err(JellyError::InvalidRadius { .. })
        ));
        assert!(matches!(
            JellyRing::new(Vec2::ZERO, 100.0, 0),
            Err(JellyError::InvalidAngleStep { step: 0 })
        ));
        assert!(matches!(
            JellyRing::new(Vec2::ZERO, 100.0, 400),
            Err(JellyError::InvalidAngleStep { step: 400 })
        ));
    }

    #[test]
    fn test_idle_ring_stays_at_rest() {
        let mut ring = JellyRing::new(Vec2::ZERO, 100.0, 10).unwrap();
        for _ in 0..500 {
            ring.advance();
        }
        for s in ring.springs() {
            assert_eq!(s.value, 100.0);
            assert_eq!(s.velocity, 0.0);
        }
    }

    #[test]
    fn test_splash_outside_is_noop() {
        let mut ring = four_spring_ring();
        ring.splash(Vec2::new(400.0 + 150.0, 300.0));
        // Exactly on the radius counts as outside
        ring.splash(Vec2::new(400.0 + 100.0, 300.0));
        for s in ring.springs() {
            assert_eq!(s.velocity, 0.0);
        }
    }

    #[test]
    fn test_splash_hits_nearest_spring() {
        // Impact at center + (50, 0): distance 50, angle 0 -> spring 0,
        // impulse 50 - 100 = -50
        let mut ring = four_spring_ring();
        ring.splash(Vec2::new(450.0, 300.0));

        assert_eq!(ring.springs()[0].velocity, -50.0);
        for s in &ring.springs()[1..] {
            assert_eq!(s.velocity, 0.0);
        }
    }

    #[test]
    fn test_splash_negative_angle_wraps() {
        // Point above center (y-down: angle -90 degrees) maps to the
        // 270-degree spring, index 3
        let mut ring = four_spring_ring();
        ring.splash(Vec2::new(400.0, 300.0 - 50.0));

        assert!(ring.springs()[3].velocity < 0.0);
        assert_eq!(ring.springs()[0].velocity, 0.0);
        assert_eq!(ring.springs()[1].velocity, 0.0);
        assert_eq!(ring.springs()[2].velocity, 0.0);
    }

    #[test]
    fn test_one_tick_propagation_is_local() {
        let mut ring = four_spring_ring();
        ring.splash(Vec2::new(450.0, 300.0));
        ring.advance();

        let springs = ring.springs();
        // The hit spring dropped below rest
        assert!(springs[0].value < 100.0);
        // Immediate neighbors picked up a velocity perturbation
        assert!(springs[1].velocity != 0.0);
        assert!(springs[3].velocity != 0.0);
        // The opposite spring is untouched after exactly one tick
        assert_eq!(springs[2].value, 100.0);
        assert_eq!(springs[2].velocity, 0.0);
    }

    #[test]
    fn test_splash_decays_back_to_rest() {
        let mut ring = JellyRing::new(Vec2::ZERO, 100.0, 30).unwrap();
        ring.splash(Vec2::new(40.0, 0.0));
        for _ in 0..20_000 {
            ring.advance();
        }
        for s in ring.springs() {
            assert!((s.value - 100.0).abs() < 1.0, "value = {}", s.value);
            assert!(s.velocity.abs() < 0.1, "velocity = {}", s.velocity);
        }
    }

    #[test]
    fn test_radius_rescale_keeps_inflight_displacement() {
        let mut ring = four_spring_ring();
        ring.splash(Vec2::new(450.0, 300.0));
        for _ in 0..10 {
            ring.advance();
        }

        let values_before: Vec<f32> = ring.springs().iter().map(|s| s.value).collect();
        ring.set_radius(120.0).unwrap();

        for (s, before) in ring.springs().iter().zip(&values_before) {
            assert_eq!(s.rest_value, 120.0);
            // No spring was at exactly 0, so no value snaps
            assert_eq!(s.value, *before);
        }
    }

    #[test]
    fn test_tension_dampening_broadcast() {
        let mut ring = four_spring_ring();
        ring.set_tension(0.025);
        ring.set_dampening(0.025);
        for s in ring.springs() {
            assert_eq!(s.tension, 0.025);
            assert_eq!(s.dampening, 0.025);
        }
    }

    #[test]
    fn test_fan_vertices_order_and_seam() {
        let ring = four_spring_ring();
        let verts = ring.fan_vertices();
        assert_eq!(verts.len(), 12);

        // Every third vertex is the center
        for tri in verts.chunks(3) {
            assert_eq!(tri[2], ring.center());
        }
        // Last triangle wraps back to sample 0
        assert_eq!(verts[10], ring.surface_point(0));
    }

    #[test]
    fn test_samples_match_surface_points() {
        let ring = JellyRing::new(Vec2::new(10.0, 20.0), 75.0, 45).unwrap();
        for (i, sample) in ring.samples().enumerate() {
            assert_eq!(sample.value, 75.0);
            assert_eq!(sample.angle, ring.angle_of(i));
            let p = ring.center() + sample.offset;
            assert!((p - ring.surface_point(i)).length() < 1e-4);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let mut ring = four_spring_ring();
        ring.splash(Vec2::new(450.0, 300.0));
        ring.advance();

        let json = serde_json::to_string(&ring).unwrap();
        let restored: JellyRing = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.spring_count(), ring.spring_count());
        assert_eq!(restored.springs(), ring.springs());
        assert_eq!(restored.center(), ring.center());
    }

    proptest! {
        // Any impact point strictly inside the ring resolves to exactly one
        // in-range spring, including angles halfway between two springs and
        // the wraparound at 0/360.
        #[test]
        fn prop_splash_index_always_in_range(
            angle_deg in -180.0_f32..180.0,
            dist in 0.0_f32..99.9,
            step in 1_u32..=120,
        ) {
            let mut ring = JellyRing::new(Vec2::ZERO, 100.0, step).unwrap();
            let theta = angle_deg.to_radians();
            ring.splash(Vec2::new(dist * theta.cos(), dist * theta.sin()));

            let hit: Vec<usize> = ring
                .springs()
                .iter()
                .enumerate()
                .filter(|(_, s)| s.velocity != 0.0)
                .map(|(i, _)| i)
                .collect();
            // The impulse dist - radius is nonzero for any dist < radius,
            // so exactly one spring must have been hit
            prop_assert_eq!(hit.len(), 1);
            prop_assert!(hit[0] < ring.spring_count());
        }
    }
}
