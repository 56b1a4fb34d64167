//! The falling jelly: a ring whose center drops under gravity and bounces
//! off a floor rectangle
//!
//! Floor contact is resolved per boundary sample. A sample entering the
//! floor gets a one-shot velocity impulse (the splash that makes the body
//! visibly bounce); a sample staying in contact instead damps the fall
//! speed by how much it is being compressed. Coordinates are screen-space,
//! y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::floor::Rect;
use super::ring::{JellyRing, RingSample};
use crate::consts::{GRAVITY, GRAVITY_MAX, WATER_COEFFICIENT};
use crate::error::JellyError;
use crate::polar_offset;

/// A jelly ring subject to gravity and floor collision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingJelly {
    ring: JellyRing,
    velocity: Vec2,
    floor: Option<Rect>,
    /// Per-spring contact flag, distinguishes first touch from ongoing
    /// contact
    collided: Vec<bool>,
    touching_floor: bool,
}

impl FallingJelly {
    /// Build a falling body at rest. Uses the water-like spring
    /// coefficients rather than the free ring's jelly defaults.
    pub fn new(center: Vec2, radius: f32, angle_step: u32) -> Result<Self, JellyError> {
        let mut ring = JellyRing::new(center, radius, angle_step)?;
        ring.set_tension(WATER_COEFFICIENT);
        ring.set_dampening(WATER_COEFFICIENT);
        let count = ring.spring_count();
        Ok(Self {
            ring,
            velocity: Vec2::ZERO,
            floor: None,
            collided: vec![false; count],
            touching_floor: false,
        })
    }

    /// Configure the floor rectangle. Without one the body falls forever.
    pub fn set_floor(&mut self, floor: Rect) {
        self.floor = Some(floor);
    }

    pub fn floor(&self) -> Option<Rect> {
        self.floor
    }

    /// Velocity of the ring center, units per tick
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// True while any boundary sample was inside the floor on the last tick
    pub fn is_touching_floor(&self) -> bool {
        self.touching_floor
    }

    /// Per-spring contact flags, in ring order
    pub fn contact_flags(&self) -> &[bool] {
        &self.collided
    }

    /// Read access to the underlying ring (samples, fan vertices, center)
    pub fn ring(&self) -> &JellyRing {
        &self.ring
    }

    /// Mutable access for retuning (radius, tension, dampening, spread)
    pub fn ring_mut(&mut self) -> &mut JellyRing {
        &mut self.ring
    }

    pub fn center(&self) -> Vec2 {
        self.ring.center()
    }

    /// Ordered boundary samples for rendering
    pub fn samples(&self) -> impl Iterator<Item = RingSample> + '_ {
        self.ring.samples()
    }

    /// Splash with a normalized impulse in `[-1, 0)`: unlike the free
    /// ring's depth-proportional force, the falling body reacts with the
    /// same bounded kick however deep the contact point is.
    pub fn splash(&mut self, point: Vec2) {
        if let Some((index, dist)) = self.ring.contact_index(point) {
            self.ring.springs[index].velocity = -dist / self.ring.radius();
        }
    }

    /// One tick: shared ring relaxation/propagation, then vertical motion
    /// and floor contact.
    pub fn advance(&mut self) {
        // Contact damping below compares against the pre-tick values
        let prev_values: Vec<f32> = self.ring.springs.iter().map(|s| s.value).collect();

        self.ring.advance();

        let vx = self.velocity.x;
        let mut vy = self.velocity.y;
        if self.touching_floor {
            vy = 0.0;
        }
        vy = (vy + GRAVITY).clamp(0.0, GRAVITY_MAX);

        self.touching_floor = false;
        let mut vy_damp = vy;

        if let Some(floor) = self.floor {
            for i in 0..self.ring.springs.len() {
                let angle = self.ring.angle_of(i);
                let point = self.ring.center + polar_offset(self.ring.springs[i].value, angle);
                if floor.contains(point) {
                    if !self.collided[i] {
                        // First touch: bounce impulse, applied exactly once
                        // per contact episode
                        self.ring.springs[i].velocity = vy;
                        self.collided[i] = true;
                    } else {
                        let delta = (self.ring.springs[i].value - prev_values[i]).abs();
                        if vy_damp < delta {
                            vy_damp = delta * angle.sin();
                        }
                    }
                    self.touching_floor = true;
                } else {
                    self.collided[i] = false;
                }
            }
        }

        if self.touching_floor {
            vy -= vy_damp;
        }

        self.velocity = Vec2::new(vx, vy);
        self.ring.center += self.velocity;
    }
}
