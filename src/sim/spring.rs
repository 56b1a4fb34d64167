//! Single damped-spring oscillator
//!
//! One spring is one radial sample of the ring boundary: a scalar
//! displacement pulled back toward its rest value by tension and bled of
//! velocity by dampening.

use serde::{Deserialize, Serialize};

/// A damped harmonic oscillator over a single scalar displacement.
///
/// Owned by a ring by array slot; the ring broadcasts `tension` and
/// `dampening` uniformly, while `value`/`velocity` evolve per spring once
/// perturbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Equilibrium displacement (the ring radius)
    pub rest_value: f32,
    /// Current displacement along the spring's fixed angular direction
    pub value: f32,
    /// Rate of change of `value`, units per tick
    pub velocity: f32,
    /// Restoring-force coefficient; smaller means larger oscillation
    pub tension: f32,
    /// Velocity-loss coefficient; smaller means longer-lived oscillation
    pub dampening: f32,
}

impl Spring {
    /// One semi-implicit integration step.
    ///
    /// Velocity updates before value; swapping the two lines changes the
    /// numeric behavior of every ring built on top of this.
    pub fn advance(&mut self) {
        self.velocity += -self.tension * (self.value - self.rest_value) - self.velocity * self.dampening;
        self.value += self.velocity;
    }
}
