//! Jelly - a deformable soft-body ring
//!
//! The ring boundary is sampled by a circular array of radial damped-spring
//! oscillators. Disturb one sample with [`sim::JellyRing::splash`] and the
//! displacement travels around the ring as a wave, giving the wobbly jelly
//! look. Two variants:
//! - [`sim::JellyRing`]: free-floating, anchored at a fixed center
//! - [`sim::FallingJelly`]: center falls under gravity and bounces off a
//!   floor rectangle
//!
//! The crate is a pure library: no rendering, no windowing, no input. A host
//! loop calls `splash`/`advance` and reads back boundary samples each frame.

pub mod error;
pub mod sim;

pub use error::JellyError;
pub use sim::{FallingJelly, JellyRing, Rect, RingSample, Spring};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Fixed simulation tick rate the spring coefficients are tuned for.
    /// `advance` is dt-free; hosts should substep at this rate.
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default spring tension for the free-floating ring (jelly feel)
    pub const DEFAULT_TENSION: f32 = 0.001;
    /// Default spring dampening for the free-floating ring
    pub const DEFAULT_DAMPENING: f32 = 0.015;
    /// Tension/dampening value that reads as water rather than jelly;
    /// default for the falling variant
    pub const WATER_COEFFICIENT: f32 = 0.025;

    /// Fraction of a value-difference transferred to each neighbor per tick
    pub const DEFAULT_SPREAD: f32 = 0.25;

    /// Downward acceleration of a falling body, units per tick squared
    /// (y grows downward, screen-space)
    pub const GRAVITY: f32 = 0.5;
    /// Terminal fall speed, units per tick
    pub const GRAVITY_MAX: f32 = 10.0;
}

/// Offset vector at distance `r` along direction `theta` (radians)
#[inline]
pub fn polar_offset(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
