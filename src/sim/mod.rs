//! Deterministic soft-body simulation
//!
//! Everything here is pure and deterministic:
//! - Fixed per-tick stepping only (no wall-clock time)
//! - Stable iteration order (springs by ring index)
//! - No rendering or platform dependencies

pub mod falling;
pub mod floor;
pub mod ring;
pub mod spring;

pub use falling::FallingJelly;
pub use floor::Rect;
pub use ring::{JellyRing, RingSample};
pub use spring::Spring;
