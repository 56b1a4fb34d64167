//! Validation errors for body construction

use thiserror::Error;

/// Errors from constructing or reconfiguring a jelly body.
///
/// Once a body is built, simulation itself never fails: every `advance` and
/// `splash` input is clamped or wrapped defensively.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JellyError {
    /// The ring radius must be positive and finite.
    #[error("ring radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f32 },
    /// The angular step between springs must leave at least one spring.
    #[error("angle step must be between 1 and 360 degrees, got {step}")]
    InvalidAngleStep { step: u32 },
}
