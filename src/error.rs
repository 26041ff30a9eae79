//! Error types surfaced by the simulation core.
//!
//! Every failure here is a caller error detected up front: the simulation
//! performs no I/O, so nothing is retried.

use thiserror::Error;

/// Rejected construction input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A width or height was negative or not finite.
    #[error("invalid dimension {width}x{height}: sizes must be finite and non-negative")]
    InvalidDimension {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// A mass was zero, negative or not finite.
    #[error("invalid mass {0}: mass must be finite and positive")]
    InvalidMass(f64),
    /// Starting health must be a positive integer.
    #[error("invalid starting health {0}: must be positive")]
    InvalidHealth(i32),
    /// Armor is a whole-number percentage.
    #[error("invalid armor {0}: must lie within 0..=100")]
    InvalidArmor(i32),
    /// Movement speed cannot be negative.
    #[error("invalid speed {0}: must not be negative")]
    InvalidSpeed(i32),
    /// A resolution string did not look like `WIDTHxHEIGHT`.
    #[error("invalid resolution {0:?}: expected WIDTHxHEIGHT with non-zero sides")]
    InvalidResolution(String),
    /// Gravity overrides must be finite.
    #[error("invalid gravity {0}: must be finite")]
    InvalidGravity(f64),
    /// More spawn points or players than the level supports.
    #[error("{requested} players requested but only {available} slots are available")]
    TooManyPlayers {
        /// Number of players or spawn points asked for.
        requested: usize,
        /// Number of slots the level provides.
        available: usize,
    },
}

/// Mathematically undefined vector operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The angle between two vectors needs both to have a length.
    #[error("angle is undefined for a zero-length vector")]
    ZeroLengthVector,
}
