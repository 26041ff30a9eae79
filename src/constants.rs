//! Gameplay constants shared across the simulation.
//!
//! Sizes are expressed against a 1920x1080 reference screen and scaled to
//! the configured resolution by [`WorldConfig`](crate::WorldConfig). One
//! player is exactly one metre tall.

/// Mass of one standard object.
pub const BASE_MASS: f64 = 1.0;
/// Starting health of a player with a health multiplier of one.
pub const BASE_HEALTH: i32 = 100;
/// Percentage of incoming damage blocked by default.
pub const BASE_ARMOR: i32 = 10;
/// Default player movement speed in pixels per second.
pub const BASE_SPEED: i32 = 216;
/// Highest armor value; armor is a whole-number percentage.
pub const MAX_ARMOR: i32 = 100;

/// Width of the reference screen in pixels.
pub const REFERENCE_WIDTH: f64 = 1920.0;
/// Height of the reference screen in pixels.
pub const REFERENCE_HEIGHT: f64 = 1080.0;
/// Player side length on the reference screen, in pixels.
pub const PLAYER_REFERENCE_SIZE: f64 = 80.0;
/// Gravitational acceleration in metres per second squared.
pub const EARTH_GRAVITY: f64 = 9.8;

/// Players in a standard match.
pub const DEFAULT_MAX_PLAYERS: usize = 2;
