//! Mass, velocity and the impulse-style integrator.
//!
//! Forces act as instantaneous velocity changes scaled by inverse mass
//! (`Δv = F / m`); there is no separate acceleration pass. Positions advance
//! with explicit Euler steps and no damping.

use serde::Serialize;

use crate::error::ConfigError;
use crate::vector::Vector2D;
use crate::BASE_MASS;

/// Smallest acceptable mass to avoid numerically unstable velocity changes.
const MIN_MASS: f64 = 1e-12;

/// Velocity change produced by `force` acting on `mass`.
///
/// Returns `None` if `mass` is non-positive, effectively zero (see
/// [`MIN_MASS`]) or not finite.
///
/// # Examples
///
/// ```
/// use duel::{physics::velocity_change, Vector2D};
/// let dv = velocity_change(Vector2D::new(7.0, -14.0), 7.0).unwrap();
/// assert!((dv.x - 1.0).abs() < 1e-12);
/// assert!((dv.y + 2.0).abs() < 1e-12);
/// assert!(velocity_change(Vector2D::new(1.0, 1.0), 0.0).is_none());
/// ```
#[must_use]
pub fn velocity_change(force: Vector2D, mass: f64) -> Option<Vector2D> {
    (mass.is_finite() && mass > MIN_MASS).then(|| force / mass)
}

/// Physics component carried by every physical object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Body {
    mass: f64,
    /// Current velocity in pixels per second.
    pub velocity: Vector2D,
    /// Whether [`Body::integrate`] moves the object at all.
    pub does_update: bool,
}

impl Body {
    /// Creates a body weighing `mass_mult` base masses, initially at rest.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidMass`] if the resulting mass is not a
    /// finite positive number.
    pub fn new(mass_mult: f64) -> Result<Self, ConfigError> {
        let mass = BASE_MASS * mass_mult;
        if velocity_change(Vector2D::ZERO, mass).is_none() {
            return Err(ConfigError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            velocity: Vector2D::ZERO,
            does_update: true,
        })
    }

    /// Mass in base units.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Adds `force / mass` to the velocity.
    pub fn apply_force(&mut self, force: Vector2D) {
        // Mass is validated on construction, so the change always exists.
        if let Some(dv) = velocity_change(force, self.mass) {
            self.velocity += dv;
        }
    }

    /// Position after travelling for `dt` seconds from `position`.
    ///
    /// Bodies with `does_update` switched off stay where they are.
    #[must_use]
    pub fn integrate(&self, position: Vector2D, dt: f64) -> Vector2D {
        if self.does_update {
            position + self.velocity * dt
        } else {
            position
        }
    }
}
