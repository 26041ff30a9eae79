//! Player-specific state: health, armor, speed and the boundary policy.
//!
//! Movement forces and bound checks need the player's body and position, so
//! they are driven through [`Entity`](crate::Entity); this module holds the
//! arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::numeric::{truncate_to_i32, unit_to_u8};
use crate::vector::Vector2D;
use crate::{BASE_ARMOR, BASE_HEALTH, BASE_SPEED, MAX_ARMOR};

/// Horizontal movement direction requested by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// Unit vector pointing in this direction.
    #[must_use]
    pub const fn unit(self) -> Vector2D {
        match self {
            Self::Left => Vector2D::new(-1.0, 0.0),
            Self::Right => Vector2D::new(1.0, 0.0),
        }
    }
}

/// Multipliers applied to the base player statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Scales [`BASE_HEALTH`].
    pub health_mult: f64,
    /// Scales [`BASE_ARMOR`].
    pub armor_mult: f64,
    /// Scales [`BASE_SPEED`].
    pub speed_mult: f64,
    /// Scales the base mass.
    pub mass_mult: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health_mult: 1.0,
            armor_mult: 1.0,
            speed_mult: 1.0,
            mass_mult: 1.0,
        }
    }
}

/// Wrap and respawn limits for a player's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge; crossing it wraps to `max_x`.
    pub min_x: f64,
    /// Right edge; crossing it wraps to `min_x`.
    pub max_x: f64,
    /// Floor; falling below it respawns at `max_y`.
    pub min_y: f64,
    /// Respawn height after falling through the floor.
    pub max_y: f64,
}

impl Bounds {
    /// Applies horizontal wraparound and floor respawn to `position`.
    ///
    /// There is deliberately no ceiling: players may rise without limit.
    ///
    /// # Examples
    /// ```
    /// use duel::{Bounds, Vector2D};
    /// let bounds = Bounds { min_x: 0.0, max_x: 100.0, min_y: 0.0, max_y: 50.0 };
    /// assert_eq!(bounds.apply(Vector2D::new(-1.0, 10.0)), Vector2D::new(100.0, 10.0));
    /// assert_eq!(bounds.apply(Vector2D::new(30.0, -5.0)), Vector2D::new(30.0, 50.0));
    /// ```
    #[must_use]
    pub fn apply(&self, position: Vector2D) -> Vector2D {
        let mut wrapped = position;
        if wrapped.x < self.min_x {
            wrapped.x = self.max_x;
        } else if wrapped.x > self.max_x {
            wrapped.x = self.min_x;
        }
        if wrapped.y < self.min_y {
            wrapped.y = self.max_y;
        }
        wrapped
    }
}

/// Health values the HUD redraws after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReadout {
    /// Health after the change.
    pub current: i32,
    /// Health at spawn.
    pub starting: i32,
    /// RGBA label tint: white at full health fading to red.
    pub tint: [u8; 4],
}

/// Player component.
///
/// Serialises for snapshots but is only built through [`PlayerState::new`],
/// which validates the stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    starting_health: i32,
    health: i32,
    armor: i32,
    speed: i32,
    bounds: Bounds,
    health_changed: bool,
}

impl PlayerState {
    /// Builds a player from stat multipliers.
    ///
    /// Scaled statistics are truncated to whole numbers.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHealth`] when starting health is not
    /// positive, [`ConfigError::InvalidArmor`] when armor leaves `0..=100`
    /// and [`ConfigError::InvalidSpeed`] for negative speed.
    pub fn new(stats: &PlayerStats, bounds: Bounds) -> Result<Self, ConfigError> {
        let starting_health = truncate_to_i32(f64::from(BASE_HEALTH) * stats.health_mult);
        let armor = truncate_to_i32(f64::from(BASE_ARMOR) * stats.armor_mult);
        let speed = truncate_to_i32(f64::from(BASE_SPEED) * stats.speed_mult);
        if starting_health <= 0 {
            return Err(ConfigError::InvalidHealth(starting_health));
        }
        if !(0..=MAX_ARMOR).contains(&armor) {
            return Err(ConfigError::InvalidArmor(armor));
        }
        if speed < 0 {
            return Err(ConfigError::InvalidSpeed(speed));
        }
        Ok(Self {
            starting_health,
            health: starting_health,
            armor,
            speed,
            bounds,
            health_changed: false,
        })
    }

    /// Health at spawn.
    #[must_use]
    pub const fn starting_health(&self) -> i32 {
        self.starting_health
    }

    /// Current health; may be zero or negative.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Percentage of incoming damage blocked.
    #[must_use]
    pub const fn armor(&self) -> i32 {
        self.armor
    }

    /// Maximum horizontal speed in pixels per second.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    /// Boundary policy for this player.
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Whether health changed since the HUD last read it.
    #[must_use]
    pub const fn health_changed(&self) -> bool {
        self.health_changed
    }

    /// Applies a signed health delta and returns the change actually applied.
    ///
    /// Losses (`amount <= 0`) are reduced by the armor percentage; healing is
    /// applied in full. The result is truncated toward zero and health has no
    /// floor.
    ///
    /// # Examples
    /// ```
    /// use duel::{Bounds, PlayerState, PlayerStats};
    /// let bounds = Bounds { min_x: 0.0, max_x: 1.0, min_y: 0.0, max_y: 1.0 };
    /// let mut player = PlayerState::new(&PlayerStats::default(), bounds).unwrap();
    /// assert_eq!(player.apply_damage(-20), -18);
    /// assert_eq!(player.health(), 82);
    /// ```
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let change = if amount <= 0 {
            // Integer division truncates toward zero; the result never
            // exceeds `amount` in magnitude, so it always fits.
            let kept = i64::from(amount) * i64::from(MAX_ARMOR - self.armor) / 100;
            i32::try_from(kept).unwrap_or(amount)
        } else {
            amount
        };
        self.health = self.health.saturating_add(change);
        self.health_changed = true;
        change
    }

    /// Consumes the health-changed flag.
    ///
    /// Returns the values to redraw, or `None` if nothing changed since the
    /// last call.
    pub fn take_health_change(&mut self) -> Option<HealthReadout> {
        if !std::mem::take(&mut self.health_changed) {
            return None;
        }
        let remaining = f64::from(self.health) / f64::from(self.starting_health);
        let fade = unit_to_u8(remaining);
        Some(HealthReadout {
            current: self.health,
            starting: self.starting_health,
            tint: [u8::MAX, fade, fade, u8::MAX],
        })
    }

    /// Force pushing the player in `direction`, or `None` once the current
    /// horizontal speed has reached the cap.
    #[must_use]
    pub fn movement_force(&self, direction: Direction, velocity: Vector2D) -> Option<Vector2D> {
        let speed = f64::from(self.speed);
        (velocity.x.abs() < speed).then(|| direction.unit() * speed)
    }
}
