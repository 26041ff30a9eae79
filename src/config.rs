//! World configuration.
//!
//! [`WorldSettings`] is the raw, deserialisable input. [`WorldConfig`] is
//! built from it once and holds every derived value (gravity, player size,
//! boundary margins) as plain fields, so independent worlds can run with
//! independent configurations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Dimension;
use crate::player::Bounds;
use crate::{
    DEFAULT_MAX_PLAYERS, EARTH_GRAVITY, PLAYER_REFERENCE_SIZE,
    REFERENCE_HEIGHT, REFERENCE_WIDTH,
};

/// Screen resolution in pixels, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    /// Horizontal pixel count.
    pub width: u32,
    /// Vertical pixel count.
    pub height: u32,
}

impl Resolution {
    /// Creates a resolution.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidResolution`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidResolution(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl FromStr for Resolution {
    type Err = ConfigError;

    /// Parses `"1920x1080"`; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidResolution(s.to_owned());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Self::new(width, height)
    }
}

impl TryFrom<String> for Resolution {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(value: Resolution) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn default_max_players() -> usize {
    DEFAULT_MAX_PLAYERS
}

/// Raw world settings as a host would load them.
///
/// # Examples
/// ```
/// use duel::WorldSettings;
/// let settings: WorldSettings =
///     serde_json::from_str(r#"{ "resolution": "1280x720" }"#).unwrap();
/// assert_eq!(settings.resolution.width, 1280);
/// assert_eq!(settings.max_players, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Screen resolution the world is laid out against.
    #[serde(default)]
    pub resolution: Resolution,
    /// Gravity override in pixels per second squared (positive pulls down).
    #[serde(default)]
    pub gravity: Option<f64>,
    /// Number of player slots in the level.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            gravity: None,
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }
}

impl WorldSettings {
    /// Parses settings from a JSON document.
    ///
    /// # Errors
    /// Returns the `serde_json` error for malformed documents or invalid
    /// resolutions.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Validated configuration with all derived values precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// Screen resolution.
    pub resolution: Resolution,
    /// Downward gravitational pull in pixels per second squared.
    pub gravity: f64,
    /// Player hitbox size.
    pub player_size: Dimension,
    /// Wrap and respawn limits applied to players.
    pub player_bounds: Bounds,
    /// Number of player slots.
    pub max_players: usize,
}

fn default_gravity(resolution: Resolution) -> f64 {
    PLAYER_REFERENCE_SIZE / REFERENCE_HEIGHT * EARTH_GRAVITY * f64::from(resolution.height)
}

impl WorldConfig {
    /// Builds the configuration and derives the resolution-scaled values.
    ///
    /// Gravity defaults to `80/1080 · 9.8 · height`: a player is 80 px tall
    /// on a 1080 px screen and exactly one metre tall in game.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidGravity`] for non-finite overrides.
    pub fn from_settings(settings: &WorldSettings) -> Result<Self, ConfigError> {
        let gravity = match settings.gravity {
            Some(g) if !g.is_finite() => return Err(ConfigError::InvalidGravity(g)),
            Some(g) => g,
            None => default_gravity(settings.resolution),
        };
        Ok(Self::derive(settings, gravity))
    }

    fn derive(settings: &WorldSettings, gravity: f64) -> Self {
        let width = f64::from(settings.resolution.width);
        let height = f64::from(settings.resolution.height);
        let player_size = Dimension::from_positive(
            PLAYER_REFERENCE_SIZE / REFERENCE_WIDTH * width,
            PLAYER_REFERENCE_SIZE / REFERENCE_HEIGHT * height,
        );
        let player_bounds = Bounds {
            min_x: -player_size.width(),
            max_x: width + player_size.width(),
            min_y: -player_size.height(),
            max_y: height + player_size.height(),
        };
        Self {
            resolution: settings.resolution,
            gravity,
            player_size,
            player_bounds,
            max_players: settings.max_players,
        }
    }

    /// Configuration for a resolution with every other setting defaulted.
    #[must_use]
    pub fn for_resolution(resolution: Resolution) -> Self {
        Self::derive(
            &WorldSettings {
                resolution,
                ..WorldSettings::default()
            },
            default_gravity(resolution),
        )
    }

    /// Returns a copy with gravity replaced.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidGravity`] for non-finite values.
    pub fn with_gravity(mut self, gravity: f64) -> Result<Self, ConfigError> {
        if !gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(gravity));
        }
        self.gravity = gravity;
        Ok(self)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::for_resolution(Resolution::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1920x1080", 1920, 1080)]
    #[case(" 1280 X 720 ", 1280, 720)]
    fn parses_resolutions(#[case] input: &str, #[case] width: u32, #[case] height: u32) {
        let res: Resolution = input.parse().expect("valid resolution");
        assert_eq!(res, Resolution { width, height });
    }

    #[rstest]
    #[case("1920")]
    #[case("0x1080")]
    #[case("widexhigh")]
    #[case("-5x10")]
    fn rejects_malformed_resolutions(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Resolution>(),
            Err(ConfigError::InvalidResolution(_))
        ));
    }

    #[test]
    fn derives_reference_values_at_1080p() {
        let config = WorldConfig::default();
        assert_relative_eq!(config.gravity, 80.0 * 9.8, epsilon = 1e-9);
        assert_relative_eq!(config.player_size.width(), 80.0, epsilon = 1e-9);
        assert_relative_eq!(config.player_size.height(), 80.0, epsilon = 1e-9);
        assert_relative_eq!(config.player_bounds.max_x, 2000.0, epsilon = 1e-9);
        assert_relative_eq!(config.player_bounds.min_y, -80.0, epsilon = 1e-9);
    }

    #[test]
    fn scales_with_resolution() {
        let config = WorldConfig::for_resolution(Resolution::new(960, 540).expect("valid"));
        assert_relative_eq!(config.gravity, 40.0 * 9.8, epsilon = 1e-9);
        assert_relative_eq!(config.player_size.width(), 40.0, epsilon = 1e-9);
        assert_relative_eq!(config.player_bounds.max_y, 580.0, epsilon = 1e-9);
    }

    #[test]
    fn gravity_override_is_used_verbatim() {
        let settings = WorldSettings {
            gravity: Some(0.0),
            ..WorldSettings::default()
        };
        let config = WorldConfig::from_settings(&settings).expect("valid config");
        assert_eq!(config.gravity, 0.0);
    }

    #[test]
    fn non_finite_gravity_is_rejected() {
        let settings = WorldSettings {
            gravity: Some(f64::NAN),
            ..WorldSettings::default()
        };
        assert!(matches!(
            WorldConfig::from_settings(&settings),
            Err(ConfigError::InvalidGravity(_))
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn gravity_builder_rejects_non_finite_values(#[case] gravity: f64) {
        assert!(matches!(
            WorldConfig::default().with_gravity(gravity),
            Err(ConfigError::InvalidGravity(_))
        ));
    }

    #[test]
    fn gravity_builder_replaces_gravity() {
        let config = WorldConfig::default().with_gravity(-3.5).expect("finite gravity");
        assert_eq!(config.gravity, -3.5);
    }

    #[test]
    fn settings_parse_from_json() {
        let settings =
            WorldSettings::from_json(r#"{ "resolution": "800x600", "gravity": 12.5, "max_players": 4 }"#)
                .expect("valid json");
        assert_eq!(settings.resolution, Resolution { width: 800, height: 600 });
        assert_eq!(settings.gravity, Some(12.5));
        assert_eq!(settings.max_players, 4);
    }

    #[test]
    fn settings_reject_bad_resolution_strings() {
        assert!(WorldSettings::from_json(r#"{ "resolution": "huge" }"#).is_err());
    }
}
