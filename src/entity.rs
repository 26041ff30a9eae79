//! Entities composed from optional collision, physics and player components.
//!
//! Capabilities nest: every entity can collide, some are also physical, and
//! some physical entities are players. The constructors uphold that nesting so
//! an [`EntityKind`] always matches the components present.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{overlaps, Collider};
use crate::config::WorldConfig;
use crate::error::ConfigError;
use crate::geometry::Rectangle;
use crate::physics::Body;
use crate::player::{Direction, HealthReadout, PlayerState, PlayerStats};
use crate::vector::Vector2D;

/// Stable handle to an entity stored in a [`World`](crate::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Most specific capability an entity has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Static scenery that only blocks.
    Collidable,
    /// Moves under forces and gravity.
    Physical,
    /// A physical object with health and controls.
    Player,
}

impl EntityKind {
    /// Whether the entity appears in the physical-object view.
    #[must_use]
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Physical | Self::Player)
    }

    /// Whether the entity appears in the player view.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

/// A positioned object in the world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Anchor point; hitboxes are centred on it.
    pub position: Vector2D,
    /// Collision component.
    pub collider: Collider,
    body: Option<Body>,
    player: Option<PlayerState>,
}

impl Entity {
    /// Static scenery such as a platform.
    #[must_use]
    pub const fn collidable(position: Vector2D, collider: Collider) -> Self {
        Self {
            position,
            collider,
            body: None,
            player: None,
        }
    }

    /// An object moved by forces.
    #[must_use]
    pub const fn physical(position: Vector2D, collider: Collider, body: Body) -> Self {
        Self {
            position,
            collider,
            body: Some(body),
            player: None,
        }
    }

    /// A player sized and bounded by `config`, standing at `position`.
    ///
    /// # Errors
    /// Propagates [`ConfigError`] for invalid stat multipliers.
    pub fn player(
        config: &WorldConfig,
        stats: &PlayerStats,
        position: Vector2D,
    ) -> Result<Self, ConfigError> {
        let body = Body::new(stats.mass_mult)?;
        let state = PlayerState::new(stats, config.player_bounds)?;
        Ok(Self {
            position,
            collider: Collider::solid(Rectangle::from(config.player_size)),
            body: Some(body),
            player: Some(state),
        })
    }

    /// Most specific capability.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match (&self.body, &self.player) {
            (_, Some(_)) => EntityKind::Player,
            (Some(_), None) => EntityKind::Physical,
            (None, None) => EntityKind::Collidable,
        }
    }

    /// Physics component, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Mutable physics component, if any.
    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    /// Player component, if any.
    #[must_use]
    pub const fn player_state(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }

    /// Current velocity, or `None` for static scenery.
    #[must_use]
    pub fn velocity(&self) -> Option<Vector2D> {
        self.body.map(|body| body.velocity)
    }

    /// Current health, or `None` for non-players.
    #[must_use]
    pub fn health(&self) -> Option<i32> {
        self.player.as_ref().map(PlayerState::health)
    }

    /// Whether this entity overlaps `other` at their current positions.
    #[must_use]
    pub fn is_colliding(&self, other: &Self) -> bool {
        overlaps(self.position, &self.collider, other.position, &other.collider)
    }

    /// Changes velocity by `force / mass`. Static scenery ignores forces.
    pub fn apply_force(&mut self, force: Vector2D) {
        if let Some(body) = &mut self.body {
            body.apply_force(force);
        }
    }

    /// Advances the position by `velocity * dt`.
    pub fn do_update(&mut self, dt: f64) {
        if let Some(body) = &self.body {
            self.position = body.integrate(self.position, dt);
        }
    }

    /// Pushes a player in `direction` unless it is already at top speed.
    pub fn move_player(&mut self, direction: Direction) {
        let (Some(body), Some(player)) = (&mut self.body, &self.player) else {
            return;
        };
        if let Some(force) = player.movement_force(direction, body.velocity) {
            body.apply_force(force);
        }
    }

    /// Applies a health delta to a player and returns the change applied.
    ///
    /// Returns `None` when the entity is not a player.
    pub fn apply_damage(&mut self, amount: i32) -> Option<i32> {
        self.player
            .as_mut()
            .map(|player| player.apply_damage(amount))
    }

    /// Consumes a player's health-changed flag.
    pub fn take_health_change(&mut self) -> Option<HealthReadout> {
        self.player
            .as_mut()
            .and_then(PlayerState::take_health_change)
    }

    /// Wraps a player back inside its bounds. Velocity is untouched.
    pub fn check_bounds(&mut self) {
        if let Some(player) = &self.player {
            self.position = player.bounds().apply(self.position);
        }
    }

    /// Anchor in single precision for renderers.
    #[must_use]
    pub fn render_position(&self) -> Vec2 {
        self.position.as_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> WorldConfig {
        WorldConfig::default()
    }

    #[fixture]
    fn block() -> Entity {
        Entity::collidable(
            Vector2D::ZERO,
            Collider::solid(Rectangle::new(10.0, 10.0).expect("valid hitbox")),
        )
    }

    #[fixture]
    fn crate_box() -> Entity {
        Entity::physical(
            Vector2D::new(100.0, 100.0),
            Collider::solid(Rectangle::new(10.0, 10.0).expect("valid hitbox")),
            Body::new(2.0).expect("valid mass"),
        )
    }

    #[fixture]
    fn player(config: WorldConfig) -> Entity {
        Entity::player(&config, &PlayerStats::default(), Vector2D::new(500.0, 500.0))
            .expect("default player")
    }

    #[rstest]
    fn kinds_follow_components(block: Entity, crate_box: Entity, player: Entity) {
        assert_eq!(block.kind(), EntityKind::Collidable);
        assert_eq!(crate_box.kind(), EntityKind::Physical);
        assert_eq!(player.kind(), EntityKind::Player);
        assert!(player.kind().is_physical());
        assert!(!crate_box.kind().is_player());
    }

    #[rstest]
    fn scenery_ignores_forces(mut block: Entity) {
        block.apply_force(Vector2D::new(10.0, 10.0));
        block.do_update(1.0);
        assert_eq!(block.position, Vector2D::ZERO);
        assert!(block.velocity().is_none());
    }

    #[rstest]
    fn physical_objects_integrate(mut crate_box: Entity) {
        crate_box.apply_force(Vector2D::new(20.0, -10.0));
        crate_box.do_update(0.5);
        assert_eq!(crate_box.velocity(), Some(Vector2D::new(10.0, -5.0)));
        assert_eq!(crate_box.position, Vector2D::new(105.0, 97.5));
    }

    #[rstest]
    fn player_hitbox_matches_config(config: WorldConfig, player: Entity) {
        let hitbox = player.collider.hitbox.expect("players have hitboxes");
        assert_eq!(hitbox.bounds(), config.player_size);
        assert!(player.collider.does_collide);
    }

    #[rstest]
    fn movement_accelerates_until_speed_cap(mut player: Entity) {
        player.move_player(Direction::Right);
        assert_eq!(player.velocity(), Some(Vector2D::new(216.0, 0.0)));
        player.move_player(Direction::Right);
        assert_eq!(player.velocity(), Some(Vector2D::new(216.0, 0.0)));
        // The cap is on speed, so reversing is blocked too.
        player.move_player(Direction::Left);
        assert_eq!(player.velocity(), Some(Vector2D::new(216.0, 0.0)));
    }

    #[rstest]
    fn damage_only_reaches_players(mut block: Entity, mut player: Entity) {
        assert_eq!(block.apply_damage(-20), None);
        assert_eq!(player.apply_damage(-20), Some(-18));
        assert_eq!(player.health(), Some(82));
        assert!(player.take_health_change().is_some());
        assert!(player.take_health_change().is_none());
    }

    #[rstest]
    fn bounds_wrap_keeps_velocity(config: WorldConfig, mut player: Entity) {
        if let Some(body) = player.body_mut() {
            body.velocity = Vector2D::new(-50.0, 0.0);
        }
        player.position = Vector2D::new(config.player_bounds.min_x - 1.0, 300.0);
        player.check_bounds();
        assert_eq!(player.position, Vector2D::new(config.player_bounds.max_x, 300.0));
        assert_eq!(player.velocity(), Some(Vector2D::new(-50.0, 0.0)));
    }

    #[rstest]
    fn non_players_are_never_wrapped(mut crate_box: Entity) {
        crate_box.position = Vector2D::new(-1e6, -1e6);
        crate_box.check_bounds();
        assert_eq!(crate_box.position, Vector2D::new(-1e6, -1e6));
    }

    #[rstest]
    fn collision_uses_both_positions(block: Entity, mut crate_box: Entity) {
        assert!(!block.is_colliding(&crate_box));
        crate_box.position = Vector2D::new(5.0, 0.0);
        assert!(block.is_colliding(&crate_box));
        assert!(crate_box.is_colliding(&block));
    }

    #[test]
    fn ids_display_with_hash() {
        assert_eq!(EntityId(7).to_string(), "#7");
    }
}
