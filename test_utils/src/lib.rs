//! Fixture builders shared by the `duel` integration tests.
//!
//! Everything here panics on invalid input: a broken fixture is a broken
//! test, not a recoverable condition.

use duel::{
    Body, Collider, Entity, EntityId, PlayerStats, Rectangle, Vector2D, World, WorldConfig,
};

/// Default 1920x1080 configuration with gravity switched off.
#[must_use]
pub fn world_config_without_gravity() -> WorldConfig {
    WorldConfig::default()
        .with_gravity(0.0)
        .unwrap_or_else(|e| panic!("zero gravity rejected: {e}"))
}

/// Colliding square hitbox with the given side length.
///
/// # Panics
/// Panics if `side` is negative or not finite.
#[must_use]
pub fn square_collider(side: f64) -> Collider {
    let hitbox = Rectangle::new(side, side)
        .unwrap_or_else(|e| panic!("invalid fixture hitbox: {e}"));
    Collider::solid(hitbox)
}

/// Static 10x10 block centred on `(x, y)`.
#[must_use]
pub fn block_at(x: f64, y: f64) -> Entity {
    Entity::collidable(Vector2D::new(x, y), square_collider(10.0))
}

/// Unit-mass 10x10 physical object centred on `(x, y)` moving at `velocity`.
///
/// # Examples
/// ```
/// use duel::Vector2D;
/// use test_utils::physical_at;
/// let crate_box = physical_at(0.0, 0.0, Vector2D::new(1.0, 0.0));
/// assert_eq!(crate_box.velocity(), Some(Vector2D::new(1.0, 0.0)));
/// ```
#[must_use]
pub fn physical_at(x: f64, y: f64, velocity: Vector2D) -> Entity {
    let mut body = Body::new(1.0).unwrap_or_else(|e| panic!("invalid fixture body: {e}"));
    body.velocity = velocity;
    Entity::physical(Vector2D::new(x, y), square_collider(10.0), body)
}

/// Default-stat player standing at `(x, y)`.
///
/// # Panics
/// Panics if the default stats are rejected.
#[must_use]
pub fn player_at(config: &WorldConfig, x: f64, y: f64) -> Entity {
    Entity::player(config, &PlayerStats::default(), Vector2D::new(x, y))
        .unwrap_or_else(|e| panic!("invalid fixture player: {e}"))
}

/// Incrementally assembles a [`World`] for tests.
#[derive(Debug, Clone)]
pub struct WorldBuilder {
    config: WorldConfig,
    spawn_points: Vec<Vector2D>,
    entities: Vec<Entity>,
    players: Vec<PlayerStats>,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new(world_config_without_gravity())
    }
}

impl WorldBuilder {
    /// Starts from `config` with no spawn points and no entities.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            spawn_points: Vec::new(),
            entities: Vec::new(),
            players: Vec::new(),
        }
    }

    /// Replaces gravity.
    ///
    /// # Panics
    /// Panics if `gravity` is not finite.
    #[must_use]
    pub fn gravity(mut self, gravity: f64) -> Self {
        self.config = self
            .config
            .with_gravity(gravity)
            .unwrap_or_else(|e| panic!("invalid fixture gravity: {e}"));
        self
    }

    /// Adds a spawn point and a default player standing on it.
    #[must_use]
    pub fn player(mut self, x: f64, y: f64) -> Self {
        self.spawn_points.push(Vector2D::new(x, y));
        self.players.push(PlayerStats::default());
        self
    }

    /// Adds an entity that is not a spawned player.
    #[must_use]
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Builds the world and returns the ids of the extra entities in the
    /// order they were added. Players are reachable by index.
    ///
    /// # Panics
    /// Panics if the spawn points or player stats are rejected.
    #[must_use]
    pub fn build(self) -> (World, Vec<EntityId>) {
        let mut world = World::new(self.config, "fixture", self.spawn_points)
            .unwrap_or_else(|e| panic!("invalid fixture world: {e}"));
        let ids = self
            .entities
            .into_iter()
            .map(|entity| world.add(entity))
            .collect();
        world
            .spawn_players(&self.players)
            .unwrap_or_else(|e| panic!("invalid fixture players: {e}"));
        (world, ids)
    }
}
