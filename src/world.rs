//! The level: entity storage, spawn points and the per-frame update.
//!
//! All entities live in one insertion-ordered store. The collidable,
//! physical-object and player views are filters over that store, so adding
//! or removing an entity updates every view at once.

use hashbrown::HashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::damage_inbox::{DamageEvent, DamageInbox};
use crate::entity::{Entity, EntityId};
use crate::error::ConfigError;
use crate::player::{Direction, PlayerStats};
use crate::vector::Vector2D;

/// Opaque handle to the level background, resolved by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgroundRef(pub String);

impl BackgroundRef {
    /// Wraps an asset key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The asset key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Decoded input: move player `player` in `direction` this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    /// Player index in spawn order.
    pub player: usize,
    /// Requested direction.
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
enum PendingChange {
    Add(EntityId, Entity),
    Remove(EntityId),
}

/// A level and everything in it.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    name: String,
    config: WorldConfig,
    background: Option<BackgroundRef>,
    entities: Vec<(EntityId, Entity)>,
    index: HashMap<EntityId, usize>,
    players: Vec<EntityId>,
    spawn_points: Vec<Vector2D>,
    pending: Vec<PendingChange>,
    damage_inbox: DamageInbox,
    next_id: u64,
    tick: u64,
}

impl World {
    /// Creates an empty level.
    ///
    /// # Errors
    /// Returns [`ConfigError::TooManyPlayers`] if there are more spawn points
    /// than the configuration allows players, and
    /// [`ConfigError::InvalidGravity`] if gravity was set to a non-finite
    /// value.
    pub fn new(
        config: WorldConfig,
        name: impl Into<String>,
        spawn_points: Vec<Vector2D>,
    ) -> Result<Self, ConfigError> {
        if !config.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(config.gravity));
        }
        if spawn_points.len() > config.max_players {
            return Err(ConfigError::TooManyPlayers {
                requested: spawn_points.len(),
                available: config.max_players,
            });
        }
        let level = name.into();
        info!(
            "created level {level:?} at {} with {} spawn points",
            config.resolution,
            spawn_points.len()
        );
        Ok(Self {
            name: level,
            config,
            background: None,
            entities: Vec::new(),
            index: HashMap::new(),
            players: Vec::new(),
            spawn_points,
            pending: Vec::new(),
            damage_inbox: DamageInbox::default(),
            next_id: 0,
            tick: 0,
        })
    }

    /// Level name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration the level was built with.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Spawn points in player-index order.
    #[must_use]
    pub fn spawn_points(&self) -> &[Vector2D] {
        &self.spawn_points
    }

    /// Number of completed updates.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Background shown behind the level, if any.
    #[must_use]
    pub const fn background(&self) -> Option<&BackgroundRef> {
        self.background.as_ref()
    }

    /// Replaces the background.
    pub fn set_background(&mut self, background: BackgroundRef) {
        self.background = Some(background);
    }

    /// Removes the background.
    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Events queued here are applied at the start of the next update.
    pub fn damage_inbox_mut(&mut self) -> &mut DamageInbox {
        &mut self.damage_inbox
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, id: EntityId, entity: Entity) {
        debug!("adding {:?} entity {id}", entity.kind());
        if entity.kind().is_player() {
            self.players.push(id);
        }
        self.index.insert(id, self.entities.len());
        self.entities.push((id, entity));
    }

    /// Inserts an entity immediately and returns its id.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = self.allocate_id();
        self.insert(id, entity);
        id
    }

    /// Removes an entity from every view.
    ///
    /// An entity still waiting in the queue is withdrawn instead, so it never
    /// appears. Returns `None` if the id is unknown.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(entity) = self.take_queued_add(id) {
            debug!("withdrew queued {:?} entity {id}", entity.kind());
            return Some(entity);
        }
        let slot = self.index.remove(&id)?;
        let (_, entity) = self.entities.remove(slot);
        for (shifted, (moved, _)) in self.entities.iter().enumerate().skip(slot) {
            self.index.insert(*moved, shifted);
        }
        self.players.retain(|player| *player != id);
        debug!("removed {:?} entity {id}", entity.kind());
        Some(entity)
    }

    fn take_queued_add(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.pending.iter().position(
            |change| matches!(change, PendingChange::Add(queued, _) if *queued == id),
        )?;
        match self.pending.remove(slot) {
            PendingChange::Add(_, entity) => Some(entity),
            PendingChange::Remove(_) => None,
        }
    }

    /// Reserves an id now and inserts the entity at the start of the next
    /// update.
    pub fn queue_add(&mut self, entity: Entity) -> EntityId {
        let id = self.allocate_id();
        self.pending.push(PendingChange::Add(id, entity));
        id
    }

    /// Removes the entity at the start of the next update.
    pub fn queue_remove(&mut self, id: EntityId) {
        self.pending.push(PendingChange::Remove(id));
    }

    /// Creates one player per `stats` entry at the matching spawn point.
    ///
    /// Either every player is spawned or none is. Returns the new ids in
    /// player-index order.
    ///
    /// # Errors
    /// Returns [`ConfigError::TooManyPlayers`] when there are more entries
    /// than spawn points, or the stat validation error of the first invalid
    /// entry.
    pub fn spawn_players(&mut self, stats: &[PlayerStats]) -> Result<Vec<EntityId>, ConfigError> {
        if stats.len() > self.spawn_points.len() {
            return Err(ConfigError::TooManyPlayers {
                requested: stats.len(),
                available: self.spawn_points.len(),
            });
        }
        let players = stats
            .iter()
            .zip(&self.spawn_points)
            .map(|(stats, spawn)| Entity::player(&self.config, stats, *spawn))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(players.into_iter().map(|player| self.add(player)).collect())
    }

    /// Entity by id, in any view.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        let slot = *self.index.get(&id)?;
        self.entities.get(slot).map(|(_, entity)| entity)
    }

    /// Mutable access to an entity by id.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.index.get(&id)?;
        self.entities.get_mut(slot).map(|(_, entity)| entity)
    }

    /// Id of the player with the given index.
    #[must_use]
    pub fn player_id(&self, index: usize) -> Option<EntityId> {
        self.players.get(index).copied()
    }

    /// Player with the given index.
    #[must_use]
    pub fn player(&self, index: usize) -> Option<&Entity> {
        self.entity(self.player_id(index)?)
    }

    /// Mutable access to the player with the given index.
    pub fn player_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entity_mut(self.player_id(index)?)
    }

    /// Number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the level holds no entities. Queued additions do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Every entity, in insertion order.
    pub fn collidables(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Entities that move under forces, players included.
    pub fn physical_objects(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.collidables()
            .filter(|(_, entity)| entity.kind().is_physical())
    }

    /// Players in player-index order.
    pub fn players(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.players
            .iter()
            .filter_map(|id| self.entity(*id).map(|entity| (*id, entity)))
    }

    /// Advances the level by `dt` seconds.
    ///
    /// Intents are applied first, then gravity. Objects overlapping anything
    /// at the start of the integration pass keep their position this frame.
    /// Players are wrapped back inside their bounds last. Non-finite or
    /// non-positive `dt` leaves the level untouched.
    pub fn update(&mut self, dt: f64, intents: &[Intent]) {
        if !dt.is_finite() || dt <= 0.0 {
            warn!("ignoring update with invalid dt {dt}");
            return;
        }
        self.apply_pending();
        self.apply_damage();
        self.apply_intents(intents);
        self.apply_gravity(dt);
        self.integrate(dt);
        for (_, entity) in &mut self.entities {
            entity.check_bounds();
        }
        self.tick += 1;
    }

    fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for change in pending {
            match change {
                PendingChange::Add(id, entity) => self.insert(id, entity),
                PendingChange::Remove(id) => {
                    if self.remove(id).is_none() {
                        debug!("queued removal of unknown entity {id}");
                    }
                }
            }
        }
    }

    fn apply_damage(&mut self) {
        let events: Vec<DamageEvent> = self.damage_inbox.drain().collect();
        for DamageEvent { target, amount } in events {
            let Some(change) = self
                .entity_mut(target)
                .and_then(|entity| entity.apply_damage(amount))
            else {
                warn!("dropping damage for {target}: not a player in this level");
                continue;
            };
            debug!("entity {target} health changed by {change}");
        }
    }

    fn apply_intents(&mut self, intents: &[Intent]) {
        for intent in intents {
            let Some(player) = self.player_mut(intent.player) else {
                debug!("ignoring intent for missing player {}", intent.player);
                continue;
            };
            player.move_player(intent.direction);
        }
    }

    fn apply_gravity(&mut self, dt: f64) {
        let pull = Vector2D::new(0.0, -self.config.gravity) * dt;
        for (_, entity) in &mut self.entities {
            entity.apply_force(pull);
        }
    }

    fn integrate(&mut self, dt: f64) {
        let blocked: Vec<bool> = self
            .entities
            .iter()
            .enumerate()
            .map(|(slot, (_, entity))| {
                entity.kind().is_physical()
                    && self
                        .entities
                        .iter()
                        .enumerate()
                        .any(|(other_slot, (_, other))| {
                            other_slot != slot && entity.is_colliding(other)
                        })
            })
            .collect();
        for ((_, entity), blocked) in self.entities.iter_mut().zip(blocked) {
            if !blocked {
                entity.do_update(dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Collider;
    use crate::geometry::Rectangle;
    use crate::physics::Body;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    fn square() -> Collider {
        Collider::solid(Rectangle::new(10.0, 10.0).expect("valid hitbox"))
    }

    fn block(x: f64, y: f64) -> Entity {
        Entity::collidable(Vector2D::new(x, y), square())
    }

    fn moving(x: f64, y: f64, velocity: Vector2D) -> Entity {
        let mut body = Body::new(1.0).expect("valid mass");
        body.velocity = velocity;
        Entity::physical(Vector2D::new(x, y), square(), body)
    }

    #[fixture]
    fn world() -> World {
        World::new(
            WorldConfig::default()
                .with_gravity(0.0)
                .expect("finite gravity"),
            "test",
            vec![Vector2D::new(400.0, 600.0), Vector2D::new(1400.0, 600.0)],
        )
        .expect("two spawn points fit")
    }

    #[rstest]
    fn rejects_excess_spawn_points() {
        let spawns = vec![Vector2D::ZERO; 3];
        assert_eq!(
            World::new(WorldConfig::default(), "crowded", spawns),
            Err(ConfigError::TooManyPlayers {
                requested: 3,
                available: 2
            })
        );
    }

    #[rstest]
    fn rejects_non_finite_gravity() {
        let mut config = WorldConfig::default();
        config.gravity = f64::NAN;
        assert!(matches!(
            World::new(config, "nan", vec![]),
            Err(ConfigError::InvalidGravity(_))
        ));
    }

    #[rstest]
    fn views_nest(mut world: World) {
        world.add(block(0.0, 0.0));
        world.add(moving(100.0, 0.0, Vector2D::ZERO));
        world
            .spawn_players(&[PlayerStats::default()])
            .expect("one player fits");
        assert_eq!(world.collidables().count(), 3);
        assert_eq!(world.physical_objects().count(), 2);
        assert_eq!(world.players().count(), 1);
    }

    #[rstest]
    fn remove_restores_every_view(mut world: World) {
        world.add(block(0.0, 0.0));
        let ids = world
            .spawn_players(&[PlayerStats::default(), PlayerStats::default()])
            .expect("two players fit");
        let first = *ids.first().expect("first player");
        let second = *ids.get(1).expect("second player");
        let removed = world.remove(first).expect("player was stored");
        assert_eq!(removed.health(), Some(100));
        assert_eq!(world.collidables().count(), 2);
        assert_eq!(world.physical_objects().count(), 1);
        assert_eq!(world.player_id(0), Some(second));
        assert!(world.entity(first).is_none());
        assert!(world.entity(second).is_some());
        assert!(world.remove(first).is_none());
    }

    #[rstest]
    fn spawning_too_many_players_adds_nothing(mut world: World) {
        let stats = vec![PlayerStats::default(); 3];
        assert!(matches!(
            world.spawn_players(&stats),
            Err(ConfigError::TooManyPlayers { requested: 3, available: 2 })
        ));
        assert!(world.is_empty());
    }

    #[rstest]
    fn invalid_stats_spawn_nobody(mut world: World) {
        let bad = PlayerStats {
            health_mult: -1.0,
            ..PlayerStats::default()
        };
        assert!(world.spawn_players(&[PlayerStats::default(), bad]).is_err());
        assert!(world.is_empty());
    }

    #[rstest]
    fn players_start_on_their_spawn_points(mut world: World) {
        world
            .spawn_players(&[PlayerStats::default(), PlayerStats::default()])
            .expect("two players fit");
        let positions: Vec<_> = world.players().map(|(_, p)| p.position).collect();
        assert_eq!(positions, world.spawn_points());
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-0.016)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn invalid_dt_is_a_no_op(mut world: World, #[case] dt: f64) {
        world.add(moving(0.0, 0.0, Vector2D::new(5.0, 5.0)));
        world.queue_add(block(500.0, 500.0));
        let before = world.clone();
        world.update(dt, &[]);
        assert_eq!(world, before);
    }

    #[rstest]
    fn gravity_changes_velocity_by_g_dt() {
        let mut world = World::new(
            WorldConfig::default()
                .with_gravity(100.0)
                .expect("finite gravity"),
            "g",
            vec![],
        )
            .expect("no spawn points");
        let id = world.add(moving(0.0, 500.0, Vector2D::ZERO));
        world.update(0.5, &[]);
        let entity = world.entity(id).expect("still stored");
        assert_relative_eq!(entity.velocity().expect("physical").y, -50.0);
        assert_relative_eq!(entity.position.y, 475.0);
    }

    #[rstest]
    fn overlapping_objects_freeze(mut world: World) {
        let a = world.add(moving(0.0, 0.0, Vector2D::new(10.0, 0.0)));
        let b = world.add(moving(5.0, 0.0, Vector2D::new(-10.0, 0.0)));
        let c = world.add(moving(100.0, 0.0, Vector2D::new(10.0, 0.0)));
        world.update(0.1, &[]);
        assert_eq!(world.entity(a).expect("a").position, Vector2D::new(0.0, 0.0));
        assert_eq!(world.entity(b).expect("b").position, Vector2D::new(5.0, 0.0));
        assert_eq!(world.entity(c).expect("c").position, Vector2D::new(101.0, 0.0));
    }

    #[rstest]
    fn collision_uses_start_of_pass_positions(mut world: World) {
        // `a` would move out of `b` if integrated first, but both stay frozen.
        let a = world.add(moving(0.0, 0.0, Vector2D::new(-100.0, 0.0)));
        let b = world.add(moving(9.0, 0.0, Vector2D::ZERO));
        world.update(1.0, &[]);
        assert_eq!(world.entity(a).expect("a").position, Vector2D::ZERO);
        assert_eq!(world.entity(b).expect("b").position, Vector2D::new(9.0, 0.0));
    }

    #[rstest]
    fn queued_changes_wait_for_next_update(mut world: World) {
        let existing = world.add(block(0.0, 0.0));
        let added = world.queue_add(block(50.0, 0.0));
        world.queue_remove(existing);
        assert!(world.entity(added).is_none());
        assert!(world.entity(existing).is_some());
        world.update(0.016, &[]);
        assert!(world.entity(added).is_some());
        assert!(world.entity(existing).is_none());
    }

    #[rstest]
    fn removing_a_queued_entity_withdraws_it(mut world: World) {
        let queued = world.queue_add(block(50.0, 0.0));
        let withdrawn = world.remove(queued).expect("queued entity is returned");
        assert_eq!(withdrawn.position, Vector2D::new(50.0, 0.0));
        world.update(0.016, &[]);
        assert!(world.entity(queued).is_none());
        assert!(world.is_empty());
    }

    #[rstest]
    fn intents_and_gravity_combine() {
        let mut world = World::new(
            WorldConfig::default()
                .with_gravity(10.0)
                .expect("finite gravity"),
            "intent",
            vec![Vector2D::new(500.0, 500.0)],
        )
        .expect("one spawn point");
        world
            .spawn_players(&[PlayerStats::default()])
            .expect("one player");
        let intents = [Intent {
            player: 0,
            direction: Direction::Left,
        }];
        world.update(1.0, &intents);
        let player = world.player(0).expect("player 0");
        assert_eq!(player.velocity(), Some(Vector2D::new(-216.0, -10.0)));
        assert_eq!(player.position, Vector2D::new(284.0, 490.0));
    }

    #[rstest]
    fn intents_for_missing_players_are_ignored(mut world: World) {
        world.update(
            0.016,
            &[Intent {
                player: 7,
                direction: Direction::Right,
            }],
        );
        assert_eq!(world.tick(), 1);
    }

    #[rstest]
    fn damage_events_apply_once(mut world: World) {
        let ids = world
            .spawn_players(&[PlayerStats::default()])
            .expect("one player");
        let target = *ids.first().expect("player id");
        let scenery = world.add(block(0.0, 0.0));
        world.damage_inbox_mut().extend([
            DamageEvent { target, amount: -20 },
            DamageEvent { target: scenery, amount: -20 },
        ]);
        world.update(0.016, &[]);
        world.update(0.016, &[]);
        assert_eq!(world.player(0).and_then(Entity::health), Some(82));
        assert!(world.damage_inbox_mut().is_empty());
    }

    #[rstest]
    fn players_wrap_after_integration(mut world: World) {
        world
            .spawn_players(&[PlayerStats::default()])
            .expect("one player");
        let bounds = world.config().player_bounds;
        let player = world.player_mut(0).expect("player 0");
        player.position = Vector2D::new(bounds.max_x - 1.0, 300.0);
        if let Some(body) = player.body_mut() {
            body.velocity = Vector2D::new(100.0, 0.0);
        }
        world.update(0.1, &[]);
        let player = world.player(0).expect("player 0");
        assert_eq!(player.position, Vector2D::new(bounds.min_x, 300.0));
        assert_eq!(player.velocity(), Some(Vector2D::new(100.0, 0.0)));
    }

    #[rstest]
    fn background_can_be_swapped(mut world: World) {
        assert!(world.background().is_none());
        world.set_background(BackgroundRef::new("sky"));
        assert_eq!(world.background().map(BackgroundRef::key), Some("sky"));
        world.clear_background();
        assert!(world.background().is_none());
    }
}
