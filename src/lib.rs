//! Physics and gameplay core for a two-player side-on platform duel.
//!
//! The crate owns the simulation only: vectors, hitboxes, an impulse-style
//! integrator, the player damage model and the per-frame [`World`] update.
//! Rendering, audio and input decoding belong to the host, which feeds
//! [`Intent`]s and a frame time into [`World::update`] and reads positions
//! and health back out.
//!
//! ```
//! use duel::{Direction, Intent, PlayerStats, Vector2D, World, WorldConfig};
//!
//! let config = WorldConfig::default();
//! let mut world = World::new(config, "arena", vec![Vector2D::new(400.0, 600.0)]).unwrap();
//! world.spawn_players(&[PlayerStats::default()]).unwrap();
//! world.update(1.0 / 60.0, &[Intent { player: 0, direction: Direction::Right }]);
//! assert!(world.player(0).unwrap().position.x > 400.0);
//! ```
pub mod collision;
pub mod config;
pub mod constants;
pub mod damage_inbox;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod numeric;
pub mod physics;
pub mod player;
pub mod vector;
pub mod world;
pub use constants::*;

pub use collision::Collider;
pub use config::{Resolution, WorldConfig, WorldSettings};
pub use damage_inbox::{DamageEvent, DamageInbox};
pub use entity::{Entity, EntityId, EntityKind};
pub use error::{ConfigError, DomainError};
pub use geometry::{Coordinates, Dimension, Point, Rectangle};
pub use logging::init as init_logging;
pub use physics::Body;
pub use player::{Bounds, Direction, HealthReadout, PlayerState, PlayerStats};
pub use vector::Vector2D;
pub use world::{BackgroundRef, Intent, World};

pub mod prelude {
    //! Prelude exports used by hosts and documentation examples.
    //!
    //! ```rust,no_run
    //! use duel::prelude::*;
    //! ```

    pub use crate::{
        Body, Collider, Direction, Entity, EntityId, Intent, PlayerStats, Rectangle, Vector2D,
        World, WorldConfig,
    };
}
