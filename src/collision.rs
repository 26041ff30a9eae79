//! Axis-aligned overlap testing between collidable entities.

use serde::{Deserialize, Serialize};

use crate::geometry::Rectangle;
use crate::vector::Vector2D;

/// Collision component: an optional hitbox plus an opt-in flag.
///
/// Decorative entities carry no hitbox or switch `does_collide` off and are
/// never reported as colliding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Hitbox centred on the entity anchor.
    pub hitbox: Option<Rectangle>,
    /// Whether the entity takes part in collision tests.
    pub does_collide: bool,
}

impl Collider {
    /// A collider that participates with the given hitbox.
    #[must_use]
    pub const fn solid(hitbox: Rectangle) -> Self {
        Self {
            hitbox: Some(hitbox),
            does_collide: true,
        }
    }

    /// A collider that never collides.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            hitbox: None,
            does_collide: false,
        }
    }

    /// Hitbox used in collision tests, if this collider participates.
    #[must_use]
    pub const fn active_hitbox(&self) -> Option<&Rectangle> {
        if self.does_collide {
            self.hitbox.as_ref()
        } else {
            None
        }
    }
}

/// Tests whether two colliders overlap when placed at their anchors.
///
/// Touching edges do not count as overlap. The test treats both sides
/// identically, so swapping the arguments never changes the answer.
///
/// # Examples
/// ```
/// use duel::{collision::{overlaps, Collider}, Rectangle, Vector2D};
/// let hitbox = Collider::solid(Rectangle::new(10.0, 10.0).unwrap());
/// assert!(overlaps(Vector2D::ZERO, &hitbox, Vector2D::new(5.0, 0.0), &hitbox));
/// assert!(!overlaps(Vector2D::ZERO, &hitbox, Vector2D::new(20.0, 0.0), &hitbox));
/// ```
#[must_use]
pub fn overlaps(a_pos: Vector2D, a: &Collider, b_pos: Vector2D, b: &Collider) -> bool {
    let (Some(a_box), Some(b_box)) = (a.active_hitbox(), b.active_hitbox()) else {
        return false;
    };
    let (a_min, a_max) = a_box.world_corners(a_pos);
    let (b_min, b_max) = b_box.world_corners(b_pos);

    let separated_x = a_min.x >= b_max.x || b_min.x >= a_max.x;
    let separated_y = a_min.y >= b_max.y || b_min.y >= a_max.y;
    !(separated_x || separated_y)
}
