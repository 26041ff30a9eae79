//! Sizes and entity-centred rectangles.
//!
//! A [`Rectangle`] is always centred on its owner's anchor. Its corners are
//! derived from the width and height on every access so a resize can never
//! leave stale coordinates behind.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vector::Vector2D;

/// Width and height of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    width: f64,
    height: f64,
}

impl Dimension {
    /// Creates a dimension.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidDimension`] for negative or non-finite
    /// sizes.
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        let valid = |side: f64| side.is_finite() && side >= 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(ConfigError::InvalidDimension { width, height })
        }
    }

    /// Builds a dimension from sides the caller already knows to be finite
    /// and non-negative.
    pub(crate) const fn from_positive(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Space occupied by the dimension.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A corner point relative to the owning entity's anchor.
pub type Point = Vector2D;

/// Top-left and bottom-right corners of a [`Rectangle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Top-left corner (`-w/2`, `h/2`).
    pub tl: Point,
    /// Bottom-right corner (`w/2`, `-h/2`).
    pub br: Point,
}

/// Axis-aligned hitbox centred on its owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    bounds: Dimension,
}

impl Rectangle {
    /// Creates a rectangle from its width and height.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidDimension`] for negative or non-finite
    /// sizes.
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        Dimension::new(width, height).map(Self::from)
    }

    /// Width and height of the rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Dimension {
        self.bounds
    }

    /// Replaces the width and height.
    pub fn set_bounds(&mut self, bounds: Dimension) {
        self.bounds = bounds;
    }

    /// Corners relative to the owner's anchor.
    ///
    /// # Examples
    /// ```
    /// use duel::Rectangle;
    /// let coords = Rectangle::new(10.0, 4.0).unwrap().coordinates();
    /// assert_eq!(coords.tl.to_array(), [-5.0, 2.0]);
    /// assert_eq!(coords.br.to_array(), [5.0, -2.0]);
    /// ```
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        let half = self.half_extents();
        Coordinates {
            tl: Point::new(-half.x, half.y),
            br: Point::new(half.x, -half.y),
        }
    }

    /// Resizes the rectangle so it spans the given corners.
    ///
    /// Width and height become the absolute span on each axis; the rectangle
    /// stays centred on its owner.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidDimension`] if the span is not finite.
    pub fn set_coordinates(&mut self, coordinates: Coordinates) -> Result<(), ConfigError> {
        let Coordinates { tl, br } = coordinates;
        self.bounds = Dimension::new(tl.x.abs() + br.x.abs(), tl.y.abs() + br.y.abs())?;
        Ok(())
    }

    /// Half the width and half the height.
    #[must_use]
    pub fn half_extents(&self) -> Vector2D {
        Vector2D::new(self.bounds.width, self.bounds.height) / 2.0
    }

    /// World-space `(min, max)` corners when the owner sits at `anchor`.
    #[must_use]
    pub fn world_corners(&self, anchor: Vector2D) -> (Vector2D, Vector2D) {
        let half = self.half_extents();
        (anchor - half, anchor + half)
    }
}

impl From<Dimension> for Rectangle {
    fn from(bounds: Dimension) -> Self {
        Self { bounds }
    }
}
