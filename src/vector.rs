//! Two-dimensional vector value type.
//!
//! [`Vector2D`] carries `f64` components and follows value semantics: every
//! operator returns a fresh vector. Binary operators accept either another
//! vector or an `f64`, which is broadcast to both components. Length and
//! normalisation delegate to [`glam::DVec2`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use glam::{DVec2, Vec2};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::numeric::expect_f32;

/// A 2D vector with `f64` components. Larger `y` points up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector2D {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `value`.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Euclidean length.
    ///
    /// # Examples
    /// ```
    /// use duel::Vector2D;
    /// assert!((Vector2D::new(3.0, 4.0).magnitude() - 5.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn magnitude(self) -> f64 {
        DVec2::from(self).length()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector (and any non-finite vector) normalises to
    /// [`Vector2D::ZERO`] instead of dividing by zero.
    ///
    /// # Examples
    /// ```
    /// use duel::Vector2D;
    /// assert_eq!(Vector2D::ZERO.normalize(), Vector2D::ZERO);
    /// let n = Vector2D::new(0.0, -2.0).normalize();
    /// assert!((n.y + 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn normalize(self) -> Self {
        DVec2::from(self)
            .try_normalize()
            .map_or(Self::ZERO, Self::from)
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(a: Self, b: Self) -> f64 {
        (a - b).magnitude()
    }

    /// Angle between two vectors in radians.
    ///
    /// # Errors
    /// Returns [`DomainError::ZeroLengthVector`] when either vector has no
    /// length, since the angle is undefined.
    pub fn angle(u: Self, v: Self) -> Result<f64, DomainError> {
        let lengths = u.magnitude() * v.magnitude();
        if lengths == 0.0 || !lengths.is_finite() {
            return Err(DomainError::ZeroLengthVector);
        }
        // Rounding can push the cosine just outside [-1, 1].
        Ok((u.dot(v) / lengths).clamp(-1.0, 1.0).acos())
    }

    /// Angle between two vectors in degrees.
    ///
    /// # Errors
    /// See [`Vector2D::angle`].
    pub fn angle_deg(u: Self, v: Self) -> Result<f64, DomainError> {
        Self::angle(u, v).map(f64::to_degrees)
    }

    /// Raises each component to a floating-point power.
    #[must_use]
    pub fn powf(self, exp: f64) -> Self {
        Self::new(self.x.powf(exp), self.y.powf(exp))
    }

    /// Raises each component to an integer power.
    #[must_use]
    pub fn powi(self, exp: i32) -> Self {
        Self::new(self.x.powi(exp), self.y.powi(exp))
    }

    /// Component-wise floored division.
    #[must_use]
    pub fn floor_div<R: Into<Self>>(self, rhs: R) -> Self {
        let divisor: Self = rhs.into();
        (self / divisor).floor()
    }

    /// Rounds each component down.
    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Truncates each component toward zero.
    #[must_use]
    pub fn truncated(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }

    /// Components as an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Single-precision copy for renderers.
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(expect_f32(self.x), expect_f32(self.y))
    }

    /// Both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Orders two vectors by magnitude.
    ///
    /// `PartialEq` compares components, so magnitude ordering is kept out of
    /// `PartialOrd`. NaN magnitudes sort above every number.
    ///
    /// # Examples
    /// ```
    /// use std::cmp::Ordering;
    /// use duel::Vector2D;
    /// let short = Vector2D::new(1.0, 0.0);
    /// let long = Vector2D::new(0.0, -3.0);
    /// assert_eq!(short.cmp_magnitude(long), Ordering::Less);
    /// ```
    #[must_use]
    pub fn cmp_magnitude(self, other: Self) -> Ordering {
        OrderedFloat(self.magnitude()).cmp(&OrderedFloat(other.magnitude()))
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[x: {}, y: {}]", self.x, self.y)
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<f64> for Vector2D {
    fn from(value: f64) -> Self {
        Self::splat(value)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Implements a component-wise operator for vector and scalar operands,
/// plus the matching compound assignment.
macro_rules! componentwise_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Vector2D {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl $trait<f64> for Vector2D {
            type Output = Self;

            fn $method(self, rhs: f64) -> Self {
                Self::new(self.x $op rhs, self.y $op rhs)
            }
        }

        impl $trait<Vector2D> for f64 {
            type Output = Vector2D;

            fn $method(self, rhs: Vector2D) -> Vector2D {
                Vector2D::new(self $op rhs.x, self $op rhs.y)
            }
        }

        impl $assign_trait for Vector2D {
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }

        impl $assign_trait<f64> for Vector2D {
            fn $assign_method(&mut self, rhs: f64) {
                *self = *self $op rhs;
            }
        }
    };
}

componentwise_op!(Add, add, AddAssign, add_assign, +);
componentwise_op!(Sub, sub, SubAssign, sub_assign, -);
componentwise_op!(Mul, mul, MulAssign, mul_assign, *);
componentwise_op!(Div, div, DivAssign, div_assign, /);
