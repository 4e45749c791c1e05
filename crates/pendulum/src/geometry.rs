//! Planar points and vectors for bob placement.
//!
//! The coordinate plane has y increasing upward, so the fixed "down"
//! direction is `(0, -1)` and gravity pulls toward negative y.
//!
//! # Example
//!
//! ```rust
//! use pendulum::{Point, DOWN};
//!
//! let pivot = Point::new(0.0, 2.0);
//! let bob = pivot + DOWN.rotated(0.0) * 2.5;
//! assert_eq!(bob, Point::new(0.0, -0.5));
//! ```

use core::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point in the plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin point (0, 0).
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).magnitude()
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vector) -> Point {
        Point {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Point) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// A displacement in the plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

/// Unit vector pointing straight down.
pub const DOWN: Vector = Vector { x: 0.0, y: -1.0 };

impl Vector {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotates the vector counter-clockwise by `angle` radians.
    ///
    /// Rotating [`DOWN`] by θ gives `(sin θ, -cos θ)`, the direction of an
    /// arm at angle θ from the downward vertical.
    ///
    /// ```rust
    /// use pendulum::DOWN;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let side = DOWN.rotated(FRAC_PI_2);
    /// assert!((side.x - 1.0).abs() < 1e-12);
    /// assert!(side.y.abs() < 1e-12);
    /// ```
    #[inline]
    pub fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, scalar: f64) -> Vector {
        Vector {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

/// Direction of an arm hanging at `angle` from the downward vertical.
#[inline]
pub(crate) fn arm(angle: f64, length: f64) -> Vector {
    DOWN.rotated(angle) * length
}
