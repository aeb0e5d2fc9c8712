//! Numeric primitives shared by the parameter layer and the drawing layer.
//!
//! Real-world quantities (chainages, levels, widths) stay plain `f64` metres
//! inside the builders; everything that leaves the transformer is a
//! drawing-space [`Point2D`].

use std::fmt;
use std::ops::{Add, Neg, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Reject NaN, infinities, zero and negatives.
#[inline]
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// A point in drawing space (after the coordinate transform).
pub type Point2D = DVec2;

/// Shorthand constructor for a drawing-space point.
#[inline]
pub fn pt(x: f64, y: f64) -> Point2D {
    DVec2::new(x, y)
}

/// Angle in degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    pub const ZERO: Degrees = Degrees(0.0);

    /// Create an angle with validation (rejects NaN/infinite)
    pub fn try_new(val: f64) -> Result<Degrees, NumericError> {
        check_finite(val).map(Degrees)
    }

    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Neg for Degrees {
    type Output = Degrees;
    fn neg(self) -> Degrees {
        Degrees(-self.0)
    }
}

impl Add for Degrees {
    type Output = Degrees;
    fn add(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Degrees;
    fn sub(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 - rhs.0)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Axis-aligned bounding box in drawing space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point2D,
    pub max: Point2D,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point2D) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand to include another box
    pub fn union(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    /// Grow every side by `amount`
    pub fn inflate(&self, amount: f64) -> BBox {
        BBox {
            min: self.min - DVec2::splat(amount),
            max: self.max + DVec2::splat(amount),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2D {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
