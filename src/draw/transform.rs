//! Real-world (chainage, level) to drawing-space mapping.
//!
//! Every target shares one formula:
//!
//! ```text
//! x = origin.x + k * hhs * (a - left)
//! y = origin.y + s * k * vvs * (b - datum)
//! ```
//!
//! with `k = 1` for the primary transform, `k = sc` for the section
//! transform, and `s = -1` when the target's y axis points down.

use glam::DVec2;

use super::defaults::{SCREEN_HEIGHT, SCREEN_MARGIN, SCREEN_PIXELS_PER_METRE, UNITS_PER_METRE};
use super::scale::ScaleState;
use crate::types::{Degrees, NumericError, Point2D, check_finite, check_positive, pt};

/// An interactive canvas: pixels, y down, panned and zoomed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas height in pixels; the datum sits on this line before panning
    pub height: f64,
    /// Left margin in pixels
    pub margin: f64,
    pub pan: DVec2,
    pub zoom: f64,
    /// Pixels per metre at zoom 1
    pub pixels_per_metre: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            height: SCREEN_HEIGHT,
            margin: SCREEN_MARGIN,
            pan: DVec2::ZERO,
            zoom: 1.0,
            pixels_per_metre: SCREEN_PIXELS_PER_METRE,
        }
    }
}

impl Viewport {
    pub fn new(height: f64) -> Result<Self, NumericError> {
        Ok(Viewport {
            height: check_positive(height)?,
            ..Default::default()
        })
    }

    pub fn with_zoom(self, zoom: f64) -> Result<Self, NumericError> {
        Ok(Viewport {
            zoom: check_positive(zoom)?,
            ..self
        })
    }

    pub fn with_pan(self, dx: f64, dy: f64) -> Result<Self, NumericError> {
        Ok(Viewport {
            pan: DVec2::new(check_finite(dx)?, check_finite(dy)?),
            ..self
        })
    }

    pub fn with_pixels_per_metre(self, ppm: f64) -> Result<Self, NumericError> {
        Ok(Viewport {
            pixels_per_metre: check_positive(ppm)?,
            ..self
        })
    }
}

/// Which unit system the drawing is produced in
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Target {
    /// Export units (1000 per metre), y up
    #[default]
    Absolute,
    /// Canvas pixels, y down
    Screen(Viewport),
}

impl Target {
    pub fn units_per_metre(&self) -> f64 {
        match self {
            Target::Absolute => UNITS_PER_METRE,
            Target::Screen(vp) => vp.pixels_per_metre * vp.zoom,
        }
    }

    pub fn y_inverted(&self) -> bool {
        matches!(self, Target::Screen(_))
    }

    /// Drawing-space position of `(left, datum)`
    fn origin(&self, left: f64, datum: f64) -> Point2D {
        match self {
            Target::Absolute => pt(left, datum),
            Target::Screen(vp) => pt(vp.margin + vp.pan.x, vp.height + vp.pan.y),
        }
    }
}

/// Maps real-world coordinates into drawing space for one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransformer {
    left: f64,
    datum: f64,
    hhs: f64,
    vvs: f64,
    sc: f64,
    origin: Point2D,
    y_sign: f64,
}

impl CoordinateTransformer {
    pub fn new(scale: &ScaleState, left: f64, datum: f64, target: &Target) -> Self {
        CoordinateTransformer {
            left,
            datum,
            hhs: scale.hhs,
            vvs: scale.vvs,
            sc: scale.sc,
            origin: target.origin(left, datum),
            y_sign: if target.y_inverted() { -1.0 } else { 1.0 },
        }
    }

    #[inline]
    fn x(&self, a: f64, k: f64) -> f64 {
        self.origin.x + k * self.hhs * (a - self.left)
    }

    #[inline]
    fn y(&self, b: f64, k: f64) -> f64 {
        self.origin.y + self.y_sign * k * self.vvs * (b - self.datum)
    }

    /// Primary horizontal transform
    pub fn hpos(&self, a: f64) -> f64 {
        self.x(a, 1.0)
    }

    /// Primary vertical transform
    pub fn vpos(&self, b: f64) -> f64 {
        self.y(b, 1.0)
    }

    /// Section horizontal transform (magnified by `sc`)
    pub fn h2pos(&self, a: f64) -> f64 {
        self.x(a, self.sc)
    }

    /// Section vertical transform (magnified by `sc`)
    pub fn v2pos(&self, b: f64) -> f64 {
        self.y(b, self.sc)
    }

    pub fn point(&self, a: f64, b: f64) -> Point2D {
        pt(self.hpos(a), self.vpos(b))
    }

    pub fn scaled_point(&self, a: f64, b: f64) -> Point2D {
        pt(self.h2pos(a), self.v2pos(b))
    }

    pub fn y_inverted(&self) -> bool {
        self.y_sign < 0.0
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn datum(&self) -> f64 {
        self.datum
    }

    /// Rotate a drawing-space point about `center` so the result appears
    /// turned counter-clockwise by `angle` on the finished drawing, whichever
    /// way the target's y axis points.
    pub fn rotate(&self, point: Point2D, center: Point2D, angle: Degrees) -> Point2D {
        let angle = if self.y_inverted() { -angle } else { angle };
        rotate(point, center, angle)
    }
}

/// Standard 2-D rotation of `point` about `center`
pub fn rotate(point: Point2D, center: Point2D, angle: Degrees) -> Point2D {
    if angle.raw() == 0.0 {
        return point;
    }
    let (sin, cos) = angle.to_radians().sin_cos();
    let d = point - center;
    center + DVec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}
