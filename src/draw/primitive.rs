//! Backend-independent drawing primitives.

use std::f64::consts::TAU;

use crate::types::{BBox, Degrees, Point2D};

/// Relative pen weight hint. Sinks are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weight {
    Thin,
    #[default]
    Normal,
    Heavy,
}

/// Which semantic part of the bridge an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Axes,
    CrossSection,
    Superstructure,
    Pier,
    Abutment,
    Deck,
    Annotation,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::Axes,
        Component::CrossSection,
        Component::Superstructure,
        Component::Pier,
        Component::Abutment,
        Component::Deck,
        Component::Annotation,
    ];

    /// CAD layer name
    pub fn layer_name(self) -> &'static str {
        match self {
            Component::Axes => "AXES",
            Component::CrossSection => "CROSS_SECTION",
            Component::Superstructure => "SUPERSTRUCTURE",
            Component::Pier => "PIER",
            Component::Abutment => "ABUTMENT",
            Component::Deck => "DECK",
            Component::Annotation => "ANNOTATION",
        }
    }
}

/// Which view of the drawing an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Elevation,
    Plan,
    Section,
}

/// Circular arc through three points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePointArc {
    pub start: Point2D,
    pub mid: Point2D,
    pub end: Point2D,
}

/// Circle through an arc's points plus its angular extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point2D,
    pub radius: f64,
    /// Angle of `start` about `center`, radians
    pub start_angle: f64,
    /// Signed sweep from `start` through `mid` to `end`, radians
    pub sweep: f64,
}

impl ThreePointArc {
    pub fn new(start: Point2D, mid: Point2D, end: Point2D) -> Self {
        Self { start, mid, end }
    }

    pub fn map(&self, f: impl Fn(Point2D) -> Point2D) -> Self {
        Self::new(f(self.start), f(self.mid), f(self.end))
    }

    /// Circumscribed circle, or `None` when the points are collinear
    pub fn geometry(&self) -> Option<ArcGeometry> {
        let (a, b, c) = (self.start, self.mid, self.end);
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        let scale = (b - a).length_squared().max((c - a).length_squared());
        if d.abs() <= 1e-12 * scale || !d.is_finite() {
            return None;
        }
        let (a2, b2, c2) = (a.length_squared(), b.length_squared(), c.length_squared());
        let center = Point2D::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        let angle = |p: Point2D| (p.y - center.y).atan2(p.x - center.x);
        let start_angle = angle(a);
        let ccw = |p: Point2D| (angle(p) - start_angle).rem_euclid(TAU);
        let to_end = ccw(c);
        let sweep = if ccw(b) <= to_end { to_end } else { to_end - TAU };
        Some(ArcGeometry {
            center,
            radius: center.distance(a),
            start_angle,
            sweep,
        })
    }

    /// Approximate by `segments` chords. Collinear points give one chord.
    pub fn flatten(&self, segments: usize) -> Vec<Point2D> {
        let Some(g) = self.geometry() else {
            return vec![self.start, self.end];
        };
        let segments = segments.max(2);
        let mut points = Vec::with_capacity(segments + 1);
        points.push(self.start);
        for i in 1..segments {
            let t = g.start_angle + g.sweep * i as f64 / segments as f64;
            points.push(g.center + g.radius * Point2D::new(t.cos(), t.sin()));
        }
        points.push(self.end);
        points
    }
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(Point2D, Point2D),
    Polyline {
        points: Vec<Point2D>,
        closed: bool,
    },
    Text {
        /// Left end of the text baseline
        anchor: Point2D,
        text: String,
        /// Height in drawing units
        height: f64,
        /// Counter-clockwise as seen on the finished drawing
        rotation: Degrees,
    },
    Arc(ThreePointArc),
}

impl Primitive {
    /// The defining points (text contributes its anchor only)
    pub fn points(&self) -> Vec<Point2D> {
        match self {
            Primitive::Line(a, b) => vec![*a, *b],
            Primitive::Polyline { points, .. } => points.clone(),
            Primitive::Text { anchor, .. } => vec![*anchor],
            Primitive::Arc(arc) => vec![arc.start, arc.mid, arc.end],
        }
    }

    pub fn is_finite(&self) -> bool {
        let height_ok = match self {
            Primitive::Text { height, rotation, .. } => height.is_finite() && rotation.raw().is_finite(),
            _ => true,
        };
        height_ok && self.points().iter().all(|p| p.is_finite())
    }

    pub fn bbox(&self) -> BBox {
        let mut bb = BBox::new();
        for p in self.points() {
            bb.expand_point(p);
        }
        bb
    }
}

/// Where a primitive belongs and how heavily it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub component: Component,
    pub view: View,
    pub weight: Weight,
}

impl Tag {
    pub fn new(component: Component, view: View, weight: Weight) -> Self {
        Self {
            component,
            view,
            weight,
        }
    }
}

/// A tagged primitive
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub primitive: Primitive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    #[test]
    fn semicircle_geometry() {
        let arc = ThreePointArc::new(pt(-1.0, 0.0), pt(0.0, 1.0), pt(1.0, 0.0));
        let g = arc.geometry().unwrap();
        assert!((g.center - pt(0.0, 0.0)).length() < 1e-12);
        assert!((g.radius - 1.0).abs() < 1e-12);
        // from the left point over the top to the right point is clockwise
        assert!((g.sweep + std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn flatten_stays_on_circle() {
        let arc = ThreePointArc::new(pt(2.0, 0.0), pt(0.0, 2.0), pt(-2.0, 0.0));
        let pts = arc.flatten(8);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], arc.start);
        assert_eq!(pts[8], arc.end);
        for p in &pts {
            assert!((p.length() - 2.0).abs() < 1e-9);
            assert!(p.y >= -1e-9, "arc must pass through the mid point side");
        }
    }

    #[test]
    fn collinear_arc_is_a_chord() {
        let arc = ThreePointArc::new(pt(0.0, 0.0), pt(1.0, 0.0), pt(3.0, 0.0));
        assert!(arc.geometry().is_none());
        assert_eq!(arc.flatten(16), vec![pt(0.0, 0.0), pt(3.0, 0.0)]);
    }

    #[test]
    fn primitive_finiteness() {
        assert!(Primitive::Line(pt(0.0, 0.0), pt(1.0, 1.0)).is_finite());
        assert!(!Primitive::Line(pt(0.0, f64::NAN), pt(1.0, 1.0)).is_finite());
        let text = Primitive::Text {
            anchor: pt(0.0, 0.0),
            text: "x".into(),
            height: f64::INFINITY,
            rotation: Degrees::ZERO,
        };
        assert!(!text.is_finite());
    }

    #[test]
    fn layer_names_are_unique() {
        let mut names: Vec<_> = Component::ALL.iter().map(|c| c.layer_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Component::ALL.len());
    }
}
