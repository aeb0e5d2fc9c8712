//! Output adapters. Generation produces one ordered [`Drawing`]; any number
//! of sinks can consume it without re-running the geometry.

pub mod dxf;
pub mod record;
pub mod svg;

pub use self::dxf::DxfSink;
pub use self::record::RecordingSink;
pub use self::svg::{SvgOptions, SvgSink};

use crate::draw::defaults::ARC_SEGMENTS;
use crate::draw::{Drawing, Primitive, Tag, ThreePointArc};
use crate::types::{Degrees, Point2D};

/// Receiver of drawing primitives.
///
/// Elements arrive in generation order, so layering is the same whichever
/// sink is used. Errors are the sink's own; [`Drawing::emit`] stops at the
/// first one and hands it back unchanged.
pub trait DrawingSink {
    type Error;

    fn add_line(&mut self, tag: Tag, a: Point2D, b: Point2D) -> Result<(), Self::Error>;

    fn add_polyline(&mut self, tag: Tag, points: &[Point2D], closed: bool) -> Result<(), Self::Error>;

    /// `anchor` is the left end of the baseline; `rotation` is
    /// counter-clockwise as seen on the finished drawing.
    fn add_text(
        &mut self,
        tag: Tag,
        anchor: Point2D,
        text: &str,
        height: f64,
        rotation: Degrees,
    ) -> Result<(), Self::Error>;

    /// Sinks without native arcs get a flattened polyline.
    fn add_arc(&mut self, tag: Tag, arc: &ThreePointArc) -> Result<(), Self::Error> {
        self.add_polyline(tag, &arc.flatten(ARC_SEGMENTS), false)
    }
}

impl Drawing {
    /// Push every element into `sink`, in order.
    pub fn emit<S: DrawingSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        for e in self.elements() {
            match &e.primitive {
                Primitive::Line(a, b) => sink.add_line(e.tag, *a, *b)?,
                Primitive::Polyline { points, closed } => sink.add_polyline(e.tag, points, *closed)?,
                Primitive::Text {
                    anchor,
                    text,
                    height,
                    rotation,
                } => sink.add_text(e.tag, *anchor, text, *height, *rotation)?,
                Primitive::Arc(arc) => sink.add_arc(e.tag, arc)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Component, View, Weight};
    use crate::types::pt;

    /// Counts calls and fails on the n-th
    struct Failing {
        calls: usize,
        fail_at: usize,
    }

    impl Failing {
        fn tick(&mut self) -> Result<(), String> {
            self.calls += 1;
            if self.calls == self.fail_at {
                Err(format!("sink full at {}", self.calls))
            } else {
                Ok(())
            }
        }
    }

    impl DrawingSink for Failing {
        type Error = String;

        fn add_line(&mut self, _: Tag, _: Point2D, _: Point2D) -> Result<(), String> {
            self.tick()
        }

        fn add_polyline(&mut self, _: Tag, _: &[Point2D], _: bool) -> Result<(), String> {
            self.tick()
        }

        fn add_text(&mut self, _: Tag, _: Point2D, _: &str, _: f64, _: Degrees) -> Result<(), String> {
            self.tick()
        }
    }

    #[test]
    fn sink_errors_pass_through_unchanged() {
        let drawing = crate::generate(&crate::ParameterSet::new());
        let mut sink = Failing { calls: 0, fail_at: 5 };
        assert_eq!(drawing.emit(&mut sink), Err("sink full at 5".to_string()));
        assert_eq!(sink.calls, 5);
    }

    #[test]
    fn default_arc_is_flattened() {
        let mut sink = RecordingSink::new();
        let tag = Tag::new(Component::Pier, View::Plan, Weight::Normal);
        let arc = ThreePointArc::new(pt(-1.0, 0.0), pt(0.0, 1.0), pt(1.0, 0.0));
        DrawingSink::add_arc(&mut Flattening(&mut sink), tag, &arc).unwrap();
        let Primitive::Polyline { points, closed } = &sink.elements()[0].primitive else {
            panic!("expected a polyline");
        };
        assert!(!closed);
        assert_eq!(points.len(), ARC_SEGMENTS + 1);
        assert!(points.iter().all(|p| (p.length() - 1.0).abs() < 1e-9));
    }

    /// Forwards everything except arcs, so the trait default kicks in
    struct Flattening<'a>(&'a mut RecordingSink);

    impl DrawingSink for Flattening<'_> {
        type Error = std::convert::Infallible;

        fn add_line(&mut self, tag: Tag, a: Point2D, b: Point2D) -> Result<(), Self::Error> {
            self.0.add_line(tag, a, b)
        }

        fn add_polyline(&mut self, tag: Tag, points: &[Point2D], closed: bool) -> Result<(), Self::Error> {
            self.0.add_polyline(tag, points, closed)
        }

        fn add_text(
            &mut self,
            tag: Tag,
            anchor: Point2D,
            text: &str,
            height: f64,
            rotation: Degrees,
        ) -> Result<(), Self::Error> {
            self.0.add_text(tag, anchor, text, height, rotation)
        }
    }
}
