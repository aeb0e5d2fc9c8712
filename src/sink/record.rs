//! In-memory sink: keeps the raw primitives, arcs included.

use std::convert::Infallible;

use super::DrawingSink;
use crate::draw::{Element, Primitive, Tag, ThreePointArc};
use crate::types::{Degrees, Point2D};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    elements: Vec<Element>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    fn push(&mut self, tag: Tag, primitive: Primitive) -> Result<(), Infallible> {
        self.elements.push(Element { tag, primitive });
        Ok(())
    }
}

impl DrawingSink for RecordingSink {
    type Error = Infallible;

    fn add_line(&mut self, tag: Tag, a: Point2D, b: Point2D) -> Result<(), Infallible> {
        self.push(tag, Primitive::Line(a, b))
    }

    fn add_polyline(&mut self, tag: Tag, points: &[Point2D], closed: bool) -> Result<(), Infallible> {
        self.push(
            tag,
            Primitive::Polyline {
                points: points.to_vec(),
                closed,
            },
        )
    }

    fn add_text(
        &mut self,
        tag: Tag,
        anchor: Point2D,
        text: &str,
        height: f64,
        rotation: Degrees,
    ) -> Result<(), Infallible> {
        self.push(
            tag,
            Primitive::Text {
                anchor,
                text: text.to_string(),
                height,
                rotation,
            },
        )
    }

    fn add_arc(&mut self, tag: Tag, arc: &ThreePointArc) -> Result<(), Infallible> {
        self.push(tag, Primitive::Arc(*arc))
    }
}
