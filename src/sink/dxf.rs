//! DXF output: one layer per component, native LINE / LWPOLYLINE / TEXT /
//! ARC entities.

use std::convert::Infallible;
use std::io::Write;
use std::path::Path;

use dxf::entities::{Arc, Entity, EntityType, Line, LwPolyline, Text};
use dxf::enums::{AcadVersion, Units};
use dxf::tables::Layer;
use dxf::{LwPolylineVertex, Point};

use super::DrawingSink;
use crate::draw::{Component, Drawing, Tag, Target, ThreePointArc};
use crate::errors::SinkError;
use crate::log::debug;
use crate::types::{Degrees, Point2D};

pub struct DxfSink {
    drawing: dxf::Drawing,
    /// Screen drawings have y down; DXF is always y up.
    flip: bool,
}

impl Default for DxfSink {
    fn default() -> Self {
        Self::new(&Target::Absolute)
    }
}

impl DxfSink {
    pub fn new(target: &Target) -> Self {
        let mut drawing = dxf::Drawing::new();
        drawing.header.version = AcadVersion::R2000;
        if matches!(target, Target::Absolute) {
            drawing.header.default_drawing_units = Units::Millimeters;
        }
        for component in Component::ALL {
            let mut layer = Layer::default();
            layer.name = component.layer_name().to_string();
            drawing.add_layer(layer);
        }
        DxfSink {
            drawing,
            flip: target.y_inverted(),
        }
    }

    pub fn for_drawing(drawing: &Drawing) -> Self {
        Self::new(&drawing.target())
    }

    fn point(&self, p: Point2D) -> Point {
        let y = if self.flip { -p.y } else { p.y };
        Point::new(p.x, y, 0.0)
    }

    fn add(&mut self, tag: Tag, specific: EntityType) -> Result<(), Infallible> {
        let mut entity = Entity::new(specific);
        entity.common.layer = tag.component.layer_name().to_string();
        self.drawing.add_entity(entity);
        Ok(())
    }

    /// The underlying document, e.g. for extra header settings
    pub fn drawing(&self) -> &dxf::Drawing {
        &self.drawing
    }

    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), SinkError> {
        self.drawing.save(writer)?;
        Ok(())
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), SinkError> {
        let path = path.as_ref();
        debug!("writing {} entities to {}", self.drawing.entities().count(), path.display());
        self.drawing.save_file(path)?;
        Ok(())
    }
}

impl DrawingSink for DxfSink {
    type Error = Infallible;

    fn add_line(&mut self, tag: Tag, a: Point2D, b: Point2D) -> Result<(), Infallible> {
        let line = Line::new(self.point(a), self.point(b));
        self.add(tag, EntityType::Line(line))
    }

    fn add_polyline(&mut self, tag: Tag, points: &[Point2D], closed: bool) -> Result<(), Infallible> {
        let mut poly = LwPolyline::default();
        poly.set_is_closed(closed);
        poly.vertices = points
            .iter()
            .map(|p| {
                let p = self.point(*p);
                let mut v = LwPolylineVertex::default();
                v.x = p.x;
                v.y = p.y;
                v
            })
            .collect();
        self.add(tag, EntityType::LwPolyline(poly))
    }

    fn add_text(
        &mut self,
        tag: Tag,
        anchor: Point2D,
        text: &str,
        height: f64,
        rotation: Degrees,
    ) -> Result<(), Infallible> {
        let mut t = Text::default();
        t.location = self.point(anchor);
        t.value = text.to_string();
        t.text_height = height;
        t.rotation = rotation.raw();
        self.add(tag, EntityType::Text(t))
    }

    fn add_arc(&mut self, tag: Tag, arc: &ThreePointArc) -> Result<(), Infallible> {
        let flip = self.flip;
        let mapped = arc.map(|p| if flip { Point2D::new(p.x, -p.y) } else { p });
        let Some(g) = mapped.geometry() else {
            return self.add_line(tag, arc.start, arc.end);
        };
        // DXF arcs always run counter-clockwise from start to end
        let from = g.start_angle.to_degrees();
        let to = (g.start_angle + g.sweep).to_degrees();
        let (start, end) = if g.sweep > 0.0 { (from, to) } else { (to, from) };
        let center = Point::new(g.center.x, g.center.y, 0.0);
        let entity = Arc::new(center, g.radius, start.rem_euclid(360.0), end.rem_euclid(360.0));
        self.add(tag, EntityType::Arc(entity))
    }
}
