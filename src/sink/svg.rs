//! SVG output.
//!
//! Drawing units map one-to-one onto SVG user units; the document's `width`
//! and `height` are in millimetres so the sheet prints at the drawing scale.
//! Absolute drawings have y up and are flipped into SVG's y-down space.

use std::convert::Infallible;
use std::path::Path;

use svg::Document;
use svg::Node;
use svg::node::element::{Line, Path as ArcPath, Polygon, Polyline, Text};

use super::DrawingSink;
use crate::draw::{Drawing, Tag, ThreePointArc, Weight};
use crate::errors::SinkError;
use crate::types::{BBox, Degrees, Point2D, check_finite, check_positive, pt};

/// SVG styling, in paper millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub thin: f64,
    pub normal: f64,
    pub heavy: f64,
    /// Blank border around the drawing bounds
    pub margin: f64,
    pub font_family: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            thin: 0.18,
            normal: 0.35,
            heavy: 0.7,
            margin: 10.0,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl SvgOptions {
    fn stroke(&self, weight: Weight) -> f64 {
        match weight {
            Weight::Thin => self.thin,
            Weight::Normal => self.normal,
            Weight::Heavy => self.heavy,
        }
    }

    fn validate(&self) -> Result<(), SinkError> {
        let positive = |name: &'static str, v: f64| {
            check_positive(v)
                .map(|_| ())
                .map_err(|source| SinkError::InvalidOption { name, source })
        };
        positive("thin", self.thin)?;
        positive("normal", self.normal)?;
        positive("heavy", self.heavy)?;
        check_finite(self.margin).map_err(|source| SinkError::InvalidOption {
            name: "margin",
            source,
        })?;
        Ok(())
    }
}

pub struct SvgSink {
    options: SvgOptions,
    units_per_mm: f64,
    min: Point2D,
    max: Point2D,
    margin: f64,
    flip: bool,
    nodes: Vec<Box<dyn Node>>,
}

impl SvgSink {
    /// Sink framed on a generated drawing, default styling
    pub fn for_drawing(drawing: &Drawing) -> Self {
        let options = SvgOptions::default();
        let units = drawing.units_per_paper_mm();
        Self::framed(drawing.bounds(), !drawing.target().y_inverted(), units, options)
    }

    pub fn with_options(drawing: &Drawing, options: SvgOptions) -> Result<Self, SinkError> {
        options.validate()?;
        let units = drawing.units_per_paper_mm();
        Ok(Self::framed(drawing.bounds(), !drawing.target().y_inverted(), units, options))
    }

    /// Sink framed on `bounds`. `y_up` drawings are flipped.
    pub fn framed(bounds: BBox, y_up: bool, units_per_mm: f64, options: SvgOptions) -> Self {
        let (min, max) = if bounds.is_empty() {
            (pt(0.0, 0.0), pt(0.0, 0.0))
        } else {
            (bounds.min, bounds.max)
        };
        SvgSink {
            margin: options.margin * units_per_mm,
            options,
            units_per_mm,
            min,
            max,
            flip: y_up,
            nodes: Vec::new(),
        }
    }

    fn map(&self, p: Point2D) -> Point2D {
        let x = p.x - self.min.x + self.margin;
        let y = if self.flip {
            self.max.y - p.y + self.margin
        } else {
            p.y - self.min.y + self.margin
        };
        pt(x, y)
    }

    fn stroke_width(&self, tag: Tag) -> String {
        fmt_num(self.options.stroke(tag.weight) * self.units_per_mm)
    }

    fn push(&mut self, node: impl Node + 'static) -> Result<(), Infallible> {
        self.nodes.push(Box::new(node));
        Ok(())
    }

    fn points(&self, points: &[Point2D]) -> String {
        points
            .iter()
            .map(|p| {
                let p = self.map(*p);
                format!("{},{}", fmt_num(p.x), fmt_num(p.y))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn document(self) -> Document {
        let width = self.max.x - self.min.x + 2.0 * self.margin;
        let height = self.max.y - self.min.y + 2.0 * self.margin;
        let mut doc = Document::new()
            .set("width", format!("{}mm", fmt_num(width / self.units_per_mm)))
            .set("height", format!("{}mm", fmt_num(height / self.units_per_mm)))
            .set("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)))
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round");
        for node in self.nodes {
            doc = doc.add(node);
        }
        doc
    }

    pub fn finish(self) -> String {
        self.document().to_string()
    }

    pub fn save(self, path: impl AsRef<Path>) -> Result<(), SinkError> {
        svg::save(path, &self.document())?;
        Ok(())
    }
}

impl DrawingSink for SvgSink {
    type Error = Infallible;

    fn add_line(&mut self, tag: Tag, a: Point2D, b: Point2D) -> Result<(), Infallible> {
        let (a, b) = (self.map(a), self.map(b));
        let node = Line::new()
            .set("class", tag.component.layer_name())
            .set("x1", fmt_num(a.x))
            .set("y1", fmt_num(a.y))
            .set("x2", fmt_num(b.x))
            .set("y2", fmt_num(b.y))
            .set("stroke-width", self.stroke_width(tag));
        self.push(node)
    }

    fn add_polyline(&mut self, tag: Tag, points: &[Point2D], closed: bool) -> Result<(), Infallible> {
        let coords = self.points(points);
        let width = self.stroke_width(tag);
        let class = tag.component.layer_name();
        if closed {
            self.push(Polygon::new().set("class", class).set("points", coords).set("stroke-width", width))
        } else {
            self.push(Polyline::new().set("class", class).set("points", coords).set("stroke-width", width))
        }
    }

    fn add_text(
        &mut self,
        tag: Tag,
        anchor: Point2D,
        text: &str,
        height: f64,
        rotation: Degrees,
    ) -> Result<(), Infallible> {
        let a = self.map(anchor);
        let (x, y) = (fmt_num(a.x), fmt_num(a.y));
        let mut node = Text::new(text)
            .set("class", tag.component.layer_name())
            .set("x", x.clone())
            .set("y", y.clone())
            .set("font-size", fmt_num(height))
            .set("font-family", self.options.font_family.clone())
            .set("fill", "black")
            .set("stroke", "none");
        // SVG angles run clockwise on screen
        if rotation.raw() != 0.0 {
            node = node.set("transform", format!("rotate({} {x} {y})", fmt_num(-rotation.raw())));
        }
        self.push(node)
    }

    fn add_arc(&mut self, tag: Tag, arc: &ThreePointArc) -> Result<(), Infallible> {
        let mapped = arc.map(|p| self.map(p));
        let Some(g) = mapped.geometry() else {
            return self.add_line(tag, arc.start, arc.end);
        };
        let large = u8::from(g.sweep.abs() > std::f64::consts::PI);
        let sweep = u8::from(g.sweep > 0.0);
        let r = fmt_num(g.radius);
        let d = format!(
            "M {} {} A {r} {r} 0 {large} {sweep} {} {}",
            fmt_num(mapped.start.x),
            fmt_num(mapped.start.y),
            fmt_num(mapped.end.x),
            fmt_num(mapped.end.y),
        );
        let node = ArcPath::new()
            .set("class", tag.component.layer_name())
            .set("d", d)
            .set("stroke-width", self.stroke_width(tag));
        self.push(node)
    }
}

/// Six significant figures, trailing zeros trimmed
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(5 - magnitude);
    let rounded = (value * scale).round() / scale;
    let decimals = (5 - magnitude).max(0) as usize;
    let s = format!("{rounded:.decimals$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Component, View};
    use crate::{ParameterSet, generate};

    fn tag(weight: Weight) -> Tag {
        Tag::new(Component::Axes, View::Elevation, weight)
    }

    fn sink(y_up: bool) -> SvgSink {
        let mut bounds = BBox::new();
        bounds.expand_point(pt(0.0, 0.0));
        bounds.expand_point(pt(100.0, 50.0));
        let options = SvgOptions {
            margin: 0.0,
            ..SvgOptions::default()
        };
        SvgSink::framed(bounds, y_up, 1.0, options)
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(12000.0), "12000");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(-0.000_000_1), "-0.0000001");
        assert_eq!(fmt_num(2.0 / 3.0), "0.666667");
        assert_eq!(fmt_num(123_456_789.0), "123457000");
    }

    #[test]
    fn absolute_geometry_is_flipped() {
        let mut s = sink(true);
        s.add_line(tag(Weight::Heavy), pt(0.0, 0.0), pt(100.0, 50.0)).unwrap();
        let out = s.finish();
        assert!(out.contains(r#"y1="50""#), "{out}");
        assert!(out.contains(r#"y2="0""#), "{out}");
        assert!(out.contains(r#"stroke-width="0.7""#), "{out}");
    }

    #[test]
    fn screen_geometry_is_not_flipped() {
        let mut s = sink(false);
        s.add_line(tag(Weight::Thin), pt(0.0, 0.0), pt(100.0, 50.0)).unwrap();
        let out = s.finish();
        assert!(out.contains(r#"y1="0""#), "{out}");
        assert!(out.contains(r#"y2="50""#), "{out}");
    }

    #[test]
    fn rotated_text_turns_counter_clockwise_on_the_page() {
        let mut s = sink(true);
        s.add_text(tag(Weight::Normal), pt(10.0, 10.0), "12.000", 2.0, Degrees(90.0))
            .unwrap();
        let out = s.finish();
        assert!(out.contains("rotate(-90 10 40)"), "{out}");
        assert!(out.contains("12.000"), "{out}");
    }

    #[test]
    fn whole_drawing_has_native_arcs() {
        let drawing = generate(&ParameterSet::new());
        let mut s = SvgSink::for_drawing(&drawing);
        let Ok(()) = drawing.emit(&mut s);
        let out = s.finish();
        assert!(out.starts_with("<svg"));
        assert!(out.contains("GENERAL ARRANGEMENT DRAWING"));
        // four cutwater arcs per pier
        assert_eq!(out.matches("<path").count(), 8);
    }

    #[test]
    fn bad_options_are_rejected() {
        let drawing = generate(&ParameterSet::new());
        let options = SvgOptions {
            heavy: 0.0,
            ..SvgOptions::default()
        };
        let err = SvgSink::with_options(&drawing, options).err().unwrap();
        assert!(matches!(err, SinkError::InvalidOption { name: "heavy", .. }));
    }
}
