//! Shared, read-only build context plus the element accumulator.

use glam::DVec2;

use super::abutment::{AbutmentProfile, Side};
use super::defaults::{CHAINAGE_TICK_BOTTOM, PLAN_GAP, SECTION_GAP};
use super::pier::PierGeometry;
use super::primitive::{Component, Element, Primitive, Tag, ThreePointArc, View, Weight};
use super::scale::ScaleState;
use super::transform::{CoordinateTransformer, Target};
use crate::params::ParameterSet;
use crate::types::{Degrees, Point2D, pt};

/// Horizontal run of a battered face: `rise / ratio`, vertical when the
/// ratio is zero.
pub(crate) fn batter_run(rise: f64, ratio: f64) -> f64 {
    if ratio == 0.0 { 0.0 } else { rise / ratio }
}

/// Placement values derived once and shared by every builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Left grid chainage, snapped down to a whole metre
    pub left: f64,
    pub right: f64,
    pub datum: f64,
    /// Level of the bridge centreline in the plan band
    pub plan_y: f64,
    /// Half the height reserved for plan footprints
    pub plan_half: f64,
    /// Chainage where the section view starts (primary transform)
    pub section_x: f64,
}

impl Layout {
    fn derive(params: &ParameterSet, scale: &ScaleState) -> Self {
        let left = params.value("LEFT").floor();
        let datum = params.value("DATUM");
        let right = params.value("RIGHT");

        let pier = PierGeometry::derive(params, scale);
        let deck_width = params.value("CCBR") + 2.0 * params.value("KERBW");
        let abutment_extent = [Side::Left, Side::Right]
            .into_iter()
            .map(|side| AbutmentProfile::derive(params, side).footing_length().hypot(deck_width))
            .fold(0.0, f64::max);
        let extent = pier.plan_diagonal().max(abutment_extent);
        let plan_half = 0.5 * extent;

        let plan_y = datum - scale.paper(CHAINAGE_TICK_BOTTOM) - scale.paper(PLAN_GAP) - plan_half;

        Layout {
            left,
            right,
            datum,
            plan_y,
            plan_half,
            section_x: right.max(left) + scale.paper(SECTION_GAP),
        }
    }
}

/// Everything a builder reads. Built once per generation.
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
    pub params: &'a ParameterSet,
    pub scale: ScaleState,
    pub tf: CoordinateTransformer,
    pub layout: Layout,
}

impl<'a> BuildContext<'a> {
    pub fn new(params: &'a ParameterSet, target: &Target) -> Self {
        let scale = ScaleState::derive(params, target);
        let layout = Layout::derive(params, &scale);
        let tf = CoordinateTransformer::new(&scale, layout.left, layout.datum, target);
        BuildContext {
            params,
            scale,
            tf,
            layout,
        }
    }

    /// Resolved parameter value
    pub fn v(&self, name: &str) -> f64 {
        self.params.value(name)
    }

    /// Paper millimetres in metres
    pub fn paper(&self, mm: f64) -> f64 {
        self.scale.paper(mm)
    }

    /// Paper millimetres in drawing units (text heights, nudges)
    pub fn units(&self, mm: f64) -> f64 {
        self.scale.text_height(mm)
    }

    /// Plan-band point: chainage and offset across the bridge centreline
    pub fn plan_point(&self, chainage: f64, across: f64) -> Point2D {
        self.tf.point(chainage, self.layout.plan_y + across)
    }

    /// Section-view point: offset from the section's left edge and level,
    /// drawn with the section transform and anchored at the section origin.
    pub fn section_point(&self, offset: f64, level: f64) -> Point2D {
        let sc = self.scale.sc;
        let l = self.layout;
        let a0 = l.left + (l.section_x - l.left) / sc;
        let b0 = l.datum + (l.plan_y + l.plan_half - l.datum) / sc;
        self.tf.scaled_point(a0 + offset, b0 + (level - self.v("RTL")))
    }
}

/// One shape of a plan footprint, in (chainage, offset across) metres
#[derive(Debug, Clone, PartialEq)]
pub enum PlanShape {
    Outline(Vec<DVec2>),
    Line(DVec2, DVec2),
    Arc(DVec2, DVec2, DVec2),
}

/// Plan geometry of one pier or abutment, placed later by the plan view
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub component: Component,
    pub label: String,
    /// Rotation centre, (chainage, offset across)
    pub center: DVec2,
    pub shapes: Vec<PlanShape>,
}

impl Footprint {
    pub fn new(component: Component, label: impl Into<String>, center: DVec2) -> Self {
        Footprint {
            component,
            label: label.into(),
            center,
            shapes: Vec::new(),
        }
    }

    /// Axis-aligned rectangle between two opposite corners
    pub fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.shapes.push(PlanShape::Outline(vec![
            DVec2::new(x1, y1),
            DVec2::new(x2, y1),
            DVec2::new(x2, y2),
            DVec2::new(x1, y2),
        ]));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.shapes.push(PlanShape::Line(DVec2::new(x1, y1), DVec2::new(x2, y2)));
    }

    pub fn arc(&mut self, start: DVec2, mid: DVec2, end: DVec2) {
        self.shapes.push(PlanShape::Arc(start, mid, end));
    }
}

/// Ordered element accumulator. Builders set the current tag, then add.
#[derive(Debug, Clone)]
pub struct Sketch {
    elements: Vec<Element>,
    footprints: Vec<Footprint>,
    tag: Tag,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch {
    pub fn new() -> Self {
        Sketch {
            elements: Vec::new(),
            footprints: Vec::new(),
            tag: Tag::new(Component::Axes, View::Elevation, Weight::Normal),
        }
    }

    /// Start drawing a component: elevation view, normal weight
    pub fn begin(&mut self, component: Component) {
        self.tag = Tag::new(component, View::Elevation, Weight::Normal);
    }

    pub fn view(&mut self, view: View) {
        self.tag.view = view;
    }

    pub fn weight(&mut self, weight: Weight) {
        self.tag.weight = weight;
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    fn push(&mut self, primitive: Primitive) {
        self.elements.push(Element {
            tag: self.tag,
            primitive,
        });
    }

    pub fn line(&mut self, a: Point2D, b: Point2D) {
        self.push(Primitive::Line(a, b));
    }

    pub fn polyline(&mut self, points: Vec<Point2D>, closed: bool) {
        self.push(Primitive::Polyline { points, closed });
    }

    /// Closed axis-aligned rectangle from two opposite drawing-space corners
    pub fn rect(&mut self, a: Point2D, b: Point2D) {
        self.polyline(vec![a, pt(b.x, a.y), b, pt(a.x, b.y)], true);
    }

    pub fn text(&mut self, anchor: Point2D, text: impl Into<String>, height: f64, rotation: Degrees) {
        self.push(Primitive::Text {
            anchor,
            text: text.into(),
            height,
            rotation,
        });
    }

    pub fn arc(&mut self, arc: ThreePointArc) {
        self.push(Primitive::Arc(arc));
    }

    pub fn push_footprint(&mut self, footprint: Footprint) {
        self.footprints.push(footprint);
    }

    pub fn footprints(&self) -> &[Footprint] {
        &self.footprints
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batter_run_handles_zero_ratio() {
        assert_eq!(batter_run(8.0, 4.0), 2.0);
        assert_eq!(batter_run(8.0, 0.0), 0.0);
    }

    #[test]
    fn left_is_snapped_down() {
        let params = ParameterSet::from_pairs([("LEFT", -3.7)]).unwrap();
        let ctx = BuildContext::new(&params, &Target::Absolute);
        assert_eq!(ctx.layout.left, -4.0);
        assert_eq!(ctx.tf.left(), -4.0);
    }

    #[test]
    fn plan_band_sits_below_the_chainage_band() {
        let params = ParameterSet::new();
        let ctx = BuildContext::new(&params, &Target::Absolute);
        let band_bottom = ctx.layout.datum - ctx.paper(CHAINAGE_TICK_BOTTOM);
        assert!(ctx.layout.plan_y + ctx.layout.plan_half < band_bottom);
        assert!(ctx.layout.plan_half > 6.0, "must fit the 12 m footing");
    }

    #[test]
    fn section_starts_right_of_the_grid() {
        let params = ParameterSet::new();
        let ctx = BuildContext::new(&params, &Target::Absolute);
        let p = ctx.section_point(0.0, ctx.v("RTL"));
        assert!(p.x > ctx.tf.hpos(ctx.layout.right));
        assert!((p.x - ctx.tf.hpos(ctx.layout.section_x)).abs() < 1e-6);
    }

    #[test]
    fn sketch_tags_follow_the_current_state() {
        let mut s = Sketch::new();
        s.begin(Component::Pier);
        s.line(pt(0.0, 0.0), pt(1.0, 0.0));
        s.view(View::Plan);
        s.weight(Weight::Heavy);
        s.rect(pt(0.0, 0.0), pt(2.0, 1.0));

        let e = s.elements();
        assert_eq!(e[0].tag, Tag::new(Component::Pier, View::Elevation, Weight::Normal));
        assert_eq!(e[1].tag, Tag::new(Component::Pier, View::Plan, Weight::Heavy));
        assert_eq!(
            e[1].primitive,
            Primitive::Polyline {
                points: vec![pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 1.0), pt(0.0, 1.0)],
                closed: true
            }
        );
    }
}
