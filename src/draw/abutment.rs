//! Abutments: the fourteen-point elevation profile and the plan footprint.
//!
//! The profile is derived once as offsets from the abutment face, positive
//! towards the span. The left abutment places those offsets as-is at `ABTL`;
//! the right one negates them at `ABTL + NSPAN * SPAN1`, so both sides always
//! share one formula set.

use glam::DVec2;

use super::GeometryBuilder;
use super::context::{BuildContext, Footprint, Sketch, batter_run};
use super::defaults::{CAPTION_HEIGHT, PIER_LABEL_DROP, PIER_LABEL_SHIFT};
use super::primitive::{Component, Weight};
use crate::params::ParameterSet;
use crate::types::Degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbutmentPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction from the face towards the span
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Side::Left => "AL",
            Side::Right => "AR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "A1",
            Side::Right => "A2",
        }
    }

    /// Chainage of this abutment's face
    pub fn face_chainage(self, params: &ParameterSet) -> f64 {
        let abtl = params.value("ABTL");
        match self {
            Side::Left => abtl,
            Side::Right => abtl + params.spans() as f64 * params.value("SPAN1"),
        }
    }
}

/// One side's abutment parameters (`AL*` or `AR*`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbutmentParams {
    pub cap_width: f64,
    pub cap_depth: f64,
    pub front_batter: f64,
    pub front_batter_level: f64,
    pub toe_batter: f64,
    pub toe_batter_level: f64,
    pub footing_offset: f64,
    pub footing_depth: f64,
    pub back_batter: f64,
    pub back_batter_level: f64,
}

impl AbutmentParams {
    pub fn read(params: &ParameterSet, side: Side) -> Self {
        let v = |suffix: &str| params.value(&format!("{}{suffix}", side.prefix()));
        AbutmentParams {
            cap_width: v("CW"),
            cap_depth: v("CD"),
            front_batter: v("FB"),
            front_batter_level: v("FBL"),
            toe_batter: v("TB"),
            toe_batter_level: v("TBL"),
            footing_offset: v("FO"),
            footing_depth: v("FD"),
            back_batter: v("BB"),
            back_batter_level: v("BBL"),
        }
    }
}

/// Offsets (from the face, positive towards the span) and levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbutmentProfile {
    pub cap_front: f64,
    pub front_batter_toe: f64,
    pub toe_batter_base: f64,
    pub footing_front: f64,
    pub footing_back: f64,
    pub back_batter_base: f64,
    pub dirt_wall_back: f64,

    pub top: f64,
    pub cap_top: f64,
    pub cap_bottom: f64,
    pub front_batter_level: f64,
    pub toe_level: f64,
    pub back_batter_level: f64,
    pub footing_bottom: f64,
}

impl AbutmentProfile {
    pub fn derive(params: &ParameterSet, side: Side) -> Self {
        let ab = AbutmentParams::read(params, side);
        let cap_top = params.value("CAPT");
        let cap_bottom = cap_top - ab.cap_depth;

        let cap_front = ab.cap_width;
        let front_batter_toe =
            cap_front + batter_run(cap_bottom - ab.front_batter_level, ab.front_batter);
        let toe_batter_base =
            front_batter_toe + batter_run(ab.front_batter_level - ab.toe_batter_level, ab.toe_batter);
        let footing_front = toe_batter_base + ab.footing_offset;

        let dirt_wall_back = -params.value("DWTH");
        let back_batter_base =
            dirt_wall_back - batter_run(cap_bottom - ab.back_batter_level, ab.back_batter);
        let footing_back = back_batter_base - ab.footing_offset;

        AbutmentProfile {
            cap_front,
            front_batter_toe,
            toe_batter_base,
            footing_front,
            footing_back,
            back_batter_base,
            dirt_wall_back,
            top: params.value("RTL") + params.value("APTHK") - params.value("SLBTHT"),
            cap_top,
            cap_bottom,
            front_batter_level: ab.front_batter_level,
            toe_level: ab.toe_batter_level,
            back_batter_level: ab.back_batter_level,
            footing_bottom: ab.toe_batter_level - ab.footing_depth,
        }
    }

    /// The closed elevation polygon as (offset, level) pairs
    pub fn outline(&self) -> [(f64, f64); 14] {
        [
            (0.0, self.top),
            (0.0, self.cap_top),
            (self.cap_front, self.cap_top),
            (self.cap_front, self.cap_bottom),
            (self.front_batter_toe, self.front_batter_level),
            (self.toe_batter_base, self.toe_level),
            (self.footing_front, self.toe_level),
            (self.footing_front, self.footing_bottom),
            (self.footing_back, self.footing_bottom),
            (self.footing_back, self.toe_level),
            (self.back_batter_base, self.toe_level),
            (self.back_batter_base, self.back_batter_level),
            (self.dirt_wall_back, self.cap_bottom),
            (self.dirt_wall_back, self.top),
        ]
    }

    /// Cap bottom, footing top and the dirt-wall back lines
    pub fn detail_lines(&self) -> [[(f64, f64); 2]; 4] {
        let o = self.outline();
        let back_top = (self.back_batter_base, self.top);
        [[o[12], o[3]], [o[9], o[6]], [o[11], back_top], [back_top, o[13]]]
    }

    /// Offsets of the plan body lines: back batter, dirt wall, face, cap,
    /// front batter toe, toe batter base
    pub fn plan_stations(&self) -> [f64; 6] {
        [
            self.back_batter_base,
            self.dirt_wall_back,
            0.0,
            self.cap_front,
            self.front_batter_toe,
            self.toe_batter_base,
        ]
    }

    pub fn footing_length(&self) -> f64 {
        (self.footing_front - self.footing_back).abs()
    }

    /// Plan footprint for an abutment whose face is at `face`, `width`
    /// across the bridge.
    pub fn footprint(&self, side: Side, face: f64, width: f64) -> Footprint {
        let x = |dx: f64| face + side.sign() * dx;
        let center = DVec2::new(x(0.5 * (self.footing_front + self.footing_back)), 0.0);
        let mut fp = Footprint::new(Component::Abutment, side.label(), center);

        let half = 0.5 * width;
        let (back, front) = (x(self.footing_back), x(self.footing_front));
        fp.rect(back.min(front), half, back.max(front), -half);
        for s in self.plan_stations() {
            fp.line(x(s), half, x(s), -half);
        }
        fp.line(x(self.back_batter_base), -half, x(self.toe_batter_base), -half);
        fp.line(x(self.back_batter_base), half, x(self.toe_batter_base), half);
        fp
    }
}

/// Width across the bridge covered by an abutment: carriageway plus kerbs
pub fn abutment_width(params: &ParameterSet) -> f64 {
    params.value("CCBR") + 2.0 * params.value("KERBW")
}

impl GeometryBuilder for AbutmentPair {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let tf = &ctx.tf;
        let width = abutment_width(ctx.params);
        let label_h = ctx.units(CAPTION_HEIGHT);

        out.begin(Component::Abutment);
        for side in [Side::Left, Side::Right] {
            let profile = AbutmentProfile::derive(ctx.params, side);
            let face = side.face_chainage(ctx.params);
            let place = |(dx, level): (f64, f64)| tf.point(face + side.sign() * dx, level);

            out.weight(Weight::Heavy);
            out.polyline(profile.outline().into_iter().map(place).collect(), true);

            out.weight(Weight::Thin);
            for [a, b] in profile.detail_lines() {
                out.line(place(a), place(b));
            }

            out.weight(Weight::Normal);
            let mut anchor = place((0.0, profile.footing_bottom - ctx.paper(PIER_LABEL_DROP)));
            anchor.x -= ctx.units(PIER_LABEL_SHIFT);
            out.text(anchor, side.label(), label_h, Degrees::ZERO);

            out.push_footprint(profile.footprint(side, face, width));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::context::PlanShape;
    use crate::draw::primitive::Primitive;
    use crate::draw::transform::Target;

    fn params(pairs: &[(&str, f64)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn default_left_profile() {
        let p = AbutmentProfile::derive(&params(&[]), Side::Left);
        // cap bottom 110 - 1.2 = 108.8, front batter (108.8 - 101) / 10
        assert!((p.cap_bottom - 108.8).abs() < 1e-12);
        assert_eq!(p.cap_front, 0.75);
        assert!((p.front_batter_toe - 1.53).abs() < 1e-12);
        // toe batter has no rise at the defaults
        assert!((p.toe_batter_base - 1.53).abs() < 1e-12);
        assert!((p.footing_front - 3.03).abs() < 1e-12);
        assert_eq!(p.dirt_wall_back, -0.3);
        // back batter (108.8 - 101) / 3
        assert!((p.back_batter_base - (-0.3 - 2.6)).abs() < 1e-12);
        assert!((p.footing_back - (-4.4)).abs() < 1e-12);
        assert_eq!(p.footing_bottom, 100.0);
        assert!((p.top - (110.98 + 0.38 - 0.75)).abs() < 1e-12);
    }

    #[test]
    fn outline_is_closed_chain_of_fourteen() {
        let p = AbutmentProfile::derive(&params(&[]), Side::Left);
        let o = p.outline();
        assert_eq!(o.len(), 14);
        assert_eq!(o[0].0, 0.0);
        assert_eq!(o[13].0, p.dirt_wall_back);
        assert_eq!(o[0].1, o[13].1);
    }

    #[test]
    fn right_side_reads_its_own_keys() {
        let p = params(&[("ALCW", 0.75), ("ARCW", 1.0)]);
        assert_eq!(AbutmentParams::read(&p, Side::Left).cap_width, 0.75);
        assert_eq!(AbutmentParams::read(&p, Side::Right).cap_width, 1.0);
        assert_eq!(
            AbutmentParams::read(&p, Side::Right).back_batter,
            AbutmentParams::read(&p, Side::Left).back_batter
        );
    }

    #[test]
    fn faces_at_bridge_ends() {
        let p = params(&[]);
        assert_eq!(Side::Left.face_chainage(&p), 0.0);
        assert_eq!(Side::Right.face_chainage(&p), 36.0);
    }

    #[test]
    fn zero_batter_gives_vertical_face() {
        let p = AbutmentProfile::derive(&params(&[("ALFB", 0.0)]), Side::Left);
        assert_eq!(p.front_batter_toe, p.cap_front);
    }

    #[test]
    fn right_elevation_mirrors_left() {
        let p = params(&[]);
        let ctx = BuildContext::new(&p, &Target::Absolute);
        let mut sketch = Sketch::new();
        AbutmentPair.build(&ctx, &mut sketch);

        let polygons: Vec<_> = sketch
            .elements()
            .iter()
            .filter_map(|e| match &e.primitive {
                Primitive::Polyline { points, closed: true } => Some(points.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(polygons.len(), 2);
        let mid = ctx.tf.hpos(18.0);
        for (l, r) in polygons[0].iter().zip(&polygons[1]) {
            assert!((2.0 * mid - l.x - r.x).abs() < 1e-6);
            assert!((l.y - r.y).abs() < 1e-9);
        }
    }

    #[test]
    fn footprint_spans_the_footing() {
        let p = params(&[]);
        let profile = AbutmentProfile::derive(&p, Side::Right);
        let fp = profile.footprint(Side::Right, 36.0, abutment_width(&p));
        assert_eq!(fp.label, "A2");
        assert!((fp.center.x - (36.0 - 0.5 * (3.03 - 4.4))).abs() < 1e-9);
        let PlanShape::Outline(corners) = &fp.shapes[0] else {
            panic!("footing first");
        };
        assert!((corners[0].x - 32.97).abs() < 1e-9);
        assert!((corners[1].x - 40.4).abs() < 1e-9);
        assert!((corners[0].y - 5.78).abs() < 1e-12);
        // footing, six stations, two edges
        assert_eq!(fp.shapes.len(), 1 + 6 + 2);
    }
}
