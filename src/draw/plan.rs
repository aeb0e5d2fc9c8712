//! Plan view: places the pier and abutment footprints in the shared plan
//! band and draws the deck edges between them.
//!
//! Footprints arrive in world (chainage, offset across) metres. Each point
//! goes through the primary transform into the band, then is rotated by the
//! skew about its own footprint centre.

use super::GeometryBuilder;
use super::context::{BuildContext, PlanShape, Sketch};
use super::primitive::{Component, ThreePointArc, View, Weight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanView;

impl GeometryBuilder for PlanView {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let skew = ctx.scale.skew;
        let footprints = out.footprints().to_vec();

        for fp in &footprints {
            out.begin(fp.component);
            out.view(View::Plan);
            let center = ctx.plan_point(fp.center.x, fp.center.y);
            let place = |p: glam::DVec2| ctx.tf.rotate(ctx.plan_point(p.x, p.y), center, skew);

            for (i, shape) in fp.shapes.iter().enumerate() {
                // the footing comes first and carries the outline weight
                out.weight(if i == 0 { Weight::Heavy } else { Weight::Normal });
                match shape {
                    PlanShape::Outline(points) => {
                        out.polyline(points.iter().copied().map(place).collect(), true);
                    }
                    PlanShape::Line(a, b) => out.line(place(*a), place(*b)),
                    PlanShape::Arc(a, m, b) => {
                        out.arc(ThreePointArc::new(*a, *m, *b).map(place));
                    }
                }
            }
        }

        // deck edges and kerbs run square to the supports' chainage axis
        let abtl = ctx.v("ABTL");
        let laslab = ctx.v("LASLAB");
        let start = abtl - laslab;
        let end = abtl + ctx.v("LBRIDGE") + laslab;
        let half = 0.5 * ctx.v("CCBR");
        let kerb = half + ctx.v("KERBW");

        out.begin(Component::Superstructure);
        out.view(View::Plan);
        out.weight(Weight::Thin);
        for across in [kerb, half, -half, -kerb] {
            out.line(ctx.plan_point(start, across), ctx.plan_point(end, across));
        }
        out.line(ctx.plan_point(start, 0.0), ctx.plan_point(end, 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{AbutmentPair, PierSet};
    use crate::draw::primitive::{Element, Primitive};
    use crate::draw::transform::{Target, Viewport};
    use crate::params::ParameterSet;

    fn plan(pairs: &[(&str, f64)], target: &Target) -> (Vec<Element>, f64) {
        let params = ParameterSet::from_pairs(pairs.iter().copied()).unwrap();
        let ctx = BuildContext::new(&params, target);
        let mut sketch = Sketch::new();
        PierSet.build(&ctx, &mut sketch);
        AbutmentPair.build(&ctx, &mut sketch);
        let before = sketch.len();
        PlanView.build(&ctx, &mut sketch);
        let elements = sketch.into_elements().split_off(before);
        (elements, ctx.tf.vpos(ctx.layout.datum))
    }

    fn footings(elements: &[Element]) -> Vec<Vec<glam::DVec2>> {
        elements
            .iter()
            .filter(|e| e.tag.weight == Weight::Heavy)
            .filter_map(|e| match &e.primitive {
                Primitive::Polyline { points, closed: true } => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn everything_is_tagged_plan() {
        let (elements, _) = plan(&[], &Target::Absolute);
        assert!(elements.iter().all(|e| e.tag.view == View::Plan));
        // two piers and two abutments
        assert_eq!(footings(&elements).len(), 4);
    }

    #[test]
    fn square_bridge_has_axis_aligned_footings() {
        let (elements, datum_y) = plan(&[], &Target::Absolute);
        for corners in footings(&elements) {
            assert_eq!(corners[0].y, corners[1].y);
            assert_eq!(corners[1].x, corners[2].x);
            assert!(corners.iter().all(|c| c.y < datum_y));
        }
    }

    #[test]
    fn skew_turns_footings_about_their_centres() {
        let (square, _) = plan(&[], &Target::Absolute);
        let (skewed, _) = plan(&[("SKEW", 30.0)], &Target::Absolute);
        for (sq, sk) in footings(&square).iter().zip(footings(&skewed)) {
            let centroid = |c: &[glam::DVec2]| c.iter().copied().sum::<glam::DVec2>() / c.len() as f64;
            assert!(centroid(sq).distance(centroid(&sk)) < 1e-6);
            let edge = sk[1] - sk[0];
            assert!((edge.y.atan2(edge.x).to_degrees() - 30.0).abs() < 1e-9);
            assert!((edge.length() - (sq[1] - sq[0]).length()).abs() < 1e-6);
        }
    }

    #[test]
    fn screen_skew_turns_the_same_way_on_screen() {
        let target = Target::Screen(Viewport::default());
        let (skewed, _) = plan(&[("SKEW", 30.0)], &target);
        let first = &footings(&skewed)[0];
        let edge = first[1] - first[0];
        // y points down, so a counter-clockwise turn has a negative dy
        assert!(((-edge.y).atan2(edge.x).to_degrees() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn deck_edges_are_unrotated() {
        let (elements, _) = plan(&[("SKEW", 30.0)], &Target::Absolute);
        let edges: Vec<_> = elements
            .iter()
            .filter(|e| e.tag.component == Component::Superstructure)
            .collect();
        assert_eq!(edges.len(), 5);
        for e in edges {
            let Primitive::Line(a, b) = e.primitive else {
                panic!("deck edges are lines");
            };
            assert_eq!(a.y, b.y);
        }
    }
}
