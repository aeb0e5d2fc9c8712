//! Deck spans, approach slabs and the wearing course in elevation.

use super::GeometryBuilder;
use super::context::{BuildContext, Sketch};
use super::defaults::{DECK_CLEARANCE, EXPANSION_JOINT};
use super::primitive::{Component, Weight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Superstructure;

impl GeometryBuilder for Superstructure {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let tf = &ctx.tf;
        let nspan = ctx.params.spans();
        let span1 = ctx.v("SPAN1");
        let abtl = ctx.v("ABTL");
        let rtl = ctx.v("RTL");
        let sofl = ctx.v("SOFL");
        let laslab = ctx.v("LASLAB");
        let apthk = ctx.v("APTHK");
        let wcth = ctx.v("WCTH");
        let lbridge = ctx.v("LBRIDGE");

        out.begin(Component::Superstructure);

        out.weight(Weight::Heavy);
        for i in 0..nspan {
            let start = abtl + i as f64 * span1;
            let end = start + span1;
            out.rect(
                tf.point(start + DECK_CLEARANCE, rtl),
                tf.point(end - DECK_CLEARANCE, sofl),
            );
        }

        out.weight(Weight::Normal);
        let right_end = abtl + nspan as f64 * span1;
        out.rect(tf.point(abtl - laslab, rtl), tf.point(abtl, rtl - apthk));
        out.rect(tf.point(right_end, rtl), tf.point(right_end + laslab, rtl - apthk));

        out.weight(Weight::Thin);
        out.rect(
            tf.point(abtl - EXPANSION_JOINT - laslab, rtl),
            tf.point(abtl + lbridge + laslab + EXPANSION_JOINT, rtl + wcth),
        );
    }
}
