//! River-bed survey profile drawn with the section transform.

use super::GeometryBuilder;
use super::context::{BuildContext, Sketch};
use super::defaults::*;
use super::layout::label;
use super::primitive::{Component, Weight};
use super::scale::positive_or_default;
use crate::types::{Degrees, pt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrossSectionProfile;

/// True when `chainage` falls on the regular grid
fn on_grid(chainage: f64, left: f64, incr: f64) -> bool {
    let r = (chainage - left).rem_euclid(incr);
    r < 1e-9 || incr - r < 1e-9
}

impl GeometryBuilder for CrossSectionProfile {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let survey = ctx.params.survey();
        if survey.is_empty() {
            return;
        }
        let tf = &ctx.tf;
        let l = ctx.layout;
        let xincr = positive_or_default(ctx.params, "XINCR");
        let label_h = ctx.units(LABEL_HEIGHT);
        let nudge = ctx.units(SURVEY_LABEL_NUDGE);

        out.begin(Component::CrossSection);
        for p in survey {
            let xx = tf.h2pos(p.chainage);

            // every survey point gets its level
            let y = tf.vpos(l.datum - ctx.paper(SURVEY_LEVEL_LABEL));
            out.text(pt(xx + nudge, y), label(p.level), label_h, Degrees(90.0));

            // off-grid points also get their chainage and a band tick
            if !on_grid(p.chainage, l.left, xincr) {
                let y = tf.vpos(l.datum - ctx.paper(CHAINAGE_LABEL));
                out.text(pt(xx + nudge, y), label(p.chainage), label_h, Degrees(90.0));
                out.line(
                    pt(xx, tf.vpos(l.datum - ctx.paper(CHAINAGE_TICK_BOTTOM))),
                    pt(xx, tf.vpos(l.datum - ctx.paper(CHAINAGE_TICK_TOP))),
                );
            }

            out.line(pt(xx, tf.vpos(l.datum - ctx.paper(SURVEY_TICK))), pt(xx, tf.vpos(l.datum)));
        }

        if survey.len() > 1 {
            out.weight(Weight::Heavy);
            let bed = survey.iter().map(|p| tf.scaled_point(p.chainage, p.level)).collect();
            out.polyline(bed, false);
        }
    }
}
