//! Interior piers: cap, battered shaft and footing in elevation, plus the
//! plan footprint handed to [`super::PlanView`].
//!
//! Footing width is expected to be at least the shaft width. That is the
//! caller's responsibility; narrower footings are drawn as given (see
//! [`crate::validate::check`]).

use glam::DVec2;

use super::GeometryBuilder;
use super::context::{BuildContext, Footprint, Sketch, batter_run};
use super::defaults::{CAPTION_HEIGHT, PIER_LABEL_DROP, PIER_LABEL_SHIFT};
use super::primitive::{Component, Weight};
use super::scale::ScaleState;
use crate::params::ParameterSet;
use crate::types::Degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PierSet;

/// Chainages of the interior piers, in order (pier `n` is at index `n - 1`)
pub fn pier_chainages(params: &ParameterSet) -> Vec<f64> {
    let abtl = params.value("ABTL");
    let span1 = params.value("SPAN1");
    (1..params.spans()).map(|i| abtl + i as f64 * span1).collect()
}

/// Pier dimensions derived from the parameters and skew
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PierGeometry {
    pub cap_top: f64,
    pub cap_bottom: f64,
    /// Cap width along the chainage, corrected for skew
    pub cap_width: f64,
    pub shaft_width: f64,
    /// Shaft width along the chainage, corrected for skew
    pub shaft_width_skewed: f64,
    /// Horizontal run of each battered shaft face
    pub batter_offset: f64,
    pub batter_offset_skewed: f64,
    pub founding_level: f64,
    pub footing_depth: f64,
    pub footing_width: f64,
    pub footing_width_skewed: f64,
    pub footing_length: f64,
    /// Shaft length across the bridge, measured along the skewed pier
    pub plan_length: f64,
}

impl PierGeometry {
    pub fn derive(params: &ParameterSet, scale: &ScaleState) -> Self {
        let cap_bottom = params.value("CAPB");
        let founding_level = params.value("FUTRL");
        let footing_depth = params.value("FUTD");
        let shaft_width = params.value("PIERTW");
        let footing_width = params.value("FUTW");
        let pierst = params.value("PIERST");

        let batter_offset = batter_run(cap_bottom - (founding_level + footing_depth), params.value("BATTR"));
        let plan_length = if scale.is_degenerate() {
            pierst
        } else {
            pierst / scale.cos + (shaft_width * scale.tan).abs()
        };

        PierGeometry {
            cap_top: params.value("CAPT"),
            cap_bottom,
            cap_width: scale.skewed(params.value("CAPW")),
            shaft_width,
            shaft_width_skewed: scale.skewed(shaft_width),
            batter_offset,
            batter_offset_skewed: scale.skewed(batter_offset),
            founding_level,
            footing_depth,
            footing_width,
            footing_width_skewed: scale.skewed(footing_width),
            footing_length: params.value("FUTL"),
            plan_length,
        }
    }

    /// Top of footing, bottom of shaft
    pub fn footing_top(&self) -> f64 {
        self.founding_level + self.footing_depth
    }

    /// Diagonal of the larger of the footing and pier plan outlines; any
    /// rotation about the centre stays within half of it.
    pub fn plan_diagonal(&self) -> f64 {
        let footing = self.footing_width.hypot(self.footing_length);
        let pier_width = self.shaft_width + 2.0 * self.batter_offset.abs();
        let pier = pier_width.hypot(self.plan_length + pier_width);
        footing.max(pier)
    }

    /// Plan footprint centred on `(xc, 0)`: footing, pier outline, batter
    /// lines and the cutwater arcs at both noses.
    pub fn footprint(&self, label: String, xc: f64) -> Footprint {
        let mut fp = Footprint::new(Component::Pier, label, DVec2::new(xc, 0.0));

        let (fw, fl) = (0.5 * self.footing_width, 0.5 * self.footing_length);
        fp.rect(xc - fw, fl, xc + fw, -fl);

        let x1 = xc - 0.5 * self.shaft_width;
        let x3 = xc + 0.5 * self.shaft_width;
        let x2 = x1 - self.batter_offset;
        let x4 = x3 + self.batter_offset;
        let y9 = 0.5 * self.plan_length;
        let y10 = -y9;
        fp.rect(x1, y9, x3, y10);
        fp.line(x2, y9, x2, y10);
        fp.line(x4, y9, x4, y10);

        let nose = 0.5 * self.shaft_width;
        let p = |x: f64, y: f64| DVec2::new(x, y);
        fp.arc(p(x2, y9), p(xc, y9 + nose + self.batter_offset), p(x4, y9));
        fp.arc(p(x1, y9), p(xc, y9 + nose), p(x3, y9));
        fp.arc(p(x1, y10), p(xc, y10 - nose), p(x3, y10));
        fp.arc(p(x2, y10), p(xc, y10 - nose - self.batter_offset), p(x4, y10));
        fp
    }
}

impl GeometryBuilder for PierSet {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let tf = &ctx.tf;
        let g = PierGeometry::derive(ctx.params, &ctx.scale);
        let label_h = ctx.units(CAPTION_HEIGHT);

        out.begin(Component::Pier);
        for (i, xc) in pier_chainages(ctx.params).into_iter().enumerate() {
            let number = i + 1;

            out.weight(Weight::Normal);
            let half_cap = 0.5 * g.cap_width;
            out.rect(tf.point(xc - half_cap, g.cap_top), tf.point(xc + half_cap, g.cap_bottom));

            out.weight(Weight::Heavy);
            let x1 = xc - 0.5 * g.shaft_width_skewed;
            let x3 = xc + 0.5 * g.shaft_width_skewed;
            let x2 = x1 - g.batter_offset_skewed;
            let x4 = x3 + g.batter_offset_skewed;
            let base = g.footing_top();
            out.polyline(
                vec![
                    tf.point(x2, base),
                    tf.point(x1, g.cap_bottom),
                    tf.point(x3, g.cap_bottom),
                    tf.point(x4, base),
                ],
                true,
            );

            out.weight(Weight::Normal);
            let half_footing = 0.5 * g.footing_width_skewed;
            out.rect(
                tf.point(xc - half_footing, base),
                tf.point(xc + half_footing, g.founding_level),
            );

            let mut anchor = tf.point(xc, g.founding_level - ctx.paper(PIER_LABEL_DROP));
            anchor.x -= ctx.units(PIER_LABEL_SHIFT);
            out.text(anchor, format!("P{number}"), label_h, Degrees::ZERO);

            out.push_footprint(g.footprint(format!("P{number}"), xc));
        }
    }
}
