//! Transverse deck section, drawn with the section transform to the right of
//! the grid, level with the plan band.
//!
//! Offsets are measured across the deck from its left kerb face.

use super::GeometryBuilder;
use super::context::{BuildContext, Sketch};
use super::defaults::{CAPTION_HEIGHT, CENTRE_LINE_OVERRUN, VIEW_CAPTION_DROP};
use super::primitive::{Component, View, Weight};
use crate::types::Degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionView;

impl GeometryBuilder for SectionView {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let rtl = ctx.v("RTL");
        let ccbr = ctx.v("CCBR");
        let kerbw = ctx.v("KERBW");
        let kerbd = ctx.v("KERBD");
        let width = ccbr + 2.0 * kerbw;
        let mid = 0.5 * width;
        let p = |offset: f64, level: f64| ctx.section_point(offset, level);

        out.begin(Component::Deck);
        out.view(View::Section);

        // slab: flat top, soffit falling from the tips to the centre
        out.weight(Weight::Heavy);
        let tip = rtl - ctx.v("SLBTHT");
        let edge = rtl - ctx.v("SLBTHE");
        let centre = rtl - ctx.v("SLBTHC");
        out.polyline(
            vec![
                p(0.0, rtl),
                p(width, rtl),
                p(width, tip),
                p(mid + 0.5 * ccbr, edge),
                p(mid, centre),
                p(mid - 0.5 * ccbr, edge),
                p(0.0, tip),
            ],
            true,
        );

        out.weight(Weight::Normal);
        out.rect(p(0.0, rtl), p(kerbw, rtl + kerbd));
        out.rect(p(width - kerbw, rtl), p(width, rtl + kerbd));

        out.weight(Weight::Thin);
        let wc = rtl + ctx.v("WCTH");
        out.line(p(kerbw, wc), p(width - kerbw, wc));
        out.line(
            p(mid, rtl + kerbd + CENTRE_LINE_OVERRUN),
            p(mid, centre - CENTRE_LINE_OVERRUN),
        );

        // paper offsets shrink by the section magnification
        out.weight(Weight::Normal);
        let drop = ctx.paper(VIEW_CAPTION_DROP) / ctx.scale.sc;
        out.text(
            p(0.0, centre - drop),
            "CROSS SECTION",
            ctx.units(CAPTION_HEIGHT),
            Degrees::ZERO,
        );
    }
}
