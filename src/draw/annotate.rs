//! Span dimensions, view captions and the title block. Drawn last so they
//! sit on top of the structure.

use super::GeometryBuilder;
use super::context::{BuildContext, Sketch};
use super::defaults::*;
use super::layout::label;
use super::primitive::{Component, View, Weight};
use crate::types::Degrees;

/// Approximate advance of one character, as a fraction of text height
const CHAR_ADVANCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotations;

/// Chainage at which `text` of `height` metres starts so it centres on `x`
fn centred(x: f64, text: &str, height: f64) -> f64 {
    x - 0.5 * CHAR_ADVANCE * height * text.chars().count() as f64
}

impl GeometryBuilder for Annotations {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let tf = &ctx.tf;
        let l = ctx.layout;
        let nspan = ctx.params.spans();
        let span1 = ctx.v("SPAN1");
        let abtl = ctx.v("ABTL");

        out.begin(Component::Annotation);

        let level = ctx.v("RTL") + ctx.v("WCTH") + ctx.paper(DIMENSION_RISE);
        let tick = ctx.paper(DIMENSION_TICK);
        let text_m = ctx.paper(LABEL_HEIGHT);
        for i in 0..nspan {
            let start = abtl + i as f64 * span1;
            let end = start + span1;
            out.weight(Weight::Thin);
            out.line(tf.point(start, level), tf.point(end, level));
            for x in [start, end] {
                out.line(tf.point(x, level - tick), tf.point(x, level + tick));
            }
            out.weight(Weight::Normal);
            let text = label(span1);
            let x = centred(0.5 * (start + end), &text, text_m);
            out.text(
                tf.point(x, level + ctx.paper(DIMENSION_TEXT_LIFT)),
                text,
                ctx.units(LABEL_HEIGHT),
                Degrees::ZERO,
            );
        }

        let caption_m = ctx.paper(CAPTION_HEIGHT);
        let below_plan = l.plan_y - l.plan_half;
        out.view(View::Plan);
        out.text(
            tf.point(centred(abtl, "PLAN", caption_m), below_plan - ctx.paper(VIEW_CAPTION_DROP)),
            "PLAN",
            ctx.units(CAPTION_HEIGHT),
            Degrees::ZERO,
        );

        out.view(View::Elevation);
        let middle = 0.5 * (l.left + l.right);
        let title = "GENERAL ARRANGEMENT DRAWING";
        let title_y = below_plan - ctx.paper(TITLE_DROP);
        out.text(
            tf.point(centred(middle, title, ctx.paper(TITLE_HEIGHT)), title_y),
            title,
            ctx.units(TITLE_HEIGHT),
            Degrees::ZERO,
        );

        let subtitle = format!(
            "{nspan} SPAN(S) OF {} M, SKEW {}, SCALE 1:{}",
            label(span1),
            ctx.scale.skew,
            ctx.scale.scale1
        );
        let x = centred(middle, &subtitle, caption_m);
        out.text(
            tf.point(x, title_y - ctx.paper(SUBTITLE_GAP)),
            subtitle,
            ctx.units(CAPTION_HEIGHT),
            Degrees::ZERO,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::primitive::Primitive;
    use crate::draw::transform::Target;
    use crate::params::ParameterSet;

    fn texts(pairs: &[(&str, f64)]) -> Vec<String> {
        let params = ParameterSet::from_pairs(pairs.iter().copied()).unwrap();
        let ctx = BuildContext::new(&params, &Target::Absolute);
        let mut sketch = Sketch::new();
        Annotations.build(&ctx, &mut sketch);
        sketch
            .into_elements()
            .into_iter()
            .filter_map(|e| match e.primitive {
                Primitive::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_dimension_per_span() {
        let t = texts(&[("NSPAN", 2.0), ("SPAN1", 15.5)]);
        assert_eq!(t.iter().filter(|s| s.as_str() == "15.500").count(), 2);
    }

    #[test]
    fn captions_and_title() {
        let t = texts(&[("SKEW", 30.0)]);
        insta::assert_debug_snapshot!(&t[3..], @r###"
        [
            "PLAN",
            "GENERAL ARRANGEMENT DRAWING",
            "3 SPAN(S) OF 12.000 M, SKEW 30°, SCALE 1:186",
        ]
        "###);
    }

    #[test]
    fn centring_shifts_left_by_half_the_width() {
        assert_eq!(centred(10.0, "ABCD", 1.0), 10.0 - 1.2);
    }
}
