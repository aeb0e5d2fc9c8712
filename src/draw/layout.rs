//! Reference grid: datum, label bands, level axis and chainage ticks.

use super::context::{BuildContext, Sketch};
use super::defaults::*;
use super::primitive::{Component, Weight};
use super::scale::positive_or_default;
use super::GeometryBuilder;
use crate::log::warn;
use crate::types::Degrees;

/// Upper bound on ticks per axis
const MAX_TICKS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutAxes;

/// Number of whole increments in `extent`, capped
fn tick_count(extent: f64, incr: f64, axis: &str) -> usize {
    let n = (extent / incr + 1e-9).floor();
    if n < 0.0 {
        return 0;
    }
    if n > MAX_TICKS as f64 {
        warn!("{axis} axis would need {n} ticks; drawing the first {MAX_TICKS}");
        return MAX_TICKS;
    }
    n as usize
}

pub(crate) fn label(value: f64) -> String {
    format!("{value:.3}")
}

impl GeometryBuilder for LayoutAxes {
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch) {
        let tf = &ctx.tf;
        let l = ctx.layout;
        let (left, right, datum) = (l.left, l.right, l.datum);
        let toprl = ctx.v("TOPRL");
        let band = ctx.paper(BAND);

        out.begin(Component::Axes);

        out.weight(Weight::Heavy);
        out.line(tf.point(left, datum), tf.point(right, datum));
        out.weight(Weight::Normal);
        out.line(tf.point(left, datum - band), tf.point(right, datum - band));
        out.line(tf.point(left, datum - 2.0 * band), tf.point(right, datum - 2.0 * band));
        out.weight(Weight::Heavy);
        out.line(tf.point(left, datum - 2.0 * band), tf.point(left, toprl));
        out.weight(Weight::Normal);

        let caption_x = left - ctx.paper(BAND_CAPTION_INSET);
        let caption_h = ctx.units(CAPTION_HEIGHT);
        out.text(tf.point(caption_x, datum - 0.5 * band), "BED LEVEL", caption_h, Degrees::ZERO);
        out.text(tf.point(caption_x, datum - 1.5 * band), "CHAINAGE", caption_h, Degrees::ZERO);

        // levels up the left axis
        let label_h = ctx.units(LABEL_HEIGHT);
        let yincr = positive_or_default(ctx.params, "YINCR");
        let tick = ctx.paper(LEVEL_TICK);
        for i in 0..=tick_count(toprl - datum, yincr, "level") {
            let lvl = datum + i as f64 * yincr;
            out.text(
                tf.point(left - ctx.paper(LEVEL_LABEL_INSET), lvl - ctx.paper(LEVEL_LABEL_DROP)),
                label(lvl),
                label_h,
                Degrees::ZERO,
            );
            out.line(tf.point(left - tick, lvl), tf.point(left + tick, lvl));
        }

        // chainages along the bottom band, first one increment in from the axis
        let xincr = positive_or_default(ctx.params, "XINCR");
        for i in 1..=tick_count(right - left, xincr, "chainage") {
            let ch = left + i as f64 * xincr;
            let mut anchor = tf.point(ch, datum - ctx.paper(CHAINAGE_LABEL));
            anchor.x += ctx.units(CHAINAGE_LABEL_NUDGE);
            out.text(anchor, label(ch), label_h, Degrees(90.0));
            out.line(
                tf.point(ch, datum - ctx.paper(CHAINAGE_TICK_BOTTOM)),
                tf.point(ch, datum - ctx.paper(CHAINAGE_TICK_TOP)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::primitive::Primitive;
    use crate::draw::transform::Target;
    use crate::params::ParameterSet;

    fn build(pairs: &[(&str, f64)]) -> Vec<Primitive> {
        let params = ParameterSet::from_pairs(pairs.iter().copied()).unwrap();
        let ctx = BuildContext::new(&params, &Target::Absolute);
        let mut sketch = Sketch::new();
        LayoutAxes.build(&ctx, &mut sketch);
        sketch.into_elements().into_iter().map(|e| e.primitive).collect()
    }

    fn texts(prims: &[Primitive]) -> Vec<String> {
        prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn level_labels_from_datum_to_top() {
        let prims = build(&[("DATUM", 100.0), ("TOPRL", 103.0)]);
        let labels = texts(&prims);
        assert_eq!(&labels[..2], ["BED LEVEL", "CHAINAGE"]);
        assert_eq!(&labels[2..6], ["100.000", "101.000", "102.000", "103.000"]);
    }

    #[test]
    fn chainage_labels_are_rotated() {
        let prims = build(&[("LEFT", 0.0), ("RIGHT", 20.0), ("XINCR", 10.0), ("TOPRL", 100.0)]);
        let rotated: Vec<_> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, rotation, .. } if rotation.raw() == 90.0 => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rotated, ["10.000", "20.000"]);
    }

    #[test]
    fn fractional_left_snaps_to_whole_chainage() {
        let prims = build(&[("LEFT", 2.6), ("RIGHT", 12.0), ("XINCR", 5.0), ("TOPRL", 100.0)]);
        let labels = texts(&prims);
        assert!(labels.contains(&"7.000".to_string()));
        assert!(labels.contains(&"12.000".to_string()));
        assert!(!labels.iter().any(|l| l.starts_with("2.6")));
    }

    #[test]
    fn no_chainage_mark_on_the_level_axis() {
        let prims = build(&[("LEFT", 0.0), ("RIGHT", 30.0), ("XINCR", 10.0), ("TOPRL", 100.0)]);
        let labels = texts(&prims);
        assert!(!labels.contains(&"0.000".to_string()));
        let ticks_at_left = prims
            .iter()
            .filter(|p| matches!(p, Primitive::Line(a, b) if a.x == 0.0 && b.x == 0.0))
            .count();
        // only the level axis itself
        assert_eq!(ticks_at_left, 1);
    }

    #[test]
    fn datum_line_spans_the_grid() {
        let prims = build(&[("LEFT", 0.0), ("RIGHT", 30.0)]);
        assert_eq!(
            prims[0],
            Primitive::Line(crate::types::pt(0.0, 100.0), crate::types::pt(30000.0, 100.0))
        );
    }

    #[test]
    fn zero_increment_falls_back_to_default() {
        let prims = build(&[("YINCR", 0.0), ("XINCR", -1.0), ("TOPRL", 102.0), ("RIGHT", 10.0)]);
        let labels = texts(&prims);
        assert!(labels.contains(&"102.000".to_string()));
        assert!(labels.contains(&"10.000".to_string()));
    }

    #[test]
    fn label_format() {
        insta::assert_snapshot!(label(110.98), @"110.980");
    }
}
