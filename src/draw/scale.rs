//! Scale and skew quantities derived once per generation.

use super::defaults::{self, DEGENERATE_COS, MAX_SCALE, MIN_SCALE};
use super::transform::Target;
use crate::params::{DefaultValue, ParameterSet, default_for};
use crate::types::Degrees;

/// Read-only scale state shared by every builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    /// Elevation/plan scale (1:n)
    pub scale1: f64,
    /// Section scale (1:n)
    pub scale2: f64,
    /// `scale1 / scale2`, magnification of the section transform
    pub sc: f64,
    /// Horizontal drawing units per metre
    pub hhs: f64,
    /// Vertical drawing units per metre
    pub vvs: f64,
    pub skew: Degrees,
    pub sin: f64,
    pub cos: f64,
    /// `sin / cos`, zero when the skew is degenerate
    pub tan: f64,
    degenerate: bool,
}

impl ScaleState {
    pub fn derive(params: &ParameterSet, target: &Target) -> Self {
        let scale1 = scale_or_default(params, "SCALE1");
        let scale2 = scale_or_default(params, "SCALE2");
        let skew = Degrees(params.value("SKEW"));
        let (sin, cos) = skew.to_radians().sin_cos();
        let degenerate = cos.abs() < DEGENERATE_COS;
        let tan = if degenerate { 0.0 } else { sin / cos };
        let units = target.units_per_metre();

        ScaleState {
            scale1,
            scale2,
            sc: scale1 / scale2,
            hhs: units,
            vvs: units,
            skew,
            sin,
            cos,
            tan,
            degenerate,
        }
    }

    /// True when `cos(skew)` is (numerically) zero
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Width measured along the skewed support line: `v / cos(skew)`, or the
    /// square value when the skew is degenerate.
    pub fn skewed(&self, v: f64) -> f64 {
        if self.degenerate { v } else { v / self.cos }
    }

    /// Paper millimetres at the elevation scale, in metres
    pub fn paper(&self, mm: f64) -> f64 {
        mm * self.scale1 / defaults::UNITS_PER_METRE
    }

    /// Text height in drawing units for a paper size in millimetres
    pub fn text_height(&self, mm: f64) -> f64 {
        self.paper(mm) * self.hhs
    }
}

/// Resolved value, or its table default when not a positive number
pub(crate) fn positive_or_default(params: &ParameterSet, name: &str) -> f64 {
    let v = params.value(name);
    if v > 0.0 { v } else { table_default(name) }
}

/// Resolved scale, or its table default outside `MIN_SCALE..=MAX_SCALE`.
/// Within the range `sc`, `paper()` and `text_height()` stay finite.
pub(crate) fn scale_or_default(params: &ParameterSet, name: &str) -> f64 {
    let v = params.value(name);
    if (MIN_SCALE..=MAX_SCALE).contains(&v) { v } else { table_default(name) }
}

fn table_default(name: &str) -> f64 {
    match default_for(name).map(|d| d.value) {
        Some(DefaultValue::Fixed(d)) => d,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::transform::Viewport;

    fn state(pairs: &[(&str, f64)]) -> ScaleState {
        let params = ParameterSet::from_pairs(pairs.iter().copied()).unwrap();
        ScaleState::derive(&params, &Target::Absolute)
    }

    #[test]
    fn default_scales() {
        let s = state(&[]);
        assert_eq!(s.scale1, 186.0);
        assert_eq!(s.scale2, 100.0);
        assert!((s.sc - 1.86).abs() < 1e-12);
        assert_eq!(s.hhs, 1000.0);
        assert_eq!(s.vvs, 1000.0);
        assert_eq!(s.cos, 1.0);
        assert_eq!(s.tan, 0.0);
        assert!(!s.is_degenerate());
    }

    #[test]
    fn skewed_divides_by_cos() {
        let s = state(&[("SKEW", 60.0)]);
        assert!((s.skewed(1.2) - 2.4).abs() < 1e-9);
        assert!((s.tan - 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn ninety_degree_skew_is_degenerate() {
        let s = state(&[("SKEW", 90.0)]);
        assert!(s.is_degenerate());
        assert_eq!(s.skewed(1.2), 1.2);
        assert_eq!(s.tan, 0.0);

        let s = state(&[("SKEW", -270.0)]);
        assert!(s.is_degenerate());
    }

    #[test]
    fn non_positive_scales_fall_back() {
        let s = state(&[("SCALE1", 0.0), ("SCALE2", -5.0)]);
        assert_eq!(s.scale1, 186.0);
        assert_eq!(s.scale2, 100.0);
    }

    #[test]
    fn scales_outside_the_usable_range_fall_back() {
        let s = state(&[("SCALE1", 1e300), ("SCALE2", 1e-300)]);
        assert_eq!(s.scale1, 186.0);
        assert_eq!(s.scale2, 100.0);
        assert!(s.sc.is_finite());
        assert!(s.text_height(5.0).is_finite());

        // the extremes of the range are kept
        let s = state(&[("SCALE1", 1e6), ("SCALE2", 1e-3)]);
        assert!((s.sc - 1e9).abs() < 1.0);
        assert!(s.paper(20.0).is_finite());
    }

    #[test]
    fn paper_offsets_follow_scale1() {
        let s = state(&[("SCALE1", 100.0)]);
        assert!((s.paper(20.0) - 2.0).abs() < 1e-12);
        assert!((s.text_height(2.5) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn screen_units_come_from_viewport() {
        let params = ParameterSet::new();
        let vp = Viewport::default().with_zoom(2.0).unwrap();
        let s = ScaleState::derive(&params, &Target::Screen(vp));
        assert_eq!(s.hhs, 100.0);
        assert_eq!(s.vvs, 100.0);
    }
}
