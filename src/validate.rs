//! Optional consistency checks on a parameter set.
//!
//! Generation never calls these. Every configuration reported here still
//! draws; the output is just visibly wrong.

use crate::draw::defaults::{MAX_SCALE, MIN_SCALE};
use crate::draw::{PierGeometry, ScaleState, Target};
use crate::errors::GeometryIssue;
use crate::params::ParameterSet;

/// Batter ratios; a zero ratio draws a vertical face
const BATTERS: [&str; 7] = ["BATTR", "ALFB", "ALTB", "ALBB", "ARFB", "ARTB", "ARBB"];

/// (upper, lower) level pairs that must not cross
const LEVEL_PAIRS: [(&str, &str); 4] = [
    ("CAPT", "CAPB"),
    ("RTL", "SOFL"),
    ("TOPRL", "DATUM"),
    ("CAPB", "FUTRL"),
];

/// Report every inconsistency found, in a fixed order.
pub fn check(params: &ParameterSet) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();

    for name in ["SCALE1", "SCALE2"] {
        let value = params.value(name);
        if !(MIN_SCALE..=MAX_SCALE).contains(&value) {
            issues.push(GeometryIssue::ScaleOutOfRange { name, value });
        }
    }

    let nspan = params.value("NSPAN");
    if nspan.round() < 1.0 {
        issues.push(GeometryIssue::NonPositiveSpanCount { value: nspan });
    }
    let span1 = params.value("SPAN1");
    if span1 <= 0.0 {
        issues.push(GeometryIssue::NonPositiveSpanLength { value: span1 });
    }

    for name in BATTERS {
        if params.value(name) == 0.0 {
            issues.push(GeometryIssue::ZeroBatter { name });
        }
    }

    for (top_name, bottom_name) in LEVEL_PAIRS {
        let (top, bottom) = (params.value(top_name), params.value(bottom_name));
        if bottom > top {
            issues.push(GeometryIssue::InvertedLevels {
                top_name,
                top,
                bottom_name,
                bottom,
            });
        }
    }

    let scale = ScaleState::derive(params, &Target::Absolute);
    if scale.is_degenerate() {
        issues.push(GeometryIssue::DegenerateSkew {
            degrees: scale.skew.raw(),
        });
    }

    // the footing must cover the shaft where they meet
    let pier = PierGeometry::derive(params, &scale);
    let shaft = pier.shaft_width + 2.0 * pier.batter_offset;
    if pier.footing_width < shaft {
        issues.push(GeometryIssue::FootingNarrowerThanShaft {
            footing: pier.footing_width,
            shaft,
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(pairs: &[(&str, f64)]) -> Vec<GeometryIssue> {
        check(&ParameterSet::from_pairs(pairs.iter().copied()).unwrap())
    }

    #[test]
    fn defaults_are_consistent() {
        assert!(issues(&[]).is_empty());
    }

    #[test]
    fn narrow_footing() {
        let found = issues(&[("FUTW", 1.0)]);
        assert_eq!(found.len(), 1);
        let GeometryIssue::FootingNarrowerThanShaft { footing, shaft } = found[0] else {
            panic!("unexpected {found:?}");
        };
        assert_eq!(footing, 1.0);
        // 1.2 + 2 * (109.4 - 101) / 10
        assert!((shaft - 2.88).abs() < 1e-9);
    }

    #[test]
    fn spans_and_batters() {
        let found = issues(&[("NSPAN", 0.0), ("SPAN1", -2.0), ("ALTB", 0.0)]);
        assert_eq!(
            found,
            [
                GeometryIssue::NonPositiveSpanCount { value: 0.0 },
                GeometryIssue::NonPositiveSpanLength { value: -2.0 },
                GeometryIssue::ZeroBatter { name: "ALTB" },
                // the right abutment inherits the left batter
                GeometryIssue::ZeroBatter { name: "ARTB" },
            ]
        );
    }

    #[test]
    fn inverted_cap() {
        let found = issues(&[("CAPB", 111.0)]);
        assert!(found.contains(&GeometryIssue::InvertedLevels {
            top_name: "CAPT",
            top: 110.0,
            bottom_name: "CAPB",
            bottom: 111.0
        }));
    }

    #[test]
    fn degenerate_skew_and_bad_scale() {
        let found = issues(&[("SKEW", -90.0), ("SCALE1", 0.0)]);
        assert_eq!(found[0], GeometryIssue::ScaleOutOfRange { name: "SCALE1", value: 0.0 });
        assert!(found.contains(&GeometryIssue::DegenerateSkew { degrees: -90.0 }));
    }

    #[test]
    fn overflowing_scale() {
        let found = issues(&[("SCALE2", 1e-300)]);
        assert_eq!(found, [GeometryIssue::ScaleOutOfRange { name: "SCALE2", value: 1e-300 }]);
    }

    #[test]
    fn messages_render() {
        let msg = GeometryIssue::ZeroBatter { name: "BATTR" }.to_string();
        insta::assert_snapshot!(msg, @"BATTR is zero; the batter offset falls back to a vertical face");
    }
}
