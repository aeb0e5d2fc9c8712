//! Geometry generation: parameters in, ordered tagged primitives out.

pub mod abutment;
pub mod annotate;
pub mod context;
pub mod cross_section;
pub mod defaults;
pub mod layout;
pub mod pier;
pub mod plan;
pub mod primitive;
pub mod scale;
pub mod section;
pub mod superstructure;
pub mod transform;

use std::fmt;

use enum_dispatch::enum_dispatch;

pub use abutment::{AbutmentPair, AbutmentParams, AbutmentProfile, Side};
pub use annotate::Annotations;
pub use context::{BuildContext, Footprint, Layout, PlanShape, Sketch};
pub use cross_section::CrossSectionProfile;
pub use layout::LayoutAxes;
pub use pier::{PierGeometry, PierSet, pier_chainages};
pub use plan::PlanView;
pub use primitive::{Component, Element, Primitive, Tag, ThreePointArc, View, Weight};
pub use scale::ScaleState;
pub use section::SectionView;
pub use superstructure::Superstructure;
pub use transform::{CoordinateTransformer, Target, Viewport, rotate};

use crate::log::{debug, warn};
use crate::params::{MAX_SPANS, ParameterSet};
use crate::types::BBox;

/// One semantic part of the drawing
#[enum_dispatch]
pub trait GeometryBuilder {
    /// Append this part's elements (and plan footprints) to `out`
    fn build(&self, ctx: &BuildContext<'_>, out: &mut Sketch);
}

/// The builders, in emission order
#[enum_dispatch(GeometryBuilder)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builder {
    LayoutAxes,
    CrossSectionProfile,
    Superstructure,
    PierSet,
    AbutmentPair,
    PlanView,
    SectionView,
    Annotations,
}

impl Builder {
    pub fn name(&self) -> &'static str {
        match self {
            Builder::LayoutAxes(_) => "layout axes",
            Builder::CrossSectionProfile(_) => "cross-section profile",
            Builder::Superstructure(_) => "superstructure",
            Builder::PierSet(_) => "piers",
            Builder::AbutmentPair(_) => "abutments",
            Builder::PlanView(_) => "plan",
            Builder::SectionView(_) => "section",
            Builder::Annotations(_) => "annotations",
        }
    }
}

/// Axes underneath everything, annotations on top
pub const PIPELINE: [Builder; 8] = [
    Builder::LayoutAxes(LayoutAxes),
    Builder::CrossSectionProfile(CrossSectionProfile),
    Builder::Superstructure(Superstructure),
    Builder::PierSet(PierSet),
    Builder::AbutmentPair(AbutmentPair),
    Builder::PlanView(PlanView),
    Builder::SectionView(SectionView),
    Builder::Annotations(Annotations),
];

/// A condition generation recovered from instead of failing
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    /// Key not supplied; the documented default was used
    MissingParameter { name: &'static str, default: f64 },
    /// `cos(skew)` is zero; skewed widths were drawn square
    DegenerateSkew { degrees: f64 },
    /// Scale outside the usable range; the default scale was used
    InvalidScale { name: &'static str, value: f64, fallback: f64 },
    /// More spans than a drawing lays out; only the first `used` are drawn
    SpanCountCapped { value: f64, used: usize },
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovery::MissingParameter { name, default } => {
                write!(f, "{name} not set, using {default}")
            }
            Recovery::DegenerateSkew { degrees } => {
                write!(f, "skew {degrees}° is degenerate, drawing skewed widths square")
            }
            Recovery::InvalidScale { name, value, fallback } => {
                write!(f, "{name} = {value} is not a usable scale, using {fallback}")
            }
            Recovery::SpanCountCapped { value, used } => {
                write!(f, "NSPAN = {value} is too many spans, drawing {used}")
            }
        }
    }
}

fn recoveries(params: &ParameterSet, scale: &ScaleState) -> Vec<Recovery> {
    let mut notes: Vec<Recovery> = params
        .missing_keys()
        .into_iter()
        .map(|name| Recovery::MissingParameter {
            name,
            default: params.value(name),
        })
        .collect();

    for (name, used) in [("SCALE1", scale.scale1), ("SCALE2", scale.scale2)] {
        let value = params.value(name);
        if value != used {
            notes.push(Recovery::InvalidScale {
                name,
                value,
                fallback: used,
            });
        }
    }

    let nspan = params.value("NSPAN");
    if nspan.round() > MAX_SPANS as f64 {
        warn!("NSPAN = {nspan} capped at {MAX_SPANS} spans");
        notes.push(Recovery::SpanCountCapped {
            value: nspan,
            used: MAX_SPANS,
        });
    }

    if scale.is_degenerate() {
        warn!("skew {} is degenerate; skewed widths fall back to square values", scale.skew);
        notes.push(Recovery::DegenerateSkew {
            degrees: scale.skew.raw(),
        });
    }
    notes
}

/// The complete generated drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    elements: Vec<Element>,
    notes: Vec<Recovery>,
    bounds: BBox,
    target: Target,
    units_per_paper_mm: f64,
}

impl Drawing {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn notes(&self) -> &[Recovery] {
        &self.notes
    }

    /// Bounds of every primitive's defining points
    pub fn bounds(&self) -> BBox {
        self.bounds
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Drawing units per millimetre of printed paper
    pub fn units_per_paper_mm(&self) -> f64 {
        self.units_per_paper_mm
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.elements.iter().map(|e| &e.primitive)
    }

    pub fn in_view(&self, view: View) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.tag.view == view)
    }

    pub fn of_component(&self, component: Component) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.tag.component == component)
    }

    pub fn is_finite(&self) -> bool {
        self.primitives().all(Primitive::is_finite)
    }
}

/// Generate the drawing in absolute (export) units.
pub fn generate(params: &ParameterSet) -> Drawing {
    generate_with(params, &Target::Absolute)
}

/// Generate the drawing for a specific target.
pub fn generate_with(params: &ParameterSet, target: &Target) -> Drawing {
    let ctx = BuildContext::new(params, target);
    let mut sketch = Sketch::new();

    for builder in PIPELINE {
        let before = sketch.len();
        builder.build(&ctx, &mut sketch);
        debug!("{}: {} primitives", builder.name(), sketch.len() - before);
    }

    let notes = recoveries(params, &ctx.scale);
    let elements = sketch.into_elements();
    let mut bounds = BBox::new();
    for e in &elements {
        bounds.union(&e.primitive.bbox());
    }
    debug!("generated {} primitives, {} recovery notes", elements.len(), notes.len());

    Drawing {
        elements,
        notes,
        bounds,
        target: *target,
        units_per_paper_mm: ctx.units(1.0),
    }
}
