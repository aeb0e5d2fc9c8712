//! General-arrangement drawings of beam/slab bridges.
//!
//! A [`ParameterSet`] (span count and length, skew, levels, pier and
//! abutment dimensions, scales) goes in; an ordered [`Drawing`] of tagged
//! lines, polylines, arcs and text comes out, covering the elevation with
//! its level/chainage grid, the plan and a deck cross-section. Any
//! [`DrawingSink`] can then consume the same drawing: SVG, DXF, or your own.
//!
//! ```no_run
//! use bridge_gad::{DrawingSink, generate, parse_params};
//! use bridge_gad::sink::SvgSink;
//!
//! let params = parse_params("3 NSPAN\n12.5 SPAN1\n15 SKEW\n")?;
//! let drawing = generate(&params);
//! let mut svg = SvgSink::for_drawing(&drawing);
//! let Ok(()) = drawing.emit(&mut svg);
//! std::fs::write("bridge.svg", svg.finish())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod draw;
pub mod errors;
pub mod input;
pub mod log;
pub mod params;
pub mod sink;
pub mod types;
pub mod validate;

pub use draw::{Component, Drawing, Element, Primitive, Recovery, Tag, Target, View, Viewport, Weight, generate, generate_with};
pub use errors::{GeometryIssue, ParamError, ParseError, SinkError};
pub use input::{parse_named, parse_params};
pub use params::{ParameterSet, SurveyPoint};
pub use sink::DrawingSink;
pub use types::{Degrees, Point2D};
