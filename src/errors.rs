//! Error types with rich diagnostics using miette
//!
//! Parameter-file errors carry source spans so the offending line is shown.
//! Geometry generation itself never fails: missing parameters and degenerate
//! skew are recovered and reported as [`crate::draw::Recovery`] notes.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while reading a parameter file
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("malformed parameter line: {message}")]
    #[diagnostic(
        code(bridge_gad::parse::syntax),
        help("expected `<value> <NAME> [description]` or `SURVEY <chainage> <level>`")
    )]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(bridge_gad::parse::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },
}

// ============================================================================
// Parameter Errors
// ============================================================================

/// Errors raised when building a [`crate::ParameterSet`] programmatically
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("invalid value for {name}: {source}")]
    #[diagnostic(code(bridge_gad::params::invalid_value))]
    InvalidValue {
        name: String,
        #[source]
        source: NumericError,
    },

    #[error("invalid parameter name: {name:?}")]
    #[diagnostic(
        code(bridge_gad::params::invalid_name),
        help("parameter names are uppercase letters, digits and underscores")
    )]
    InvalidName { name: String },
}

// ============================================================================
// Sink Errors
// ============================================================================

/// Errors raised by the drawing sinks. Generation never produces these; they
/// pass through [`crate::Drawing::emit`] untouched.
#[derive(Error, Diagnostic, Debug)]
pub enum SinkError {
    #[error("i/o error: {0}")]
    #[diagnostic(code(bridge_gad::sink::io))]
    Io(#[from] std::io::Error),

    #[error("dxf error: {0}")]
    #[diagnostic(code(bridge_gad::sink::dxf))]
    Dxf(#[from] dxf::DxfError),

    #[error("invalid sink option `{name}`: {source}")]
    #[diagnostic(code(bridge_gad::sink::option))]
    InvalidOption {
        name: &'static str,
        #[source]
        source: NumericError,
    },
}

// ============================================================================
// Geometry Issues
// ============================================================================

/// Advisory findings from [`crate::validate::check`]. Generation draws these
/// configurations anyway; the results are visibly odd but finite.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryIssue {
    #[error("pier footing ({footing}) is narrower than the pier shaft ({shaft})")]
    #[diagnostic(code(bridge_gad::geometry::footing_narrower_than_shaft), severity(Warning))]
    FootingNarrowerThanShaft { footing: f64, shaft: f64 },

    #[error("span count must be at least one, got {value}")]
    #[diagnostic(code(bridge_gad::geometry::span_count), severity(Warning))]
    NonPositiveSpanCount { value: f64 },

    #[error("span length must be positive, got {value}")]
    #[diagnostic(code(bridge_gad::geometry::span_length), severity(Warning))]
    NonPositiveSpanLength { value: f64 },

    #[error("{name} is zero; the batter offset falls back to a vertical face")]
    #[diagnostic(code(bridge_gad::geometry::zero_batter), severity(Warning))]
    ZeroBatter { name: &'static str },

    #[error("{bottom_name} ({bottom}) is above {top_name} ({top})")]
    #[diagnostic(code(bridge_gad::geometry::inverted_levels), severity(Warning))]
    InvertedLevels {
        top_name: &'static str,
        top: f64,
        bottom_name: &'static str,
        bottom: f64,
    },

    #[error("skew of {degrees}° is degenerate; skewed widths are drawn square")]
    #[diagnostic(code(bridge_gad::geometry::degenerate_skew), severity(Warning))]
    DegenerateSkew { degrees: f64 },

    #[error("{name} must be a scale between 1:0.001 and 1:1000000, got {value}")]
    #[diagnostic(code(bridge_gad::geometry::scale), severity(Warning))]
    ScaleOutOfRange { name: &'static str, value: f64 },
}
