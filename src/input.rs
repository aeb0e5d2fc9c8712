//! Parameter-file loader.
//!
//! Reads the three-column `value NAME description` layout plus `SURVEY`
//! lines into a [`ParameterSet`]. The geometry kernel never calls this.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::{ParseError, SourceContext};
use crate::log::warn;
use crate::params::{ParameterSet, SurveyPoint};

#[derive(Parser)]
#[grammar = "params.pest"]
struct ParamFileParser;

/// Parse a parameter file held in memory.
pub fn parse_params(source: &str) -> Result<ParameterSet, ParseError> {
    parse_named("<input>", source)
}

/// Parse a parameter file, naming it in diagnostics.
pub fn parse_named(name: &str, source: &str) -> Result<ParameterSet, ParseError> {
    let ctx = SourceContext::new(name, source);
    let pairs = ParamFileParser::parse(Rule::file, source).map_err(|e| syntax_error(&ctx, e))?;

    let mut params = ParameterSet::new();
    for file in pairs {
        for line in file.into_inner() {
            if line.as_rule() != Rule::line {
                continue;
            }
            for item in line.into_inner() {
                match item.as_rule() {
                    Rule::entry => read_entry(&ctx, item, &mut params)?,
                    Rule::survey => read_survey(&ctx, item, &mut params)?,
                    _ => {}
                }
            }
        }
    }
    Ok(params)
}

fn read_entry(ctx: &SourceContext, pair: Pair<Rule>, params: &mut ParameterSet) -> Result<(), ParseError> {
    let mut value = None;
    let mut name = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => value = Some(parse_number(ctx, &inner)?),
            Rule::name => name = Some(inner.as_str()),
            _ => {}
        }
    }
    if let (Some(value), Some(name)) = (value, name) {
        // finite and well-formed by construction of the grammar
        match params.insert(name, value) {
            Ok(Some(previous)) if previous != value => {
                warn!("{name} given twice ({previous} then {value}); keeping {value}");
            }
            _ => {}
        }
    }
    Ok(())
}

fn read_survey(ctx: &SourceContext, pair: Pair<Rule>, params: &mut ParameterSet) -> Result<(), ParseError> {
    let span = pair.as_span();
    let numbers = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| parse_number(ctx, &p))
        .collect::<Result<Vec<_>, _>>()?;
    match numbers[..] {
        [chainage, level] => {
            // both numbers already passed the finiteness check
            let _ = params.push_survey(SurveyPoint::new(chainage, level));
            Ok(())
        }
        _ => Err(ParseError::Syntax {
            message: "SURVEY needs a chainage and a level".to_string(),
            src: ctx.named_source(),
            span: (span.start(), span.end() - span.start()).into(),
        }),
    }
}

fn parse_number(ctx: &SourceContext, pair: &Pair<Rule>) -> Result<f64, ParseError> {
    let text = pair.as_str();
    let span = pair.as_span();
    let invalid = |message: String| ParseError::InvalidNumber {
        message,
        src: ctx.named_source(),
        span: (span.start(), span.end() - span.start()).into(),
    };
    let value: f64 = text.parse().map_err(|e| invalid(format!("{e}")))?;
    if !value.is_finite() {
        return Err(invalid(format!("{text} is out of range")));
    }
    Ok(value)
}

fn syntax_error(ctx: &SourceContext, err: pest::error::Error<Rule>) -> ParseError {
    let (start, end) = match err.location {
        pest::error::InputLocation::Pos(p) => (p, p),
        pest::error::InputLocation::Span((s, e)) => (s, e),
    };
    ParseError::Syntax {
        message: err.variant.message().into_owned(),
        src: ctx.named_source(),
        span: (start, end.saturating_sub(start)).into(),
    }
}
