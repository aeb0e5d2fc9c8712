//! The parameter set: named scalar engineering values plus the river-bed
//! survey, with a documented defaults table.

use std::collections::BTreeMap;

use crate::errors::ParamError;
use crate::log::debug;
use crate::types::check_finite;

/// Most spans a drawing will lay out; larger `NSPAN` values are capped
pub const MAX_SPANS: usize = 200;

/// One (chainage, bed level) point of the cross-section survey
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveyPoint {
    pub chainage: f64,
    pub level: f64,
}

impl SurveyPoint {
    pub fn new(chainage: f64, level: f64) -> Self {
        Self { chainage, level }
    }
}

/// How a missing key is resolved
#[derive(Clone, Copy)]
pub enum DefaultValue {
    /// A fixed number
    Fixed(f64),
    /// Computed from other (resolved) parameters
    Derived(fn(&ParameterSet) -> f64),
    /// Falls back to the resolved value of another key
    SameAs(&'static str),
}

impl std::fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Fixed(v) => write!(f, "Fixed({v})"),
            DefaultValue::Derived(_) => write!(f, "Derived"),
            DefaultValue::SameAs(key) => write!(f, "SameAs({key})"),
        }
    }
}

/// One row of the defaults table
#[derive(Debug, Clone, Copy)]
pub struct ParamDefault {
    pub name: &'static str,
    pub value: DefaultValue,
    pub doc: &'static str,
}

macro_rules! defaults_table {
    ($($name:ident => $kind:ident($value:expr), $doc:literal;)*) => {
        /// Every parameter the geometry builders read, with its fallback.
        pub const DEFAULTS: &[ParamDefault] = &[
            $(
                ParamDefault {
                    name: stringify!($name),
                    value: DefaultValue::$kind($value),
                    doc: $doc,
                },
            )*
        ];
    };
}

defaults_table! {
    // Scales and grid
    SCALE1  => Fixed(186.0),  "elevation and plan scale (1:n)";
    SCALE2  => Fixed(100.0),  "section scale (1:n)";
    SKEW    => Fixed(0.0),    "skew angle in degrees";
    DATUM   => Fixed(100.0),  "datum level";
    TOPRL   => Fixed(115.0),  "top level of the level axis";
    LEFT    => Fixed(0.0),    "left chainage of the grid";
    RIGHT   => Derived(derive_right), "right chainage of the grid";
    XINCR   => Fixed(10.0),   "chainage grid increment";
    YINCR   => Fixed(1.0),    "level grid increment";
    // Spans and deck
    NSPAN   => Fixed(3.0),    "number of spans";
    SPAN1   => Fixed(12.0),   "span length";
    LBRIDGE => Derived(derive_lbridge), "overall bridge length";
    ABTL    => Fixed(0.0),    "chainage of the left abutment";
    RTL     => Fixed(110.98), "road top level";
    SOFL    => Fixed(109.0),  "deck soffit level";
    LASLAB  => Fixed(3.5),    "approach slab length";
    APTHK   => Fixed(0.38),   "approach slab thickness";
    WCTH    => Fixed(0.08),   "wearing course thickness";
    SLBTHC  => Fixed(0.9),    "slab thickness at centre";
    SLBTHE  => Fixed(0.75),   "slab thickness at edge";
    SLBTHT  => Fixed(0.75),   "slab thickness at tip";
    CCBR    => Fixed(11.1),   "clear carriageway width";
    KERBW   => Fixed(0.23),   "kerb width";
    KERBD   => Fixed(0.23),   "kerb depth";
    // Piers
    CAPT    => Fixed(110.0),  "pier cap top level";
    CAPB    => Fixed(109.4),  "pier cap bottom level";
    CAPW    => SameAs("PIERTW"), "pier cap width";
    PIERTW  => Fixed(1.2),    "pier shaft top width";
    BATTR   => Fixed(10.0),   "pier batter (rise per unit run)";
    PIERST  => Fixed(12.0),   "pier length across the bridge";
    FUTRL   => Fixed(100.0),  "pier founding level";
    FUTD    => Fixed(1.0),    "pier footing depth";
    FUTW    => Fixed(4.5),    "pier footing width";
    FUTL    => Fixed(12.0),   "pier footing length";
    // Left abutment
    ALCW    => Fixed(0.75),   "left abutment cap width";
    ALCD    => Fixed(1.2),    "left abutment cap depth";
    ALFB    => Fixed(10.0),   "left abutment front batter";
    ALFBL   => Fixed(101.0),  "left abutment front batter bottom level";
    ALTB    => Fixed(10.0),   "left abutment toe batter";
    ALTBL   => Fixed(101.0),  "left abutment toe batter bottom level";
    ALFO    => Fixed(1.5),    "left abutment footing offset";
    ALFD    => Fixed(1.0),    "left abutment footing depth";
    ALBB    => Fixed(3.0),    "left abutment back batter";
    ALBBL   => Fixed(101.0),  "left abutment back batter bottom level";
    // Right abutment
    ARCW    => SameAs("ALCW"),  "right abutment cap width";
    ARCD    => SameAs("ALCD"),  "right abutment cap depth";
    ARFB    => SameAs("ALFB"),  "right abutment front batter";
    ARFBL   => SameAs("ALFBL"), "right abutment front batter bottom level";
    ARTB    => SameAs("ALTB"),  "right abutment toe batter";
    ARTBL   => SameAs("ALTBL"), "right abutment toe batter bottom level";
    ARFO    => SameAs("ALFO"),  "right abutment footing offset";
    ARFD    => SameAs("ALFD"),  "right abutment footing depth";
    ARBB    => SameAs("ALBB"),  "right abutment back batter";
    ARBBL   => SameAs("ALBBL"), "right abutment back batter bottom level";
    DWTH    => Fixed(0.3),    "dirt wall thickness";
}

fn derive_lbridge(p: &ParameterSet) -> f64 {
    p.spans() as f64 * p.value("SPAN1")
}

fn derive_right(p: &ParameterSet) -> f64 {
    p.value("ABTL") + p.value("LBRIDGE") + 2.0 * p.value("LASLAB") + 14.0
}

/// Look up the defaults-table row for a key
pub fn default_for(name: &str) -> Option<&'static ParamDefault> {
    DEFAULTS.iter().find(|d| d.name == name)
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Immutable-once-built mapping of engineering variables.
///
/// Unknown keys are kept but never read by the builders. Reads of a key the
/// caller did not set resolve through [`DEFAULTS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
    survey: Vec<SurveyPoint>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs. Later duplicates win.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.insert(name, value)?;
        }
        Ok(params)
    }

    /// Builder-style [`ParameterSet::insert`]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Result<Self, ParamError> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Set a variable, rejecting NaN/infinite values and malformed names.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Result<Option<f64>, ParamError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ParamError::InvalidName { name });
        }
        let value = match check_finite(value) {
            Ok(v) => v,
            Err(source) => return Err(ParamError::InvalidValue { name, source }),
        };
        Ok(self.values.insert(name, value))
    }

    /// Append a survey point (order is preserved)
    pub fn push_survey(&mut self, point: SurveyPoint) -> Result<(), ParamError> {
        for (name, v) in [("SURVEY chainage", point.chainage), ("SURVEY level", point.level)] {
            if let Err(source) = check_finite(v) {
                return Err(ParamError::InvalidValue {
                    name: name.to_string(),
                    source,
                });
            }
        }
        self.survey.push(point);
        Ok(())
    }

    pub fn survey(&self) -> &[SurveyPoint] {
        &self.survey
    }

    /// The explicitly set value, without defaulting
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Explicitly set variables, in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The resolved value: explicit, else the documented default.
    /// Names outside the defaults table resolve to zero.
    pub fn value(&self, name: &str) -> f64 {
        if let Some(v) = self.get(name) {
            return v;
        }
        match default_for(name).map(|d| d.value) {
            Some(DefaultValue::Fixed(v)) => v,
            Some(DefaultValue::Derived(f)) => f(self),
            Some(DefaultValue::SameAs(other)) => self.value(other),
            None => {
                debug!("unknown parameter {name} read, using 0");
                0.0
            }
        }
    }

    /// `NSPAN` as a count: rounded, never negative, at most [`MAX_SPANS`]
    pub fn spans(&self) -> usize {
        let n = self.value("NSPAN").round();
        if n > 0.0 { n.min(MAX_SPANS as f64) as usize } else { 0 }
    }

    /// Defaults-table keys the caller did not set, in table order
    pub fn missing_keys(&self) -> Vec<&'static str> {
        DEFAULTS
            .iter()
            .filter(|d| !self.is_set(d.name))
            .map(|d| d.name)
            .collect()
    }
}
