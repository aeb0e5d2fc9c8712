//! Drawing constants.
//!
//! Values in `Paper` are millimetres on the printed sheet at the elevation
//! scale; [`super::ScaleState::paper`] turns them into metres. Values in
//! `Metres` are real-world dimensions.

type Paper = f64;
type Metres = f64;

/// Absolute (export) drawing units per metre
pub const UNITS_PER_METRE: f64 = 1000.0;
/// `|cos(skew)|` below this is treated as a 90° skew
pub const DEGENERATE_COS: f64 = 1e-9;
/// Usable range of SCALE1 / SCALE2 (the `n` of 1:n); anything outside
/// falls back to the table default
pub const MIN_SCALE: f64 = 1e-3;
pub const MAX_SCALE: f64 = 1e6;

// Screen viewport
pub const SCREEN_HEIGHT: f64 = 800.0;
pub const SCREEN_MARGIN: f64 = 50.0;
pub const SCREEN_PIXELS_PER_METRE: f64 = 50.0;

// Layout grid
pub const BAND: Paper = 20.0;
pub const LEVEL_TICK: Paper = 2.5;
pub const LEVEL_LABEL_INSET: Paper = 13.0;
pub const LEVEL_LABEL_DROP: Paper = 1.0;
pub const BAND_CAPTION_INSET: Paper = 25.0;
pub const CHAINAGE_TICK_BOTTOM: Paper = 2.0 * BAND;
pub const CHAINAGE_TICK_TOP: Paper = CHAINAGE_TICK_BOTTOM - 2.0;
pub const CHAINAGE_LABEL: Paper = CHAINAGE_TICK_BOTTOM - 4.0;
pub const CHAINAGE_LABEL_NUDGE: Paper = 1.0;
pub const LABEL_HEIGHT: Paper = 2.0;
pub const CAPTION_HEIGHT: Paper = 2.5;

// Cross-section survey
pub const SURVEY_LEVEL_LABEL: Paper = BAND - 4.0;
pub const SURVEY_LABEL_NUDGE: Paper = 0.9;
pub const SURVEY_TICK: Paper = 2.0;

// Superstructure
pub const DECK_CLEARANCE: Metres = 0.025;
pub const EXPANSION_JOINT: Metres = 0.025;

// Support labels
pub const PIER_LABEL_DROP: Paper = 5.0;
pub const PIER_LABEL_SHIFT: Paper = 2.0;

// Plan and section bands
pub const PLAN_GAP: Paper = 20.0;
pub const SECTION_GAP: Paper = 30.0;

// Annotations
pub const DIMENSION_RISE: Paper = 8.0;
pub const DIMENSION_TICK: Paper = 1.5;
pub const DIMENSION_TEXT_LIFT: Paper = 1.0;
pub const VIEW_CAPTION_DROP: Paper = 6.0;
pub const TITLE_DROP: Paper = 15.0;
pub const TITLE_HEIGHT: Paper = 5.0;
pub const SUBTITLE_GAP: Paper = 8.0;

/// Segments used when a sink flattens a three-point arc
pub const ARC_SEGMENTS: usize = 16;

// Section view
pub const CENTRE_LINE_OVERRUN: Metres = 0.3;
