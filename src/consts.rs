//! Built-in defaults for the map configuration.
//!
//! Every value here is a tuned default, not a hard limit; hosts override them
//! through [`crate::config::MapConfig`].

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest allowed zoom factor (whole field plus margin visible).
pub const ZOOM_MIN: f64 = 0.25;

/// Highest allowed zoom factor.
pub const ZOOM_MAX: f64 = 8.0;

/// Multiplier applied per wheel notch when zooming in.
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Multiplier applied per wheel notch when zooming out.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Hit-testing / gestures ──────────────────────────────────────

/// Screen-space pick radius in pixels, constant across zoom levels.
pub const HIT_RADIUS_PX: f64 = 8.0;

/// Maximum pointer travel between press and release that still counts as a click.
pub const CLICK_SLOP_PX: f64 = 4.0;

// ── Layout / rendering ──────────────────────────────────────────

/// Fraction of the canvas left as breathing room when fitting the field bounds.
pub const MARGIN_FACTOR: f64 = 0.9;

/// Grid line spacing in world meters.
pub const GRID_SPACING_M: f64 = 100.0;

/// The grid is dropped once a cell would collapse below this many pixels.
pub const GRID_MIN_CELL_PX: f64 = 6.0;

/// Off-screen cull margin in pixels for point drawing.
pub const CULL_MARGIN_PX: f64 = 20.0;

/// Mirror dot radius in screen pixels.
pub const POINT_RADIUS_PX: f64 = 2.5;

/// Highlight ring radius in screen pixels (selection, hover, search).
pub const HIGHLIGHT_RADIUS_PX: f64 = 7.0;

/// Longest the scale bar may grow before stepping down to a shorter round length.
pub const SCALE_BAR_MAX_PX: f64 = 120.0;

// ── Minimap ─────────────────────────────────────────────────────

/// Minimap canvas width in pixels.
pub const MINIMAP_WIDTH_PX: f64 = 160.0;

/// Minimap canvas height in pixels.
pub const MINIMAP_HEIGHT_PX: f64 = 120.0;

// ── Field extent ────────────────────────────────────────────────

/// Default field half-width in meters (tower at the origin).
pub const FIELD_HALF_WIDTH_M: f64 = 800.0;

/// Default field half-height in meters (tower at the origin).
pub const FIELD_HALF_HEIGHT_M: f64 = 800.0;
