//! Color tables for the two point-coloring modes.
//!
//! Both the main scene and the minimap resolve colors through these tables,
//! so the two views can never disagree on what a zone or a cleanliness band
//! looks like. Adding a mode means adding a table and a [`ColorMode`]
//! variant, not touching the renderer.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::{Deserialize, Serialize};

use crate::field::{FieldPoint, Zone};

/// Which attribute drives point coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Continuous cleanliness value bucketed into fixed bands.
    #[default]
    Cleanliness,
    /// Discrete zone membership.
    Zone,
}

/// One row of the cleanliness scale: values at or above `min` take `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanlinessBand {
    pub min: f64,
    pub color: &'static str,
}

/// Cleanliness breakpoints, scanned top-down; the last band catches the rest.
pub const CLEANLINESS_BANDS: [CleanlinessBand; 4] = [
    CleanlinessBand { min: 95.0, color: "#2E9E4F" },
    CleanlinessBand { min: 85.0, color: "#A3C64C" },
    CleanlinessBand { min: 75.0, color: "#E0A832" },
    CleanlinessBand { min: f64::NEG_INFINITY, color: "#D94B4B" },
];

/// Fixed zone colors.
pub const ZONE_COLORS: [(Zone, &str); 4] = [
    (Zone::A, "#4C8BD9"),
    (Zone::B, "#D9A44C"),
    (Zone::C, "#7BC47F"),
    (Zone::D, "#B06FC0"),
];

/// Color for a cleanliness value.
#[must_use]
pub fn cleanliness_color(value: f64) -> &'static str {
    for band in &CLEANLINESS_BANDS {
        if value >= band.min {
            return band.color;
        }
    }
    // NaN falls through every band; paint it like the worst one.
    CLEANLINESS_BANDS[CLEANLINESS_BANDS.len() - 1].color
}

/// Color for a zone.
#[must_use]
pub fn zone_color(zone: Zone) -> &'static str {
    for &(z, color) in &ZONE_COLORS {
        if z == zone {
            return color;
        }
    }
    ZONE_COLORS[0].1
}

/// Resolve a point's fill color under the active mode.
#[must_use]
pub fn point_color(mode: ColorMode, point: &FieldPoint) -> &'static str {
    match mode {
        ColorMode::Cleanliness => cleanliness_color(point.cleanliness),
        ColorMode::Zone => zone_color(point.zone),
    }
}
