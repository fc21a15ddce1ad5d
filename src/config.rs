//! Runtime-tunable map parameters.
//!
//! The interaction constants (zoom limits, pick radius, wheel factors, …)
//! were hand-tuned in the original dashboard; here they are surfaced as one
//! deserializable struct so hosts can override any subset without a rebuild.
//! `Default` reproduces the tuned values from [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::camera::{Bounds, CanvasSize};
use crate::consts;

/// Map parameters. Every field has a default; hosts override per-field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Lowest allowed zoom factor.
    pub zoom_min: f64,
    /// Highest allowed zoom factor.
    pub zoom_max: f64,
    /// Multiplier per wheel notch when zooming in.
    pub zoom_in_factor: f64,
    /// Multiplier per wheel notch when zooming out.
    pub zoom_out_factor: f64,
    /// Screen-space pick radius in pixels.
    pub hit_radius_px: f64,
    /// Maximum press-to-release travel that still counts as a click.
    pub click_slop_px: f64,
    /// Fraction of the canvas kept as margin when fitting the bounds.
    pub margin_factor: f64,
    /// Grid spacing in world meters.
    pub grid_spacing_m: f64,
    /// Off-screen cull margin in pixels.
    pub cull_margin_px: f64,
    /// Longest the scale bar may grow in pixels.
    pub scale_bar_max_px: f64,
    /// Minimap canvas size in pixels.
    pub minimap_size: CanvasSize,
    /// Fixed world-space extent of the field.
    pub bounds: Bounds,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom_min: consts::ZOOM_MIN,
            zoom_max: consts::ZOOM_MAX,
            zoom_in_factor: consts::ZOOM_IN_FACTOR,
            zoom_out_factor: consts::ZOOM_OUT_FACTOR,
            hit_radius_px: consts::HIT_RADIUS_PX,
            click_slop_px: consts::CLICK_SLOP_PX,
            margin_factor: consts::MARGIN_FACTOR,
            grid_spacing_m: consts::GRID_SPACING_M,
            cull_margin_px: consts::CULL_MARGIN_PX,
            scale_bar_max_px: consts::SCALE_BAR_MAX_PX,
            minimap_size: CanvasSize::new(consts::MINIMAP_WIDTH_PX, consts::MINIMAP_HEIGHT_PX),
            bounds: Bounds::new(
                -consts::FIELD_HALF_WIDTH_M,
                consts::FIELD_HALF_WIDTH_M,
                -consts::FIELD_HALF_HEIGHT_M,
                consts::FIELD_HALF_HEIGHT_M,
            ),
        }
    }
}
