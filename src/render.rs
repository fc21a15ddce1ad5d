//! Scene building: the full field map as an ordered draw-command list.
//!
//! Nothing here touches a canvas context. [`build_scene`] and
//! [`build_minimap`] are pure functions of engine state producing
//! [`DrawCommand`]s in back-to-front order; [`crate::surface`] replays them
//! against the real 2D context. Calling a builder twice with identical
//! arguments yields identical command lists.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, CanvasSize, Point, Projection};
use crate::config::MapConfig;
use crate::consts::{GRID_MIN_CELL_PX, HIGHLIGHT_RADIUS_PX, POINT_RADIUS_PX};
use crate::field::FieldStore;
use crate::input::SelectionState;
use crate::palette::{self, ColorMode};

/// Background fill of the main view.
const BACKGROUND: &str = "#F7F4EF";
/// Grid line color.
const GRID_LINE: &str = "#E3DDD2";
/// Tower marker and label ink.
const INK: &str = "#1F1A17";
/// Selection ring color.
const SELECTED_RING: &str = "#1E90FF";
/// Search-match ring color.
const SEARCH_RING: &str = "#D97B29";
/// Minimap background fill.
const MINIMAP_BACKGROUND: &str = "#EFEAE2";
/// Tower marker arm length in screen pixels.
const MARKER_ARM_PX: f64 = 6.0;
/// Minimap mirror dot radius in pixels.
const MINIMAP_POINT_RADIUS_PX: f64 = 1.0;
/// Dash segment length for the minimap viewport rectangle.
const VIEWPORT_DASH_PX: f64 = 4.0;
/// Label font size in pixels.
const LABEL_FONT_PX: f64 = 12.0;
/// Edge inset for the scale bar and labels.
const HUD_INSET_PX: f64 = 16.0;

/// Horizontal text anchoring for [`DrawCommand::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` keyword.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// One drawing primitive, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface with `color`.
    Clear { color: &'static str },
    /// Stroke a line segment.
    Line { from: Point, to: Point, color: &'static str, width: f64 },
    /// Fill and/or stroke a circle. `stroke` carries `(color, line width)`.
    Circle {
        center: Point,
        radius: f64,
        fill: Option<&'static str>,
        stroke: Option<(&'static str, f64)>,
    },
    /// Fill and/or stroke an axis-aligned rectangle from its top-left corner.
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Option<&'static str>,
        stroke: Option<(&'static str, f64)>,
        dash_px: Option<f64>,
    },
    /// Fill a single line of text.
    Text {
        pos: Point,
        text: String,
        color: &'static str,
        size_px: f64,
        align: TextAlign,
    },
}

/// Build the main scene, back to front: background, grid, tower marker,
/// mirrors, highlight rings, scale bar and zoom label.
///
/// An empty store is a valid scene (grid, marker and HUD only). Mirrors
/// outside the canvas plus the cull margin are skipped before any command is
/// emitted for them.
#[must_use]
pub fn build_scene(
    store: &FieldStore,
    camera: Camera,
    size: CanvasSize,
    selection: &SelectionState,
    mode: ColorMode,
    config: &MapConfig,
) -> Vec<DrawCommand> {
    let projection = Projection::new(camera, config.bounds, size, config.margin_factor);
    let mut scene = Vec::with_capacity(store.len() + 32);

    scene.push(DrawCommand::Clear { color: BACKGROUND });
    push_grid(&mut scene, &projection, size, config.grid_spacing_m);
    push_tower_marker(&mut scene, &projection);
    push_points(&mut scene, store, &projection, size, mode, config.cull_margin_px);
    push_highlights(&mut scene, store, &projection, selection);
    push_hud(&mut scene, &projection, camera, size, config.scale_bar_max_px);

    scene
}

/// Build the minimap scene: full field at a fixed fit, every mirror as a
/// small dot in the same palette as the main view, and the main viewport's
/// visible world extent as a dashed rectangle.
///
/// Both the mirror colors and the viewport rectangle derive from the same
/// state the main scene uses, so the two views cannot drift apart.
#[must_use]
pub fn build_minimap(
    store: &FieldStore,
    camera: Camera,
    main_size: CanvasSize,
    mode: ColorMode,
    config: &MapConfig,
) -> Vec<DrawCommand> {
    let mini_size = config.minimap_size;
    let mini = Projection::new(Camera::default(), config.bounds, mini_size, config.margin_factor);
    let mut scene = Vec::with_capacity(store.len() + 8);

    scene.push(DrawCommand::Clear { color: MINIMAP_BACKGROUND });

    for point in store.points() {
        scene.push(DrawCommand::Circle {
            center: mini.world_to_screen(Point::new(point.x, point.y)),
            radius: MINIMAP_POINT_RADIUS_PX,
            fill: Some(palette::point_color(mode, point)),
            stroke: None,
        });
    }

    // Main viewport's visible world extent, in minimap pixels.
    let main = Projection::new(camera, config.bounds, main_size, config.margin_factor);
    let visible = main.visible_extent(main_size);
    let top_left = mini.world_to_screen(Point::new(visible.x_min, visible.y_max));
    let bottom_right = mini.world_to_screen(Point::new(visible.x_max, visible.y_min));
    scene.push(DrawCommand::Rect {
        origin: top_left,
        width: bottom_right.x - top_left.x,
        height: bottom_right.y - top_left.y,
        fill: None,
        stroke: Some((SELECTED_RING, 1.0)),
        dash_px: Some(VIEWPORT_DASH_PX),
    });

    // Frame around the whole minimap.
    scene.push(DrawCommand::Rect {
        origin: Point::new(0.5, 0.5),
        width: mini_size.width - 1.0,
        height: mini_size.height - 1.0,
        fill: None,
        stroke: Some((INK, 1.0)),
        dash_px: None,
    });

    scene
}

// =============================================================
// Main-scene layers
// =============================================================

fn push_grid(scene: &mut Vec<DrawCommand>, projection: &Projection, size: CanvasSize, spacing_m: f64) {
    let cell_px = spacing_m * projection.pixels_per_meter();
    if cell_px < GRID_MIN_CELL_PX {
        return;
    }

    let visible = projection.visible_extent(size);

    let first_col = (visible.x_min / spacing_m).floor() as i64;
    let last_col = (visible.x_max / spacing_m).ceil() as i64;
    for col in first_col..=last_col {
        let sx = projection.world_to_screen(Point::new(col as f64 * spacing_m, 0.0)).x;
        scene.push(DrawCommand::Line {
            from: Point::new(sx, 0.0),
            to: Point::new(sx, size.height),
            color: GRID_LINE,
            width: 1.0,
        });
    }

    let first_row = (visible.y_min / spacing_m).floor() as i64;
    let last_row = (visible.y_max / spacing_m).ceil() as i64;
    for row in first_row..=last_row {
        let sy = projection.world_to_screen(Point::new(0.0, row as f64 * spacing_m)).y;
        scene.push(DrawCommand::Line {
            from: Point::new(0.0, sy),
            to: Point::new(size.width, sy),
            color: GRID_LINE,
            width: 1.0,
        });
    }
}

fn push_tower_marker(scene: &mut Vec<DrawCommand>, projection: &Projection) {
    let origin = projection.world_to_screen(Point::new(0.0, 0.0));
    scene.push(DrawCommand::Line {
        from: Point::new(origin.x - MARKER_ARM_PX, origin.y),
        to: Point::new(origin.x + MARKER_ARM_PX, origin.y),
        color: INK,
        width: 1.5,
    });
    scene.push(DrawCommand::Line {
        from: Point::new(origin.x, origin.y - MARKER_ARM_PX),
        to: Point::new(origin.x, origin.y + MARKER_ARM_PX),
        color: INK,
        width: 1.5,
    });
    scene.push(DrawCommand::Circle {
        center: origin,
        radius: MARKER_ARM_PX * 0.5,
        fill: None,
        stroke: Some((INK, 1.5)),
    });
}

fn push_points(
    scene: &mut Vec<DrawCommand>,
    store: &FieldStore,
    projection: &Projection,
    size: CanvasSize,
    mode: ColorMode,
    cull_margin_px: f64,
) {
    for point in store.points() {
        let screen = projection.world_to_screen(Point::new(point.x, point.y));
        if !on_screen(screen, size, cull_margin_px) {
            continue;
        }
        scene.push(DrawCommand::Circle {
            center: screen,
            radius: POINT_RADIUS_PX,
            fill: Some(palette::point_color(mode, point)),
            stroke: None,
        });
    }
}

fn push_highlights(
    scene: &mut Vec<DrawCommand>,
    store: &FieldStore,
    projection: &Projection,
    selection: &SelectionState,
) {
    // Selected last so it occludes the other rings on the same mirror.
    let rings = [
        (selection.search_match.as_deref(), SEARCH_RING, 1.5),
        (selection.hovered.as_deref(), INK, 1.0),
        (selection.selected.as_deref(), SELECTED_RING, 2.0),
    ];
    for (id, color, width) in rings {
        let Some(point) = id.and_then(|id| store.get(id)) else {
            continue;
        };
        scene.push(DrawCommand::Circle {
            center: projection.world_to_screen(Point::new(point.x, point.y)),
            radius: HIGHLIGHT_RADIUS_PX,
            fill: None,
            stroke: Some((color, width)),
        });
    }
}

fn push_hud(
    scene: &mut Vec<DrawCommand>,
    projection: &Projection,
    camera: Camera,
    size: CanvasSize,
    scale_bar_max_px: f64,
) {
    let y = size.height - HUD_INSET_PX;

    let length_m = scale_bar_length_m(projection.pixels_per_meter(), scale_bar_max_px);
    if length_m > 0.0 {
        let length_px = length_m * projection.pixels_per_meter();
        let x0 = HUD_INSET_PX;
        let x1 = x0 + length_px;
        scene.push(DrawCommand::Line {
            from: Point::new(x0, y),
            to: Point::new(x1, y),
            color: INK,
            width: 1.5,
        });
        for x in [x0, x1] {
            scene.push(DrawCommand::Line {
                from: Point::new(x, y - 4.0),
                to: Point::new(x, y + 4.0),
                color: INK,
                width: 1.5,
            });
        }
        scene.push(DrawCommand::Text {
            pos: Point::new(x0 + length_px * 0.5, y - 8.0),
            text: format_length(length_m),
            color: INK,
            size_px: LABEL_FONT_PX,
            align: TextAlign::Center,
        });
    }

    // Zoom label from the same camera value the projection was built with.
    scene.push(DrawCommand::Text {
        pos: Point::new(size.width - HUD_INSET_PX, y),
        text: format_zoom(camera.zoom),
        color: INK,
        size_px: LABEL_FONT_PX,
        align: TextAlign::Right,
    });
}

// =============================================================
// Helpers
// =============================================================

fn on_screen(screen: Point, size: CanvasSize, margin: f64) -> bool {
    screen.x >= -margin
        && screen.x <= size.width + margin
        && screen.y >= -margin
        && screen.y <= size.height + margin
}

/// Longest 1-2-5 series length (meters) whose on-screen width fits `max_px`.
/// Returns 0.0 when even the shortest candidate is too long.
fn scale_bar_length_m(pixels_per_meter: f64, max_px: f64) -> f64 {
    let mut best = 0.0;
    for exponent in -2..=4 {
        for mantissa in [1.0, 2.0, 5.0] {
            let length = mantissa * 10f64.powi(exponent);
            if length * pixels_per_meter <= max_px && length > best {
                best = length;
            }
        }
    }
    best
}

// Float `Display` is already minimal ("200", "0.5"), so no digit trimming.
fn format_length(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{} km", meters / 1000.0)
    } else {
        format!("{meters} m")
    }
}

fn format_zoom(zoom: f64) -> String {
    format!("{:.0}%", zoom * 100.0)
}
