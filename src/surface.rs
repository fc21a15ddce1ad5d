//! Draw-command execution: replays a scene against a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives the command lists built
//! by [`crate::render`] and produces pixels — it holds no state and makes no
//! drawing decisions of its own.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::CanvasSize;
use crate::render::DrawCommand;

/// Obtain the 2D context of a canvas element.
///
/// # Errors
///
/// Returns `Err` when the canvas has no 2D context or the context object has
/// an unexpected type.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?;
    ctx.dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has unexpected type"))
}

/// Replay `commands` onto `ctx`.
///
/// `size` is in CSS pixels; `dpr` is the device pixel ratio applied as the
/// base transform so commands stay in CSS pixel coordinates.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn execute(
    ctx: &CanvasRenderingContext2d,
    size: CanvasSize,
    dpr: f64,
    commands: &[DrawCommand],
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

    for command in commands {
        match command {
            DrawCommand::Clear { color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(0.0, 0.0, size.width, size.height);
            }
            DrawCommand::Line { from, to, color, width } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width);
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
            }
            DrawCommand::Circle { center, radius, fill, stroke } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI)?;
                if let Some(color) = fill {
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                if let Some((color, width)) = stroke {
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width);
                    ctx.stroke();
                }
            }
            DrawCommand::Rect { origin, width, height, fill, stroke, dash_px } => {
                if let Some(color) = fill {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(origin.x, origin.y, *width, *height);
                }
                if let Some((color, line_width)) = stroke {
                    if let Some(dash) = dash_px {
                        ctx.set_line_dash(&dash_array(*dash))?;
                    }
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*line_width);
                    ctx.stroke_rect(origin.x, origin.y, *width, *height);
                    if dash_px.is_some() {
                        ctx.set_line_dash(&js_sys::Array::new())?;
                    }
                }
            }
            DrawCommand::Text { pos, text, color, size_px, align } => {
                ctx.set_fill_style_str(color);
                ctx.set_text_align(align.css());
                ctx.set_text_baseline("alphabetic");
                ctx.set_font(&format!("{size_px}px sans-serif"));
                ctx.fill_text(text, pos.x, pos.y)?;
            }
        }
    }

    Ok(())
}

fn dash_array(dash_px: f64) -> js_sys::Array {
    let array = js_sys::Array::new();
    array.push(&dash_px.into());
    array.push(&dash_px.into());
    array
}
