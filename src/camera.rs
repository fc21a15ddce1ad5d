//! Pan/zoom camera and the world/screen projection.
//!
//! World space is in meters with the tower at the origin and Y increasing
//! north ("up"). Screen space is in CSS pixels with Y increasing down. The
//! [`Projection`] bakes the camera, the field bounds, and the canvas size
//! into one frame's transform; both conversions are pure functions of it.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::Deserialize;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas center point.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Fixed world-space extent of the field, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether a world point lies within the extent (edges inclusive).
    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
}

/// Camera state for pan/zoom over the field map.
///
/// `offset_x` / `offset_y` are in CSS pixels, relative to the centered,
/// bounds-fitted base view. `zoom` is a scale factor (1.0 = fitted view).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl Camera {
    /// Multiply `zoom` by `factor`, clamped to `[min, max]`.
    ///
    /// Returns the clamped zoom value without applying it, so callers can
    /// decide how to reposition the offset first.
    #[must_use]
    pub fn zoom_clamped(&self, factor: f64, min: f64, max: f64) -> f64 {
        (self.zoom * factor).clamp(min, max)
    }

    /// Set `zoom` to `new_zoom`, adjusting the offset so the world point
    /// under `cursor` stays at the same screen position.
    ///
    /// The base scale cancels out of the fixed-point equation, so only the
    /// canvas center and the zoom ratio are needed. With an unchanged zoom
    /// this is a no-op.
    pub fn zoom_at(&mut self, new_zoom: f64, cursor: Point, size: CanvasSize) {
        let ratio = new_zoom / self.zoom;
        let c = size.center();
        self.offset_x = (cursor.x - c.x) - (cursor.x - c.x - self.offset_x) * ratio;
        self.offset_y = (cursor.y - c.y) - (cursor.y - c.y - self.offset_y) * ratio;
        self.zoom = new_zoom;
    }
}

/// One frame's transform from world meters to screen pixels.
///
/// `screen_x = center_x + world_x * scale + offset_x`
/// `screen_y = center_y - world_y * scale + offset_y`
///
/// where `scale` is the bounds-fit base scale times the camera zoom. The Y
/// axis flips because world Y increases up while screen Y increases down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f64,
    center: Point,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    /// Build the projection for one frame.
    ///
    /// The base scale fits `bounds` into `size` uniformly (same factor on
    /// both axes) shrunk by `margin_factor`. A degenerate canvas or bounds
    /// (zero or negative area) falls back to a unit base scale so the
    /// projection stays invertible.
    #[must_use]
    pub fn new(camera: Camera, bounds: Bounds, size: CanvasSize, margin_factor: f64) -> Self {
        let fit_x = size.width / bounds.width();
        let fit_y = size.height / bounds.height();
        let mut base = fit_x.min(fit_y) * margin_factor;
        if !base.is_finite() || base <= 0.0 {
            base = 1.0;
        }
        Self {
            scale: base * camera.zoom,
            center: size.center(),
            offset_x: camera.offset_x,
            offset_y: camera.offset_y,
        }
    }

    /// Pixels per world meter at the current zoom.
    #[must_use]
    pub fn pixels_per_meter(&self) -> f64 {
        self.scale
    }

    /// Convert a world-space point (meters) to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: self.center.x + world.x * self.scale + self.offset_x,
            y: self.center.y - world.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates (meters).
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.center.x - self.offset_x) / self.scale,
            y: (self.center.y + self.offset_y - screen.y) / self.scale,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance (meters).
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// The world-space rectangle currently visible in a canvas of `size`.
    #[must_use]
    pub fn visible_extent(&self, size: CanvasSize) -> Bounds {
        let top_left = self.screen_to_world(Point::new(0.0, 0.0));
        let bottom_right = self.screen_to_world(Point::new(size.width, size.height));
        Bounds::new(top_left.x, bottom_right.x, bottom_right.y, top_left.y)
    }
}
