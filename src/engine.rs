use web_sys::HtmlCanvasElement;

use crate::camera::{Camera, CanvasSize, Point, Projection};
use crate::config::MapConfig;
use crate::field::FieldStore;
use crate::hit;
use crate::input::{Button, CursorStyle, PointerState, SelectionState, WheelDelta};
use crate::loader::{LoadError, LoadState, Loader, Resolution};
use crate::palette::ColorMode;
use crate::render::{self, DrawCommand};
use crate::surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// State affecting pixels changed; redraw on the next frame.
    RenderNeeded,
    /// Apply this cursor style to the canvas element.
    SetCursor(CursorStyle),
    /// The clicked selection changed (possibly to nothing).
    SelectionChanged { selected: Option<String> },
    /// The mirror under the cursor changed (possibly to nothing).
    HoverChanged { hovered: Option<String> },
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies. The camera and selection are mutated here and nowhere else.
pub struct EngineCore {
    pub store: FieldStore,
    pub camera: Camera,
    pub selection: SelectionState,
    pub pointer: PointerState,
    pub loader: Loader,
    pub color_mode: ColorMode,
    pub config: MapConfig,
    pub viewport: CanvasSize,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(MapConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with host-supplied tuning.
    #[must_use]
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            store: FieldStore::new(),
            camera: Camera::default(),
            selection: SelectionState::default(),
            pointer: PointerState::Idle,
            loader: Loader::new(),
            color_mode: ColorMode::default(),
            config,
            viewport: CanvasSize::new(0.0, 0.0),
            dpr: 1.0,
        }
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport = CanvasSize::new(width_css, height_css);
        self.dpr = dpr;
    }

    // --- Data load lifecycle ---

    /// Start (or retry) the initial point fetch. The host performs the HTTP
    /// request and resolves with the returned generation token.
    pub fn begin_load(&mut self) -> u64 {
        self.loader.begin()
    }

    /// Hand a fetched JSON payload to the engine.
    ///
    /// A stale generation (superseded fetch, or resolution after
    /// [`Self::shutdown`]) changes nothing and returns no actions.
    pub fn load_resolved(&mut self, generation: u64, payload: &str) -> Vec<Action> {
        match self.loader.resolve_json(generation, payload) {
            Resolution::Ready(points) => {
                self.store.load_snapshot(points);
                self.selection = SelectionState::default();
                vec![Action::RenderNeeded]
            }
            Resolution::Failed => vec![Action::RenderNeeded],
            Resolution::Stale => Vec::new(),
        }
    }

    /// Report a failed fetch. Stale generations are ignored.
    pub fn load_failed(&mut self, generation: u64, message: &str) -> Vec<Action> {
        let error = LoadError::Fetch(message.to_owned());
        match self.loader.fail(generation, &error) {
            Resolution::Stale => Vec::new(),
            _ => vec![Action::RenderNeeded],
        }
    }

    /// Tear down: outstanding fetch resolutions become stale no-ops.
    pub fn shutdown(&mut self) {
        self.loader.invalidate();
        self.pointer = PointerState::Idle;
    }

    // --- Mode / search ---

    /// Switch the point coloring mode.
    pub fn set_color_mode(&mut self, mode: ColorMode) -> Vec<Action> {
        if self.color_mode == mode {
            return Vec::new();
        }
        self.color_mode = mode;
        vec![Action::RenderNeeded]
    }

    /// Highlight the mirror matching `query` by id; an empty query clears
    /// the highlight. A query with no match also clears it.
    pub fn search(&mut self, query: &str) -> Vec<Action> {
        let matched = self.store.search(query).map(|p| p.id.clone());
        if self.selection.search_match == matched {
            return Vec::new();
        }
        self.selection.search_match = matched;
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Primary-button press starts a pan gesture.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.pointer = PointerState::Dragging {
            anchor: Point::new(
                screen_pt.x - self.camera.offset_x,
                screen_pt.y - self.camera.offset_y,
            ),
            press: screen_pt,
        };
        vec![Action::SetCursor(CursorStyle::Grabbing)]
    }

    /// While dragging, translate the viewport; otherwise hover-test.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.pointer {
            PointerState::Dragging { anchor, .. } => {
                let offset_x = screen_pt.x - anchor.x;
                let offset_y = screen_pt.y - anchor.y;
                if offset_x == self.camera.offset_x && offset_y == self.camera.offset_y {
                    return Vec::new();
                }
                self.camera.offset_x = offset_x;
                self.camera.offset_y = offset_y;
                vec![Action::RenderNeeded]
            }
            PointerState::Idle => self.update_hover(screen_pt),
        }
    }

    /// End a pan gesture; a release within the click slop selects.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let PointerState::Dragging { press, .. } = self.pointer else {
            return Vec::new();
        };
        if button != Button::Primary {
            return Vec::new();
        }
        self.pointer = PointerState::Idle;

        let mut actions = Vec::new();
        let dx = screen_pt.x - press.x;
        let dy = screen_pt.y - press.y;
        let slop = self.config.click_slop_px;
        if dx * dx + dy * dy <= slop * slop {
            let selected = self.hit_test(screen_pt).map(str::to_owned);
            if selected != self.selection.selected {
                self.selection.selected = selected.clone();
                actions.push(Action::SelectionChanged { selected });
                actions.push(Action::RenderNeeded);
            }
        }

        actions.extend(self.update_hover(screen_pt));
        if !actions.iter().any(|a| matches!(a, Action::SetCursor(_))) {
            actions.push(Action::SetCursor(self.idle_cursor()));
        }
        actions
    }

    /// The pointer left the canvas: cancel any gesture and clear hover.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.pointer = PointerState::Idle;
        let mut actions = Vec::new();
        if self.selection.hovered.take().is_some() {
            actions.push(Action::HoverChanged { hovered: None });
            actions.push(Action::RenderNeeded);
        }
        actions.push(Action::SetCursor(CursorStyle::Default));
        actions
    }

    /// Wheel zoom, valid in any pointer state. The world point under the
    /// cursor stays under the cursor across the zoom change.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 {
            self.config.zoom_out_factor
        } else {
            self.config.zoom_in_factor
        };
        let new_zoom = self
            .camera
            .zoom_clamped(factor, self.config.zoom_min, self.config.zoom_max);
        if new_zoom == self.camera.zoom {
            return Vec::new();
        }
        self.camera.zoom_at(new_zoom, screen_pt, self.viewport);
        vec![Action::RenderNeeded]
    }

    // --- Scenes ---

    /// Draw-command list for the main view.
    #[must_use]
    pub fn scene(&self) -> Vec<DrawCommand> {
        render::build_scene(
            &self.store,
            self.camera,
            self.viewport,
            &self.selection,
            self.color_mode,
            &self.config,
        )
    }

    /// Draw-command list for the minimap, derived from the same state.
    #[must_use]
    pub fn minimap_scene(&self) -> Vec<DrawCommand> {
        render::build_minimap(&self.store, self.camera, self.viewport, self.color_mode, &self.config)
    }

    // --- Queries ---

    /// The currently selected mirror id, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selection.selected.as_deref()
    }

    /// The mirror id under the cursor, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.selection.hovered.as_deref()
    }

    /// The mirror id matched by the last search, if any.
    #[must_use]
    pub fn search_match(&self) -> Option<&str> {
        self.selection.search_match.as_deref()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Where the initial data load currently stands.
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    // --- Internals ---

    fn projection(&self) -> Projection {
        Projection::new(self.camera, self.config.bounds, self.viewport, self.config.margin_factor)
    }

    fn hit_test(&self, screen_pt: Point) -> Option<&str> {
        hit::find_nearest(
            screen_pt,
            self.store.points(),
            &self.projection(),
            self.config.hit_radius_px,
        )
        .map(|p| p.id.as_str())
    }

    fn idle_cursor(&self) -> CursorStyle {
        if self.selection.hovered.is_some() {
            CursorStyle::Pointer
        } else {
            CursorStyle::Default
        }
    }

    fn update_hover(&mut self, screen_pt: Point) -> Vec<Action> {
        let hovered = self.hit_test(screen_pt).map(str::to_owned);
        if hovered == self.selection.hovered {
            return Vec::new();
        }
        self.selection.hovered = hovered.clone();
        vec![
            Action::HoverChanged { hovered },
            Action::SetCursor(self.idle_cursor()),
            Action::RenderNeeded,
        ]
    }
}

/// The full field-map engine. Wraps [`EngineCore`] and owns the browser
/// canvas elements.
pub struct Engine {
    canvas: HtmlCanvasElement,
    minimap: Option<HtmlCanvasElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, minimap: None, core: EngineCore::new() }
    }

    /// Create an engine with host-supplied tuning.
    #[must_use]
    pub fn with_config(canvas: HtmlCanvasElement, config: MapConfig) -> Self {
        Self { canvas, minimap: None, core: EngineCore::with_config(config) }
    }

    /// Attach a second canvas for the minimap overlay.
    pub fn set_minimap_canvas(&mut self, canvas: Option<HtmlCanvasElement>) {
        self.minimap = canvas;
    }

    // --- Delegated lifecycle ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
    }

    pub fn begin_load(&mut self) -> u64 {
        self.core.begin_load()
    }

    pub fn load_resolved(&mut self, generation: u64, payload: &str) -> Vec<Action> {
        self.core.load_resolved(generation, payload)
    }

    pub fn load_failed(&mut self, generation: u64, message: &str) -> Vec<Action> {
        self.core.load_failed(generation, message)
    }

    pub fn shutdown(&mut self) {
        self.core.shutdown();
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) -> Vec<Action> {
        self.core.set_color_mode(mode)
    }

    pub fn search(&mut self, query: &str) -> Vec<Action> {
        self.core.search(query)
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta)
    }

    // --- Render ---

    /// Draw the current state to the canvas (and the minimap, if attached).
    ///
    /// # Errors
    ///
    /// Returns `Err` if a 2D context cannot be obtained or a canvas call fails.
    pub fn render(&self) -> Result<(), wasm_bindgen::JsValue> {
        let ctx = surface::context_2d(&self.canvas)?;
        surface::execute(&ctx, self.core.viewport, self.core.dpr, &self.core.scene())?;

        if let Some(minimap) = &self.minimap {
            let ctx = surface::context_2d(minimap)?;
            surface::execute(
                &ctx,
                self.core.config.minimap_size,
                self.core.dpr,
                &self.core.minimap_scene(),
            )?;
        }
        Ok(())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.core.selected()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        self.core.load_state()
    }
}
