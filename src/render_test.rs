#![allow(clippy::float_cmp)]

use super::*;

use crate::field::RawFieldPoint;
use crate::palette;

// =============================================================
// Helpers
// =============================================================

fn raw(id: &str, x: f64, y: f64, zone: &str, cleanliness: f64) -> RawFieldPoint {
    RawFieldPoint {
        id: Some(id.to_owned()),
        x: Some(x),
        y: Some(y),
        zone: Some(zone.to_owned()),
        cleanliness: Some(cleanliness),
    }
}

fn scenario_store() -> FieldStore {
    let mut store = FieldStore::new();
    store.load_snapshot(vec![
        raw("m1", 0.0, 0.0, "A", 99.0),
        raw("m2", 100.0, 0.0, "B", 80.0),
        raw("m3", 0.0, 100.0, "C", 60.0),
        raw("m4", -100.0, -100.0, "D", 40.0),
    ]);
    store
}

fn canvas() -> CanvasSize {
    CanvasSize::new(800.0, 600.0)
}

fn scene_with(store: &FieldStore, camera: Camera, selection: &SelectionState, mode: ColorMode) -> Vec<DrawCommand> {
    build_scene(store, camera, canvas(), selection, mode, &MapConfig::default())
}

fn default_scene(store: &FieldStore) -> Vec<DrawCommand> {
    scene_with(store, Camera::default(), &SelectionState::default(), ColorMode::Cleanliness)
}

fn filled_circles(scene: &[DrawCommand]) -> Vec<&DrawCommand> {
    scene
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { fill: Some(_), .. }))
        .collect()
}

fn ring_circles(scene: &[DrawCommand]) -> Vec<&DrawCommand> {
    scene
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { fill: None, stroke: Some(_), radius, .. } if *radius > 5.0))
        .collect()
}

fn full_height_lines(scene: &[DrawCommand]) -> usize {
    scene
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { from, to, .. } if from.y == 0.0 && to.y == canvas().height))
        .count()
}

fn texts(scene: &[DrawCommand]) -> Vec<&str> {
    scene
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

// =============================================================
// Structure and ordering
// =============================================================

#[test]
fn scene_starts_with_background_clear() {
    let scene = default_scene(&scenario_store());
    assert!(matches!(scene[0], DrawCommand::Clear { .. }));
}

#[test]
fn scene_ends_with_zoom_label() {
    let scene = default_scene(&scenario_store());
    let Some(DrawCommand::Text { text, .. }) = scene.last() else {
        panic!("expected trailing zoom label");
    };
    assert_eq!(text, "100%");
}

#[test]
fn grid_is_drawn_before_points() {
    let scene = default_scene(&scenario_store());
    let last_grid = scene
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Line { from, to, .. } if from.y == 0.0 && to.y == canvas().height))
        .expect("grid present");
    let first_point = scene
        .iter()
        .position(|c| matches!(c, DrawCommand::Circle { fill: Some(_), .. }))
        .expect("points present");
    assert!(last_grid < first_point);
}

#[test]
fn highlight_rings_are_drawn_after_points() {
    let store = scenario_store();
    let selection = SelectionState { selected: Some("m2".to_owned()), ..Default::default() };
    let scene = scene_with(&store, Camera::default(), &selection, ColorMode::Cleanliness);
    let last_point = scene
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Circle { fill: Some(_), .. }))
        .expect("points present");
    let ring = scene
        .iter()
        .position(|c| matches!(c, DrawCommand::Circle { fill: None, stroke: Some(_), radius, .. } if *radius > 5.0))
        .expect("selection ring present");
    assert!(ring > last_point);
}

#[test]
fn identical_inputs_build_identical_scenes() {
    let store = scenario_store();
    let selection = SelectionState { hovered: Some("m1".to_owned()), ..Default::default() };
    let a = scene_with(&store, Camera { zoom: 2.0, offset_x: 30.0, offset_y: -10.0 }, &selection, ColorMode::Zone);
    let b = scene_with(&store, Camera { zoom: 2.0, offset_x: 30.0, offset_y: -10.0 }, &selection, ColorMode::Zone);
    assert_eq!(a, b);
}

// =============================================================
// Empty store
// =============================================================

#[test]
fn empty_store_is_a_valid_scene() {
    let scene = default_scene(&FieldStore::new());
    assert!(matches!(scene[0], DrawCommand::Clear { .. }));
    assert!(filled_circles(&scene).is_empty());
    // Grid, tower marker and HUD still present.
    assert!(full_height_lines(&scene) > 0);
    assert!(texts(&scene).contains(&"100%"));
}

// =============================================================
// Points, culling, colors
// =============================================================

#[test]
fn every_in_view_point_gets_one_dot() {
    let scene = default_scene(&scenario_store());
    assert_eq!(filled_circles(&scene).len(), 4);
}

#[test]
fn points_panned_far_off_screen_are_culled() {
    let store = scenario_store();
    let camera = Camera { zoom: 1.0, offset_x: 10_000.0, offset_y: 0.0 };
    let scene = scene_with(&store, camera, &SelectionState::default(), ColorMode::Cleanliness);
    assert!(filled_circles(&scene).is_empty());
}

#[test]
fn cleanliness_mode_uses_band_colors() {
    let store = scenario_store();
    let scene = default_scene(&store);
    let m1 = store.get("m1").expect("m1");
    let expected = palette::cleanliness_color(m1.cleanliness);
    let found = filled_circles(&scene).iter().any(|c| {
        matches!(c, DrawCommand::Circle { fill: Some(color), .. } if *color == expected)
    });
    assert!(found);
}

#[test]
fn zone_mode_uses_zone_colors() {
    let store = scenario_store();
    let scene = scene_with(&store, Camera::default(), &SelectionState::default(), ColorMode::Zone);
    for point in store.points() {
        let expected = palette::zone_color(point.zone);
        let found = filled_circles(&scene).iter().any(|c| {
            matches!(c, DrawCommand::Circle { fill: Some(color), .. } if *color == expected)
        });
        assert!(found, "missing zone color for {}", point.id);
    }
}

// =============================================================
// Highlights
// =============================================================

#[test]
fn one_ring_per_active_highlight() {
    let store = scenario_store();
    let selection = SelectionState {
        selected: Some("m1".to_owned()),
        hovered: Some("m2".to_owned()),
        search_match: Some("m3".to_owned()),
    };
    let scene = scene_with(&store, Camera::default(), &selection, ColorMode::Cleanliness);
    assert_eq!(ring_circles(&scene).len(), 3);
}

#[test]
fn stale_highlight_ids_draw_nothing() {
    let store = scenario_store();
    let selection = SelectionState { selected: Some("gone".to_owned()), ..Default::default() };
    let scene = scene_with(&store, Camera::default(), &selection, ColorMode::Cleanliness);
    assert!(ring_circles(&scene).is_empty());
}

// =============================================================
// Grid
// =============================================================

#[test]
fn grid_spacing_follows_config() {
    // Tight spacing collapses below the minimum cell size; the grid drops out.
    let config = MapConfig { grid_spacing_m: 10.0, ..Default::default() };
    let scene = build_scene(
        &FieldStore::new(),
        Camera::default(),
        canvas(),
        &SelectionState::default(),
        ColorMode::Cleanliness,
        &config,
    );
    assert_eq!(full_height_lines(&scene), 0);
}

#[test]
fn grid_pans_with_the_camera() {
    let has_vertical_line_at = |scene: &[DrawCommand], x: f64| {
        scene.iter().any(|c| match c {
            DrawCommand::Line { from, to, .. } if from.y == 0.0 && to.y == canvas().height => {
                (from.x - x).abs() < 1e-9
            }
            _ => false,
        })
    };

    // The world x=0 grid line sits at the canvas center, then follows the pan.
    let centered = default_scene(&FieldStore::new());
    assert!(has_vertical_line_at(&centered, 400.0));

    let moved = scene_with(
        &FieldStore::new(),
        Camera { zoom: 1.0, offset_x: 13.0, offset_y: 0.0 },
        &SelectionState::default(),
        ColorMode::Cleanliness,
    );
    assert!(has_vertical_line_at(&moved, 413.0));
}

// =============================================================
// HUD
// =============================================================

#[test]
fn scale_bar_picks_a_round_length() {
    let scene = default_scene(&scenario_store());
    assert!(texts(&scene).contains(&"200 m"));
}

#[test]
fn scale_bar_switches_to_kilometers_when_zoomed_out() {
    let scene = scene_with(
        &scenario_store(),
        Camera { zoom: 0.25, ..Default::default() },
        &SelectionState::default(),
        ColorMode::Cleanliness,
    );
    assert!(texts(&scene).contains(&"1 km"));
}

#[test]
fn zoom_label_tracks_camera_exactly() {
    for (zoom, label) in [(0.25, "25%"), (1.0, "100%"), (2.5, "250%"), (8.0, "800%")] {
        let scene = scene_with(
            &FieldStore::new(),
            Camera { zoom, ..Default::default() },
            &SelectionState::default(),
            ColorMode::Cleanliness,
        );
        assert!(texts(&scene).contains(&label), "zoom {zoom} should label {label}");
    }
}

// =============================================================
// Minimap
// =============================================================

#[test]
fn minimap_draws_every_point_unculled() {
    let store = scenario_store();
    let camera = Camera { zoom: 1.0, offset_x: 10_000.0, offset_y: 0.0 };
    let scene = build_minimap(&store, camera, canvas(), ColorMode::Cleanliness, &MapConfig::default());
    assert_eq!(filled_circles(&scene).len(), 4);
}

#[test]
fn minimap_uses_the_same_palette_as_the_main_view() {
    let store = scenario_store();
    let main = scene_with(&store, Camera::default(), &SelectionState::default(), ColorMode::Zone);
    let mini = build_minimap(&store, Camera::default(), canvas(), ColorMode::Zone, &MapConfig::default());
    let colors = |scene: &[DrawCommand]| {
        let mut out: Vec<&'static str> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { fill: Some(color), .. } => Some(*color),
                _ => None,
            })
            .collect();
        out.sort_unstable();
        out
    };
    assert_eq!(colors(&main), colors(&mini));
}

#[test]
fn minimap_viewport_rect_is_dashed_and_tracks_zoom() {
    let rect_width = |zoom: f64| {
        let camera = Camera { zoom, ..Default::default() };
        let scene = build_minimap(&scenario_store(), camera, canvas(), ColorMode::Cleanliness, &MapConfig::default());
        scene.iter().find_map(|c| match c {
            DrawCommand::Rect { width, dash_px: Some(_), .. } => Some(*width),
            _ => None,
        })
    };
    let wide = rect_width(1.0).expect("viewport rect at zoom 1");
    let tight = rect_width(4.0).expect("viewport rect at zoom 4");
    assert!(tight < wide);
    assert!((tight - wide / 4.0).abs() < 1e-6);
}

#[test]
fn minimap_scene_is_deterministic() {
    let store = scenario_store();
    let a = build_minimap(&store, Camera::default(), canvas(), ColorMode::Cleanliness, &MapConfig::default());
    let b = build_minimap(&store, Camera::default(), canvas(), ColorMode::Cleanliness, &MapConfig::default());
    assert_eq!(a, b);
}
