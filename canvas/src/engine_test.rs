#![allow(clippy::float_cmp)]

use super::*;
use crate::render::DrawCmd;

// =============================================================
// Helpers
// =============================================================

fn core() -> EngineCore {
    EngineCore::new(800.0, 800.0, Selection { emotion: "joy".to_owned(), reason: "family".to_owned() })
}

fn core_with(kinds: &[ShapeKind]) -> EngineCore {
    let mut c = core();
    for kind in kinds {
        c.press_shape(*kind);
    }
    c.tick();
    c
}

fn kinds(core: &EngineCore) -> Vec<ShapeKind> {
    core.composer.shapes().iter().map(|s| s.kind).collect()
}

fn positions(core: &EngineCore) -> Vec<(f64, f64)> {
    core.composer.shapes().iter().map(|s| (s.x, s.y)).collect()
}

fn controls_changed(actions: &[Action]) -> Option<ControlSnapshot> {
    actions.iter().find_map(|a| match a {
        Action::ControlsChanged(snapshot) => Some(*snapshot),
        _ => None,
    })
}

// =============================================================
// Shape buttons
// =============================================================

#[test]
fn three_presses_create_three_shapes_in_order() {
    let c = core_with(&[ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle]);
    assert_eq!(kinds(&c), vec![ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle]);
}

#[test]
fn press_reports_selection_and_render() {
    let mut c = core();
    let actions = c.press_shape(ShapeKind::Circle);
    assert_eq!(actions, vec![Action::SelectionChanged(Some(ShapeKind::Circle)), Action::RenderNeeded]);
}

#[test]
fn full_list_retypes_selected_middle_shape() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle]);
    // Middle shape sits at the center.
    c.click(Point::new(400.0, 400.0));
    assert_eq!(c.selected_kind(), Some(ShapeKind::Square));

    let actions = c.press_shape(ShapeKind::Line);
    assert_eq!(kinds(&c), vec![ShapeKind::Circle, ShapeKind::Line, ShapeKind::Triangle]);
    assert_eq!(actions[0], Action::SelectionChanged(Some(ShapeKind::Line)));
    assert!(controls_changed(&actions).is_some());
}

#[test]
fn ignored_press_returns_no_actions() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle]);
    c.click(Point::new(5.0, 5.0));
    assert!(c.press_shape(ShapeKind::Line).is_empty());
    assert_eq!(c.composer.len(), 3);
}

#[test]
fn removing_selected_resyncs_sliders_from_first_remaining() {
    let mut c = core_with(&[ShapeKind::Circle]);
    c.set_control(Control::Depth, 80.0);
    c.tick();
    c.press_shape(ShapeKind::Square);
    c.set_control(Control::Depth, 10.0);
    c.tick();

    let actions = c.press_shape(ShapeKind::Square);
    assert_eq!(kinds(&c), vec![ShapeKind::Circle]);
    let snapshot = controls_changed(&actions).expect("resync");
    assert_eq!(snapshot.get(Control::Depth), 80);
    assert_eq!(c.controls.get(Control::Depth), 80);
}

#[test]
fn at_most_one_shape_is_ever_selected() {
    let mut c = core();
    let clicks = [Point::new(250.0, 400.0), Point::new(400.0, 400.0), Point::new(550.0, 400.0), Point::new(5.0, 5.0)];
    for step in 0..40usize {
        if step % 3 == 0 {
            c.click(clicks[step % clicks.len()]);
        } else {
            c.press_shape(ShapeKind::ALL[step % ShapeKind::ALL.len()]);
        }
        c.tick();
        assert!(c.draft().shapes.iter().filter(|r| r.selected).count() <= 1);
        assert!(c.composer.len() <= 3);
    }
}

// =============================================================
// Sliders
// =============================================================

#[test]
fn shape_size_slider_hits_both_bounds() {
    let mut c = core_with(&[ShapeKind::Square]);
    c.set_control(Control::ShapeSize, 100.0);
    c.tick();
    assert_eq!(c.composer.shapes()[0].shape_size, 400.0);
    c.set_control(Control::ShapeSize, 0.0);
    c.tick();
    assert_eq!(c.composer.shapes()[0].shape_size, 30.0);
}

#[test]
fn slider_input_is_clamped_and_rounded() {
    let mut c = core();
    assert_eq!(c.set_control(Control::Blur, 140.0), 100);
    assert_eq!(c.set_control(Control::Blur, -3.0), 0);
    assert_eq!(c.set_control(Control::Blur, 41.6), 42);
}

#[test]
fn sliders_only_touch_the_selected_shape() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    c.set_control(Control::Round, 60.0);
    c.tick();
    assert_eq!(c.composer.shapes()[0].round, 0);
    assert_eq!(c.composer.shapes()[1].round, 60);
}

#[test]
fn sliders_without_selection_change_no_shape() {
    let mut c = core_with(&[ShapeKind::Circle]);
    c.click(Point::new(5.0, 5.0));
    c.set_control(Control::ShapeSize, 100.0);
    c.tick();
    assert_eq!(c.composer.shapes()[0].shape_size, 30.0);
}

#[test]
fn resync_does_not_write_back_on_next_tick() {
    let mut c = core_with(&[ShapeKind::Circle]);
    c.set_control(Control::ShapeSize, 100.0);
    c.tick();
    c.press_shape(ShapeKind::Square);
    c.set_control(Control::ShapeSize, 0.0);
    c.tick();

    // Selecting the circle moves the slider back to 100 without touching either shape.
    let actions = c.press_shape(ShapeKind::Circle);
    assert_eq!(controls_changed(&actions).map(|s| s.get(Control::ShapeSize)), Some(100));
    c.tick();
    assert_eq!(c.composer.shapes()[0].shape_size, 400.0);
    assert_eq!(c.composer.shapes()[1].shape_size, 30.0);
}

#[test]
fn distance_slider_moves_the_layout() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    assert_eq!(positions(&c), vec![(250.0, 400.0), (550.0, 400.0)]);

    c.set_control(Control::Distance, 100.0);
    c.tick();
    assert_eq!(positions(&c), vec![(400.0, 400.0), (400.0, 400.0)]);
}

#[test]
fn distance_survives_selection_resync() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    c.set_control(Control::Distance, 50.0);
    c.tick();
    c.press_shape(ShapeKind::Circle);
    c.tick();
    assert_eq!(c.distance.get(), 150.0);
    assert_eq!(c.controls.get(Control::Distance), 50);
}

// =============================================================
// Axis / color / clear / resize
// =============================================================

#[test]
fn axis_change_relays_out_vertically() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle]);
    c.set_axis(Axis::Vertical);
    c.tick();
    assert_eq!(positions(&c), vec![(400.0, 100.0), (400.0, 400.0), (400.0, 700.0)]);
}

#[test]
fn axis_toggle_swaps_pair_at_max_distance() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    c.set_control(Control::Distance, 100.0);
    c.set_axis(Axis::Horizontal);
    assert_eq!(kinds(&c), vec![ShapeKind::Square, ShapeKind::Circle]);
    assert_eq!(c.selected_kind(), Some(ShapeKind::Square));
}

#[test]
fn axis_toggle_keeps_order_otherwise() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    c.set_control(Control::Distance, 99.0);
    c.set_axis(Axis::Vertical);
    assert_eq!(kinds(&c), vec![ShapeKind::Circle, ShapeKind::Square]);

    let mut three = core_with(&[ShapeKind::Circle, ShapeKind::Square, ShapeKind::Line]);
    three.set_control(Control::Distance, 100.0);
    three.set_axis(Axis::Vertical);
    assert_eq!(kinds(&three), vec![ShapeKind::Circle, ShapeKind::Square, ShapeKind::Line]);
}

#[test]
fn invalid_color_is_ignored() {
    let mut c = core();
    assert!(c.set_color("green").is_empty());
    assert_eq!(c.color.to_hex(), "#000000");
    assert_eq!(c.set_color("#5d9b2f"), vec![Action::RenderNeeded]);
    assert_eq!(c.color.to_hex(), "#5D9B2F");
}

#[test]
fn clear_empties_and_deselects() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    let actions = c.clear();
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert!(c.composer.is_empty());
    assert!(c.frame().layers.is_empty());
}

#[test]
fn resize_recenters_pairs_but_not_a_placed_single_shape() {
    let mut single = core_with(&[ShapeKind::Circle]);
    single.resize(600.0, 400.0);
    single.tick();
    assert_eq!(positions(&single), vec![(400.0, 400.0)]);

    let mut pair = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    pair.resize(600.0, 400.0);
    pair.tick();
    assert_eq!(positions(&pair), vec![(150.0, 200.0), (450.0, 200.0)]);
}

// =============================================================
// Clicks
// =============================================================

#[test]
fn click_toggles_and_resyncs() {
    let mut c = core_with(&[ShapeKind::Circle]);
    c.set_control(Control::Rotation, 25.0);
    c.tick();

    let actions = c.click(Point::new(400.0, 400.0));
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);

    c.set_control(Control::Rotation, 0.0);
    let actions = c.click(Point::new(400.0, 400.0));
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0], Action::SelectionChanged(Some(ShapeKind::Circle)));
    assert_eq!(controls_changed(&actions).map(|s| s.get(Control::Rotation)), Some(25));
}

#[test]
fn click_on_empty_canvas_deselects() {
    let mut c = core_with(&[ShapeKind::Circle]);
    let actions = c.click(Point::new(100.0, 100.0));
    assert_eq!(actions[0], Action::SelectionChanged(None));
    assert_eq!(c.selected_kind(), None);
}

#[test]
fn clicks_on_or_outside_edges_are_ignored() {
    let mut c = core_with(&[ShapeKind::Circle]);
    for p in [
        Point::new(0.0, 400.0),
        Point::new(800.0, 400.0),
        Point::new(400.0, 0.0),
        Point::new(400.0, 800.0),
        Point::new(-5.0, 900.0),
    ] {
        assert!(c.click(p).is_empty(), "{p:?}");
    }
    assert_eq!(c.selected_kind(), Some(ShapeKind::Circle));
}

#[test]
fn click_selects_the_shape_under_the_cursor() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    c.click(Point::new(250.0, 400.0));
    assert_eq!(c.selected_kind(), Some(ShapeKind::Circle));
}

// =============================================================
// Frame / draft
// =============================================================

#[test]
fn frame_applies_pending_sliders_first() {
    let mut c = core_with(&[ShapeKind::Square]);
    c.set_control(Control::ShapeSize, 100.0);
    let frame = c.frame();
    assert_eq!((frame.width, frame.height), (800.0, 800.0));
    assert_eq!(frame.layers.len(), 1);
    assert!(frame.layers[0].commands.iter().any(|cmd| matches!(
        cmd,
        DrawCmd::Fill { outline: crate::render::Outline::RoundedRect { width, .. }, .. } if *width == 400.0
    )));
}

#[test]
fn draft_captures_composition() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Square]);
    c.set_color("#E7B5AD");
    c.set_axis(Axis::Vertical);
    c.set_control(Control::Blur, 30.0);
    c.tick();

    let draft = c.draft();
    assert_eq!(draft.selection.emotion, "joy");
    assert_eq!(draft.color, "#E7B5AD");
    assert_eq!(draft.distance_direction, Axis::Vertical);
    assert_eq!(draft.slider_params.blur, 30);
    assert_eq!(draft.shapes.len(), 2);
    assert!(draft.shapes[1].selected);
    assert_eq!(draft.shapes[1].blur, 30);
}

#[test]
fn draft_leaves_engine_state_untouched() {
    let mut c = core_with(&[ShapeKind::Circle, ShapeKind::Triangle]);
    c.set_control(Control::Depth, 50.0);
    let composer = c.composer.clone();
    let controls = c.controls;
    let prev = c.prev_controls;

    let _draft = c.draft();
    assert_eq!(c.composer, composer);
    assert_eq!(c.controls, controls);
    assert_eq!(c.prev_controls, prev);
}
