//! 用合成的指针事件驱动控制器的端到端流程

use dxfpad_core::prelude::*;
use dxfpad_ui::{Controller, EditorConfig, EditorKey, PointerButton, Tool};

fn controller() -> Controller {
    Controller::new(EditorConfig::default(), 800.0, 600.0)
}

fn screen(c: &Controller, x: f64, y: f64) -> ScreenPoint {
    c.scene().view.world_to_screen(&Point2::new(x, y))
}

/// 在世界坐标间做一次左键拖动
fn drag(c: &mut Controller, from: (f64, f64), to: (f64, f64)) {
    let down = screen(c, from.0, from.1);
    let up = screen(c, to.0, to.1);
    c.pointer_down(down, PointerButton::Primary);
    c.pointer_move(up);
    c.pointer_up(up, PointerButton::Primary);
}

fn click(c: &mut Controller, x: f64, y: f64) {
    let p = screen(c, x, y);
    c.pointer_down(p, PointerButton::Primary);
    c.pointer_up(p, PointerButton::Primary);
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn test_draw_line_uses_stroke_color() {
    let mut c = controller();
    c.set_stroke_color(Color::GREEN);
    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (100.0, 0.0));

    assert_eq!(c.scene().entities().len(), 1);
    let entity = &c.scene().entities()[0];
    assert_eq!(entity.color, Color::GREEN);
    let line = entity.as_line().unwrap();
    assert_close(line.end.x, 100.0);
    assert!(c.scene().draft.is_none());
}

#[test]
fn test_draft_visible_while_dragging() {
    let mut c = controller();
    c.set_tool(Tool::Circle);
    let down = screen(&c, 0.0, 0.0);
    c.pointer_down(down, PointerButton::Primary);
    c.pointer_move(screen(&c, 30.0, 40.0));

    let draft = c.scene().draft.expect("draft while dragging");
    assert_eq!(draft.label(), "R 50.00");
    assert!(c.scene().entities().is_empty());
}

#[test]
fn test_point_snap_to_endpoint() {
    let mut c = controller();
    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (100.0, 0.0));

    // 起点 (3, 2) 在 15 像素内，吸附到 (0, 0)
    drag(&mut c, (3.0, 2.0), (0.0, 50.0));
    assert_eq!(c.scene().entities().len(), 2);
    let line = c.scene().entities()[1].as_line().unwrap();
    assert_close(line.start.x, 0.0);
    assert_close(line.start.y, 0.0);
}

#[test]
fn test_snap_marker_only_for_drawing_tools() {
    let mut c = controller();
    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (100.0, 0.0));

    c.pointer_move(screen(&c, 98.0, 1.0));
    assert_eq!(c.scene().snap_hit.map(|s| s.snap_type), Some(SnapType::Endpoint));

    c.set_tool(Tool::Trim);
    c.pointer_move(screen(&c, 98.0, 1.0));
    assert!(c.scene().snap_hit.is_none());
}

#[test]
fn test_measure_never_commits() {
    let mut c = controller();
    c.set_tool(Tool::Measure);
    drag(&mut c, (0.0, 0.0), (30.0, 40.0));
    assert!(c.scene().entities().is_empty());
}

#[test]
fn test_degenerate_rect_not_committed() {
    let mut c = controller();
    c.set_tool(Tool::Rect);
    drag(&mut c, (0.0, 0.0), (50.0, 0.0));
    assert!(c.scene().entities().is_empty());

    drag(&mut c, (0.0, 0.0), (50.0, 20.0));
    assert_eq!(c.scene().entities().len(), 1);
    assert_eq!(c.scene().entities()[0].geometry.type_name(), "Polyline");
}

#[test]
fn test_select_recolor_and_delete() {
    let mut c = controller();
    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (100.0, 0.0));
    drag(&mut c, (0.0, 100.0), (100.0, 100.0));
    drag(&mut c, (0.0, 200.0), (100.0, 200.0));

    c.set_tool(Tool::Select);
    click(&mut c, 50.0, 103.0);
    assert_eq!(c.status_text(), "1 Selected");
    assert!(c.scene().is_selected(1));

    c.set_stroke_color(Color::RED);
    assert_eq!(c.scene().entities()[1].color, Color::RED);
    assert_eq!(c.scene().entities()[0].color, Color::WHITE);

    assert!(c.handle_key(EditorKey::Delete));
    assert_eq!(c.scene().entities().len(), 2);
    assert!(c.scene().selection().is_empty());
    assert_eq!(c.status_text(), "Ready to Select");

    // 空白处单击清空选择
    click(&mut c, 50.0, 3.0);
    assert_eq!(c.status_text(), "1 Selected");
    click(&mut c, 300.0, 250.0);
    assert!(c.scene().selection().is_empty());
}

#[test]
fn test_box_select_window_then_crossing() {
    let mut c = controller();
    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (50.0, 0.0));
    drag(&mut c, (40.0, 20.0), (150.0, 20.0));

    c.set_tool(Tool::Select);
    drag(&mut c, (-10.0, 40.0), (60.0, -10.0));
    assert_eq!(c.status_text(), "1 Selected");
    assert!(c.scene().box_select().is_none());

    drag(&mut c, (60.0, -10.0), (-10.0, 40.0));
    assert_eq!(c.status_text(), "2 Selected");
}

#[test]
fn test_box_select_preview_while_dragging() {
    let mut c = controller();
    c.pointer_down(screen(&c, 10.0, 10.0), PointerButton::Primary);
    c.pointer_move(screen(&c, 20.0, 20.0));
    let rect = c.scene().box_select().expect("box while dragging");
    assert_eq!(rect.end, Some(screen(&c, 20.0, 20.0)));
}

#[test]
fn test_trim_crossed_line() {
    let mut c = controller();
    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (100.0, 0.0));
    drag(&mut c, (50.0, -50.0), (50.0, 50.0));

    c.set_tool(Tool::Trim);
    click(&mut c, 20.0, 0.0);

    let entities = c.scene().entities();
    assert_eq!(entities.len(), 2);
    // 光标下的左段被删除，右段替换原线段的位置
    let kept = entities[0].as_line().unwrap();
    assert_close(kept.start.x, 50.0);
    assert_close(kept.end.x, 100.0);
    let cutter = entities[1].as_line().unwrap();
    assert_close(cutter.start.y, -50.0);
}

#[test]
fn test_trim_without_target_is_noop() {
    let mut c = controller();
    c.set_tool(Tool::Circle);
    drag(&mut c, (0.0, 0.0), (20.0, 0.0));

    c.set_tool(Tool::Trim);
    click(&mut c, 20.0, 0.0);
    assert_eq!(c.scene().entities().len(), 1);
}

#[test]
fn test_escape_resets_everything() {
    let mut c = controller();
    c.set_tool(Tool::Line);
    c.pointer_down(screen(&c, 0.0, 0.0), PointerButton::Primary);
    c.pointer_move(screen(&c, 10.0, 10.0));
    assert!(c.scene().draft.is_some());

    c.handle_key(EditorKey::Escape);
    assert_eq!(c.scene().tool(), Tool::Select);
    assert!(c.scene().draft.is_none());
    assert!(c.scene().selection().is_empty());
    assert!(c.scene().box_select().is_none());
}

#[test]
fn test_load_dxf_replaces_scene_and_fits_view() {
    let mut source = controller();
    source.set_tool(Tool::Line);
    drag(&mut source, (0.0, 0.0), (100.0, 0.0));
    source.set_tool(Tool::Rect);
    drag(&mut source, (0.0, 0.0), (100.0, 50.0));
    let text = source.export_dxf();

    let mut c = controller();
    c.set_tool(Tool::Circle);
    drag(&mut c, (500.0, 500.0), (510.0, 500.0));

    let count = c.load_dxf(&text).unwrap();
    assert_eq!(count, 2);
    assert_eq!(c.scene().entities().len(), 2);

    // 800 - 100 = 700 / 100 = 7，600 - 100 = 500 / 50 = 10
    assert_close(c.scene().view.scale, 7.0);
    let center = c.scene().view.world_to_screen(&Point2::new(50.0, 25.0));
    assert_close(center.x, 400.0);
    assert_close(center.y, 300.0);
}

#[test]
fn test_load_malformed_dxf_leaves_scene_untouched() {
    let mut c = controller();
    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (10.0, 10.0));
    let view_before = c.scene().view;

    assert!(c.load_dxf("definitely not dxf").is_err());
    assert_eq!(c.scene().entities().len(), 1);
    assert_eq!(c.scene().view, view_before);
}

#[test]
fn test_resize_and_zoom_extents() {
    let mut c = controller();
    assert!(!c.zoom_extents());

    c.set_tool(Tool::Line);
    drag(&mut c, (0.0, 0.0), (100.0, 100.0));
    c.resize(1100.0, 600.0);
    assert!(c.zoom_extents());
    assert_close(c.scene().view.scale, 5.0);
}
