//! 主渲染器
//!
//! 每帧从场景状态重新绘制，顺序固定：
//! 清屏 → 网格与坐标轴 → 实体 → 捕捉标记 → 草图 → 框选矩形。

use crate::grid;
use crate::surface::{StrokeStyle, Surface};
use dxfpad_core::geometry::Geometry;
use dxfpad_core::pick::BoxMode;
use dxfpad_core::properties::Color;
use dxfpad_core::view::{ScreenPoint, View};
use dxfpad_ui::{BoxSelect, Draft, Scene, Tool};
use thiserror::Error;

/// 渲染器错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// 渲染配色与线宽
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    pub grid: Color,
    pub entity_width: f32,
    pub selection: Color,
    pub selection_width: f32,
    pub snap_marker: Color,
    /// 捕捉标记边长（像素）
    pub snap_marker_px: f64,
    pub measure: Color,
    pub window: Color,
    pub crossing: Color,
    /// 框选填充透明度
    pub box_fill_alpha: u8,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color::new(30, 30, 30),
            grid: Color::new(50, 50, 50),
            entity_width: 1.5,
            selection: Color::new(0, 150, 255),
            selection_width: 3.0,
            snap_marker: Color::YELLOW,
            snap_marker_px: 10.0,
            measure: Color::CYAN,
            window: Color::new(0, 120, 215),
            crossing: Color::new(0, 180, 80),
            box_fill_alpha: 40,
        }
    }
}

/// 无状态渲染器
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub style: RenderStyle,
}

impl Renderer {
    /// 绘制一帧
    pub fn render(&self, scene: &Scene, surface: &mut dyn Surface) {
        surface.clear(self.style.background);

        self.draw_grid(&scene.view, surface);

        for (index, entity) in scene.entities().iter().enumerate() {
            let style = if scene.is_selected(index) {
                StrokeStyle::solid(self.style.selection, self.style.selection_width)
            } else {
                StrokeStyle::solid(entity.color, self.style.entity_width)
            };
            draw_geometry(surface, &scene.view, &entity.geometry, &style);
        }

        if scene.tool().is_drawing() {
            if let Some(hit) = scene.snap_hit {
                self.draw_snap_marker(surface, scene.view.world_to_screen(&hit.point));
            }
        }

        if let Some(draft) = &scene.draft {
            self.draw_draft(surface, &scene.view, draft, scene.stroke_color);
        }

        if let Some(rect) = scene.box_select() {
            self.draw_box_select(surface, rect);
        }
    }

    fn draw_grid(&self, view: &View, surface: &mut dyn Surface) {
        let style = StrokeStyle::solid(self.style.grid, 1.0);
        for line in grid::grid_lines(view) {
            surface.stroke_polyline(&line, false, &style);
        }

        let (x_tick, y_tick) = grid::axis_ticks(view);
        surface.stroke_polyline(&x_tick, false, &StrokeStyle::solid(Color::RED, 2.0));
        surface.stroke_polyline(&y_tick, false, &StrokeStyle::solid(Color::GREEN, 2.0));
    }

    fn draw_snap_marker(&self, surface: &mut dyn Surface, center: ScreenPoint) {
        let h = self.style.snap_marker_px / 2.0;
        let square = [
            ScreenPoint::new(center.x - h, center.y - h),
            ScreenPoint::new(center.x + h, center.y - h),
            ScreenPoint::new(center.x + h, center.y + h),
            ScreenPoint::new(center.x - h, center.y + h),
        ];
        surface.stroke_polyline(&square, true, &StrokeStyle::solid(self.style.snap_marker, 1.5));
    }

    fn draw_draft(&self, surface: &mut dyn Surface, view: &View, draft: &Draft, stroke_color: Color) {
        let color = if draft.tool == Tool::Measure {
            self.style.measure
        } else {
            stroke_color
        };
        let style = StrokeStyle::dashed(color, 1.0, 6.0, 4.0);
        draw_geometry(surface, view, &draft.geometry(), &style);

        let end = view.world_to_screen(&draft.end);
        surface.draw_text(ScreenPoint::new(end.x + 10.0, end.y - 10.0), &draft.label(), color);
    }

    fn draw_box_select(&self, surface: &mut dyn Surface, rect: &BoxSelect) {
        let a = rect.start;
        let b = rect.current_end();
        let (color, style) = match rect.mode() {
            BoxMode::Window => (self.style.window, StrokeStyle::solid(self.style.window, 1.0)),
            BoxMode::Crossing => (
                self.style.crossing,
                StrokeStyle::dashed(self.style.crossing, 1.0, 5.0, 3.0),
            ),
        };

        surface.fill_rect(a, b, color, self.style.box_fill_alpha);
        let corners = [
            a,
            ScreenPoint::new(b.x, a.y),
            b,
            ScreenPoint::new(a.x, b.y),
        ];
        surface.stroke_polyline(&corners, true, &style);
    }
}

/// 按视图变换绘制几何体
fn draw_geometry(surface: &mut dyn Surface, view: &View, geometry: &Geometry, style: &StrokeStyle) {
    match geometry {
        Geometry::Line(line) => {
            let points = [view.world_to_screen(&line.start), view.world_to_screen(&line.end)];
            surface.stroke_polyline(&points, false, style);
        }
        Geometry::Circle(circle) => {
            let center = view.world_to_screen(&circle.center);
            surface.stroke_circle(center, circle.radius * view.scale, style);
        }
        Geometry::Polyline(polyline) => {
            let points: Vec<ScreenPoint> = polyline
                .vertices
                .iter()
                .map(|p| view.world_to_screen(p))
                .collect();
            surface.stroke_polyline(&points, polyline.closed, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixmapSurface;
    use dxfpad_core::entity::Entity;
    use dxfpad_core::math::Point2;
    use dxfpad_core::snap::{SnapPoint, SnapType};

    /// 记录绘制调用的表面
    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Polyline { points: usize, closed: bool, style: StrokeStyle },
        Circle { radius: f64, style: StrokeStyle },
        FillRect { alpha: u8 },
        Text(String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn clear(&mut self, _color: Color) {
            self.ops.push(Op::Clear);
        }

        fn stroke_polyline(&mut self, points: &[ScreenPoint], closed: bool, style: &StrokeStyle) {
            self.ops.push(Op::Polyline {
                points: points.len(),
                closed,
                style: *style,
            });
        }

        fn stroke_circle(&mut self, _center: ScreenPoint, radius: f64, style: &StrokeStyle) {
            self.ops.push(Op::Circle { radius, style: *style });
        }

        fn fill_rect(&mut self, _a: ScreenPoint, _b: ScreenPoint, _color: Color, alpha: u8) {
            self.ops.push(Op::FillRect { alpha });
        }

        fn draw_text(&mut self, _pos: ScreenPoint, text: &str, _color: Color) {
            self.ops.push(Op::Text(text.to_string()));
        }
    }

    fn grid_op_count(view: &View) -> usize {
        grid::grid_lines(view).len() + 2
    }

    fn record(scene: &Scene) -> Vec<Op> {
        let mut surface = RecordingSurface::default();
        Renderer::default().render(scene, &mut surface);
        surface.ops
    }

    #[test]
    fn test_empty_scene_draws_grid_only() {
        let scene = Scene::default();
        let ops = record(&scene);
        assert_eq!(ops[0], Op::Clear);
        assert_eq!(ops.len(), 1 + grid_op_count(&scene.view));
    }

    #[test]
    fn test_selected_entity_highlighted() {
        let mut scene = Scene::default();
        scene.push(Entity::line(Point2::origin(), Point2::new(10.0, 0.0), Color::RED));
        scene.push(Entity::circle(Point2::origin(), 5.0, Color::GREEN));
        scene.set_selection([1].into_iter().collect());

        let ops = record(&scene);
        let entities = &ops[1 + grid_op_count(&scene.view)..];
        let style = RenderStyle::default();
        assert_eq!(
            entities,
            &[
                Op::Polyline {
                    points: 2,
                    closed: false,
                    style: StrokeStyle::solid(Color::RED, style.entity_width),
                },
                Op::Circle {
                    radius: 5.0,
                    style: StrokeStyle::solid(style.selection, style.selection_width),
                },
            ]
        );
    }

    #[test]
    fn test_draft_after_entities_with_label() {
        let mut scene = Scene::default();
        scene.push(Entity::line(Point2::origin(), Point2::new(10.0, 0.0), Color::WHITE));
        scene.set_tool(Tool::Rect);
        scene.draft = Some(Draft {
            tool: Tool::Rect,
            start: Point2::origin(),
            end: Point2::new(4.0, 3.0),
        });

        let ops = record(&scene);
        let n = ops.len();
        assert!(matches!(
            ops[n - 2],
            Op::Polyline { points: 4, closed: true, style } if style.dash.is_some()
        ));
        assert_eq!(ops[n - 1], Op::Text("4.00 × 3.00".to_string()));
    }

    #[test]
    fn test_snap_marker_before_draft() {
        let mut scene = Scene::default();
        scene.set_tool(Tool::Line);
        scene.snap_hit = Some(SnapPoint {
            point: Point2::origin(),
            snap_type: SnapType::Endpoint,
            entity_index: 0,
            distance: 0.0,
        });
        scene.draft = Some(Draft {
            tool: Tool::Line,
            start: Point2::origin(),
            end: Point2::new(3.0, 4.0),
        });

        let ops = record(&scene);
        let n = ops.len();
        let marker_color = RenderStyle::default().snap_marker;
        assert!(matches!(
            ops[n - 3],
            Op::Polyline { points: 4, closed: true, style } if style.color == marker_color
        ));
        assert_eq!(ops[n - 1], Op::Text("5.00".to_string()));
    }

    #[test]
    fn test_box_select_styles() {
        let mut scene = Scene::default();
        scene.set_box_select(ScreenPoint::new(10.0, 10.0), Some(ScreenPoint::new(50.0, 40.0)));
        let ops = record(&scene);
        let n = ops.len();
        assert_eq!(ops[n - 2], Op::FillRect { alpha: 40 });
        assert!(matches!(
            ops[n - 1],
            Op::Polyline { closed: true, style, .. } if style.dash.is_none()
        ));

        // 从右向左拖为交叉框选，描边为虚线
        scene.set_box_select(ScreenPoint::new(50.0, 10.0), Some(ScreenPoint::new(10.0, 40.0)));
        let ops = record(&scene);
        assert!(matches!(
            ops[ops.len() - 1],
            Op::Polyline { closed: true, style, .. } if style.dash.is_some()
        ));
    }

    #[test]
    fn test_pixmap_smoke() {
        let mut scene = Scene::default();
        scene.push(Entity::line(
            Point2::new(-100.0, 19.5),
            Point2::new(100.0, 19.5),
            Color::MAGENTA,
        ));
        let mut surface = PixmapSurface::new(800, 600).unwrap();
        Renderer::default().render(&scene, &mut surface);

        // 世界 y=19.5 对应屏幕 y=280.5，线宽覆盖整行像素 280
        assert_eq!(surface.pixel(420, 280), Some([255, 0, 255]));
        assert_eq!(surface.pixel(5, 5), Some([30, 30, 30]));
    }
}
