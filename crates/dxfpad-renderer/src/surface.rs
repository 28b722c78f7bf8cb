//! 绘图表面
//!
//! 渲染器只依赖 [`Surface`] trait，所有坐标都是屏幕像素。

use crate::renderer::RenderError;
use dxfpad_core::properties::Color;
use dxfpad_core::view::ScreenPoint;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

/// 描边样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    /// 虚线 `[实线长, 间隔]`，`None` 为实线
    pub dash: Option<[f32; 2]>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f32, on: f32, off: f32) -> Self {
        Self {
            dash: Some([on, off]),
            ..Self::solid(color, width)
        }
    }
}

/// 绘图表面
pub trait Surface {
    /// 表面像素尺寸
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Color);

    fn stroke_polyline(&mut self, points: &[ScreenPoint], closed: bool, style: &StrokeStyle);

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f64, style: &StrokeStyle);

    /// 填充轴对齐矩形，两个角点顺序任意
    fn fill_rect(&mut self, a: ScreenPoint, b: ScreenPoint, color: Color, alpha: u8);

    fn draw_text(&mut self, pos: ScreenPoint, text: &str, color: Color);
}

/// 待宿主叠加绘制的文字
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub pos: ScreenPoint,
    pub text: String,
    pub color: Color,
}

/// tiny-skia 光栅表面
///
/// tiny-skia 不做文字排版，`draw_text` 只收集 [`TextLabel`]，
/// 由宿主在贴图之上绘制。
pub struct PixmapSurface {
    pixmap: Pixmap,
    labels: Vec<TextLabel>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            labels: Vec::new(),
        })
    }

    /// 尺寸变化时重建像素缓冲
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.pixmap.width() != width || self.pixmap.height() != height {
            self.pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        }
        Ok(())
    }

    /// 预乘 alpha 的 RGBA8 像素
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// 读取像素（非预乘 RGB），越界返回 `None`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixmap.pixel(x, y).map(|c| {
            let c = c.demultiply();
            [c.red(), c.green(), c.blue()]
        })
    }
}

fn paint(color: Color, alpha: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = true;
    paint
}

fn stroke(style: &StrokeStyle) -> Stroke {
    Stroke {
        width: style.width,
        dash: style.dash.and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
        ..Default::default()
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
        self.labels.clear();
    }

    fn stroke_polyline(&mut self, points: &[ScreenPoint], closed: bool, style: &StrokeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if closed {
            pb.close();
        }

        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint(style.color, 255),
                &stroke(style),
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f64, style: &StrokeStyle) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
            self.pixmap.stroke_path(
                &path,
                &paint(style.color, 255),
                &stroke(style),
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_rect(&mut self, a: ScreenPoint, b: ScreenPoint, color: Color, alpha: u8) {
        let rect = Rect::from_ltrb(
            a.x.min(b.x) as f32,
            a.y.min(b.y) as f32,
            a.x.max(b.x) as f32,
            a.y.max(b.y) as f32,
        );
        if let Some(rect) = rect {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.fill_path(
                &path,
                &paint(color, alpha),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_text(&mut self, pos: ScreenPoint, text: &str, color: Color) {
        self.labels.push(TextLabel {
            pos,
            text: text.to_string(),
            color,
        });
    }
}
