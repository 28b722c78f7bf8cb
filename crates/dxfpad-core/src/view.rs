//! 视图变换：世界坐标 <-> 屏幕坐标
//!
//! 屏幕坐标原点在左上角，Y 轴向下；世界坐标 Y 轴向上。
//!
//! ```text
//! screen.x =  world.x * scale + offset_x + width  / 2
//! screen.y = -world.y * scale + offset_y + height / 2
//! ```

use crate::math::{BoundingBox2, Point2};
use serde::{Deserialize, Serialize};

/// 屏幕（像素）坐标
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 视图参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// 缩放（像素 / 世界单位），始终 > 0
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// 绘图表面尺寸（像素），用于求屏幕中心
    pub width: f64,
    pub height: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl View {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// 世界坐标转屏幕坐标
    pub fn world_to_screen(&self, p: &Point2) -> ScreenPoint {
        let (cx, cy) = self.center();
        ScreenPoint::new(
            p.x * self.scale + self.offset_x + cx,
            -p.y * self.scale + self.offset_y + cy,
        )
    }

    /// 屏幕坐标转世界坐标（world_to_screen 的逆）
    pub fn screen_to_world(&self, s: &ScreenPoint) -> Point2 {
        let (cx, cy) = self.center();
        Point2::new(
            (s.x - self.offset_x - cx) / self.scale,
            -(s.y - self.offset_y - cy) / self.scale,
        )
    }

    /// 像素长度转世界长度
    pub fn px_to_world(&self, px: f64) -> f64 {
        px / self.scale
    }

    /// 按屏幕位移平移
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// 以光标为中心缩放：缩放前后光标下的世界点保持不动
    pub fn zoom_at(&mut self, cursor: &ScreenPoint, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchor = self.screen_to_world(cursor);
        self.scale *= factor;

        let (cx, cy) = self.center();
        self.offset_x = cursor.x - anchor.x * self.scale - cx;
        self.offset_y = cursor.y + anchor.y * self.scale - cy;
    }

    /// 调整表面尺寸
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// 适配包围盒：缩放取宽、高适配的较小者（扣除固定像素边距），
    /// 偏移使包围盒中心落在屏幕中心。
    ///
    /// 包围盒宽或高为零时不做任何修改，返回 `false`。
    pub fn fit_to_bounds(&mut self, bounds: &BoundingBox2, padding_px: f64) -> bool {
        let w = bounds.width();
        let h = bounds.height();
        if bounds.is_empty() || w <= 0.0 || h <= 0.0 {
            return false;
        }

        let avail_w = (self.width - padding_px).max(1.0);
        let avail_h = (self.height - padding_px).max(1.0);
        let scale = (avail_w / w).min(avail_h / h);
        if !(scale.is_finite() && scale > 0.0) {
            return false;
        }

        let center = bounds.center();
        self.scale = scale;
        self.offset_x = -center.x * scale;
        self.offset_y = center.y * scale;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn test_round_trip() {
        let views = [
            View::default(),
            View {
                scale: 3.7,
                offset_x: -120.5,
                offset_y: 48.25,
                width: 1024.0,
                height: 768.0,
            },
            View {
                scale: 0.013,
                offset_x: 1e4,
                offset_y: -3e3,
                width: 333.0,
                height: 211.0,
            },
        ];
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(12.5, -7.25),
            Point2::new(-1e5, 3.3e4),
        ];

        for view in &views {
            for p in &points {
                let back = view.screen_to_world(&view.world_to_screen(p));
                assert!(close(back.x, p.x), "{:?} -> {:?}", p, back);
                assert!(close(back.y, p.y), "{:?} -> {:?}", p, back);
            }
        }
    }

    #[test]
    fn test_y_flip() {
        let view = View::new(200.0, 100.0);
        let s = view.world_to_screen(&Point2::new(0.0, 10.0));
        assert!(close(s.x, 100.0));
        assert!(close(s.y, 40.0));
    }

    #[test]
    fn test_zoom_keeps_cursor_anchor() {
        let mut view = View::new(800.0, 600.0);
        view.pan(35.0, -12.0);
        let cursor = ScreenPoint::new(610.0, 123.0);
        let before = view.screen_to_world(&cursor);

        view.zoom_at(&cursor, (0.1f64).exp());

        let after = view.screen_to_world(&cursor);
        assert!(close(before.x, after.x));
        assert!(close(before.y, after.y));
        assert!(view.scale > 1.0);
    }

    #[test]
    fn test_fit_to_bounds() {
        let mut view = View::new(800.0, 600.0);
        let bounds = BoundingBox2::new(Point2::new(10.0, 10.0), Point2::new(110.0, 60.0));
        assert!(view.fit_to_bounds(&bounds, 100.0));

        // 宽适配 700/100 = 7，高适配 500/50 = 10
        assert!(close(view.scale, 7.0));
        let c = view.world_to_screen(&bounds.center());
        assert!(close(c.x, 400.0));
        assert!(close(c.y, 300.0));

        let flat = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let before = view;
        assert!(!view.fit_to_bounds(&flat, 100.0));
        assert_eq!(view, before);
    }
}
