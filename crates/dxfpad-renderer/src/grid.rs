//! 自适应网格

use dxfpad_core::math::Point2;
use dxfpad_core::view::{ScreenPoint, View};

/// 网格线在屏幕上的最小间距，低于此值不画网格
pub const MIN_GRID_PX: f64 = 4.0;

/// 坐标轴刻度长度（像素）
pub const AXIS_TICK_PX: f64 = 40.0;

/// 根据缩放选择网格间距（世界单位）
pub fn grid_pitch(scale: f64) -> f64 {
    if scale > 2.0 {
        10.0
    } else if scale > 0.5 {
        50.0
    } else {
        250.0
    }
}

/// 可见区域内的网格线（屏幕坐标的线段两端）
///
/// 网格过密时返回空。
pub fn grid_lines(view: &View) -> Vec<[ScreenPoint; 2]> {
    let pitch = grid_pitch(view.scale);
    if pitch * view.scale < MIN_GRID_PX {
        return Vec::new();
    }

    // 屏幕 y 轴向下，左上角对应世界的 (min_x, max_y)
    let top_left = view.screen_to_world(&ScreenPoint::new(0.0, 0.0));
    let bottom_right = view.screen_to_world(&ScreenPoint::new(view.width, view.height));

    let mut lines = Vec::new();

    for i in line_indices(top_left.x, bottom_right.x, pitch, view.width) {
        let sx = view.world_to_screen(&Point2::new(i as f64 * pitch, 0.0)).x;
        lines.push([ScreenPoint::new(sx, 0.0), ScreenPoint::new(sx, view.height)]);
    }

    for i in line_indices(bottom_right.y, top_left.y, pitch, view.height) {
        let sy = view.world_to_screen(&Point2::new(0.0, i as f64 * pitch)).y;
        lines.push([ScreenPoint::new(0.0, sy), ScreenPoint::new(view.width, sy)]);
    }

    lines
}

/// `[min, max]` 内网格线的整数序号，条数不超过 `extent_px / MIN_GRID_PX + 2`
///
/// 按序号而不是累加浮点坐标迭代，坐标极大时步长不会被舍入吞掉。
fn line_indices(min: f64, max: f64, pitch: f64, extent_px: f64) -> std::ops::RangeInclusive<i64> {
    let first = (min / pitch).floor() as i64;
    let last = (max / pitch).floor() as i64;
    let cap = (extent_px / MIN_GRID_PX).max(0.0) as i64 + 2;
    first..=last.min(first.saturating_add(cap - 1))
}

/// 世界原点处的两条轴刻度：`(x 轴, y 轴)`
pub fn axis_ticks(view: &View) -> ([ScreenPoint; 2], [ScreenPoint; 2]) {
    let origin = view.world_to_screen(&Point2::origin());
    let x_tick = [origin, ScreenPoint::new(origin.x + AXIS_TICK_PX, origin.y)];
    let y_tick = [origin, ScreenPoint::new(origin.x, origin.y - AXIS_TICK_PX)];
    (x_tick, y_tick)
}
