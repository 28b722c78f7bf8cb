//! 对象捕捉系统
//!
//! 支持的捕捉：
//! - 端点 (Endpoint)：线段两端
//! - 圆心 (Center)
//! - 顶点 (Vertex)：多段线顶点
//! - 角度 (angle step)：绘制时将方向吸附到固定角度步长

use crate::entity::Entity;
use crate::geometry::Geometry;
use crate::math::{distance, Point2};
use serde::{Deserialize, Serialize};

/// 捕捉类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapType {
    /// 端点捕捉
    Endpoint,
    /// 圆心捕捉
    Center,
    /// 顶点捕捉
    Vertex,
}

/// 捕捉点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    /// 捕捉到的世界坐标
    pub point: Point2,
    /// 捕捉类型
    pub snap_type: SnapType,
    /// 来源实体下标
    pub entity_index: usize,
    /// 距离鼠标的世界距离（用于排序）
    pub distance: f64,
}

/// 捕捉配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// 点捕捉容差（屏幕像素）
    pub tolerance: f64,
    /// 角度步长（度），0 表示关闭
    pub angle_step: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance: 15.0, // 15像素
            angle_step: 0.0,
        }
    }
}

/// 捕捉引擎
///
/// 负责点捕捉与角度捕捉
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// 设置角度步长（度），0 关闭角度捕捉
    pub fn set_angle_step(&mut self, step_deg: f64) {
        self.config.angle_step = step_deg.max(0.0);
    }

    /// 寻找最佳捕捉点
    ///
    /// # 参数
    /// - `mouse_world`: 鼠标的世界坐标
    /// - `entities`: 要搜索的实体列表
    /// - `zoom`: 当前缩放级别（像素容差换算为世界距离）
    ///
    /// 距离相等时取先遇到的候选。
    pub fn find_snap_point(
        &self,
        mouse_world: Point2,
        entities: &[Entity],
        zoom: f64,
    ) -> Option<SnapPoint> {
        // 世界坐标容差
        let world_tolerance = self.config.tolerance / zoom;

        entities
            .iter()
            .enumerate()
            .flat_map(|(index, entity)| Self::entity_snap_points(index, &entity.geometry))
            .map(|(point, snap_type, entity_index)| SnapPoint {
                point,
                snap_type,
                entity_index,
                distance: distance(&point, &mouse_world),
            })
            .filter(|p| p.distance <= world_tolerance)
            .min_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// 单个实体的候选捕捉点
    fn entity_snap_points(
        index: usize,
        geometry: &Geometry,
    ) -> Vec<(Point2, SnapType, usize)> {
        match geometry {
            Geometry::Line(line) => vec![
                (line.start, SnapType::Endpoint, index),
                (line.end, SnapType::Endpoint, index),
            ],
            Geometry::Circle(circle) => vec![(circle.center, SnapType::Center, index)],
            Geometry::Polyline(polyline) => polyline
                .vertices
                .iter()
                .map(|v| (*v, SnapType::Vertex, index))
                .collect(),
        }
    }
}

/// 角度捕捉结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSnap {
    pub pos: Point2,
    /// 方向角（度），范围 [0, 360)
    pub angle_deg: f64,
}

/// 方向角（度），范围 [0, 360)
pub fn direction_angle_deg(start: &Point2, end: &Point2) -> f64 {
    let angle = (end.y - start.y).atan2(end.x - start.x).to_degrees();
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// 角度捕捉：将 start->end 的方向取整到 `step_deg` 的倍数，长度不变
///
/// `step_deg == 0` 时原样返回 `end`。
pub fn snap_angle(start: Point2, end: Point2, step_deg: f64) -> AngleSnap {
    let angle = direction_angle_deg(&start, &end);
    if step_deg <= 0.0 {
        return AngleSnap {
            pos: end,
            angle_deg: angle,
        };
    }

    let snapped = ((angle / step_deg).round() * step_deg) % 360.0;
    let length = distance(&start, &end);
    let rad = snapped.to_radians();

    AngleSnap {
        pos: Point2::new(start.x + length * rad.cos(), start.y + length * rad.sin()),
        angle_deg: snapped,
    }
}
