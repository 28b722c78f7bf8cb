//! 拾取与框选
//!
//! - 点选：距离最小且小于容差的实体，距离相同取下标最小者
//! - 框选：窗口选择只取完全包含的实体，交叉选择还取与框边相交的实体

use crate::entity::Entity;
use crate::geometry::Geometry;
use crate::intersect::segment_geometry_intersections;
use crate::math::{BoundingBox2, Point2};
use std::collections::BTreeSet;

/// 框选模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxMode {
    /// 窗口选择（从左向右拖动）
    Window,
    /// 交叉选择（从右向左拖动）
    Crossing,
}

impl BoxMode {
    /// 按屏幕 X 方向判断：松开点在按下点左侧即为交叉选择
    pub fn from_drag(press_x: f64, release_x: f64) -> Self {
        if release_x < press_x {
            BoxMode::Crossing
        } else {
            BoxMode::Window
        }
    }
}

/// 点选：返回距离 `point` 最近且距离小于 `tolerance` 的实体下标
pub fn entity_at(entities: &[Entity], point: &Point2, tolerance: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, entity) in entities.iter().enumerate() {
        let d = entity.geometry.distance_to_point(point);
        if d >= tolerance {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((index, d)),
        }
    }
    best.map(|(index, _)| index)
}

/// 实体是否完全位于框内
pub fn is_enclosed(geometry: &Geometry, rect: &BoundingBox2) -> bool {
    match geometry {
        Geometry::Circle(circle) => rect.contains_box(&circle.bounding_box()),
        _ => geometry.defining_points().iter().all(|p| rect.contains(p)),
    }
}

/// 实体是否与框的任一条边相交
///
/// 圆以包围盒重叠近似判断。
pub fn touches_box(geometry: &Geometry, rect: &BoundingBox2) -> bool {
    match geometry {
        Geometry::Circle(circle) => rect.intersects(&circle.bounding_box()),
        _ => rect
            .edges()
            .iter()
            .any(|(a, b)| !segment_geometry_intersections(a, b, geometry).is_empty()),
    }
}

/// 框选分类：返回被选中的实体下标
pub fn classify_box(entities: &[Entity], rect: &BoundingBox2, mode: BoxMode) -> BTreeSet<usize> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, entity)| {
            is_enclosed(&entity.geometry, rect)
                || (mode == BoxMode::Crossing && touches_box(&entity.geometry, rect))
        })
        .map(|(index, _)| index)
        .collect()
}
