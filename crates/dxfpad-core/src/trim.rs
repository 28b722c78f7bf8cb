//! 修剪（TRIM）
//!
//! 只有线段可以被修剪；圆和多段线只作为剪切边。
//!
//! 流程：
//! 1. 取容差内最近的线段作为目标
//! 2. 剪切点 = 目标端点 + 与其它所有实体的交点，按到起点的距离排序
//! 3. 相邻剪切点组成子段，过短的子段丢弃
//! 4. 中点离光标最近的子段被删除，其余子段替换原线段

use crate::entity::Entity;
use crate::intersect::segment_geometry_intersections;
use crate::math::{distance, Point2};
use tracing::debug;

/// 子段最小长度，小于此值的相邻剪切点视为重合
pub const TRIM_EPSILON: f64 = 1e-4;

/// 修剪结果：下标 `index` 处的线段应被 `replacement` 替换（可能为空）
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOutcome {
    pub index: usize,
    pub replacement: Vec<Entity>,
}

/// 计算在 `cursor` 处修剪的结果，没有可修剪目标时返回 `None`
pub fn trim_at(entities: &[Entity], cursor: &Point2, tolerance: f64) -> Option<TrimOutcome> {
    let (index, line) = nearest_line(entities, cursor, tolerance)?;
    let color = entities[index].color;

    let mut cuts = vec![line.start, line.end];
    for (other_index, other) in entities.iter().enumerate() {
        if other_index != index {
            cuts.extend(segment_geometry_intersections(&line.start, &line.end, &other.geometry));
        }
    }
    cuts.sort_by(|a, b| {
        distance(&line.start, a)
            .partial_cmp(&distance(&line.start, b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let spans: Vec<(Point2, Point2)> = cuts
        .windows(2)
        .map(|w| (w[0], w[1]))
        .filter(|(a, b)| distance(a, b) >= TRIM_EPSILON)
        .collect();

    let mut under_cursor: Option<(usize, f64)> = None;
    for (i, (a, b)) in spans.iter().enumerate() {
        let mid = Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        let d = distance(&mid, cursor);
        match under_cursor {
            Some((_, best)) if d >= best => {}
            _ => under_cursor = Some((i, d)),
        }
    }
    let (removed, _) = under_cursor?;

    let replacement: Vec<Entity> = spans
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != removed)
        .map(|(_, (a, b))| Entity::line(*a, *b, color))
        .collect();

    debug!(
        "trim line #{}: {} cut points, {} pieces kept",
        index,
        cuts.len(),
        replacement.len()
    );
    Some(TrimOutcome { index, replacement })
}

/// 容差内距离最近的线段，距离相同取下标最小者
fn nearest_line(
    entities: &[Entity],
    cursor: &Point2,
    tolerance: f64,
) -> Option<(usize, crate::geometry::Line)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, entity) in entities.iter().enumerate() {
        let Some(line) = entity.as_line() else {
            continue;
        };
        let d = line.distance_to_point(cursor);
        if d >= tolerance {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((index, d)),
        }
    }
    let (index, _) = best?;
    entities[index].as_line().map(|line| (index, *line))
}
