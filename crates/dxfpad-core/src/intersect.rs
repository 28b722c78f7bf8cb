//! 求交计算
//!
//! 所有函数都针对线段（参数 t ∈ [0, 1]），而非无限直线。

use crate::geometry::{Circle, Geometry, Line};
use crate::math::Point2;

/// 线段-线段交点（参数行列式法）
///
/// 平行（分母为 0）或交点参数落在任一线段 [0, 1] 之外时返回 `None`。
pub fn line_line_intersection(
    p1: &Point2,
    p2: &Point2,
    p3: &Point2,
    p4: &Point2,
) -> Option<Point2> {
    let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denom == 0.0 {
        return None;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(Point2::new(
            p1.x + ua * (p2.x - p1.x),
            p1.y + ua * (p2.y - p1.y),
        ))
    } else {
        None
    }
}

/// 线段-圆交点，返回 0、1 或 2 个点
///
/// 相切时可能返回两个几乎重合的点，由调用方按距离去重。
pub fn line_circle_intersection(p1: &Point2, p2: &Point2, circle: &Circle) -> Vec<Point2> {
    let d = p2 - p1;
    let f = p1 - circle.center;

    let a = d.dot(&d);
    if a == 0.0 {
        return vec![];
    }
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - circle.radius * circle.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return vec![];
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    [t1, t2]
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .map(|t| p1 + d * t)
        .collect()
}

/// 线段与任意几何体的所有交点
///
/// 多段线逐边求交，闭合多段线包含首尾相连的边。
pub fn segment_geometry_intersections(p1: &Point2, p2: &Point2, geometry: &Geometry) -> Vec<Point2> {
    match geometry {
        Geometry::Line(Line { start, end }) => line_line_intersection(p1, p2, start, end)
            .into_iter()
            .collect(),
        Geometry::Circle(circle) => line_circle_intersection(p1, p2, circle),
        Geometry::Polyline(polyline) => polyline
            .segments()
            .filter_map(|(a, b)| line_line_intersection(p1, p2, &a, &b))
            .collect(),
    }
}
