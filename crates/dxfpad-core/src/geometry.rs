//! 几何图元定义
//!
//! 支持的基本图元：
//! - 线段 (Line)
//! - 圆 (Circle)
//! - 多段线 (Polyline)

use crate::math::{distance, point_to_segment_distance, BoundingBox2, Point2};
use serde::{Deserialize, Serialize};

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Circle(Circle),
    Polyline(Polyline),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Line(l) => l.bounding_box(),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Polyline(pl) => pl.bounding_box(),
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Line(_) => "Line",
            Geometry::Circle(_) => "Circle",
            Geometry::Polyline(_) => "Polyline",
        }
    }

    /// 拾取距离：线/多段线取到各边的最短距离，圆取到圆周的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        match self {
            Geometry::Line(l) => l.distance_to_point(point),
            Geometry::Circle(c) => c.distance_to_point(point).abs(),
            Geometry::Polyline(pl) => pl.distance_to_point(point),
        }
    }

    /// 定义点：线的两个端点、圆心、多段线顶点
    pub fn defining_points(&self) -> Vec<Point2> {
        match self {
            Geometry::Line(l) => vec![l.start, l.end],
            Geometry::Circle(c) => vec![c.center],
            Geometry::Polyline(pl) => pl.vertices.clone(),
        }
    }
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// 计算点到线段的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        point_to_segment_distance(point, &self.start, &self.end)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 计算点到圆的距离（负值表示在圆内）
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        distance(point, &self.center) - self.radius
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 多段线（仅直线段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point2>,
    /// 是否闭合：闭合时最后一个顶点连回第一个顶点
    pub closed: bool,
}

impl Polyline {
    pub fn new(vertices: Vec<Point2>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// 轴对齐矩形，顶点按 p1 -> (p2.x, p1.y) -> p2 -> (p1.x, p2.y) 排列
    pub fn rectangle(p1: Point2, p2: Point2) -> Self {
        Self::new(
            vec![
                Point2::new(p1.x, p1.y),
                Point2::new(p2.x, p1.y),
                Point2::new(p2.x, p2.y),
                Point2::new(p1.x, p2.y),
            ],
            true,
        )
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            return 0;
        }
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// 遍历所有边（闭合时包含首尾相连的边）
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..self.segment_count()).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// 计算总长度
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| distance(&a, &b)).sum()
    }

    /// 计算点到多段线的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        match self.vertices.len() {
            0 => f64::MAX,
            1 => distance(point, &self.vertices[0]),
            _ => self
                .segments()
                .map(|(a, b)| point_to_segment_distance(point, &a, &b))
                .fold(f64::MAX, f64::min),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(self.vertices.iter().copied())
    }
}
