//! 实体：几何 + 颜色
//!
//! 实体在场景中的身份就是它在实体列表中的下标。

use crate::geometry::{Circle, Geometry, Line, Polyline};
use crate::math::{BoundingBox2, Point2};
use crate::properties::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub geometry: Geometry,
    pub color: Color,
}

impl Entity {
    pub fn new(geometry: Geometry, color: Color) -> Self {
        Self { geometry, color }
    }

    pub fn line(start: Point2, end: Point2, color: Color) -> Self {
        Self::new(Geometry::Line(Line::new(start, end)), color)
    }

    pub fn circle(center: Point2, radius: f64, color: Color) -> Self {
        Self::new(Geometry::Circle(Circle::new(center, radius)), color)
    }

    pub fn polyline(vertices: Vec<Point2>, closed: bool, color: Color) -> Self {
        Self::new(Geometry::Polyline(Polyline::new(vertices, closed)), color)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.geometry.bounding_box()
    }

    /// 若为线段则返回它
    pub fn as_line(&self) -> Option<&Line> {
        match &self.geometry {
            Geometry::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// 一组实体的总包围盒；没有实体时返回 `None`
pub fn entities_bounds(entities: &[Entity]) -> Option<BoundingBox2> {
    entities
        .iter()
        .map(Entity::bounding_box)
        .reduce(|acc, b| acc.union(&b))
}
