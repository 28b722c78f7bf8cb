//! 基础数学类型与距离函数

use serde::{Deserialize, Serialize};

/// 世界坐标点
pub type Point2 = nalgebra::Point2<f64>;

/// 二维向量
pub type Vector2 = nalgebra::Vector2<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-10;

/// 两点间欧氏距离
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// 点到线段 [v, w] 的距离（钳制在线段上，而不是无限直线）
pub fn point_to_segment_distance(p: &Point2, v: &Point2, w: &Point2) -> f64 {
    let seg = w - v;
    let len_sq = seg.norm_squared();
    if len_sq == 0.0 {
        return distance(p, v);
    }

    let t = ((p - v).dot(&seg) / len_sq).clamp(0.0, 1.0);
    let projection = v + seg * t;
    distance(p, &projection)
}

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 空包围盒（min > max），用于累积
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// 由任意两个对角点构造（自动归一化）
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_to_include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(&self, other: &BoundingBox2) -> BoundingBox2 {
        BoundingBox2 {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// 点是否在盒内（含边界）
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// 另一个包围盒是否完全在盒内
    pub fn contains_box(&self, other: &BoundingBox2) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// 两盒是否重叠（含接触）
    pub fn intersects(&self, other: &BoundingBox2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// 四条边，按 下、右、上、左 的顺序
    pub fn edges(&self) -> [(Point2, Point2); 4] {
        let bl = self.min;
        let br = Point2::new(self.max.x, self.min.y);
        let tr = self.max;
        let tl = Point2::new(self.min.x, self.max.y);
        [(bl, br), (br, tr), (tr, tl), (tl, bl)]
    }
}
