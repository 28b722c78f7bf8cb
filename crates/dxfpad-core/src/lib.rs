//! DXFPad 核心几何引擎
//!
//! 提供2D几何图元、视图变换、求交、捕捉、拾取与修剪。
//!
//! # 架构设计
//!
//! - `Geometry`: 几何数据（线、圆、多段线）
//! - `Entity`: 几何 + 颜色，身份即其在实体列表中的下标
//! - `View`: 世界坐标与屏幕坐标之间的变换
//!
//! # 示例
//!
//! ```rust
//! use dxfpad_core::prelude::*;
//!
//! // 创建一条线段
//! let line = Line::new(Point2::origin(), Point2::new(100.0, 50.0));
//!
//! // 计算长度
//! println!("Length: {}", line.length());
//! ```

pub mod entity;
pub mod geometry;
pub mod intersect;
pub mod math;
pub mod pick;
pub mod properties;
pub mod snap;
pub mod trim;
pub mod view;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::entity::{entities_bounds, Entity};
    pub use crate::geometry::{Circle, Geometry, Line, Polyline};
    pub use crate::intersect::{line_circle_intersection, line_line_intersection};
    pub use crate::math::{distance, point_to_segment_distance, BoundingBox2, Point2, Vector2};
    pub use crate::pick::{classify_box, entity_at, BoxMode};
    pub use crate::properties::Color;
    pub use crate::snap::{snap_angle, AngleSnap, SnapConfig, SnapEngine, SnapPoint, SnapType};
    pub use crate::trim::{trim_at, TrimOutcome};
    pub use crate::view::{ScreenPoint, View};
}
