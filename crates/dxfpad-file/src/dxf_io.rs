//! DXF文件导入/导出
//!
//! 导入交给 `dxf` crate 解析；导出由 [`DxfWriter`] 直接写文本。
//! 只处理 LINE、CIRCLE、LWPOLYLINE 与 POLYLINE，其它类型在导入时丢弃。

use crate::dxf_raw::DxfWriter;
use crate::error::FileError;
use dxfpad_core::entity::Entity;
use dxfpad_core::geometry::{Circle, Geometry, Line, Polyline};
use dxfpad_core::math::Point2;
use dxfpad_core::properties::Color;
use std::path::Path;
use tracing::{info, warn};

/// ACI 调色板（索引 1..=9）
const ACI_PALETTE: [(u8, Color); 9] = [
    (1, Color::RED),
    (2, Color::YELLOW),
    (3, Color::GREEN),
    (4, Color::CYAN),
    (5, Color::BLUE),
    (6, Color::MAGENTA),
    (7, Color::WHITE),
    (8, Color::GRAY),
    (9, Color::LIGHT_GRAY),
];

/// 从DXF文本导入
///
/// 空文本返回 [`FileError::InvalidFormat`]，解析失败返回 [`FileError::Dxf`]。
pub fn import_str(text: &str) -> Result<Vec<Entity>, FileError> {
    if text.trim().is_empty() {
        return Err(FileError::InvalidFormat("empty DXF text".to_string()));
    }
    let mut reader = text.as_bytes();
    let drawing = dxf::Drawing::load(&mut reader).map_err(|e| FileError::Dxf(e.to_string()))?;

    let mut entities = Vec::new();
    let mut dropped = 0usize;
    for entity in drawing.entities() {
        match convert_dxf_entity(entity) {
            Some(e) => entities.push(e),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("DXF import: dropped {} unsupported entities", dropped);
    }
    info!("DXF import: {} entities", entities.len());
    Ok(entities)
}

/// 从DXF文件导入
pub fn import(path: &Path) -> Result<Vec<Entity>, FileError> {
    let text = std::fs::read_to_string(path)?;
    import_str(&text)
}

/// 将DXF实体转换为内部实体，不支持或退化的图元返回 `None`
fn convert_dxf_entity(entity: &dxf::entities::Entity) -> Option<Entity> {
    let geometry = match &entity.specific {
        dxf::entities::EntityType::Line(line) => {
            let start = Point2::new(line.p1.x, line.p1.y);
            let end = Point2::new(line.p2.x, line.p2.y);
            Geometry::Line(Line::new(start, end))
        }

        dxf::entities::EntityType::Circle(circle) => {
            if circle.radius <= 0.0 {
                warn!("DXF import: circle with radius {} skipped", circle.radius);
                return None;
            }
            let center = Point2::new(circle.center.x, circle.center.y);
            Geometry::Circle(Circle::new(center, circle.radius))
        }

        dxf::entities::EntityType::LwPolyline(lwpoly) => {
            let vertices: Vec<Point2> = lwpoly
                .vertices
                .iter()
                .map(|v| Point2::new(v.x, v.y))
                .collect();
            Geometry::Polyline(Polyline::new(vertices, lwpoly.is_closed()))
        }

        dxf::entities::EntityType::Polyline(poly) => {
            let vertices: Vec<Point2> = poly
                .vertices()
                .map(|v| Point2::new(v.location.x, v.location.y))
                .collect();
            Geometry::Polyline(Polyline::new(vertices, poly.is_closed()))
        }

        other => {
            warn!("DXF import: unsupported entity {} dropped", entity_kind(other));
            return None;
        }
    };

    if let Geometry::Polyline(polyline) = &geometry {
        if polyline.vertices.len() < 2 {
            warn!("DXF import: polyline with {} vertices skipped", polyline.vertices.len());
            return None;
        }
    }

    // 提取颜色（ByLayer / ByBlock 视为白色）
    let color = entity
        .common
        .color
        .index()
        .map(aci_to_color)
        .unwrap_or(Color::WHITE);

    Some(Entity::new(geometry, color))
}

/// 日志用的实体类型名
fn entity_kind(specific: &dxf::entities::EntityType) -> String {
    let debug = format!("{:?}", specific);
    debug
        .split(|c: char| c == '(' || c == ' ' || c == '{')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// 导出为DXF文本
pub fn export_string(entities: &[Entity]) -> String {
    let mut writer = DxfWriter::new();
    writer.write_header();

    writer.begin_section("ENTITIES");
    for entity in entities {
        let aci = color_to_aci(&entity.color);
        match &entity.geometry {
            Geometry::Line(line) => writer.write_line(line.start, line.end, aci),
            Geometry::Circle(circle) => writer.write_circle(circle.center, circle.radius, aci),
            Geometry::Polyline(polyline) => {
                writer.write_lwpolyline(&polyline.vertices, polyline.closed, aci)
            }
        }
    }
    writer.end_section();

    info!("DXF export: {} entities", entities.len());
    writer.finish()
}

/// 导出到DXF文件
pub fn export(entities: &[Entity], path: &Path) -> Result<(), FileError> {
    std::fs::write(path, export_string(entities))?;
    Ok(())
}

/// AutoCAD颜色索引(ACI)转颜色，调色板外的索引按白色处理
pub fn aci_to_color(aci: u8) -> Color {
    ACI_PALETTE
        .iter()
        .find(|(index, _)| *index == aci)
        .map(|(_, color)| *color)
        .unwrap_or(Color::WHITE)
}

/// 颜色转AutoCAD颜色索引，非调色板颜色取最接近的调色板项
pub fn color_to_aci(color: &Color) -> u8 {
    ACI_PALETTE
        .iter()
        .min_by_key(|(_, c)| c.distance_sq(color))
        .map(|(index, _)| *index)
        .unwrap_or(7)
}
