//! DXF 原始文本写入器
//!
//! 直接输出组码-值对，不经过 `dxf` crate 的对象模型。
//!
//! # DXF 文件结构
//!
//! 导出的文件只包含两个段：
//! ```text
//! 0
//! SECTION
//! 2
//! HEADER          ← 版本号
//! ...
//! 0
//! ENDSEC
//! 0
//! SECTION
//! 2
//! ENTITIES        ← 图元
//! ...
//! 0
//! ENDSEC
//! 0
//! EOF
//! ```

use dxfpad_core::math::Point2;

/// 导出使用的 DXF 版本（AutoCAD 2000）
pub const ACAD_VERSION: &str = "AC1015";

/// 所有图元都写到 0 层
const DEFAULT_LAYER: &str = "0";

/// DXF 文本写入器
pub struct DxfWriter {
    output: Vec<String>,
    handle_counter: u64,
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DxfWriter {
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            handle_counter: 100, // 从 100 开始分配句柄
        }
    }

    /// 写入组码-值对
    pub fn write_pair(&mut self, code: i32, value: impl std::fmt::Display) {
        self.output.push(format!("{:>3}", code));
        self.output.push(value.to_string());
    }

    /// 写入句柄（组码 5）
    pub fn write_handle(&mut self) {
        let handle = format!("{:X}", self.handle_counter);
        self.handle_counter += 1;
        self.write_pair(5, handle);
    }

    /// 写入点坐标（含 Z = 0）
    pub fn write_point(&mut self, base_code: i32, point: Point2) {
        self.write_pair(base_code, point.x);
        self.write_pair(base_code + 10, point.y);
        self.write_pair(base_code + 20, 0.0); // Z = 0
    }

    /// 写入 SECTION 开始
    pub fn begin_section(&mut self, name: &str) {
        self.write_pair(0, "SECTION");
        self.write_pair(2, name);
    }

    /// 写入 SECTION 结束
    pub fn end_section(&mut self) {
        self.write_pair(0, "ENDSEC");
    }

    /// 最小 HEADER 段
    pub fn write_header(&mut self) {
        self.begin_section("HEADER");
        self.write_pair(9, "$ACADVER");
        self.write_pair(1, ACAD_VERSION);
        self.end_section();
    }

    /// 图元公共部分：类型、句柄、图层、颜色
    fn begin_entity(&mut self, kind: &str, aci: u8) {
        self.write_pair(0, kind);
        self.write_handle();
        self.write_pair(100, "AcDbEntity");
        self.write_pair(8, DEFAULT_LAYER);
        self.write_pair(62, aci);
    }

    /// 写入 LINE
    pub fn write_line(&mut self, start: Point2, end: Point2, aci: u8) {
        self.begin_entity("LINE", aci);
        self.write_pair(100, "AcDbLine");
        self.write_point(10, start);
        self.write_point(11, end);
    }

    /// 写入 CIRCLE
    pub fn write_circle(&mut self, center: Point2, radius: f64, aci: u8) {
        self.begin_entity("CIRCLE", aci);
        self.write_pair(100, "AcDbCircle");
        self.write_point(10, center);
        self.write_pair(40, radius);
    }

    /// 写入 LWPOLYLINE（组码 70 的第 1 位表示闭合）
    pub fn write_lwpolyline(&mut self, vertices: &[Point2], closed: bool, aci: u8) {
        self.begin_entity("LWPOLYLINE", aci);
        self.write_pair(100, "AcDbPolyline");
        self.write_pair(90, vertices.len());
        self.write_pair(70, if closed { 1 } else { 0 });
        for v in vertices {
            self.write_pair(10, v.x);
            self.write_pair(20, v.y);
        }
    }

    /// 获取输出
    pub fn finish(mut self) -> String {
        self.write_pair(0, "EOF");
        let mut text = self.output.join("\n");
        text.push('\n');
        text
    }
}
