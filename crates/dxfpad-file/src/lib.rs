//! DXFPad 文件格式处理
//!
//! 支持：
//! - `.dxf` 导入（LINE / CIRCLE / LWPOLYLINE / POLYLINE）
//! - `.dxf` 导出（AC1015 文本）

pub mod dxf_io;
pub mod dxf_raw;
pub mod error;

pub use dxf_io::{aci_to_color, color_to_aci, export, export_string, import, import_str};
pub use dxf_raw::DxfWriter;
pub use error::FileError;
