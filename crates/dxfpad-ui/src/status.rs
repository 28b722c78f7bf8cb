//! 状态栏文本

use crate::state::{Scene, Tool};
use dxfpad_core::math::Point2;

/// 选择工具下显示选择数量，其它工具显示 `Mode: TOOL`
pub fn status_text(scene: &Scene) -> String {
    match scene.tool() {
        Tool::Select => match scene.selection().len() {
            0 => "Ready to Select".to_string(),
            n => format!("{} Selected", n),
        },
        tool => format!("Mode: {}", tool.name().to_uppercase()),
    }
}

/// 光标坐标，保留两位小数
pub fn coordinates_text(p: &Point2) -> String {
    format!("X: {:.2}  Y: {:.2}", p.x, p.y)
}
