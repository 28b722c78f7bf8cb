//! 具体的 Action 实现
//!
//! 每个工具对应一个 Action 实现

mod drag;
mod draw_circle;
mod draw_line;
mod draw_rectangle;
mod select;
mod trim;

pub use draw_circle::DrawCircleAction;
pub use draw_line::DrawLineAction;
pub use draw_rectangle::DrawRectangleAction;
pub use select::SelectAction;
pub use trim::TrimAction;

use crate::action::Action;
use crate::state::Tool;

/// 创建指定工具的 Action
pub fn create_action(tool: Tool) -> Box<dyn Action> {
    match tool {
        Tool::Select => Box::new(SelectAction::new()),
        Tool::Line => Box::new(DrawLineAction::new()),
        Tool::Rect => Box::new(DrawRectangleAction::new()),
        Tool::Circle => Box::new(DrawCircleAction::new()),
        Tool::Measure => Box::new(DrawLineAction::measure()),
        Tool::Trim => Box::new(TrimAction::new()),
    }
}
