//! 绘制线段 / 测量 Action
//!
//! 测量与画线共用拖动逻辑，但松开时从不创建实体。

use super::drag::DragState;
use crate::action::{Action, ActionContext, ActionResult};
use crate::state::{Draft, Tool};
use dxfpad_core::geometry::{Geometry, Line};

/// 绘制线段 Action
pub struct DrawLineAction {
    drag: DragState,
}

impl DrawLineAction {
    pub fn new() -> Self {
        Self {
            drag: DragState::new(Tool::Line),
        }
    }

    /// 测量工具：只显示长度
    pub fn measure() -> Self {
        Self {
            drag: DragState::new(Tool::Measure),
        }
    }
}

impl Default for DrawLineAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DrawLineAction {
    fn tool(&self) -> Tool {
        self.drag.tool()
    }

    fn reset(&mut self) {
        self.drag.reset();
    }

    fn on_mouse_down(&mut self, ctx: &ActionContext) -> ActionResult {
        self.drag.begin(ctx);
        ActionResult::Continue
    }

    fn on_mouse_move(&mut self, ctx: &ActionContext) -> ActionResult {
        self.drag.update(ctx);
        ActionResult::Continue
    }

    fn on_mouse_up(&mut self, ctx: &ActionContext) -> ActionResult {
        match self.drag.finish(ctx) {
            Some(draft) if draft.tool == Tool::Line => {
                ActionResult::CreateEntities(vec![Geometry::Line(Line::new(draft.start, draft.end))])
            }
            _ => ActionResult::Continue,
        }
    }

    fn draft(&self) -> Option<Draft> {
        self.drag.draft()
    }

    fn get_prompt(&self) -> &str {
        self.drag.prompt("指定第一点:", "指定下一点:")
    }
}

#[cfg(test)]
mod tests {
    use super::super::drag::test_support::{ctx, p};
    use super::*;
    use dxfpad_core::view::View;

    #[test]
    fn test_line_commit_with_angle_snap() {
        let view = View::default();
        let mut action = DrawLineAction::new();

        action.on_mouse_down(&ctx(&view, &[], p(0.0, 0.0), 90.0));
        action.on_mouse_move(&ctx(&view, &[], p(10.0, 1.0), 90.0));
        let draft = action.draft().unwrap();
        assert!(draft.end.y.abs() < 1e-9);

        let result = action.on_mouse_up(&ctx(&view, &[], p(1.0, 10.0), 90.0));
        let ActionResult::CreateEntities(geometries) = result else {
            panic!("expected a line");
        };
        let Geometry::Line(line) = &geometries[0] else {
            panic!("expected a line");
        };
        // 松开位置 (1, 10) 吸附到 90°
        assert!(line.end.x.abs() < 1e-9);
        assert!((line.end.y - (101.0f64).sqrt()).abs() < 1e-9);
        assert!(action.draft().is_none());
    }

    #[test]
    fn test_zero_length_line_not_committed() {
        let view = View::default();
        let mut action = DrawLineAction::new();
        action.on_mouse_down(&ctx(&view, &[], p(3.0, 3.0), 0.0));
        let result = action.on_mouse_up(&ctx(&view, &[], p(3.0, 3.0), 0.0));
        assert_eq!(result, ActionResult::Continue);
    }

    #[test]
    fn test_measure_never_commits() {
        let view = View::default();
        let mut action = DrawLineAction::measure();
        action.on_mouse_down(&ctx(&view, &[], p(0.0, 0.0), 0.0));
        action.on_mouse_move(&ctx(&view, &[], p(3.0, 4.0), 0.0));
        assert_eq!(action.draft().unwrap().label(), "5.00");

        let result = action.on_mouse_up(&ctx(&view, &[], p(3.0, 4.0), 0.0));
        assert_eq!(result, ActionResult::Continue);
    }
}
