//! 绘制矩形 Action

use super::drag::DragState;
use crate::action::{Action, ActionContext, ActionResult};
use crate::state::{Draft, Tool};

/// 绘制矩形 Action
///
/// 矩形保存为闭合的四顶点多段线。
pub struct DrawRectangleAction {
    drag: DragState,
}

impl DrawRectangleAction {
    pub fn new() -> Self {
        Self {
            drag: DragState::new(Tool::Rect),
        }
    }
}

impl Default for DrawRectangleAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DrawRectangleAction {
    fn tool(&self) -> Tool {
        Tool::Rect
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
            // 确保矩形有一定大小
            Some(draft) => ActionResult::CreateEntities(vec![draft.geometry()]),
            None => ActionResult::Continue,
        }
    }

    fn draft(&self) -> Option<Draft> {
        self.drag.draft()
    }

    fn get_prompt(&self) -> &str {
        self.drag.prompt("指定第一个角点:", "指定对角点:")
    }
}

#[cfg(test)]
mod tests {
    use super::super::drag::test_support::{ctx, p};
    use super::*;
    use dxfpad_core::geometry::Geometry;
    use dxfpad_core::view::View;

    #[test]
    fn test_rectangle_vertices() {
        let view = View::default();
        let mut action = DrawRectangleAction::new();
        action.on_mouse_down(&ctx(&view, &[], p(0.0, 0.0), 0.0));
        let result = action.on_mouse_up(&ctx(&view, &[], p(4.0, 2.0), 0.0));

        let ActionResult::CreateEntities(geometries) = result else {
            panic!("expected a rectangle");
        };
        let Geometry::Polyline(rect) = &geometries[0] else {
            panic!("expected a polyline");
        };
        assert!(rect.closed);
        assert_eq!(rect.vertices, vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(0.0, 2.0)]);
    }

    #[test]
    fn test_flat_rectangle_not_committed() {
        let view = View::default();
        let mut action = DrawRectangleAction::new();
        action.on_mouse_down(&ctx(&view, &[], p(0.0, 0.0), 0.0));
        let result = action.on_mouse_up(&ctx(&view, &[], p(4.0, 0.0), 0.0));
        assert_eq!(result, ActionResult::Continue);
    }
}
