//! 绘制圆 Action
//!
//! 按下确定圆心，松开位置到圆心的距离为半径。

use super::drag::DragState;
use crate::action::{Action, ActionContext, ActionResult};
use crate::state::{Draft, Tool};

/// 绘制圆 Action
pub struct DrawCircleAction {
    drag: DragState,
}

impl DrawCircleAction {
    pub fn new() -> Self {
        Self {
            drag: DragState::new(Tool::Circle),
        }
    }
}

impl Default for DrawCircleAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DrawCircleAction {
    fn tool(&self) -> Tool {
        Tool::Circle
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
            Some(draft) => ActionResult::CreateEntities(vec![draft.geometry()]),
            None => ActionResult::Continue,
        }
    }

    fn draft(&self) -> Option<Draft> {
        self.drag.draft()
    }

    fn get_prompt(&self) -> &str {
        self.drag.prompt("指定圆心:", "指定半径:")
    }
}

#[cfg(test)]
mod tests {
    use super::super::drag::test_support::{ctx, p};
    use super::*;
    use dxfpad_core::geometry::Geometry;
    use dxfpad_core::view::View;

    #[test]
    fn test_circle_radius_ignores_angle_snap() {
        let view = View::default();
        let mut action = DrawCircleAction::new();
        action.on_mouse_down(&ctx(&view, &[], p(1.0, 1.0), 90.0));
        let result = action.on_mouse_up(&ctx(&view, &[], p(4.0, 5.0), 90.0));

        let ActionResult::CreateEntities(geometries) = result else {
            panic!("expected a circle");
        };
        let Geometry::Circle(circle) = &geometries[0] else {
            panic!("expected a circle");
        };
        assert_eq!(circle.center, p(1.0, 1.0));
        assert!((circle.radius - 5.0).abs() < 1e-9);
    }
}
