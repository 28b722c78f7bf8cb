//! 选择 Action
//!
//! 点中实体直接替换选择集；点在空白处开始框选，松开时按拖动方向分类。

use crate::action::{Action, ActionContext, ActionResult};
use crate::state::{BoxSelect, Tool};
use dxfpad_core::pick::{classify_box, entity_at};
use std::collections::BTreeSet;
use tracing::debug;

/// 选择状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 空闲，等待选择
    Idle,
    /// 正在框选
    BoxSelect(BoxSelect),
}

/// 选择 Action
pub struct SelectAction {
    status: Status,
}

impl SelectAction {
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
        }
    }

    /// 是否正在框选
    pub fn is_box_selecting(&self) -> bool {
        matches!(self.status, Status::BoxSelect(_))
    }
}

impl Default for SelectAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for SelectAction {
    fn tool(&self) -> Tool {
        Tool::Select
    }

    fn reset(&mut self) {
        self.status = Status::Idle;
    }

    fn on_mouse_down(&mut self, ctx: &ActionContext) -> ActionResult {
        let tolerance = ctx.view.px_to_world(ctx.pick_tolerance_px);
        match entity_at(ctx.entities, &ctx.mouse_pos, tolerance) {
            Some(index) => {
                self.status = Status::Idle;
                ActionResult::SetSelection(BTreeSet::from([index]))
            }
            None => {
                // 开始框选
                self.status = Status::BoxSelect(BoxSelect {
                    start: ctx.screen_pos,
                    end: None,
                });
                ActionResult::Continue
            }
        }
    }

    fn on_mouse_move(&mut self, ctx: &ActionContext) -> ActionResult {
        if let Status::BoxSelect(rect) = &mut self.status {
            rect.end = Some(ctx.screen_pos);
        }
        ActionResult::Continue
    }

    fn on_mouse_up(&mut self, ctx: &ActionContext) -> ActionResult {
        let Status::BoxSelect(mut rect) = self.status else {
            return ActionResult::Continue;
        };
        self.status = Status::Idle;

        rect.end = Some(ctx.screen_pos);
        let mode = rect.mode();
        let selection = classify_box(ctx.entities, &rect.world_rect(ctx.view), mode);
        debug!("box select ({:?}): {} entities", mode, selection.len());
        ActionResult::SetSelection(selection)
    }

    fn box_select(&self) -> Option<BoxSelect> {
        match self.status {
            Status::BoxSelect(rect) => Some(rect),
            Status::Idle => None,
        }
    }

    fn get_prompt(&self) -> &str {
        match self.status {
            Status::Idle => "选择对象:",
            Status::BoxSelect(_) => "指定对角点:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::drag::test_support::{ctx, p};
    use super::*;
    use dxfpad_core::entity::Entity;
    use dxfpad_core::properties::Color;
    use dxfpad_core::view::View;

    fn entities() -> Vec<Entity> {
        vec![
            Entity::line(p(-50.0, 0.0), p(50.0, 0.0), Color::WHITE),
            Entity::circle(p(200.0, 0.0), 20.0, Color::WHITE),
        ]
    }

    #[test]
    fn test_click_on_entity_replaces_selection() {
        let view = View::default();
        let entities = entities();
        let mut action = SelectAction::new();

        let result = action.on_mouse_down(&ctx(&view, &entities, p(10.0, 3.0), 0.0));
        assert_eq!(result, ActionResult::SetSelection(BTreeSet::from([0])));
        assert!(!action.is_box_selecting());
        assert_eq!(action.on_mouse_up(&ctx(&view, &entities, p(10.0, 3.0), 0.0)), ActionResult::Continue);
    }

    #[test]
    fn test_empty_click_clears_selection() {
        let view = View::default();
        let entities = entities();
        let mut action = SelectAction::new();

        action.on_mouse_down(&ctx(&view, &entities, p(100.0, 100.0), 0.0));
        assert!(action.is_box_selecting());
        let result = action.on_mouse_up(&ctx(&view, &entities, p(100.0, 100.0), 0.0));
        assert_eq!(result, ActionResult::SetSelection(BTreeSet::new()));
    }

    #[test]
    fn test_window_and_crossing_drag() {
        let view = View::default();
        let entities = entities();

        // 从左向右：窗口只包住直线
        let mut action = SelectAction::new();
        action.on_mouse_down(&ctx(&view, &entities, p(-60.0, 30.0), 0.0));
        action.on_mouse_move(&ctx(&view, &entities, p(190.0, -30.0), 0.0));
        assert!(action.box_select().is_some());
        let result = action.on_mouse_up(&ctx(&view, &entities, p(190.0, -30.0), 0.0));
        assert_eq!(result, ActionResult::SetSelection(BTreeSet::from([0])));

        // 从右向左：交叉选择还包括圆
        let mut action = SelectAction::new();
        action.on_mouse_down(&ctx(&view, &entities, p(190.0, -30.0), 0.0));
        let result = action.on_mouse_up(&ctx(&view, &entities, p(-60.0, 30.0), 0.0));
        assert_eq!(result, ActionResult::SetSelection(BTreeSet::from([0, 1])));
    }
}
