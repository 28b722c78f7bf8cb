//! 修剪 Action
//!
//! 按下时立即在光标处修剪；没有目标时什么也不做。

use crate::action::{Action, ActionContext, ActionResult};
use crate::state::Tool;
use dxfpad_core::trim::trim_at;

/// 修剪 Action
#[derive(Default)]
pub struct TrimAction;

impl TrimAction {
    pub fn new() -> Self {
        Self
    }
}

impl Action for TrimAction {
    fn tool(&self) -> Tool {
        Tool::Trim
    }

    fn reset(&mut self) {}

    fn on_mouse_down(&mut self, ctx: &ActionContext) -> ActionResult {
        let tolerance = ctx.view.px_to_world(ctx.trim_tolerance_px);
        match trim_at(ctx.entities, &ctx.mouse_pos, tolerance) {
            Some(outcome) => ActionResult::ReplaceEntity {
                index: outcome.index,
                with: outcome.replacement,
            },
            None => ActionResult::Continue,
        }
    }

    fn on_mouse_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_mouse_up(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn get_prompt(&self) -> &str {
        "选择要修剪的对象:"
    }
}
