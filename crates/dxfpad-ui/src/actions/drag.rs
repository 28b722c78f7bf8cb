//! 拖动式绘图的公共状态
//!
//! 按下确定起点，移动更新终点，松开时提交。

use crate::action::ActionContext;
use crate::state::{Draft, Tool};
use dxfpad_core::snap::snap_angle;

/// 拖动绘制状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Status {
    /// 等待按下
    Idle,
    /// 正在拖动
    Dragging(Draft),
}

/// 拖动式绘图的共享逻辑
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    tool: Tool,
    status: Status,
}

impl DragState {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            status: Status::Idle,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
    }

    pub fn draft(&self) -> Option<Draft> {
        match self.status {
            Status::Idle => None,
            Status::Dragging(draft) => Some(draft),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.status, Status::Dragging(_))
    }

    /// 按下：起点优先使用捕捉点
    pub fn begin(&mut self, ctx: &ActionContext) {
        self.status = Status::Dragging(Draft::new(self.tool, ctx.effective_point()));
    }

    /// 移动：终点优先使用捕捉点，否则按需做角度捕捉
    pub fn update(&mut self, ctx: &ActionContext) {
        if let Status::Dragging(draft) = &mut self.status {
            draft.end = match ctx.snap_pos {
                Some(p) => p,
                None if self.tool.uses_angle_snap() => {
                    snap_angle(draft.start, ctx.mouse_pos, ctx.angle_step).pos
                }
                None => ctx.mouse_pos,
            };
        }
    }

    /// 松开：先用松开位置更新终点，再取出草图；退化草图返回 `None`
    pub fn finish(&mut self, ctx: &ActionContext) -> Option<Draft> {
        self.update(ctx);
        let draft = self.draft();
        self.reset();
        draft.filter(|d| !d.is_degenerate())
    }

    pub fn prompt(&self, first: &'static str, second: &'static str) -> &'static str {
        if self.is_dragging() {
            second
        } else {
            first
        }
    }
}
