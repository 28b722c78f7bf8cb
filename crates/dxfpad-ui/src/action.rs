//! Action 系统 - 每个工具一个状态机
//!
//! 每个绘图/编辑工具是一个独立的 Action 实现，
//! 由控制器转发指针事件，并把返回的 [`ActionResult`] 应用到场景。

use crate::state::{BoxSelect, Draft, Tool};
use dxfpad_core::entity::Entity;
use dxfpad_core::geometry::Geometry;
use dxfpad_core::math::Point2;
use dxfpad_core::view::{ScreenPoint, View};
use std::collections::BTreeSet;

/// Action 执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// 继续当前 action
    Continue,
    /// 完成当前 action，创建实体（使用当前描边颜色）
    CreateEntities(Vec<Geometry>),
    /// 用零个或多个实体替换一个实体
    ReplaceEntity { index: usize, with: Vec<Entity> },
    /// 替换选择集
    SetSelection(BTreeSet<usize>),
}

/// Action 上下文 - 传递给 Action 的运行时信息
pub struct ActionContext<'a> {
    /// 鼠标世界坐标
    pub mouse_pos: Point2,
    /// 鼠标屏幕坐标
    pub screen_pos: ScreenPoint,
    /// 捕捉后的坐标（如果有）
    pub snap_pos: Option<Point2>,
    /// 所有实体
    pub entities: &'a [Entity],
    /// 当前视图（像素容差换算）
    pub view: &'a View,
    /// 角度捕捉步长（度），0 关闭
    pub angle_step: f64,
    /// 点选容差（像素）
    pub pick_tolerance_px: f64,
    /// 修剪容差（像素）
    pub trim_tolerance_px: f64,
}

impl<'a> ActionContext<'a> {
    /// 获取有效点（优先使用捕捉点）
    pub fn effective_point(&self) -> Point2 {
        self.snap_pos.unwrap_or(self.mouse_pos)
    }
}

/// Action trait - 所有工具的核心接口
pub trait Action: Send {
    /// 对应的工具
    fn tool(&self) -> Tool;

    /// 重置 action 状态
    fn reset(&mut self);

    // ========== 事件处理 ==========

    /// 左键按下
    fn on_mouse_down(&mut self, ctx: &ActionContext) -> ActionResult;

    /// 鼠标移动
    fn on_mouse_move(&mut self, ctx: &ActionContext) -> ActionResult;

    /// 左键松开
    fn on_mouse_up(&mut self, ctx: &ActionContext) -> ActionResult;

    // ========== 预览 ==========

    /// 当前草图
    fn draft(&self) -> Option<Draft> {
        None
    }

    /// 当前框选矩形
    fn box_select(&self) -> Option<BoxSelect> {
        None
    }

    // ========== UI 提示 ==========

    /// 获取当前状态的提示文本
    fn get_prompt(&self) -> &str;
}
