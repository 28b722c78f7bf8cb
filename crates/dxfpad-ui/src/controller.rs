//! 交互控制器
//!
//! 接收指针、滚轮与键盘事件，转发给当前工具的 [`Action`]，
//! 再把结果应用到 [`Scene`]。所有修改都在一次调用内同步完成。

use crate::action::{Action, ActionContext, ActionResult};
use crate::actions::create_action;
use crate::config::EditorConfig;
use crate::state::{Scene, Tool};
use crate::status;
use dxfpad_core::entity::{entities_bounds, Entity};
use dxfpad_core::math::Point2;
use dxfpad_core::properties::Color;
use dxfpad_core::snap::SnapPoint;
use dxfpad_core::view::{ScreenPoint, View};
use dxfpad_file::FileError;
use tracing::{debug, info};

/// 鼠标按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// 控制器关心的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Escape,
    Delete,
    /// 工具快捷键
    Char(char),
}

/// 交互控制器，持有场景
pub struct Controller {
    scene: Scene,
    action: Box<dyn Action>,
    config: EditorConfig,
    /// 右键平移时上一次的屏幕位置
    pan_anchor: Option<ScreenPoint>,
    /// 左键是否按下（拖动中）
    primary_down: bool,
    cursor_world: Point2,
}

impl Controller {
    pub fn new(config: EditorConfig, width: f64, height: f64) -> Self {
        let mut scene = Scene::new(
            View::new(width, height),
            config.snap_config(),
            config.stroke_color(),
        );
        scene.set_snap_angle(config.default_angle_step);
        Self {
            scene,
            action: create_action(Tool::Select),
            config,
            pan_anchor: None,
            primary_down: false,
            cursor_world: Point2::origin(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// 光标的世界坐标
    pub fn cursor_world(&self) -> Point2 {
        self.cursor_world
    }

    /// 当前工具的提示
    pub fn prompt(&self) -> &str {
        self.action.get_prompt()
    }

    pub fn status_text(&self) -> String {
        status::status_text(&self.scene)
    }

    pub fn coordinates_text(&self) -> String {
        status::coordinates_text(&self.cursor_world)
    }

    // ========== 指针事件 ==========

    pub fn pointer_down(&mut self, screen: ScreenPoint, button: PointerButton) {
        match button {
            PointerButton::Secondary => self.pan_anchor = Some(screen),
            PointerButton::Middle => {}
            PointerButton::Primary => {
                self.primary_down = true;
                let snap = self.track_cursor(&screen);
                let ctx = action_context(&self.scene, &self.config, &screen, snap);
                let result = self.action.on_mouse_down(&ctx);
                self.apply(result);
            }
        }
    }

    /// 指针移动
    ///
    /// 右键平移期间只更新视图与光标，除非左键拖动也在进行，否则不转发给工具。
    pub fn pointer_move(&mut self, screen: ScreenPoint) {
        // 平移：原始屏幕位移
        if let Some(anchor) = self.pan_anchor {
            self.scene.view.pan(screen.x - anchor.x, screen.y - anchor.y);
            self.pan_anchor = Some(screen);
        }

        let snap = self.track_cursor(&screen);
        if self.pan_anchor.is_some() && !self.primary_down {
            return;
        }
        let ctx = action_context(&self.scene, &self.config, &screen, snap);
        let result = self.action.on_mouse_move(&ctx);
        self.apply(result);
    }

    pub fn pointer_up(&mut self, screen: ScreenPoint, button: PointerButton) {
        match button {
            PointerButton::Secondary => self.pan_anchor = None,
            PointerButton::Middle => {}
            PointerButton::Primary => {
                self.primary_down = false;
                let snap = self.track_cursor(&screen);
                let ctx = action_context(&self.scene, &self.config, &screen, snap);
                let result = self.action.on_mouse_up(&ctx);
                self.apply(result);
            }
        }
    }

    /// 滚轮缩放：`direction > 0` 放大，光标下的世界点不动
    pub fn wheel(&mut self, screen: ScreenPoint, direction: f64) {
        let factor = (direction * self.config.zoom_step).exp();
        self.scene.view.zoom_at(&screen, factor);
    }

    /// 更新光标位置与捕捉点；只有绘图工具做点捕捉
    fn track_cursor(&mut self, screen: &ScreenPoint) -> Option<SnapPoint> {
        self.cursor_world = self.scene.view.screen_to_world(screen);
        let snap = if self.scene.tool().is_drawing() {
            self.scene.snap.find_snap_point(
                self.cursor_world,
                self.scene.entities(),
                self.scene.view.scale,
            )
        } else {
            None
        };
        self.scene.snap_hit = snap;
        snap
    }

    // ========== 键盘 ==========

    /// 处理按键，返回是否已处理
    pub fn handle_key(&mut self, key: EditorKey) -> bool {
        match key {
            EditorKey::Escape => {
                self.cancel();
                true
            }
            EditorKey::Delete => {
                self.delete_selected();
                true
            }
            EditorKey::Char(c) => match Tool::from_shortcut(c) {
                Some(tool) => {
                    self.set_tool(tool);
                    true
                }
                None => false,
            },
        }
    }

    /// 回到选择工具，清空选择、框选与草图
    pub fn cancel(&mut self) {
        self.set_tool(Tool::Select);
    }

    // ========== 工具栏命令 ==========

    pub fn set_tool(&mut self, tool: Tool) {
        self.scene.set_tool(tool);
        self.action = create_action(tool);
        self.pan_anchor = None;
        self.primary_down = false;
    }

    pub fn set_snap_angle(&mut self, step_deg: f64) {
        self.scene.set_snap_angle(step_deg);
    }

    /// 设置描边颜色，并立即应用到所有选中实体
    pub fn set_stroke_color(&mut self, color: Color) {
        self.scene.stroke_color = color;
        let selected: Vec<usize> = self.scene.selection().iter().copied().collect();
        for index in selected {
            self.scene.set_color_at(index, color);
        }
    }

    /// 按下标降序删除选中实体，返回删除数量
    pub fn delete_selected(&mut self) -> usize {
        let selected: Vec<usize> = self.scene.selection().iter().rev().copied().collect();
        for &index in &selected {
            self.scene.remove_at(index);
        }
        self.scene.clear_selection();
        if !selected.is_empty() {
            debug!("deleted {} entities", selected.len());
        }
        selected.len()
    }

    // ========== 视图 ==========

    /// 绘图表面尺寸变化
    pub fn resize(&mut self, width: f64, height: f64) {
        self.scene.view.resize(width, height);
    }

    /// 缩放到全部实体；没有实体或包围盒退化时不变
    pub fn zoom_extents(&mut self) -> bool {
        match entities_bounds(self.scene.entities()) {
            Some(bounds) => self.scene.view.fit_to_bounds(&bounds, self.config.fit_padding_px),
            None => false,
        }
    }

    // ========== 文件 ==========

    /// 导入 DXF 文本，替换全部实体并自动适配视图
    ///
    /// 解析失败时场景保持不变。
    pub fn load_dxf(&mut self, text: &str) -> Result<usize, FileError> {
        let entities = dxfpad_file::import_str(text)?;
        let count = entities.len();
        self.scene.replace_entities(entities);
        self.action.reset();
        self.zoom_extents();
        info!("loaded {} entities", count);
        Ok(count)
    }

    /// 导出当前实体为 DXF 文本
    pub fn export_dxf(&self) -> String {
        dxfpad_file::export_string(self.scene.entities())
    }

    // ========== 内部 ==========

    fn apply(&mut self, result: ActionResult) {
        match result {
            ActionResult::Continue => {}
            ActionResult::CreateEntities(geometries) => {
                for geometry in geometries {
                    let entity = Entity::new(geometry, self.scene.stroke_color);
                    let index = self.scene.push(entity);
                    debug!("created {} #{}", self.scene.entities()[index].geometry.type_name(), index);
                }
            }
            ActionResult::ReplaceEntity { index, with } => {
                self.scene.replace_at(index, with);
            }
            ActionResult::SetSelection(selection) => {
                self.scene.set_selection(selection);
            }
        }

        // 同步预览
        self.scene.draft = self.action.draft();
        match self.action.box_select() {
            Some(rect) => self.scene.set_box_select(rect.start, rect.end),
            None => self.scene.clear_box_select(),
        }
    }
}

/// 构造 Action 上下文
fn action_context<'a>(
    scene: &'a Scene,
    config: &EditorConfig,
    screen: &ScreenPoint,
    snap: Option<SnapPoint>,
) -> ActionContext<'a> {
    ActionContext {
        mouse_pos: scene.view.screen_to_world(screen),
        screen_pos: *screen,
        snap_pos: snap.map(|s| s.point),
        entities: scene.entities(),
        view: &scene.view,
        angle_step: scene.snap.config().angle_step,
        pick_tolerance_px: config.pick_tolerance_px,
        trim_tolerance_px: config.trim_tolerance_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> Controller {
        Controller::new(EditorConfig::default(), 800.0, 600.0)
    }

    #[test]
    fn test_wheel_keeps_cursor_anchor() {
        let mut c = controller();
        let cursor = ScreenPoint::new(123.0, 456.0);
        let before = c.scene().view.screen_to_world(&cursor);
        c.wheel(cursor, 1.0);
        let after = c.scene().view.screen_to_world(&cursor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert!((c.scene().view.scale - (0.1f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_right_drag_pans() {
        let mut c = controller();
        c.pointer_down(ScreenPoint::new(100.0, 100.0), PointerButton::Secondary);
        c.pointer_move(ScreenPoint::new(130.0, 80.0));
        c.pointer_up(ScreenPoint::new(130.0, 80.0), PointerButton::Secondary);
        assert!((c.scene().view.offset_x - 30.0).abs() < 1e-12);
        assert!((c.scene().view.offset_y + 20.0).abs() < 1e-12);

        // 松开后不再平移
        c.pointer_move(ScreenPoint::new(500.0, 500.0));
        assert!((c.scene().view.offset_x - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_pan_alone_leaves_tool_untouched() {
        let mut c = controller();
        c.pointer_down(ScreenPoint::new(100.0, 100.0), PointerButton::Secondary);
        c.pointer_move(ScreenPoint::new(160.0, 140.0));
        assert!(c.scene().box_select().is_none());
        assert_eq!(c.prompt(), "选择对象:");

        // 光标坐标仍然跟随
        let expected = c.scene().view.screen_to_world(&ScreenPoint::new(160.0, 140.0));
        assert!((c.cursor_world().x - expected.x).abs() < 1e-9);
        assert!((c.cursor_world().y - expected.y).abs() < 1e-9);
    }

    #[test]
    fn test_pan_during_primary_drag_still_updates_box() {
        let mut c = controller();
        c.pointer_down(ScreenPoint::new(100.0, 100.0), PointerButton::Primary);
        c.pointer_down(ScreenPoint::new(100.0, 100.0), PointerButton::Secondary);
        c.pointer_move(ScreenPoint::new(150.0, 120.0));

        assert!((c.scene().view.offset_x - 50.0).abs() < 1e-12);
        let rect = c.scene().box_select().copied().expect("box while dragging");
        assert_eq!(rect.end, Some(ScreenPoint::new(150.0, 120.0)));

        // 左键松开后仅剩平移，不再转发
        c.pointer_up(ScreenPoint::new(150.0, 120.0), PointerButton::Primary);
        c.pointer_move(ScreenPoint::new(170.0, 120.0));
        assert!(c.scene().box_select().is_none());
        assert!((c.scene().view.offset_x - 70.0).abs() < 1e-12);
    }

    #[test]
    fn test_handle_key_shortcuts() {
        let mut c = controller();
        assert!(c.handle_key(EditorKey::Char('c')));
        assert_eq!(c.scene().tool(), Tool::Circle);
        assert_eq!(c.status_text(), "Mode: CIRCLE");
        assert!(!c.handle_key(EditorKey::Char('z')));
        assert!(c.handle_key(EditorKey::Escape));
        assert_eq!(c.scene().tool(), Tool::Select);
    }
}
