//! 场景状态管理
//!
//! `Scene` 持有实体列表、选择集、当前工具、视图、草图与框选状态。
//! 这里只提供结构性操作；交互逻辑在 [`crate::controller`] 中。

use dxfpad_core::entity::Entity;
use dxfpad_core::geometry::{Circle, Geometry, Line, Polyline};
use dxfpad_core::math::{distance, BoundingBox2, Point2};
use dxfpad_core::pick::BoxMode;
use dxfpad_core::properties::Color;
use dxfpad_core::snap::{SnapConfig, SnapEngine, SnapPoint};
use dxfpad_core::view::{ScreenPoint, View};
use std::collections::BTreeSet;
use tracing::debug;

/// 小于此长度的草图视为退化，不提交
pub const DEGENERATE_EPSILON: f64 = 1e-6;

/// 当前工具
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Select,
    Line,
    Rect,
    Circle,
    Measure,
    Trim,
}

impl Tool {
    /// 工具栏顺序
    pub const ALL: [Tool; 6] = [
        Tool::Select,
        Tool::Line,
        Tool::Rect,
        Tool::Circle,
        Tool::Measure,
        Tool::Trim,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Line => "Line",
            Tool::Rect => "Rect",
            Tool::Circle => "Circle",
            Tool::Measure => "Measure",
            Tool::Trim => "Trim",
        }
    }

    /// 快捷键
    pub fn shortcut(&self) -> char {
        match self {
            Tool::Select => 'S',
            Tool::Line => 'L',
            Tool::Rect => 'R',
            Tool::Circle => 'C',
            Tool::Measure => 'M',
            Tool::Trim => 'T',
        }
    }

    /// 按快捷键查找工具（不区分大小写）
    pub fn from_shortcut(key: char) -> Option<Tool> {
        let key = key.to_ascii_uppercase();
        Tool::ALL.into_iter().find(|t| t.shortcut() == key)
    }

    /// 是否为绘图工具（需要点捕捉与草图）
    pub fn is_drawing(&self) -> bool {
        matches!(self, Tool::Line | Tool::Rect | Tool::Circle | Tool::Measure)
    }

    /// 是否对拖动方向做角度捕捉
    pub fn uses_angle_snap(&self) -> bool {
        matches!(self, Tool::Line | Tool::Rect | Tool::Measure)
    }
}

/// 正在绘制的草图
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    pub tool: Tool,
    pub start: Point2,
    pub end: Point2,
}

impl Draft {
    pub fn new(tool: Tool, start: Point2) -> Self {
        Self {
            tool,
            start,
            end: start,
        }
    }

    /// 草图对应的几何体
    pub fn geometry(&self) -> Geometry {
        match self.tool {
            Tool::Circle => Geometry::Circle(Circle::new(self.start, distance(&self.start, &self.end))),
            Tool::Rect => Geometry::Polyline(Polyline::rectangle(self.start, self.end)),
            _ => Geometry::Line(Line::new(self.start, self.end)),
        }
    }

    /// 零长度线、零半径圆、零宽或零高矩形
    pub fn is_degenerate(&self) -> bool {
        let dx = (self.end.x - self.start.x).abs();
        let dy = (self.end.y - self.start.y).abs();
        match self.tool {
            Tool::Rect => dx < DEGENERATE_EPSILON || dy < DEGENERATE_EPSILON,
            _ => distance(&self.start, &self.end) < DEGENERATE_EPSILON,
        }
    }

    /// 尺寸标签：线/测量为长度，圆为半径，矩形为 `W × H`
    pub fn label(&self) -> String {
        match self.tool {
            Tool::Circle => format!("R {:.2}", distance(&self.start, &self.end)),
            Tool::Rect => format!(
                "{:.2} × {:.2}",
                (self.end.x - self.start.x).abs(),
                (self.end.y - self.start.y).abs()
            ),
            _ => format!("{:.2}", distance(&self.start, &self.end)),
        }
    }
}

/// 框选矩形（屏幕坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSelect {
    pub start: ScreenPoint,
    pub end: Option<ScreenPoint>,
}

impl BoxSelect {
    /// 拖动到的位置，尚未移动时为起点
    pub fn current_end(&self) -> ScreenPoint {
        self.end.unwrap_or(self.start)
    }

    pub fn mode(&self) -> BoxMode {
        BoxMode::from_drag(self.start.x, self.current_end().x)
    }

    /// 转换到世界坐标并规范化
    pub fn world_rect(&self, view: &View) -> BoundingBox2 {
        BoundingBox2::from_corners(
            view.screen_to_world(&self.start),
            view.screen_to_world(&self.current_end()),
        )
    }
}

/// 场景状态
#[derive(Debug, Clone)]
pub struct Scene {
    /// 插入顺序即绘制顺序
    entities: Vec<Entity>,
    /// 选中实体的下标，总是有效下标的子集
    selection: BTreeSet<usize>,
    tool: Tool,
    /// 视图参数
    pub view: View,
    /// 正在绘制的草图
    pub draft: Option<Draft>,
    box_select: Option<BoxSelect>,
    /// 捕捉引擎
    pub snap: SnapEngine,
    /// 当前捕捉到的点（绘制时显示标记）
    pub snap_hit: Option<SnapPoint>,
    /// 新实体使用的颜色
    pub stroke_color: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(View::default(), SnapConfig::default(), Color::WHITE)
    }
}

impl Scene {
    pub fn new(view: View, snap: SnapConfig, stroke_color: Color) -> Self {
        Self {
            entities: Vec::new(),
            selection: BTreeSet::new(),
            tool: Tool::Select,
            view,
            draft: None,
            box_select: None,
            snap: SnapEngine::new(snap),
            snap_hit: None,
            stroke_color,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn box_select(&self) -> Option<&BoxSelect> {
        self.box_select.as_ref()
    }

    /// 设置当前工具，清除草图、框选与选择集
    pub fn set_tool(&mut self, tool: Tool) {
        debug!("tool {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        self.draft = None;
        self.box_select = None;
        self.snap_hit = None;
        self.selection.clear();
    }

    /// 清空选择
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// 添加到选择
    ///
    /// # Panics
    /// 下标越界时 panic。
    pub fn add_to_selection(&mut self, index: usize) {
        assert!(index < self.entities.len(), "selection index {} out of range", index);
        self.selection.insert(index);
    }

    /// 替换选择集
    ///
    /// # Panics
    /// 任一下标越界时 panic。
    pub fn set_selection(&mut self, selection: BTreeSet<usize>) {
        if let Some(&last) = selection.last() {
            assert!(last < self.entities.len(), "selection index {} out of range", last);
        }
        self.selection = selection;
    }

    /// 开始或更新框选
    ///
    /// `end` 为 `None` 表示刚按下尚未拖动，框仍然存在且终点取起点；
    /// 移除框选用 [`Scene::clear_box_select`]。
    pub fn set_box_select(&mut self, start: ScreenPoint, end: Option<ScreenPoint>) {
        self.box_select = Some(BoxSelect { start, end });
    }

    pub fn clear_box_select(&mut self) {
        self.box_select = None;
    }

    /// 设置角度捕捉步长（度），0 关闭
    pub fn set_snap_angle(&mut self, step_deg: f64) {
        self.snap.set_angle_step(step_deg);
    }

    /// 追加实体，返回其下标
    pub fn push(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// 移除实体；选择集中更大的下标前移一位
    ///
    /// # Panics
    /// 下标越界时 panic。
    pub fn remove_at(&mut self, index: usize) -> Entity {
        let removed = self.entities.remove(index);
        self.selection = self
            .selection
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        removed
    }

    /// 用零个或多个实体替换下标处的实体
    ///
    /// 被替换的实体从选择集中移除，更大的下标按新增数量平移。
    ///
    /// # Panics
    /// 下标越界时 panic。
    pub fn replace_at(&mut self, index: usize, replacement: Vec<Entity>) {
        assert!(index < self.entities.len(), "replace index {} out of range", index);
        let added = replacement.len();
        self.entities.splice(index..=index, replacement);
        self.selection = self
            .selection
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i + added - 1 } else { i })
            .collect();
    }

    /// 整体替换实体列表（导入），清空选择、草图与框选
    pub fn replace_entities(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
        self.selection.clear();
        self.draft = None;
        self.box_select = None;
        self.snap_hit = None;
    }

    /// 修改实体颜色
    ///
    /// # Panics
    /// 下标越界时 panic。
    pub fn set_color_at(&mut self, index: usize, color: Color) {
        self.entities[index].color = color;
    }
}
