//! DXFPad 场景状态与交互控制
//!
//! - `state`: 场景（实体、选择集、工具、视图、草图）
//! - `action` / `actions`: 每个工具的状态机
//! - `controller`: 事件入口
//! - `toolbar`: 基于egui的工具栏

pub mod action;
pub mod actions;
pub mod config;
pub mod controller;
pub mod state;
pub mod status;
pub mod toolbar;

pub use action::{Action, ActionContext, ActionResult};
pub use actions::create_action;
pub use config::{ConfigError, EditorConfig, CONFIG_FILE_NAME};
pub use controller::{Controller, EditorKey, PointerButton};
pub use state::{BoxSelect, Draft, Scene, Tool};
pub use toolbar::{show_toolbar, ToolbarCommand};
