//! 编辑器配置
//!
//! 从工作目录下的 `dxfpad.json` 读取；文件不存在时使用默认值。
//! 缺失的字段按默认值补齐。

use dxfpad_core::properties::Color;
use dxfpad_core::snap::SnapConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "dxfpad.json";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置值超出有效范围
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },
}

/// 编辑器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// 点捕捉容差（像素）
    pub snap_tolerance_px: f64,
    /// 点选容差（像素）
    pub pick_tolerance_px: f64,
    /// 修剪目标容差（像素）
    pub trim_tolerance_px: f64,
    /// 工具栏上的角度捕捉步长（度），0 表示关闭
    pub angle_steps: Vec<f64>,
    /// 初始角度步长
    pub default_angle_step: f64,
    /// 初始描边颜色 `#rrggbb`
    pub stroke_color: String,
    /// 滚轮缩放指数步长
    pub zoom_step: f64,
    /// 自动适配时的像素边距
    pub fit_padding_px: f64,
    /// 导出对话框的默认文件名
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_tolerance_px: 15.0,
            pick_tolerance_px: 10.0,
            trim_tolerance_px: 10.0,
            angle_steps: vec![0.0, 15.0, 30.0, 45.0, 90.0],
            default_angle_step: 0.0,
            stroke_color: Color::WHITE.to_hex(),
            zoom_step: 0.1,
            fit_padding_px: 100.0,
            export_file_name: "drawing.dxf".to_string(),
        }
    }
}

impl EditorConfig {
    /// 从 JSON 文本解析并校验
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件读取
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 读取配置；文件不存在或无效时回退到默认值
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("snap_tolerance_px", self.snap_tolerance_px),
            ("pick_tolerance_px", self.pick_tolerance_px),
            ("trim_tolerance_px", self.trim_tolerance_px),
            ("zoom_step", self.zoom_step),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(out_of_range(key, value));
            }
        }

        if !(self.fit_padding_px.is_finite() && self.fit_padding_px >= 0.0) {
            return Err(out_of_range("fit_padding_px", self.fit_padding_px));
        }

        for step in self.angle_steps.iter().chain([&self.default_angle_step]) {
            if !(step.is_finite() && (0.0..360.0).contains(step)) {
                return Err(out_of_range("angle_steps", *step));
            }
        }

        if self.stroke_color.parse::<Color>().is_err() {
            return Err(out_of_range("stroke_color", &self.stroke_color));
        }

        Ok(())
    }

    /// 初始描边颜色
    pub fn stroke_color(&self) -> Color {
        self.stroke_color.parse().unwrap_or_default()
    }

    /// 捕捉配置
    pub fn snap_config(&self) -> SnapConfig {
        SnapConfig {
            tolerance: self.snap_tolerance_px,
            angle_step: self.default_angle_step,
        }
    }
}

fn out_of_range(key: &str, value: impl std::fmt::Display) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
