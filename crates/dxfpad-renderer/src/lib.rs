//! DXFPad 渲染器
//!
//! 把 [`dxfpad_ui::Scene`] 画到二维光栅表面上。
//!
//! - `Surface`: 绘图表面抽象
//! - `PixmapSurface`: 基于 tiny-skia 的 CPU 光栅实现
//! - `Renderer`: 固定顺序的绘制过程（无状态）

pub mod grid;
pub mod renderer;
pub mod surface;

pub use renderer::{RenderError, RenderStyle, Renderer};
pub use surface::{PixmapSurface, StrokeStyle, Surface, TextLabel};
