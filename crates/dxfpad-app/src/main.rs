//! DXFPad 主应用程序入口
//! 使用 eframe 作为应用框架，场景由 tiny-skia 光栅化后作为贴图显示

use std::path::Path;

use anyhow::Result;
use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dxfpad_core::properties::Color;
use dxfpad_core::view::ScreenPoint;
use dxfpad_renderer::{PixmapSurface, Renderer};
use dxfpad_ui::{
    show_toolbar, Controller, EditorConfig, EditorKey, PointerButton, Tool, ToolbarCommand,
    CONFIG_FILE_NAME,
};

/// 画布像素尺寸下限
const MIN_CANVAS_PX: u32 = 1;

/// DXFPad 应用程序
struct DxfPadApp {
    controller: Controller,
    renderer: Renderer,
    surface: Option<PixmapSurface>,
    texture: Option<egui::TextureHandle>,
    canvas_size: (u32, u32),
    /// 在画布内按下、尚未松开的按钮
    held: Vec<PointerButton>,
    /// 最近一次文件操作的结果
    message: Option<String>,
}

impl DxfPadApp {
    fn new(config: EditorConfig) -> Self {
        Self {
            controller: Controller::new(config, 800.0, 600.0),
            renderer: Renderer::default(),
            surface: None,
            texture: None,
            canvas_size: (0, 0),
            held: Vec::new(),
            message: None,
        }
    }

    /// 打开文件对话框并导入
    fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("DXF Files", &["dxf"])
            .add_filter("All Files", &["*"])
            .set_title("Open DXF")
            .pick_file()
        else {
            return;
        };

        match self.load_path(&path) {
            Ok(count) => {
                info!("Opened file: {} ({} entities)", path.display(), count);
                self.message = Some(format!("Opened {}", path.display()));
            }
            Err(e) => {
                error!("Failed to open file: {}", e);
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Open failed")
                    .set_description(e.to_string())
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
        }
    }

    fn load_path(&mut self, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.controller.load_dxf(&text)?)
    }

    /// 保存对话框并导出
    fn export_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("DXF Files", &["dxf"])
            .set_title("Export DXF")
            .set_file_name(&self.controller.config().export_file_name)
            .save_file()
        else {
            return;
        };

        match self.write_path(&path) {
            Ok(()) => {
                info!("Exported file: {}", path.display());
                self.message = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!("Failed to export file: {}", e);
                self.message = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn write_path(&self, path: &Path) -> Result<()> {
        dxfpad_file::export(self.controller.scene().entities(), path)?;
        Ok(())
    }

    /// 画布尺寸变化时同步视图和像素缓冲
    fn sync_canvas_size(&mut self, size: egui::Vec2) {
        let width = (size.x.round() as u32).max(MIN_CANVAS_PX);
        let height = (size.y.round() as u32).max(MIN_CANVAS_PX);
        if self.canvas_size == (width, height) && self.surface.is_some() {
            return;
        }

        let surface = match self.surface.take() {
            Some(mut surface) => surface.resize(width, height).map(|_| surface),
            None => PixmapSurface::new(width, height),
        };
        match surface {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => error!("Failed to allocate canvas: {}", e),
        }
        self.canvas_size = (width, height);
        self.controller.resize(width as f64, height as f64);
    }

    /// 把画布内的指针与滚轮事件转交给控制器
    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let rect = response.rect;
        let to_screen = |pos: egui::Pos2| {
            ScreenPoint::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
        };

        let (latest, pressed, released, scroll) = ui.input(|i| {
            let buttons = [
                (egui::PointerButton::Primary, PointerButton::Primary),
                (egui::PointerButton::Secondary, PointerButton::Secondary),
                (egui::PointerButton::Middle, PointerButton::Middle),
            ];
            let pressed: Vec<PointerButton> = buttons
                .iter()
                .filter(|(b, _)| i.pointer.button_pressed(*b))
                .map(|(_, ours)| *ours)
                .collect();
            let released: Vec<PointerButton> = buttons
                .iter()
                .filter(|(b, _)| i.pointer.button_released(*b))
                .map(|(_, ours)| *ours)
                .collect();
            (i.pointer.latest_pos(), pressed, released, i.raw_scroll_delta.y)
        });

        let Some(pos) = latest else {
            return;
        };
        let screen = to_screen(pos);

        if response.hovered() || !self.held.is_empty() {
            self.controller.pointer_move(screen);
        }

        if response.hovered() {
            for button in pressed {
                self.held.push(button);
                self.controller.pointer_down(screen, button);
            }
            if scroll.abs() > 0.0 {
                self.controller.wheel(screen, scroll.signum() as f64);
            }
        }

        for button in released {
            if let Some(index) = self.held.iter().position(|b| *b == button) {
                self.held.remove(index);
                self.controller.pointer_up(screen, button);
            }
        }
    }

    /// 键盘快捷键
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let keys = ctx.input(|i| {
            let mut keys = Vec::new();
            if i.key_pressed(egui::Key::Escape) {
                keys.push(EditorKey::Escape);
            }
            if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
                keys.push(EditorKey::Delete);
            }
            for tool in Tool::ALL {
                if let Some(key) = egui::Key::from_name(&tool.shortcut().to_string()) {
                    if i.key_pressed(key) && !i.modifiers.command {
                        keys.push(EditorKey::Char(tool.shortcut()));
                    }
                }
            }
            keys
        });

        for key in keys {
            self.controller.handle_key(key);
        }
    }

    /// 渲染场景并更新贴图
    fn paint_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.renderer.render(self.controller.scene(), surface);

        let (width, height) = self.canvas_size;
        let image = egui::ColorImage::from_rgba_premultiplied(
            [width as usize, height as usize],
            surface.data(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST));
            }
        }

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        // 尺寸标签叠加在贴图之上
        for label in surface.labels() {
            painter.text(
                rect.min + egui::vec2(label.pos.x as f32, label.pos.y as f32),
                egui::Align2::LEFT_BOTTOM,
                &label.text,
                egui::FontId::proportional(13.0),
                to_color32(label.color),
            );
        }
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

impl eframe::App for DxfPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 深色主题
        ctx.set_visuals(egui::Visuals::dark());

        // ===== 工具栏 =====
        match show_toolbar(ctx, &mut self.controller) {
            Some(ToolbarCommand::Open) => self.open_file(),
            Some(ToolbarCommand::Export) => self.export_file(),
            Some(ToolbarCommand::ZoomExtents) => {
                self.controller.zoom_extents();
            }
            None => {}
        }

        // ===== 底部状态栏 =====
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.controller.status_text());
                ui.separator();
                ui.label(self.controller.prompt());
                if let Some(message) = &self.message {
                    ui.separator();
                    ui.label(message);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.controller.coordinates_text());
                });
            });
        });

        self.handle_keys(ctx);

        // ===== 中央绘图区域 =====
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available_rect = ui.available_rect_before_wrap();
                self.sync_canvas_size(available_rect.size());

                let (response, painter) =
                    ui.allocate_painter(available_rect.size(), egui::Sense::click_and_drag());

                self.handle_pointer(ui, &response);
                self.paint_canvas(ctx, &painter, response.rect);
            });
    }
}

fn main() -> Result<()> {
    // 初始化日志，默认 info，可用 RUST_LOG 覆盖
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_env_filter(filter).finish())?;

    info!("Starting DXFPad...");

    let config = EditorConfig::load_or_default(Path::new(CONFIG_FILE_NAME));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("DXFPad"),
        ..Default::default()
    };

    eframe::run_native(
        "DXFPad",
        native_options,
        Box::new(|_cc| Ok(Box::new(DxfPadApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
