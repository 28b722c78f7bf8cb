//! 工具栏

use crate::controller::Controller;
use crate::state::Tool;
use dxfpad_core::properties::Color;

/// 需要宿主处理的工具栏命令（文件对话框等）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    Open,
    Export,
    ZoomExtents,
}

/// 渲染工具栏
pub fn show_toolbar(ctx: &egui::Context, controller: &mut Controller) -> Option<ToolbarCommand> {
    let mut command = None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;

            // 文件操作
            if ui.button("📂 Open").clicked() {
                command = Some(ToolbarCommand::Open);
            }
            if ui.button("💾 Export").clicked() {
                command = Some(ToolbarCommand::Export);
            }

            ui.separator();

            // 工具
            tool_button(ui, controller, Tool::Select, "⬚", "Select (S)");
            tool_button(ui, controller, Tool::Line, "╱", "Line (L)");
            tool_button(ui, controller, Tool::Rect, "▭", "Rectangle (R)");
            tool_button(ui, controller, Tool::Circle, "○", "Circle (C)");
            tool_button(ui, controller, Tool::Measure, "📏", "Measure (M)");
            tool_button(ui, controller, Tool::Trim, "✂", "Trim (T)");

            ui.separator();

            // 角度捕捉
            ui.label("∠");
            let current = controller.scene().snap.config().angle_step;
            let steps = controller.config().angle_steps.clone();
            for step in steps {
                let text = if step == 0.0 {
                    "Off".to_string()
                } else {
                    format!("{}°", step)
                };
                if ui
                    .selectable_label((current - step).abs() < f64::EPSILON, text)
                    .clicked()
                {
                    controller.set_snap_angle(step);
                }
            }

            ui.separator();

            if ui
                .button("🗑 Delete")
                .on_hover_text("Delete selected (Del)")
                .clicked()
            {
                controller.delete_selected();
            }

            // 描边颜色，修改后立即应用到选中实体
            let mut rgb = controller.scene().stroke_color.to_array();
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                controller.set_stroke_color(Color::from(rgb));
            }

            ui.separator();

            if ui.button("⛶").on_hover_text("Zoom Extents").clicked() {
                command = Some(ToolbarCommand::ZoomExtents);
            }
        });
    });

    command
}

fn tool_button(ui: &mut egui::Ui, controller: &mut Controller, tool: Tool, icon: &str, tooltip: &str) {
    let selected = controller.scene().tool() == tool;

    let button = egui::Button::new(icon).selected(selected);

    if ui.add(button).on_hover_text(tooltip).clicked() {
        controller.set_tool(tool);
    }
}
