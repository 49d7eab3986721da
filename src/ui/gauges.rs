use egui;

use super::{graphs, GaugePanel, UiState};
use crate::simulation::Pond;

const FOOD_COLOR: egui::Color32 = egui::Color32::from_rgb(214, 170, 96);
const FOOD_LOW_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const LOVE_COLOR: egui::Color32 = egui::Color32::from_rgb(232, 120, 150);

/// Compact gauge card in the top-left corner.
pub fn draw_gauges(ctx: &egui::Context, pond: &mut Pond, ui_state: &mut UiState, panel: &GaugePanel) {
    let glow = (panel.warning_level * 153.0) as u8;
    let frame = egui::Frame::window(&ctx.style())
        .stroke(egui::Stroke::new(
            1.0 + 2.0 * panel.warning_level,
            egui::Color32::from_rgba_unmultiplied(255, 80, 80, glow.max(30)),
        ));

    egui::Window::new("Pond")
        .default_pos(egui::pos2(12.0, 12.0))
        .resizable(false)
        .collapsible(true)
        .frame(frame)
        .show(ctx, |ui| {
            let food_color = if panel.food_low() { FOOD_LOW_COLOR } else { FOOD_COLOR };
            gauge_bar(ui, "Food", panel.food_stock, food_color);
            gauge_bar(ui, "Love", panel.happiness, LOVE_COLOR);

            ui.horizontal(|ui| {
                let pause_label = if pond.paused { "Play" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    pond.paused = !pond.paused;
                }
                ui.toggle_value(&mut ui_state.show_history, "History");
                ui.toggle_value(&mut ui_state.show_settings, "Tuning");
            });

            if ui_state.show_history {
                ui.label(egui::RichText::new("Food").small());
                graphs::draw_line_graph(ui, &pond.history.food_stock, food_color);
                ui.label(egui::RichText::new("Love").small());
                graphs::draw_line_graph(ui, &pond.history.happiness, LOVE_COLOR);
            }
        });
}

fn gauge_bar(ui: &mut egui::Ui, label: &str, value: f32, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).small().color(egui::Color32::from_gray(210)));
        ui.add(
            egui::ProgressBar::new(value / crate::config::GAUGE_MAX)
                .desired_width(160.0)
                .fill(color)
                .text(format!("{value:.0}%")),
        );
    });
}
