pub mod gauges;
pub mod graphs;
pub mod settings;

use crate::simulation::Pond;
use crate::sinks::GaugeSink;

/// Tracks which UI panels are open.
pub struct UiState {
    pub show_history: bool,
    pub show_settings: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_history: false,
            show_settings: false,
        }
    }
}

/// Latest gauge values handed over by the pond, plus the flash level from
/// the effect system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GaugePanel {
    pub food_stock: f32,
    pub happiness: f32,
    pub warning_level: f32,
    pub low_threshold: f32,
}

impl GaugePanel {
    pub fn new(low_threshold: f32) -> Self {
        Self {
            low_threshold,
            ..Self::default()
        }
    }

    /// The food bar switches to its warning color below the feed threshold.
    pub fn food_low(&self) -> bool {
        self.food_stock < self.low_threshold
    }
}

impl GaugeSink for GaugePanel {
    fn display_gauges(&mut self, food_stock: f32, happiness: f32) {
        self.food_stock = food_stock;
        self.happiness = happiness;
    }
}

/// Draw all egui UI panels. Returns true when egui wants the pointer, so the
/// click should not feed the fish.
pub fn draw_ui(pond: &mut Pond, ui_state: &mut UiState, panel: &GaugePanel) -> bool {
    let mut wants_pointer = false;
    egui_macroquad::ui(|ctx| {
        gauges::draw_gauges(ctx, pond, ui_state, panel);

        if ui_state.show_settings {
            settings::draw_settings(ctx, pond);
        }

        wants_pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    });

    egui_macroquad::draw();
    wants_pointer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_tracks_latest_values_and_low_stock() {
        let mut panel = GaugePanel::new(5.0);
        panel.display_gauges(4.0, 50.0);
        assert!(panel.food_low());
        panel.display_gauges(5.0, 49.7);
        assert!(!panel.food_low());
        assert_eq!(panel.happiness, 49.7);
    }
}
