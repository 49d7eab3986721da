use egui;

use crate::config::TickMode;
use crate::simulation::Pond;

/// Runtime tuning window for the steering constants.
pub fn draw_settings(ctx: &egui::Context, pond: &mut Pond) {
    egui::Window::new("Tuning")
        .default_pos(egui::pos2(300.0, 60.0))
        .default_size(egui::vec2(280.0, 360.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("Cruisers");
            let cruiser = &mut pond.tuning.cruiser;
            ui.add(egui::Slider::new(&mut cruiser.turn_gain, 0.005..=0.2).text("Turn gain"));
            ui.add(egui::Slider::new(&mut cruiser.pursuit_speed, 0.5..=6.0).text("Pursuit speed"));
            ui.add(egui::Slider::new(&mut cruiser.wander_jitter, 0.0..=0.1).text("Wander jitter"));
            ui.add(egui::Slider::new(&mut cruiser.feed_radius, 5.0..=120.0).text("Feed radius"));
            ui.add(egui::Slider::new(&mut cruiser.wrap_margin, 0.0..=300.0).text("Wrap margin"));

            ui.separator();
            ui.heading("Guest");
            let fast = &mut pond.tuning.fast;
            ui.add(egui::Slider::new(&mut fast.speed, 0.5..=8.0).text("Speed"));
            ui.add(egui::Slider::new(&mut fast.wobble, 0.0..=0.1).text("Wobble"));
            ui.add(
                egui::Slider::new(&mut fast.reentry_chance, 0.0..=0.05)
                    .text("Re-entry chance")
                    .logarithmic(true),
            );

            ui.separator();
            ui.heading("Gauges");
            ui.add(egui::Slider::new(&mut pond.gauges.happiness_decay, 0.0..=5.0).text("Hunger / s"));
            ui.add(egui::Slider::new(&mut pond.gauges.food_recovery, 0.0..=5.0).text("Refill / s"));

            ui.separator();
            ui.heading("Clock");
            let mut fixed = matches!(pond.stepper.mode(), TickMode::Fixed { .. });
            if ui.checkbox(&mut fixed, "Fixed 60 Hz tick").changed() {
                pond.stepper.set_mode(if fixed {
                    TickMode::default()
                } else {
                    TickMode::FrameDriven
                });
            }

            ui.separator();
            ui.heading("Info");
            ui.label(format!("Tick: {}", pond.tick_count));
            ui.label(format!("Fish: {}", pond.fish.len()));
            ui.label(format!("Timers pending: {}", pond.scheduler.pending_count()));
            ui.label(format!(
                "Feeds: {} accepted, {} refused",
                pond.controller.accepted(),
                pond.controller.rejected()
            ));
            match pond.environment.active_food() {
                Some(food) => ui.label(format!("Food at ({:.0}, {:.0})", food.x, food.y)),
                None => ui.label("No food"),
            };
        });
}
