use macroquad::prelude::*;
use tracing::{error, info};

mod audio;
mod cli;
mod config;
mod entity;
mod environment;
mod gauges;
mod interaction;
mod particles;
mod physics;
mod renderer;
mod scheduler;
mod simulation;
mod sinks;
mod stats;
mod ui;
mod world;

use audio::BackgroundMusic;
use cli::CliArgs;
use config::PondConfig;
use particles::ParticleSystem;
use simulation::Pond;
use ui::{GaugePanel, UiState};

const DEFAULT_SEED: u64 = 42;

fn window_conf() -> Conf {
    Conf {
        window_title: "Koi Pond".to_string(),
        window_width: config::WINDOW_WIDTH,
        window_height: config::WINDOW_HEIGHT,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Config file (if any) overlaid with command-line flags. Errors fall back
/// to defaults.
fn load_config(args: &CliArgs) -> PondConfig {
    let mut config = match args.config.as_deref() {
        Some(path) => match PondConfig::load(path) {
            Ok(config) => {
                info!(path, "loaded config");
                config
            }
            Err(err) => {
                error!(%err, "using default config");
                PondConfig::default()
            }
        },
        None => PondConfig::default(),
    };
    if let Some(mode) = args.tick_mode {
        config.tick_mode = mode;
    }
    config.width = screen_width();
    config.height = screen_height();
    config
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let args = match CliArgs::parse_cli(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            error!(%err, "ignoring command line");
            CliArgs::default()
        }
    };
    let config = load_config(&args);
    let seed = args.seed.unwrap_or(DEFAULT_SEED);

    let mut pond = Pond::new(&config, seed);
    let mut particles = ParticleSystem::new();
    let mut panel = GaugePanel::new(config.interaction.threshold);
    let mut ui_state = UiState::default();
    let mut music = BackgroundMusic::load_optional(args.music.as_deref()).await;

    while pond.is_running() {
        let frame_time = get_frame_time();

        pond.resize(screen_width(), screen_height());
        pond.step_frame(frame_time as f64);
        particles.update(frame_time);

        if is_key_pressed(KeyCode::Space) {
            pond.paused = !pond.paused;
        }

        renderer::draw(&pond, &particles, pond.stepper.alpha());

        pond.display_gauges(&mut panel);
        panel.warning_level = particles.warning_level();
        let ui_wants_pointer = ui::draw_ui(&mut pond, &mut ui_state, &panel);

        if !ui_wants_pointer && is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            pond.interact(x, y, &mut particles);
            if pond.controller.take_first_interaction() {
                music.start();
            }
        }

        if is_key_pressed(KeyCode::Escape) {
            pond.shutdown();
        }

        next_frame().await;
    }

    info!(ticks = pond.tick_count, "pond closed");
}
