use ::rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::{self, PondConfig, Tuning};
use crate::entity::{BehaviorClass, Fish, FishId};
use crate::environment::Environment;
use crate::gauges::Gauges;
use crate::interaction::InteractionController;
use crate::scheduler::{FixedStep, Scheduler, TaskId, TaskKind};
use crate::sinks::{EffectSink, GaugeSink, PoseSink};
use crate::stats::GaugeHistory;
use crate::world::Viewport;

/// Owns every piece of pond state and serializes the two clocks through
/// itself: the per-frame fish tick and the real-time scheduler.
pub struct Pond {
    pub fish: Vec<Fish>,
    pub environment: Environment,
    pub gauges: Gauges,
    pub scheduler: Scheduler,
    pub controller: InteractionController,
    pub tuning: Tuning,
    pub history: GaugeHistory,
    pub stepper: FixedStep,
    pub rng: ChaCha8Rng,
    pub tick_count: u64,
    pub paused: bool,
    gauge_task: Option<TaskId>,
}

impl Pond {
    pub fn new(config: &PondConfig, seed: u64) -> Self {
        let viewport = Viewport::new(config.width, config.height);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut scheduler = Scheduler::new();

        let fish: Vec<Fish> = config
            .school
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Fish::spawn(
                    FishId(i as u32),
                    spec,
                    viewport,
                    &config.tuning,
                    scheduler.now(),
                    &mut rng,
                )
            })
            .collect();

        let gauge_task = scheduler.schedule_every(config.gauges.interval as f64, TaskKind::GaugeTick);
        let gauges = Gauges::new(&config.gauges);
        let mut history = GaugeHistory::new(config::GAUGE_HISTORY);
        history.record(gauges.food_stock(), gauges.happiness());

        info!(
            seed,
            fish = fish.len(),
            fast = fish.iter().filter(|f| f.class == BehaviorClass::Fast).count(),
            width = viewport.width,
            height = viewport.height,
            "pond seeded"
        );

        Self {
            fish,
            environment: Environment::new(viewport, config.interaction.food_duration),
            gauges,
            scheduler,
            controller: InteractionController::new(config.interaction.clone()),
            tuning: config.tuning.clone(),
            history,
            stepper: FixedStep::new(config.tick_mode),
            rng,
            tick_count: 0,
            paused: false,
            gauge_task: Some(gauge_task),
        }
    }

    /// Advance every fish by one tick. Fish never read each other, so order
    /// does not matter.
    pub fn tick(&mut self) {
        for fish in &mut self.fish {
            fish.update(&self.environment, &mut self.gauges, &self.tuning, &mut self.rng);
        }
        self.tick_count += 1;
    }

    /// Advance real time and run whatever timers came due. Returns the number
    /// of tasks that fired.
    pub fn advance_clock(&mut self, dt: f64) -> usize {
        let fired = self.scheduler.advance(dt);
        for (id, kind) in &fired {
            match kind {
                TaskKind::GaugeTick => {
                    self.gauges.tick();
                    self.history
                        .record(self.gauges.food_stock(), self.gauges.happiness());
                }
                TaskKind::ExpireFood => {
                    self.environment.on_expiry(*id);
                }
            }
        }
        fired.len()
    }

    /// One rendered frame: run the ticks the stepper asks for, then move the
    /// clock by the real frame time. Only the tick accumulator is capped.
    pub fn step_frame(&mut self, frame_dt: f64) -> u32 {
        if self.paused {
            return 0;
        }
        let ticks = self.stepper.ticks_for_frame(frame_dt);
        for _ in 0..ticks {
            self.tick();
        }
        self.advance_clock(frame_dt.max(0.0));
        ticks
    }

    pub fn interact(&mut self, x: f32, y: f32, effects: &mut impl EffectSink) -> bool {
        self.controller.on_interaction(
            x,
            y,
            &mut self.gauges,
            &mut self.environment,
            &mut self.scheduler,
            effects,
            &mut self.rng,
        )
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.environment.resize(width, height);
    }

    pub fn render(&self, poses: &mut impl PoseSink) {
        for fish in &self.fish {
            poses.render(fish.id, fish.pos.x, fish.pos.y, fish.heading);
        }
    }

    pub fn display_gauges(&self, sink: &mut impl GaugeSink) {
        sink.display_gauges(self.gauges.food_stock(), self.gauges.happiness());
    }

    pub fn is_running(&self) -> bool {
        self.gauge_task.is_some()
    }

    /// Cancel the gauge timer and any pending food expiry.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.gauge_task = None;
        self.environment.clear_food();
        debug!(tick = self.tick_count, "pond shut down");
    }
}
