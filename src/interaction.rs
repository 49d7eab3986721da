use tracing::debug;

use crate::config::InteractionConfig;
use crate::environment::Environment;
use crate::gauges::Gauges;
use crate::scheduler::Scheduler;
use crate::sinks::{EffectKind, EffectSink};

/// Turns a pointer press into a feed, if the food stock allows it.
pub struct InteractionController {
    pub config: InteractionConfig,
    accepted: u64,
    rejected: u64,
    awaiting_first: bool,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            accepted: 0,
            rejected: 0,
            awaiting_first: true,
        }
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// True exactly once, after the first interaction of any outcome.
    /// The host uses it to start background music.
    pub fn take_first_interaction(&mut self) -> bool {
        if self.awaiting_first && self.accepted + self.rejected > 0 {
            self.awaiting_first = false;
            true
        } else {
            false
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn on_interaction(
        &mut self,
        x: f32,
        y: f32,
        gauges: &mut Gauges,
        env: &mut Environment,
        scheduler: &mut Scheduler,
        effects: &mut impl EffectSink,
        rng: &mut impl ::rand::Rng,
    ) -> bool {
        if gauges.food_stock() < self.config.threshold {
            self.rejected += 1;
            effects.spawn_effect(EffectKind::Warning, x, y);
            debug!(x, y, food_stock = gauges.food_stock(), "feed refused");
            return false;
        }

        self.accepted += 1;
        gauges.debit_food(self.config.cost);

        effects.spawn_effect(EffectKind::Ripple, x, y);
        let half = self.config.pellet_jitter.abs() * 0.5;
        for _ in 0..self.config.pellet_count {
            let (dx, dy) = if half > 0.0 {
                (rng.gen_range(-half..half), rng.gen_range(-half..half))
            } else {
                (0.0, 0.0)
            };
            effects.spawn_effect(EffectKind::Pellet, x + dx, y + dy);
        }

        env.set_food(x, y, scheduler);
        debug!(x, y, food_stock = gauges.food_stock(), "feed accepted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GaugeConfig;
    use crate::sinks::Recorder;
    use crate::world::Viewport;
    use ::rand::SeedableRng;
    use macroquad::prelude::vec2;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        controller: InteractionController,
        gauges: Gauges,
        env: Environment,
        sched: Scheduler,
        effects: Recorder,
        rng: ChaCha8Rng,
    }

    impl Fixture {
        fn new(food_stock: f32) -> Self {
            let mut gauges = Gauges::new(&GaugeConfig::default());
            gauges.set_food_stock(food_stock);
            Self {
                controller: InteractionController::new(InteractionConfig::default()),
                gauges,
                env: Environment::new(Viewport::new(800.0, 600.0), 3.0),
                sched: Scheduler::new(),
                effects: Recorder::default(),
                rng: ChaCha8Rng::seed_from_u64(21),
            }
        }

        fn click(&mut self, x: f32, y: f32) -> bool {
            self.controller.on_interaction(
                x,
                y,
                &mut self.gauges,
                &mut self.env,
                &mut self.sched,
                &mut self.effects,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn low_stock_is_refused_without_side_effects() {
        let mut f = Fixture::new(4.0);
        assert!(!f.click(100.0, 120.0));
        assert_eq!(f.gauges.food_stock(), 4.0);
        assert!(f.env.active_food().is_none());
        assert_eq!(f.sched.pending_count(), 0);
        assert_eq!(f.effects.effects, vec![(EffectKind::Warning, 100.0, 120.0)]);
    }

    #[test]
    fn accepted_feed_debits_and_places_food() {
        let mut f = Fixture::new(10.0);
        assert!(f.click(100.0, 120.0));
        assert_eq!(f.gauges.food_stock(), 5.0);
        assert_eq!(f.env.active_food(), Some(vec2(100.0, 120.0)));
        assert_eq!(f.effects.count(EffectKind::Ripple), 1);
        assert_eq!(f.effects.count(EffectKind::Pellet), 5);
        assert_eq!(f.effects.count(EffectKind::Warning), 0);
    }

    #[test]
    fn pellets_land_near_the_click() {
        let mut f = Fixture::new(100.0);
        f.click(300.0, 200.0);
        for (kind, x, y) in &f.effects.effects {
            if *kind == EffectKind::Pellet {
                assert!((x - 300.0).abs() <= 20.0);
                assert!((y - 200.0).abs() <= 20.0);
            }
        }
    }

    #[test]
    fn stock_exactly_at_threshold_is_accepted() {
        let mut f = Fixture::new(5.0);
        assert!(f.click(1.0, 1.0));
        assert_eq!(f.gauges.food_stock(), 0.0);
        assert!(!f.click(1.0, 1.0));
    }

    #[test]
    fn first_interaction_is_reported_once() {
        let mut f = Fixture::new(0.0);
        assert!(!f.controller.take_first_interaction());
        f.click(1.0, 1.0);
        assert!(f.controller.take_first_interaction());
        f.click(1.0, 1.0);
        assert!(!f.controller.take_first_interaction());
        assert_eq!(f.controller.rejected(), 2);
    }

    #[test]
    fn repeated_feeds_keep_one_pending_expiry() {
        let mut f = Fixture::new(100.0);
        f.click(1.0, 1.0);
        f.click(2.0, 2.0);
        f.click(3.0, 3.0);
        assert_eq!(f.sched.pending_count(), 1);
        assert_eq!(f.env.active_food(), Some(vec2(3.0, 3.0)));
        assert_eq!(f.controller.accepted(), 3);
    }
}
