use macroquad::prelude::*;
use tracing::{debug, warn};

use crate::scheduler::{Scheduler, TaskId, TaskKind};
use crate::world::Viewport;

/// Signals shared by every fish: the viewport and the single food point.
pub struct Environment {
    pub viewport: Viewport,
    active_food: Option<Vec2>,
    expiry: Option<TaskId>,
    food_duration: f32,
}

impl Environment {
    pub fn new(viewport: Viewport, food_duration: f32) -> Self {
        Self {
            viewport,
            active_food: None,
            expiry: None,
            food_duration,
        }
    }

    pub fn active_food(&self) -> Option<Vec2> {
        self.active_food
    }

    #[cfg(test)]
    pub fn pending_expiry(&self) -> Option<TaskId> {
        self.expiry
    }

    /// Place food, replacing any previous point. The previous expiry is
    /// cancelled so exactly one expiry stays pending, timed from this call.
    pub fn set_food(&mut self, x: f32, y: f32, scheduler: &mut Scheduler) {
        if !(x.is_finite() && y.is_finite()) {
            warn!(x, y, "ignoring non-finite food point");
            return;
        }
        if let Some(previous) = self.expiry.take() {
            scheduler.cancel(previous);
        }
        self.active_food = Some(vec2(x, y));
        self.expiry = Some(scheduler.schedule_once(self.food_duration as f64, TaskKind::ExpireFood));
        debug!(x, y, duration = self.food_duration, "food placed");
    }

    pub fn clear_food(&mut self) {
        if self.active_food.take().is_some() {
            debug!("food expired");
        }
        self.expiry = None;
    }

    /// Called when an `ExpireFood` task fires. Stale handles are ignored.
    pub fn on_expiry(&mut self, id: TaskId) -> bool {
        if self.expiry == Some(id) {
            self.clear_food();
            true
        } else {
            false
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!(width, height, "ignoring degenerate viewport size");
            return;
        }
        if self.viewport.width != width || self.viewport.height != height {
            debug!(width, height, "viewport resized");
            self.viewport = Viewport::new(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment {
        Environment::new(Viewport::new(800.0, 600.0), 3.0)
    }

    fn fire(env: &mut Environment, sched: &mut Scheduler, dt: f64) -> usize {
        sched
            .advance(dt)
            .into_iter()
            .filter(|(id, kind)| *kind == TaskKind::ExpireFood && env.on_expiry(*id))
            .count()
    }

    #[test]
    fn food_expires_exactly_once() {
        let mut env = env();
        let mut sched = Scheduler::new();
        env.set_food(10.0, 20.0, &mut sched);
        assert_eq!(env.active_food(), Some(vec2(10.0, 20.0)));

        assert_eq!(fire(&mut env, &mut sched, 2.5), 0);
        assert!(env.active_food().is_some());

        assert_eq!(fire(&mut env, &mut sched, 1.0), 1);
        assert!(env.active_food().is_none());
        assert_eq!(fire(&mut env, &mut sched, 10.0), 0);
    }

    #[test]
    fn second_set_restarts_timer() {
        let mut env = env();
        let mut sched = Scheduler::new();
        env.set_food(10.0, 20.0, &mut sched);
        sched.advance(2.0);
        env.set_food(50.0, 60.0, &mut sched);
        assert_eq!(sched.pending_count(), 1);

        // First expiry time passes; the newer point stays.
        assert_eq!(fire(&mut env, &mut sched, 1.5), 0);
        assert_eq!(env.active_food(), Some(vec2(50.0, 60.0)));

        assert_eq!(fire(&mut env, &mut sched, 1.6), 1);
        assert!(env.active_food().is_none());
    }

    #[test]
    fn stale_expiry_handle_is_ignored() {
        let mut env = env();
        let mut sched = Scheduler::new();
        env.set_food(1.0, 1.0, &mut sched);
        let stale = env.pending_expiry().unwrap();
        env.set_food(2.0, 2.0, &mut sched);
        assert!(!env.on_expiry(stale));
        assert!(env.active_food().is_some());
    }

    #[test]
    fn resize_ignores_degenerate_sizes() {
        let mut env = env();
        env.resize(0.0, 100.0);
        env.resize(f32::NAN, 100.0);
        assert_eq!(env.viewport, Viewport::new(800.0, 600.0));
        env.resize(1024.0, 768.0);
        assert_eq!(env.viewport, Viewport::new(1024.0, 768.0));
    }

    #[test]
    fn non_finite_food_is_rejected() {
        let mut env = env();
        let mut sched = Scheduler::new();
        env.set_food(f32::NAN, 0.0, &mut sched);
        assert!(env.active_food().is_none());
        assert_eq!(sched.pending_count(), 0);
    }
}
