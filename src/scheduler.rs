use crate::config::{TickMode, MAX_FRAME_TIME};

/// Handle to a scheduled task. Stale handles are harmless to cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    GaugeTick,
    ExpireFood,
}

#[derive(Clone, Debug)]
struct ScheduledTask {
    id: TaskId,
    due: f64,
    period: Option<f64>,
    kind: TaskKind,
}

/// Single-threaded timer queue driven by explicit `advance` calls.
///
/// Time only moves when the host advances it, so tests can step through
/// seconds of pond time without sleeping.
pub struct Scheduler {
    now: f64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule_once(&mut self, delay: f64, kind: TaskKind) -> TaskId {
        self.push(delay.max(0.0), None, kind)
    }

    pub fn schedule_every(&mut self, period: f64, kind: TaskKind) -> TaskId {
        let period = period.max(1e-6);
        self.push(period, Some(period), kind)
    }

    fn push(&mut self, delay: f64, period: Option<f64>, kind: TaskKind) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due: self.now + delay,
            period,
            kind,
        });
        id
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Move the clock forward and return every task that came due, in due order.
    /// Periodic tasks may fire several times in one call.
    pub fn advance(&mut self, dt: f64) -> Vec<(TaskId, TaskKind)> {
        let target = self.now + dt.max(0.0);
        let mut fired = Vec::new();

        loop {
            let next = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= target)
                .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.0.cmp(&b.id.0)))
                .map(|(idx, _)| idx);
            let Some(idx) = next else { break };

            let task = &mut self.tasks[idx];
            self.now = self.now.max(task.due);
            fired.push((task.id, task.kind));
            if let Some(period) = task.period {
                task.due += period;
            } else {
                self.tasks.swap_remove(idx);
            }
        }

        self.now = target;
        fired
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns variable frame times into a whole number of simulation ticks.
pub struct FixedStep {
    mode: TickMode,
    accumulator: f64,
}

impl FixedStep {
    pub fn new(mode: TickMode) -> Self {
        Self {
            mode,
            accumulator: 0.0,
        }
    }

    pub fn mode(&self) -> TickMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TickMode) {
        self.mode = mode;
        self.accumulator = 0.0;
    }

    /// Number of ticks to run for a frame that took `frame_dt` seconds.
    pub fn ticks_for_frame(&mut self, frame_dt: f64) -> u32 {
        match self.mode {
            TickMode::FrameDriven => 1,
            TickMode::Fixed { hz } => {
                let step = 1.0 / hz as f64;
                self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_TIME as f64);
                let mut ticks = 0;
                while self.accumulator >= step {
                    self.accumulator -= step;
                    ticks += 1;
                }
                ticks
            }
        }
    }

    /// Fraction of the next tick already elapsed, for render interpolation.
    pub fn alpha(&self) -> f32 {
        match self.mode {
            TickMode::FrameDriven => 1.0,
            TickMode::Fixed { hz } => (self.accumulator * hz as f64).clamp(0.0, 1.0) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once_at_due_time() {
        let mut sched = Scheduler::new();
        let id = sched.schedule_once(3.0, TaskKind::ExpireFood);

        assert!(sched.advance(2.9).is_empty());
        let fired = sched.advance(0.2);
        assert_eq!(fired, vec![(id, TaskKind::ExpireFood)]);
        assert!(!sched.is_pending(id));
        assert!(sched.advance(10.0).is_empty());
    }

    #[test]
    fn periodic_catches_up_within_one_advance() {
        let mut sched = Scheduler::new();
        sched.schedule_every(1.0, TaskKind::GaugeTick);
        let fired = sched.advance(3.5);
        assert_eq!(fired.len(), 3);
        assert_eq!(sched.advance(0.5).len(), 1);
    }

    #[test]
    fn tasks_fire_in_due_order() {
        let mut sched = Scheduler::new();
        let expiry = sched.schedule_once(0.5, TaskKind::ExpireFood);
        let gauge = sched.schedule_every(1.0, TaskKind::GaugeTick);
        let ids: Vec<TaskId> = sched.advance(2.0).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![expiry, gauge, gauge]);
    }

    #[test]
    fn cancel_and_cancel_all() {
        let mut sched = Scheduler::new();
        let a = sched.schedule_once(1.0, TaskKind::ExpireFood);
        sched.schedule_every(1.0, TaskKind::GaugeTick);
        assert!(sched.cancel(a));
        assert!(!sched.cancel(a));
        assert_eq!(sched.pending_count(), 1);

        sched.cancel_all();
        assert_eq!(sched.pending_count(), 0);
        assert!(sched.advance(5.0).is_empty());
    }

    #[test]
    fn fixed_step_is_rate_independent() {
        let mut step = FixedStep::new(TickMode::Fixed { hz: 60.0 });
        let mut total = 0;
        // Uneven frames adding up to one second.
        for dt in [0.05, 0.02, 0.033, 0.097, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1] {
            total += step.ticks_for_frame(dt);
        }
        assert!((59..=60).contains(&total), "total ticks {total}");
        assert!((0.0..=1.0).contains(&step.alpha()));
    }

    #[test]
    fn fixed_step_clamps_long_frames() {
        let mut step = FixedStep::new(TickMode::Fixed { hz: 60.0 });
        assert_eq!(step.ticks_for_frame(5.0), 6);
    }

    #[test]
    fn frame_driven_runs_one_tick_per_frame() {
        let mut step = FixedStep::new(TickMode::FrameDriven);
        assert_eq!(step.ticks_for_frame(0.5), 1);
        assert_eq!(step.ticks_for_frame(0.0), 1);
        assert_eq!(step.alpha(), 1.0);
    }
}
