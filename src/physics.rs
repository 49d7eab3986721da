use macroquad::prelude::*;
use tracing::trace;

use crate::config::{CruiserTuning, FastTuning};
use crate::entity::Fish;
use crate::gauges::Gauges;
use crate::world::{wrap_angle, Viewport};

/// Exponential smoothing toward `target`. Never returns a negative or
/// non-finite speed.
pub fn blend_speed(current: f32, target: f32, gain: f32) -> f32 {
    let blended = current * (1.0 - gain) + target * gain;
    if blended.is_finite() {
        blended.max(0.0)
    } else {
        0.0
    }
}

/// Cruiser steering: home in on food when there is some, drift otherwise.
pub fn steer_cruiser(
    fish: &mut Fish,
    food: Option<Vec2>,
    gauges: &mut Gauges,
    tuning: &CruiserTuning,
    rng: &mut impl ::rand::Rng,
) {
    match food {
        Some(food) => {
            let delta = food - fish.pos;
            let dist = delta.length();
            if dist < tuning.feed_radius {
                gauges.credit_happiness(tuning.feed_happiness);
            }

            // atan2(0, 0) is meaningless; keep the current heading.
            if delta.x != 0.0 || delta.y != 0.0 {
                let target = delta.y.atan2(delta.x);
                let diff = wrap_angle(target - fish.heading);
                fish.heading += diff * tuning.turn_gain;
            }
            fish.speed = blend_speed(fish.speed, tuning.pursuit_speed, tuning.pursuit_blend);
        }
        None => {
            let jitter = tuning.wander_jitter.abs();
            fish.heading += rng.gen_range(-jitter..=jitter);
            fish.speed = blend_speed(
                fish.speed,
                tuning.wander_speed(fish.size),
                tuning.wander_blend,
            );
        }
    }
}

/// Fast guest steering: a sinusoidal wobble around its travel direction.
pub fn steer_fast(fish: &mut Fish, tuning: &FastTuning) {
    fish.phase += tuning.phase_step;
    fish.heading += fish.phase.sin() * tuning.wobble;
    fish.speed = blend_speed(fish.speed, tuning.speed, tuning.speed_blend);
}

/// Move along the heading by the current speed.
pub fn integrate(fish: &mut Fish) {
    fish.prev_pos = fish.pos;
    let step = Vec2::from_angle(fish.heading) * fish.speed;
    if step.is_finite() {
        fish.pos += step;
    }
}

/// Once far outside the viewport, a fast fish has a small chance each tick of
/// re-entering from the left edge. Returns true when it re-entered.
pub fn maybe_reenter(
    fish: &mut Fish,
    viewport: Viewport,
    tuning: &FastTuning,
    rng: &mut impl ::rand::Rng,
) -> bool {
    if !viewport.is_far_outside(fish.pos, tuning.exit_margin) {
        return false;
    }
    if !rng.gen_bool(tuning.reentry_chance.clamp(0.0, 1.0)) {
        return false;
    }

    fish.pos = vec2(-tuning.reentry_inset, viewport.height * 0.5);
    fish.prev_pos = fish.pos;
    let spread = tuning.reentry_spread.abs();
    fish.heading = rng.gen_range(-spread..=spread);
    trace!(id = fish.id.0, heading = fish.heading, "fast guest re-entered");
    true
}
