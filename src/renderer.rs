use macroquad::prelude::*;

use crate::config;
use crate::entity::{BehaviorClass, Fish, FishId};
use crate::particles::ParticleSystem;
use crate::simulation::Pond;
use crate::sinks::PoseSink;

const WATER_TOP: Color = Color::new(0.60, 0.76, 0.78, 1.0);
const WATER_BOTTOM: Color = Color::new(0.36, 0.52, 0.56, 1.0);
const BODY_SEGMENTS: usize = 12;
// Jumps larger than this between ticks are wraps or re-entries; don't interpolate.
const MAX_LERP_DISTANCE: f32 = 50.0;

/// Draws each pose it receives, looking up the fish's look by id.
pub struct FishPainter<'a> {
    fish: &'a [Fish],
    clock: f64,
    alpha: f32,
    time: f32,
}

impl<'a> FishPainter<'a> {
    pub fn new(fish: &'a [Fish], clock: f64, alpha: f32, time: f32) -> Self {
        Self {
            fish,
            clock,
            alpha,
            time,
        }
    }
}

impl PoseSink for FishPainter<'_> {
    fn render(&mut self, id: FishId, x: f32, y: f32, heading: f32) {
        let Some(fish) = self.fish.get(id.0 as usize) else {
            return;
        };
        let current = vec2(x, y);
        let pos = if fish.prev_pos.distance(current) < MAX_LERP_DISTANCE {
            fish.prev_pos.lerp(current, self.alpha)
        } else {
            current
        };
        draw_fish(fish, pos, heading, self.clock, self.time);
    }
}

/// Target opacity, scaled by the fade-in since the fish was created.
fn fish_opacity(fish: &Fish, clock: f64) -> f32 {
    let target = match fish.class {
        BehaviorClass::Cruiser => config::CRUISER_OPACITY,
        BehaviorClass::Fast => config::FAST_OPACITY,
    };
    let fade = ((clock - fish.born_at) as f32 / config::FADE_IN_SECONDS).clamp(0.0, 1.0);
    target * fade
}

fn tail_wag(fish: &Fish, time: f32) -> f32 {
    let period = match fish.class {
        BehaviorClass::Cruiser => config::CRUISER_TAIL_PERIOD,
        BehaviorClass::Fast => config::FAST_TAIL_PERIOD,
    };
    // Alternating swing, offset per fish so the school isn't in lockstep.
    (time * std::f32::consts::TAU / (2.0 * period) + fish.id.0 as f32 * 1.7).sin() * 0.35
}

fn draw_fish(fish: &Fish, pos: Vec2, heading: f32, clock: f64, time: f32) {
    let opacity = fish_opacity(fish, clock);
    if opacity <= 0.0 {
        return;
    }
    let length = config::FISH_BASE_LENGTH * fish.size;
    let half_len = length * 0.5;
    let half_width = length * 0.22;
    let forward = Vec2::from_angle(heading);
    let side = forward.perp();
    let to_world = |along: f32, across: f32| pos + forward * along + side * across;

    let body = Color::new(fish.color.r, fish.color.g, fish.color.b, 0.8 * opacity);
    let fin = Color::new(fish.color.r, fish.color.g, fish.color.b, 0.4 * opacity);

    // Lens-shaped body: fan of triangles between the upper and lower arcs.
    let nose = to_world(half_len * 0.8, 0.0);
    let rear = to_world(-half_len * 0.6, 0.0);
    let mut prev_top = rear;
    let mut prev_bottom = rear;
    for i in 1..=BODY_SEGMENTS {
        let t = i as f32 / BODY_SEGMENTS as f32;
        let along = -half_len * 0.6 + t * (half_len * 1.4);
        let bulge = (t * std::f32::consts::PI).sin() * half_width;
        let top = to_world(along, bulge);
        let bottom = to_world(along, -bulge);
        draw_triangle(prev_top, top, prev_bottom, body);
        draw_triangle(top, bottom, prev_bottom, body);
        prev_top = top;
        prev_bottom = bottom;
    }
    draw_triangle(prev_top, nose, prev_bottom, body);

    // Tail hinged at the rear of the body.
    let wag = tail_wag(fish, time);
    let tail_dir = Vec2::from_angle(heading + std::f32::consts::PI + wag);
    let tail_side = tail_dir.perp();
    let tail_len = length * 0.3;
    let tip = rear + tail_dir * tail_len;
    draw_triangle(
        rear,
        tip + tail_side * half_width,
        tip - tail_side * half_width,
        fin,
    );
}

fn draw_water(width: f32, height: f32) {
    const BANDS: usize = 24;
    let band_h = height / BANDS as f32;
    for i in 0..BANDS {
        let t = i as f32 / (BANDS - 1) as f32;
        let color = Color::new(
            WATER_TOP.r + (WATER_BOTTOM.r - WATER_TOP.r) * t,
            WATER_TOP.g + (WATER_BOTTOM.g - WATER_TOP.g) * t,
            WATER_TOP.b + (WATER_BOTTOM.b - WATER_TOP.b) * t,
            1.0,
        );
        draw_rectangle(0.0, i as f32 * band_h, width, band_h + 1.0, color);
    }
}

fn draw_food_marker(pond: &Pond, time: f32) {
    if let Some(food) = pond.environment.active_food() {
        let pulse = 0.5 + 0.5 * (time * 4.0).sin();
        draw_circle_lines(food.x, food.y, 10.0 + 4.0 * pulse, 1.5, Color::new(1.0, 0.9, 0.7, 0.35));
    }
}

/// Draw the whole pond in screen space.
pub fn draw(pond: &Pond, particles: &ParticleSystem, alpha: f32) {
    let view = pond.environment.viewport;
    let time = get_time() as f32;
    clear_background(WATER_BOTTOM);
    draw_water(view.width, view.height);

    particles.draw();
    draw_food_marker(pond, time);

    let mut painter = FishPainter::new(&pond.fish, pond.scheduler.now(), alpha, time);
    pond.render(&mut painter);
}
