use macroquad::prelude::*;

use crate::config::{parse_hex_color, FishKind, FishSpec, Tuning};
use crate::environment::Environment;
use crate::gauges::Gauges;
use crate::physics;
use crate::world::Viewport;

/// Stable handle to a fish. The school never grows or shrinks after seeding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FishId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorClass {
    /// Seeks food, wanders otherwise, wraps at the viewport edges.
    Cruiser,
    /// Rare guest on an S-shaped path that ignores food.
    Fast,
}

impl From<FishKind> for BehaviorClass {
    fn from(kind: FishKind) -> Self {
        match kind {
            FishKind::Cruiser => BehaviorClass::Cruiser,
            FishKind::Fast => BehaviorClass::Fast,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fish {
    pub id: FishId,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub size: f32,
    pub class: BehaviorClass,
    pub phase: f32,
    pub color: Color,
    /// Pond clock time at creation, drives the fade-in.
    pub born_at: f64,
}

const DEFAULT_FISH_COLOR: Color = Color::new(0.17, 0.24, 0.31, 1.0);

impl Fish {
    pub fn new(
        id: FishId,
        class: BehaviorClass,
        size: f32,
        pos: Vec2,
        heading: f32,
        tuning: &Tuning,
    ) -> Self {
        let speed = match class {
            BehaviorClass::Cruiser => tuning.cruiser.wander_speed(size),
            BehaviorClass::Fast => tuning.fast.speed,
        };
        Self {
            id,
            pos,
            prev_pos: pos,
            heading,
            speed,
            size,
            class,
            phase: 0.0,
            color: DEFAULT_FISH_COLOR,
            born_at: 0.0,
        }
    }

    /// Create from a school entry at a random spot with a random heading.
    pub fn spawn(
        id: FishId,
        spec: &FishSpec,
        viewport: Viewport,
        tuning: &Tuning,
        born_at: f64,
        rng: &mut impl ::rand::Rng,
    ) -> Self {
        let pos = vec2(
            rng.gen_range(0.0..viewport.width.max(1.0)),
            rng.gen_range(0.0..viewport.height.max(1.0)),
        );
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        let mut fish = Self::new(id, spec.kind.into(), spec.size, pos, heading, tuning);
        if let Some([r, g, b]) = parse_hex_color(&spec.color) {
            fish.color = Color::new(r, g, b, 1.0);
        }
        fish.born_at = born_at;
        fish
    }

    /// Advance one tick. Cruisers near the food point credit `gauges`.
    pub fn update(
        &mut self,
        env: &Environment,
        gauges: &mut Gauges,
        tuning: &Tuning,
        rng: &mut impl ::rand::Rng,
    ) {
        match self.class {
            BehaviorClass::Cruiser => {
                physics::steer_cruiser(self, env.active_food(), gauges, &tuning.cruiser, rng);
                physics::integrate(self);
                self.pos = env
                    .viewport
                    .wrap_with_margin(self.pos, tuning.cruiser.wrap_margin);
            }
            BehaviorClass::Fast => {
                physics::steer_fast(self, &tuning.fast);
                physics::integrate(self);
                physics::maybe_reenter(self, env.viewport, &tuning.fast, rng);
            }
        }
    }
}
