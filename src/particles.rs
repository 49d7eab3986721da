use macroquad::prelude::*;

use crate::config;
use crate::sinks::{EffectKind, EffectSink};

const MAX_PARTICLES: usize = 200;
const RIPPLE_LIFETIME: f32 = 1.2;
const RIPPLE_MAX_RADIUS: f32 = 60.0;
const PELLET_LIFETIME: f32 = 3.0;
const PELLET_SINK_SPEED: f32 = 6.0;

#[derive(Clone, Copy)]
struct Particle {
    kind: EffectKind,
    pos: Vec2,
    velocity: Vec2,
    life: f32,
    max_life: f32,
    size: f32,
}

/// Host-side effects: ripples, pellets and the refused-feed flash.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    warning_timer: f32,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            warning_timer: 0.0,
        }
    }

    fn emit(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            // Remove oldest particle
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Update all particles, removing expired ones.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.velocity * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
        self.warning_timer = (self.warning_timer - dt).max(0.0);
    }

    /// Strength of the refused-feed flash in [0, 1].
    pub fn warning_level(&self) -> f32 {
        (self.warning_timer / config::WARNING_FLASH).clamp(0.0, 1.0)
    }

    pub fn draw(&self) {
        for p in &self.particles {
            let t = (p.life / p.max_life).clamp(0.0, 1.0);
            match p.kind {
                EffectKind::Ripple => {
                    let radius = p.size + (1.0 - t) * RIPPLE_MAX_RADIUS;
                    draw_circle_lines(p.pos.x, p.pos.y, radius, 2.0, Color::new(0.85, 0.95, 1.0, 0.6 * t));
                }
                EffectKind::Pellet => {
                    draw_circle(p.pos.x, p.pos.y, p.size, Color::new(0.76, 0.55, 0.28, 0.9 * t));
                }
                EffectKind::Warning => {}
            }
        }
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.particles.len()
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectSink for ParticleSystem {
    fn spawn_effect(&mut self, kind: EffectKind, x: f32, y: f32) {
        let pos = vec2(x, y);
        match kind {
            EffectKind::Ripple => self.emit(Particle {
                kind,
                pos,
                velocity: Vec2::ZERO,
                life: RIPPLE_LIFETIME,
                max_life: RIPPLE_LIFETIME,
                size: 4.0,
            }),
            EffectKind::Pellet => self.emit(Particle {
                kind,
                pos,
                velocity: vec2(0.0, PELLET_SINK_SPEED * rand::gen_range(0.6, 1.2)),
                life: PELLET_LIFETIME * rand::gen_range(0.7, 1.0),
                max_life: PELLET_LIFETIME,
                size: rand::gen_range(2.0, 3.5),
            }),
            EffectKind::Warning => self.warning_timer = config::WARNING_FLASH,
        }
    }
}
