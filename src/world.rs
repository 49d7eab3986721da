use macroquad::prelude::*;
use std::f32::consts::{PI, TAU};

/// Normalize an angle difference into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Visible pond extent. Fish coordinates are not confined to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Toroidal wrap with a margin outside each edge. Axes are handled independently.
    pub fn wrap_with_margin(&self, mut pos: Vec2, margin: f32) -> Vec2 {
        if pos.x < -margin {
            pos.x = self.width + margin;
        } else if pos.x > self.width + margin {
            pos.x = -margin;
        }
        if pos.y < -margin {
            pos.y = self.height + margin;
        } else if pos.y > self.height + margin {
            pos.y = -margin;
        }
        pos
    }

    /// True when `pos` lies more than `margin` outside the viewport on any side.
    pub fn is_far_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }

    #[cfg(test)]
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..10_000 {
            let a = rng.gen_range(-1000.0f32..1000.0);
            let b = rng.gen_range(-1000.0f32..1000.0);
            let d = wrap_angle(a - b);
            assert!(d > -PI && d <= PI, "wrap_angle({}) = {d}", a - b);
        }
    }

    #[test]
    fn wrap_angle_maps_negative_pi_to_pi() {
        assert_eq!(wrap_angle(-PI), PI);
        assert_eq!(wrap_angle(PI), PI);
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn wrap_angle_rejects_non_finite() {
        assert_eq!(wrap_angle(f32::NAN), 0.0);
        assert_eq!(wrap_angle(f32::INFINITY), 0.0);
    }

    #[test]
    fn wrap_with_margin_relocates_each_axis() {
        let view = Viewport::new(800.0, 600.0);
        let p = view.wrap_with_margin(vec2(901.0, 300.0), 100.0);
        assert_eq!(p, vec2(-100.0, 300.0));

        let p = view.wrap_with_margin(vec2(-101.0, -101.0), 100.0);
        assert_eq!(p, vec2(900.0, 700.0));

        let inside = vec2(850.0, -50.0);
        assert_eq!(view.wrap_with_margin(inside, 100.0), inside);
    }

    #[test]
    fn far_outside_uses_margin_on_every_side() {
        let view = Viewport::new(800.0, 600.0);
        assert!(!view.is_far_outside(vec2(-299.0, 300.0), 300.0));
        assert!(view.is_far_outside(vec2(-301.0, 300.0), 300.0));
        assert!(view.is_far_outside(vec2(400.0, 901.0), 300.0));
        assert!(!view.is_far_outside(vec2(1100.0, 900.0), 300.0));
    }
}
