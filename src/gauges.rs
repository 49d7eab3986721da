use tracing::trace;

use crate::config::{GaugeConfig, GAUGE_MAX};

/// Food stock and happiness, both held in [0, GAUGE_MAX].
#[derive(Clone, Debug, PartialEq)]
pub struct Gauges {
    food_stock: f32,
    happiness: f32,
    pub happiness_decay: f32,
    pub food_recovery: f32,
}

fn clamp_gauge(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, GAUGE_MAX)
}

impl Gauges {
    pub fn new(config: &GaugeConfig) -> Self {
        Self {
            food_stock: clamp_gauge(config.initial_food_stock),
            happiness: clamp_gauge(config.initial_happiness),
            happiness_decay: config.happiness_decay,
            food_recovery: config.food_recovery,
        }
    }

    pub fn food_stock(&self) -> f32 {
        self.food_stock
    }

    pub fn happiness(&self) -> f32 {
        self.happiness
    }

    #[cfg(test)]
    pub fn set_food_stock(&mut self, value: f32) {
        self.food_stock = clamp_gauge(value);
    }

    #[cfg(test)]
    pub fn set_happiness(&mut self, value: f32) {
        self.happiness = clamp_gauge(value);
    }

    /// Periodic update: fish get hungrier, the feeder refills.
    pub fn tick(&mut self) {
        self.happiness = clamp_gauge(self.happiness - self.happiness_decay);
        self.food_stock = clamp_gauge(self.food_stock + self.food_recovery);
        trace!(
            food_stock = self.food_stock,
            happiness = self.happiness,
            "gauge tick"
        );
    }

    pub fn debit_food(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.food_stock = clamp_gauge(self.food_stock - amount);
    }

    pub fn credit_happiness(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.happiness = clamp_gauge(self.happiness + amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauges() -> Gauges {
        Gauges::new(&GaugeConfig::default())
    }

    #[test]
    fn tick_decays_happiness_and_recovers_food() {
        let mut g = gauges();
        g.set_food_stock(50.0);
        g.tick();
        assert!((g.happiness() - 49.7).abs() < 1e-4);
        assert!((g.food_stock() - 50.5).abs() < 1e-4);
    }

    #[test]
    fn values_stay_clamped_over_many_ticks() {
        let mut g = gauges();
        for _ in 0..1000 {
            g.tick();
            assert!((0.0..=GAUGE_MAX).contains(&g.happiness()));
            assert!((0.0..=GAUGE_MAX).contains(&g.food_stock()));
        }
        assert_eq!(g.happiness(), 0.0);
        assert_eq!(g.food_stock(), GAUGE_MAX);
    }

    #[test]
    fn debit_and_credit_clamp() {
        let mut g = gauges();
        g.set_food_stock(3.0);
        g.debit_food(5.0);
        assert_eq!(g.food_stock(), 0.0);

        g.set_happiness(99.95);
        g.credit_happiness(0.1);
        assert_eq!(g.happiness(), GAUGE_MAX);

        g.credit_happiness(f32::NAN);
        assert_eq!(g.happiness(), GAUGE_MAX);
    }

    #[test]
    fn construction_clamps_out_of_range_config() {
        let config = GaugeConfig {
            initial_food_stock: 250.0,
            initial_happiness: -4.0,
            ..GaugeConfig::default()
        };
        let g = Gauges::new(&config);
        assert_eq!(g.food_stock(), GAUGE_MAX);
        assert_eq!(g.happiness(), 0.0);
    }
}
