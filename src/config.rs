// All tunable pond constants in one place. `PondConfig` bundles them so a
// JSON file can override any subset.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// Window
pub const WINDOW_WIDTH: i32 = 1280;
pub const WINDOW_HEIGHT: i32 = 800;

// Simulation
pub const FIXED_HZ: f32 = 60.0;
pub const MAX_FRAME_TIME: f32 = 0.1;

// Gauges
pub const GAUGE_MAX: f32 = 100.0;
pub const INITIAL_FOOD_STOCK: f32 = 100.0;
pub const INITIAL_HAPPINESS: f32 = 50.0;
pub const GAUGE_INTERVAL: f32 = 1.0;
pub const HAPPINESS_DECAY: f32 = 0.3;
pub const FOOD_RECOVERY: f32 = 0.5;
pub const GAUGE_HISTORY: usize = 120;

// Interaction
pub const FEED_THRESHOLD: f32 = 5.0;
pub const FEED_COST: f32 = 5.0;
pub const FOOD_DURATION: f32 = 3.0;
pub const PELLET_COUNT: usize = 5;
pub const PELLET_JITTER: f32 = 40.0;
pub const WARNING_FLASH: f32 = 0.3;

// Cruiser
pub const CRUISER_TURN_GAIN: f32 = 0.035;
pub const CRUISER_PURSUIT_SPEED: f32 = 2.4;
pub const CRUISER_PURSUIT_BLEND: f32 = 0.02;
pub const CRUISER_WANDER_JITTER: f32 = 0.0125;
pub const CRUISER_WANDER_BLEND: f32 = 0.01;
pub const CRUISER_BASE_SPEED: f32 = 0.6;
pub const CRUISER_REFERENCE_SIZE: f32 = 1.2;
pub const CRUISER_SIZE_GAIN: f32 = 0.8;
pub const CRUISER_MIN_SPEED: f32 = 0.1;
pub const FEED_RADIUS: f32 = 30.0;
pub const FEED_HAPPINESS: f32 = 0.1;
pub const WRAP_MARGIN: f32 = 100.0;

// Fast guest
pub const FAST_SPEED: f32 = 3.2;
pub const FAST_SPEED_BLEND: f32 = 0.01;
pub const FAST_PHASE_STEP: f32 = 0.04;
pub const FAST_WOBBLE: f32 = 0.02;
pub const FAST_EXIT_MARGIN: f32 = 300.0;
pub const FAST_REENTRY_CHANCE: f64 = 0.005;
pub const FAST_REENTRY_INSET: f32 = 100.0;
pub const FAST_REENTRY_SPREAD: f32 = 0.5;

// Rendering
pub const FISH_BASE_LENGTH: f32 = 60.0;
pub const FADE_IN_SECONDS: f32 = 1.0;
pub const CRUISER_OPACITY: f32 = 0.7;
pub const FAST_OPACITY: f32 = 0.3;
pub const CRUISER_TAIL_PERIOD: f32 = 0.8;
pub const FAST_TAIL_PERIOD: f32 = 0.3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to load music {path}: {message}")]
    Audio { path: String, message: String },
    #[error("bad command line: {0}")]
    Usage(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum TickMode {
    /// One simulation tick per rendered frame.
    FrameDriven,
    /// Fixed-rate ticks from an accumulator, independent of frame rate.
    Fixed { hz: f32 },
}

impl Default for TickMode {
    fn default() -> Self {
        TickMode::Fixed { hz: FIXED_HZ }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub initial_food_stock: f32,
    pub initial_happiness: f32,
    pub interval: f32,
    pub happiness_decay: f32,
    pub food_recovery: f32,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            initial_food_stock: INITIAL_FOOD_STOCK,
            initial_happiness: INITIAL_HAPPINESS,
            interval: GAUGE_INTERVAL,
            happiness_decay: HAPPINESS_DECAY,
            food_recovery: FOOD_RECOVERY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub threshold: f32,
    pub cost: f32,
    pub food_duration: f32,
    pub pellet_count: usize,
    pub pellet_jitter: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            threshold: FEED_THRESHOLD,
            cost: FEED_COST,
            food_duration: FOOD_DURATION,
            pellet_count: PELLET_COUNT,
            pellet_jitter: PELLET_JITTER,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CruiserTuning {
    pub turn_gain: f32,
    pub pursuit_speed: f32,
    pub pursuit_blend: f32,
    pub wander_jitter: f32,
    pub wander_blend: f32,
    pub base_speed: f32,
    pub reference_size: f32,
    pub size_gain: f32,
    pub min_speed: f32,
    pub feed_radius: f32,
    pub feed_happiness: f32,
    pub wrap_margin: f32,
}

impl Default for CruiserTuning {
    fn default() -> Self {
        Self {
            turn_gain: CRUISER_TURN_GAIN,
            pursuit_speed: CRUISER_PURSUIT_SPEED,
            pursuit_blend: CRUISER_PURSUIT_BLEND,
            wander_jitter: CRUISER_WANDER_JITTER,
            wander_blend: CRUISER_WANDER_BLEND,
            base_speed: CRUISER_BASE_SPEED,
            reference_size: CRUISER_REFERENCE_SIZE,
            size_gain: CRUISER_SIZE_GAIN,
            min_speed: CRUISER_MIN_SPEED,
            feed_radius: FEED_RADIUS,
            feed_happiness: FEED_HAPPINESS,
            wrap_margin: WRAP_MARGIN,
        }
    }
}

impl CruiserTuning {
    /// Smaller fish cruise faster.
    pub fn wander_speed(&self, size: f32) -> f32 {
        (self.base_speed + (self.reference_size - size) * self.size_gain).max(self.min_speed)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastTuning {
    pub speed: f32,
    pub speed_blend: f32,
    pub phase_step: f32,
    pub wobble: f32,
    pub exit_margin: f32,
    pub reentry_chance: f64,
    pub reentry_inset: f32,
    pub reentry_spread: f32,
}

impl Default for FastTuning {
    fn default() -> Self {
        Self {
            speed: FAST_SPEED,
            speed_blend: FAST_SPEED_BLEND,
            phase_step: FAST_PHASE_STEP,
            wobble: FAST_WOBBLE,
            exit_margin: FAST_EXIT_MARGIN,
            reentry_chance: FAST_REENTRY_CHANCE,
            reentry_inset: FAST_REENTRY_INSET,
            reentry_spread: FAST_REENTRY_SPREAD,
        }
    }
}

/// Steering constants shared by every fish.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub cruiser: CruiserTuning,
    pub fast: FastTuning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FishKind {
    Cruiser,
    Fast,
}

/// One member of the starting school.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FishSpec {
    pub kind: FishKind,
    pub size: f32,
    /// RGB hex, e.g. "#2c3e50".
    pub color: String,
}

impl FishSpec {
    pub fn cruiser(size: f32, color: &str) -> Self {
        Self {
            kind: FishKind::Cruiser,
            size,
            color: color.to_string(),
        }
    }

    pub fn fast(size: f32, color: &str) -> Self {
        Self {
            kind: FishKind::Fast,
            size,
            color: color.to_string(),
        }
    }
}

pub fn default_school() -> Vec<FishSpec> {
    vec![
        FishSpec::cruiser(1.1, "#1a3c40"),
        FishSpec::cruiser(0.9, "#2c3e50"),
        FishSpec::cruiser(1.2, "#2a4d53"),
        FishSpec::cruiser(0.8, "#334756"),
        FishSpec::cruiser(0.7, "#455a64"),
        FishSpec::fast(1.3, "#4f6d7a"),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PondConfig {
    pub width: f32,
    pub height: f32,
    pub tick_mode: TickMode,
    pub gauges: GaugeConfig,
    pub interaction: InteractionConfig,
    pub tuning: Tuning,
    pub school: Vec<FishSpec>,
}

impl Default for PondConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH as f32,
            height: WINDOW_HEIGHT as f32,
            tick_mode: TickMode::default(),
            gauges: GaugeConfig::default(),
            interaction: InteractionConfig::default(),
            tuning: Tuning::default(),
            school: default_school(),
        }
    }
}

impl PondConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: PondConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.width > 0.0 && self.height > 0.0) {
            return invalid(format!("pond size {}x{} must be positive", self.width, self.height));
        }
        if self.school.is_empty() {
            return invalid("school must contain at least one fish".to_string());
        }
        if let Some(spec) = self.school.iter().find(|s| !(s.size.is_finite() && s.size > 0.0)) {
            return invalid(format!("fish size {} must be positive", spec.size));
        }
        if let Some(spec) = self.school.iter().find(|s| parse_hex_color(&s.color).is_none()) {
            return invalid(format!("fish color {:?} must be #rrggbb", spec.color));
        }
        if let TickMode::Fixed { hz } = self.tick_mode {
            if !(hz.is_finite() && hz > 0.0) {
                return invalid(format!("fixed tick rate {hz} must be positive"));
            }
        }

        let g = &self.gauges;
        for (name, value) in [
            ("gauges.initial_food_stock", g.initial_food_stock),
            ("gauges.initial_happiness", g.initial_happiness),
            ("interaction.threshold", self.interaction.threshold),
        ] {
            if !(0.0..=GAUGE_MAX).contains(&value) {
                return invalid(format!("{name} = {value} must lie in [0, {GAUGE_MAX}]"));
            }
        }
        for (name, value) in [
            ("gauges.happiness_decay", g.happiness_decay),
            ("gauges.food_recovery", g.food_recovery),
            ("interaction.cost", self.interaction.cost),
            ("interaction.pellet_jitter", self.interaction.pellet_jitter),
            ("tuning.cruiser.wrap_margin", self.tuning.cruiser.wrap_margin),
            ("tuning.fast.exit_margin", self.tuning.fast.exit_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} = {value} must be non-negative"));
            }
        }
        if !(g.interval > 0.0) {
            return invalid(format!("gauges.interval = {} must be positive", g.interval));
        }
        if !(self.interaction.food_duration > 0.0) {
            return invalid(format!(
                "interaction.food_duration = {} must be positive",
                self.interaction.food_duration
            ));
        }
        if !(0.0..=1.0).contains(&self.tuning.fast.reentry_chance) {
            return invalid(format!(
                "tuning.fast.reentry_chance = {} must lie in [0, 1]",
                self.tuning.fast.reentry_chance
            ));
        }
        Ok(())
    }
}

/// Parse "#rrggbb" into normalized RGB.
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([
        channel(0)? as f32 / 255.0,
        channel(2)? as f32 / 255.0,
        channel(4)? as f32 / 255.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = PondConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.school.len(), 6);
        assert_eq!(
            config.school.iter().filter(|s| s.kind == FishKind::Fast).count(),
            1
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PondConfig::from_json(
            r#"{ "gauges": { "happiness_decay": 1.5 }, "tick_mode": { "mode": "frame_driven" } }"#,
        )
        .unwrap();
        assert_eq!(config.gauges.happiness_decay, 1.5);
        assert_eq!(config.gauges.food_recovery, FOOD_RECOVERY);
        assert_eq!(config.tick_mode, TickMode::FrameDriven);
        assert_eq!(config.school, default_school());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = PondConfig::from_json(r#"{ "school": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PondConfig::from_json(r#"{ "interaction": { "threshold": 150.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PondConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn bad_school_color_is_rejected() {
        let mut config = PondConfig::default();
        config.school.push(FishSpec::cruiser(1.0, "teal"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("teal")));

        config.school.pop();
        config.school.push(FishSpec::fast(1.0, "4f6d7a"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = PondConfig::load("/definitely/not/here/pond.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn smaller_fish_wander_faster() {
        let tuning = CruiserTuning::default();
        assert!(tuning.wander_speed(0.7) > tuning.wander_speed(1.2));
        assert!((tuning.wander_speed(1.2) - CRUISER_BASE_SPEED).abs() < 1e-6);
        assert_eq!(tuning.wander_speed(100.0), CRUISER_MIN_SPEED);
    }

    #[test]
    fn hex_colors_parse() {
        let rgb = parse_hex_color("#ff8000").unwrap();
        assert!((rgb[0] - 1.0).abs() < 1e-6);
        assert!((rgb[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(rgb[2], 0.0);
        assert!(parse_hex_color("#12345").is_none());
        assert!(parse_hex_color("#zzzzzz").is_none());
    }
}
