use crate::entity::FishId;

/// Visual effects the pond asks its host to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Expanding ring where food landed.
    Ripple,
    /// One sinking food pellet.
    Pellet,
    /// Brief flash on the food gauge when a feed is refused.
    Warning,
}

/// Receives one pose per fish per frame.
pub trait PoseSink {
    fn render(&mut self, id: FishId, x: f32, y: f32, heading: f32);
}

pub trait EffectSink {
    fn spawn_effect(&mut self, kind: EffectKind, x: f32, y: f32);
}

pub trait GaugeSink {
    fn display_gauges(&mut self, food_stock: f32, happiness: f32);
}

/// Records everything it is handed.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub poses: Vec<(FishId, f32, f32, f32)>,
    pub effects: Vec<(EffectKind, f32, f32)>,
    pub gauges: Vec<(f32, f32)>,
}

#[cfg(test)]
impl Recorder {
    pub fn count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|(k, _, _)| *k == kind).count()
    }
}

#[cfg(test)]
impl PoseSink for Recorder {
    fn render(&mut self, id: FishId, x: f32, y: f32, heading: f32) {
        self.poses.push((id, x, y, heading));
    }
}

#[cfg(test)]
impl EffectSink for Recorder {
    fn spawn_effect(&mut self, kind: EffectKind, x: f32, y: f32) {
        self.effects.push((kind, x, y));
    }
}

#[cfg(test)]
impl GaugeSink for Recorder {
    fn display_gauges(&mut self, food_stock: f32, happiness: f32) {
        self.gauges.push((food_stock, happiness));
    }
}
