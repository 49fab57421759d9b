use crate::config::LensConfig;
use crate::render::Pixel;

/// Keyboard-driven radius change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadiusStep {
    Grow,
    Shrink,
}

impl RadiusStep {
    /// Maps a `KeyboardEvent.key` value to a step; other keys are ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Grow),
            "ArrowDown" => Some(Self::Shrink),
            _ => None,
        }
    }
}

/// Lens position and size in event (CSS) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensState {
    /// `None` while the pointer is outside the map.
    pub center: Option<Pixel>,
    pub radius: f64,
}

impl LensState {
    pub fn new(config: &LensConfig) -> Self {
        Self {
            center: None,
            radius: config.default_radius.clamp(config.min_radius, config.max_radius),
        }
    }

    /// Applies one step, clamped to the configured bounds.
    pub fn step_radius(&mut self, step: RadiusStep, config: &LensConfig) {
        self.radius = match step {
            RadiusStep::Grow => (self.radius + config.step).min(config.max_radius),
            RadiusStep::Shrink => (self.radius - config.step).max(config.min_radius),
        };
    }
}
