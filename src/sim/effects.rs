//! Time-driven screen effects triggered by simulation events
//!
//! Neither controller touches entities. The presentation layer reads the
//! current flash intensity and shake offset when drawing a frame.

use glam::Vec2;
use rand::Rng;

use crate::Rgb;
use crate::consts::{FLASH_COLOR, FLASH_DECAY, FLASH_MAX};

/// Fading full-screen color wash
#[derive(Debug, Clone)]
pub struct ScreenFlash {
    /// Current intensity in [0, 255]
    intensity: f32,
    pub color: Rgb,
}

impl Default for ScreenFlash {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            color: FLASH_COLOR,
        }
    }
}

impl ScreenFlash {
    /// Add `strength`, saturating at the maximum
    pub fn trigger(&mut self, strength: f32) {
        self.intensity = crate::clamp(self.intensity + strength, 0.0, FLASH_MAX);
    }

    /// One frame of fade
    pub fn decay(&mut self) {
        self.intensity = (self.intensity - FLASH_DECAY).max(0.0);
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }
}

/// Decaying random jitter of the drawn scene
#[derive(Debug, Clone, Default)]
pub struct ScreenShake {
    /// Seconds of shake left, never negative
    timer: f32,
    /// Amplitude ceiling, kept after the timer runs out
    intensity: f32,
    /// Offset produced by the latest `advance`
    offset: Vec2,
}

impl ScreenShake {
    /// Raise timer and intensity to at least the requested values (no stacking)
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        self.intensity = self.intensity.max(intensity);
        self.timer = self.timer.max(duration);
    }

    /// Decay the timer by `dt` and roll a new offset scaled by `intensity * timer`
    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Vec2 {
        if self.timer <= 0.0 {
            self.offset = Vec2::ZERO;
            return self.offset;
        }

        self.timer = (self.timer - dt).max(0.0);
        let amplitude = self.intensity * self.timer;
        self.offset = Vec2::new(
            (rng.random_range(-1.0..=1.0f32) * amplitude).trunc(),
            (rng.random_range(-1.0..=1.0f32) * amplitude).trunc(),
        );
        self.offset
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}
