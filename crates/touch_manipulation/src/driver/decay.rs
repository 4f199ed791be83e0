//! Inertial decay of gesture responsiveness
//!
//! A countdown restarted on every gesture start. The remaining fraction is
//! eased with a smoothstep into a `[0, 1]` factor that scales how quickly the
//! driven transform chases its target. The countdown runs in real time,
//! whether or not contacts are down.

use crate::foundation::math::utils::{clamp01, smoothstep};

/// Countdown timer producing the decay factor
#[derive(Debug, Clone, PartialEq)]
pub struct InertialDecay {
    duration: f32,
    remaining: f32,
    factor: f32,
}

impl InertialDecay {
    /// Create an expired timer for the given duration in seconds
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
            factor: 0.0,
        }
    }

    /// Restart the countdown at full strength
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.factor = 1.0;
    }

    /// Advance the countdown by one frame
    pub fn tick(&mut self, delta_time: f32) {
        self.remaining = (self.remaining - delta_time).max(0.0);
        self.factor = if self.duration > 0.0 {
            smoothstep(0.0, 1.0, clamp01(self.remaining / self.duration))
        } else {
            0.0
        };
    }

    /// Change the full countdown length, keeping the remaining fraction
    pub fn set_duration(&mut self, duration: f32) {
        if self.duration > 0.0 {
            self.remaining *= duration / self.duration;
        }
        self.duration = duration;
    }

    /// Current `[0, 1]` decay factor
    pub const fn factor(&self) -> f32 {
        self.factor
    }

    /// Seconds until the factor reaches zero
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Full countdown length in seconds
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether the factor has fully decayed
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}
