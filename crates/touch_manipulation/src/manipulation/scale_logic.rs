//! Pinch ratio logic

use super::ScaleLogic;
use crate::foundation::math::{Transform, Vec3};

/// Contact distances below this are treated as touching
pub const MIN_PINCH_DISTANCE: f32 = 1.0e-4;

/// Upper bound on the reported ratio (and inverse lower bound)
pub const MAX_SCALE_RATIO: f32 = 100.0;

/// Compares the current contact spread against the spread at setup
#[derive(Debug, Clone, Default)]
pub struct PinchScaleLogic {
    start_distance: f32,
}

impl PinchScaleLogic {
    /// Create scale logic with an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Spread captured at setup
    pub const fn start_distance(&self) -> f32 {
        self.start_distance
    }
}

/// Smallest distance between any two contacts, `None` with fewer than two
fn min_pairwise_distance(contacts: &[Vec3]) -> Option<f32> {
    let mut min: Option<f32> = None;
    for (i, a) in contacts.iter().enumerate() {
        for b in &contacts[i + 1..] {
            let distance = (b - a).norm();
            min = Some(min.map_or(distance, |m| m.min(distance)));
        }
    }
    min
}

impl ScaleLogic for PinchScaleLogic {
    fn setup(&mut self, contacts: &[Vec3], _object: &Transform) {
        self.start_distance = min_pairwise_distance(contacts).unwrap_or(0.0);
    }

    fn scale_ratio_multiplier(&self, contacts: &[Vec3]) -> f32 {
        if self.start_distance.is_nan() || self.start_distance < MIN_PINCH_DISTANCE {
            return 1.0;
        }
        let Some(current) = min_pairwise_distance(contacts) else {
            return 1.0;
        };

        let ratio = current.max(MIN_PINCH_DISTANCE) / self.start_distance;
        ratio.clamp(1.0 / MAX_SCALE_RATIO, MAX_SCALE_RATIO)
    }
}
