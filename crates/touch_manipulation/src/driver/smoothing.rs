//! Frame-rate independent smoothing toward the blended target

use crate::driver::blend::BlendedDelta;
use crate::foundation::math::utils::{lerp_vec3, slerp_quat, strip_roll};
use crate::foundation::math::{Pose, Quat, Vec3};

/// Where the driven object should head this frame
///
/// Rebuilt every frame from the current position and the blended delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTransform {
    /// Target position
    pub position: Vec3,
    /// Target rotation
    pub rotation: Quat,
}

impl TargetTransform {
    /// Offset the current position and compose onto the start rotation
    pub fn from_delta(current_position: &Vec3, start_rotation: &Quat, delta: &BlendedDelta) -> Self {
        Self {
            position: current_position + delta.position,
            rotation: start_rotation * delta.rotation,
        }
    }
}

/// Exponential lerp/slerp smoothing with an optional roll lock
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSmoother {
    /// Blend speed per second
    pub transform_speed: f32,
    /// Extra multiplier on the rotation blend
    pub rotation_smoothing_factor: f32,
    /// Strip twist about forward from every output
    pub lock_roll: bool,
}

impl TransformSmoother {
    /// Create a smoother
    pub const fn new(transform_speed: f32, rotation_smoothing_factor: f32, lock_roll: bool) -> Self {
        Self {
            transform_speed,
            rotation_smoothing_factor,
            lock_roll,
        }
    }

    /// Step `current` toward `target` for one frame
    ///
    /// Both blend parameters are scaled by `decay_factor`, so a fully
    /// decayed gesture leaves position untouched.
    pub fn apply(
        &self,
        current: &Pose,
        target: &TargetTransform,
        delta_time: f32,
        decay_factor: f32,
    ) -> Pose {
        let position_t = delta_time * self.transform_speed * decay_factor;
        let rotation_t = position_t * self.rotation_smoothing_factor;

        let position = lerp_vec3(&current.position, &target.position, position_t);
        let mut rotation = slerp_quat(&current.rotation, &target.rotation, rotation_t);
        if self.lock_roll {
            rotation = strip_roll(&rotation);
        }

        Pose::new(position, rotation)
    }
}
