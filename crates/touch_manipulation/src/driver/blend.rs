//! Delta blending across gesture modes
//!
//! Turns collaborator output into a `(delta position, delta rotation)` pair
//! relative to the session's start pose. One finger pans; two fingers twist
//! and dolly the object along its starting forward axis. The object's scale
//! is never touched: a pinch moves the object instead of resizing it.

use crate::config::ManipulationConfig;
use crate::driver::gesture::{GestureMode, GestureSession};
use crate::foundation::math::{Pose, Quat, Transform, Vec3};
use crate::input::compute_centroid;
use crate::manipulation::{
    CentroidMoveLogic, MoveLogic, PinchScaleLogic, RotateLogic, ScaleLogic, TwoPointRotateLogic,
};

/// Largest remapped pinch ratio in either direction
pub const MAX_REMAPPED_RATIO: f32 = 5.0;

/// Offset applied on top of the gesture's start pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendedDelta {
    /// Translation to add to the current position
    pub position: Vec3,
    /// Rotation composed onto the start rotation
    pub rotation: Quat,
}

impl Default for BlendedDelta {
    fn default() -> Self {
        Self::identity()
    }
}

impl BlendedDelta {
    /// No translation, no rotation
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

/// Map a pinch ratio onto a signed dolly amount in `[-5, 5]`
///
/// Spreading (`ratio >= 1`) maps linearly to `[0, 5]`. Pinching inverts the
/// ratio first so that halving the spread mirrors doubling it.
pub fn remap_scale_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        return 0.0;
    }
    if ratio <= 0.0 {
        return -MAX_REMAPPED_RATIO;
    }
    if ratio < 1.0 {
        (-(1.0 / ratio - 1.0)).clamp(-MAX_REMAPPED_RATIO, 0.0)
    } else {
        (ratio - 1.0).clamp(0.0, MAX_REMAPPED_RATIO)
    }
}

/// Owns the manipulation collaborators and combines their output
pub struct DeltaBlender {
    move_logic: Box<dyn MoveLogic>,
    rotate_logic: Box<dyn RotateLogic>,
    scale_logic: Box<dyn ScaleLogic>,
}

impl std::fmt::Debug for DeltaBlender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeltaBlender").finish_non_exhaustive()
    }
}

impl Default for DeltaBlender {
    fn default() -> Self {
        Self::new(
            Box::new(CentroidMoveLogic::new()),
            Box::new(TwoPointRotateLogic::new()),
            Box::new(PinchScaleLogic::new()),
        )
    }
}

impl DeltaBlender {
    /// Create a blender over the given collaborators
    pub fn new(
        move_logic: Box<dyn MoveLogic>,
        rotate_logic: Box<dyn RotateLogic>,
        scale_logic: Box<dyn ScaleLogic>,
    ) -> Self {
        Self {
            move_logic,
            rotate_logic,
            scale_logic,
        }
    }

    /// Snapshot collaborators for a new session
    ///
    /// Move is set up for every gesture; rotate and scale only for
    /// two-finger gestures.
    pub fn setup(&mut self, session: &GestureSession, contacts: &[Vec3], object: &Transform) {
        self.move_logic
            .setup(&session.start_centroid, &session.object_start_pose, &object.scale);

        if session.mode == GestureMode::Multi {
            self.rotate_logic.setup(contacts, object);
            self.scale_logic.setup(contacts, object);
        }
    }

    /// One-finger pan: follow the centroid, never rotate
    pub fn single(
        &mut self,
        session: &GestureSession,
        contacts: &[Vec3],
        object: &Transform,
        config: &ManipulationConfig,
    ) -> BlendedDelta {
        let centroid = Pose::from_position(compute_centroid(contacts));
        let move_target = self
            .move_logic
            .update(&centroid, &object.rotation, &object.scale, false);

        BlendedDelta {
            position: -(move_target - session.object_start_pose.position) * config.pan_transform_speed,
            rotation: Quat::identity(),
        }
    }

    /// Two-finger twist plus pinch dolly along the starting forward axis
    pub fn multi(
        &mut self,
        session: &GestureSession,
        contacts: &[Vec3],
        object: &Transform,
        config: &ManipulationConfig,
    ) -> BlendedDelta {
        let start = &session.object_start_pose;

        let rotation_target = if config.allow_roll_gesture {
            self.rotate_logic.update(contacts)
        } else {
            object.rotation
        };

        let ratio = self.scale_logic.scale_ratio_multiplier(contacts);
        let depth = remap_scale_ratio(ratio) * config.scale_gesture_distance;
        log::trace!("Pinch ratio {:.3} -> depth {:.3}", ratio, depth);

        BlendedDelta {
            position: start.forward() * depth,
            rotation: rotation_target * start.rotation.inverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn begin(
        blender: &mut DeltaBlender,
        mode: GestureMode,
        contacts: &[Vec3],
        object: &Transform,
    ) -> GestureSession {
        let session = GestureSession {
            mode,
            start_centroid: Pose::from_position(compute_centroid(contacts)),
            object_start_pose: object.pose(),
        };
        blender.setup(&session, contacts, object);
        session
    }

    #[test]
    fn test_remap_spread() {
        assert_eq!(remap_scale_ratio(1.0), 0.0);
        assert_relative_eq!(remap_scale_ratio(2.5), 1.5);
        assert_eq!(remap_scale_ratio(10.0), 5.0);
        assert_eq!(remap_scale_ratio(f32::INFINITY), 5.0);
    }

    #[test]
    fn test_remap_pinch() {
        assert_relative_eq!(remap_scale_ratio(0.5), -1.0);
        assert_relative_eq!(remap_scale_ratio(0.25), -3.0);
        assert_eq!(remap_scale_ratio(0.01), -5.0);
        assert_eq!(remap_scale_ratio(0.0), -5.0);
        assert_eq!(remap_scale_ratio(f32::NAN), 0.0);
    }

    #[test]
    fn test_remap_pinch_mirrors_spread() {
        assert_relative_eq!(remap_scale_ratio(0.5), -remap_scale_ratio(2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_single_stationary_contact_has_no_pan() {
        let mut blender = DeltaBlender::default();
        let object = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));
        let contacts = [Vec3::new(-0.1, 0.0, 0.0)];
        let session = begin(&mut blender, GestureMode::Single, &contacts, &object);

        let delta = blender.single(&session, &contacts, &object, &ManipulationConfig::default());
        assert_relative_eq!(delta.position, Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(delta.rotation, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_single_pan_is_negated_and_scaled() {
        let mut blender = DeltaBlender::default();
        let object = Transform::identity();
        let session = begin(&mut blender, GestureMode::Single, &[Vec3::zeros()], &object);

        let config = ManipulationConfig::default().with_pan_transform_speed(10.0);
        let delta = blender.single(&session, &[Vec3::new(-0.1, 0.05, 0.0)], &object, &config);
        assert_relative_eq!(delta.position, Vec3::new(1.0, -0.5, 0.0), epsilon = EPSILON);
        assert_relative_eq!(delta.rotation, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_multi_spread_moves_forward() {
        let mut blender = DeltaBlender::default();
        let object = Transform::identity();
        let start = [Vec3::new(-0.05, 0.0, 0.0), Vec3::new(0.05, 0.0, 0.0)];
        let session = begin(&mut blender, GestureMode::Multi, &start, &object);

        let spread = [Vec3::new(-0.2, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0)];
        let delta = blender.multi(&session, &spread, &object, &ManipulationConfig::default());
        assert_relative_eq!(delta.position, Vec3::new(0.0, 0.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_multi_pinch_moves_backward_along_start_forward() {
        let mut blender = DeltaBlender::default();
        let object = Transform::from_position_rotation(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2),
        );
        let start = [Vec3::new(-0.2, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0)];
        let session = begin(&mut blender, GestureMode::Multi, &start, &object);

        let pinched = [Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)];
        let config = ManipulationConfig::default().with_scale_gesture_distance(2.0);
        let delta = blender.multi(&session, &pinched, &object, &config);

        // Forward is +X after a quarter turn about Y
        assert_relative_eq!(delta.position, Vec3::new(-2.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_multi_depth_is_clamped() {
        let mut blender = DeltaBlender::default();
        let object = Transform::identity();
        let start = [Vec3::new(-0.01, 0.0, 0.0), Vec3::new(0.01, 0.0, 0.0)];
        let session = begin(&mut blender, GestureMode::Multi, &start, &object);

        let wide = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let delta = blender.multi(&session, &wide, &object, &ManipulationConfig::default());
        assert_relative_eq!(delta.position.z, MAX_REMAPPED_RATIO, epsilon = EPSILON);
    }

    #[test]
    fn test_multi_twist_rotation_delta() {
        let mut blender = DeltaBlender::default();
        let object = Transform::identity();
        let start = [Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)];
        let session = begin(&mut blender, GestureMode::Multi, &start, &object);

        let twisted = [Vec3::new(0.0, -0.1, 0.0), Vec3::new(0.0, 0.1, 0.0)];
        let delta = blender.multi(&session, &twisted, &object, &ManipulationConfig::default());

        let expected = Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2);
        assert_relative_eq!(delta.rotation, expected, epsilon = EPSILON);
        assert_relative_eq!(delta.position, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn test_multi_roll_lock_uses_current_rotation() {
        let mut blender = DeltaBlender::default();
        let object = Transform::identity();
        let start = [Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)];
        let session = begin(&mut blender, GestureMode::Multi, &start, &object);

        let twisted = [Vec3::new(0.0, -0.1, 0.0), Vec3::new(0.0, 0.1, 0.0)];
        let config = ManipulationConfig::default().with_roll_gesture(false);
        let delta = blender.multi(&session, &twisted, &object, &config);

        assert_relative_eq!(delta.rotation, Quat::identity(), epsilon = EPSILON);
    }
}
