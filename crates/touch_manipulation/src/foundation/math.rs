//! Math utilities and types
//!
//! Provides the vector, quaternion and pose types shared by the gesture
//! pipeline, plus the interpolation helpers it relies on.
//!
//! Conventions are Y-up with +Z as an object's forward axis. Touch contacts
//! live in the XY plane, so a two-finger twist is a rotation about forward.

pub use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Unit quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Rigid transform snapshot: position and unit rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion (always unit norm)
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create a pose from position and rotation
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at the origin with no rotation
    pub fn identity() -> Self {
        Self::new(Vec3::zeros(), Quat::identity())
    }

    /// Pose with only a position
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::identity())
    }

    /// The pose's forward (+Z) axis in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * axes::FORWARD
    }
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder pattern: set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Position and rotation without scale
    pub const fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }
}

/// World axis constants
pub mod axes {
    use super::Vec3;

    /// Object-local forward direction
    pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// World right direction
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
}

/// Math utility functions
pub mod utils {
    use super::{axes, Quat, Vec3};

    /// Clamp a value to `[0, 1]`
    pub fn clamp01(value: f32) -> f32 {
        value.clamp(0.0, 1.0)
    }

    /// Hermite interpolation between `from` and `to`
    ///
    /// `t` is clamped to `[0, 1]` and eased with `3t² - 2t³`.
    pub fn smoothstep(from: f32, to: f32, t: f32) -> f32 {
        let t = clamp01(t);
        let t = t * t * (3.0 - 2.0 * t);
        to * t + from * (1.0 - t)
    }

    /// Linear interpolation between two points with `t` clamped to `[0, 1]`
    pub fn lerp_vec3(from: &Vec3, to: &Vec3, t: f32) -> Vec3 {
        from.lerp(to, clamp01(t))
    }

    /// Spherical interpolation along the shortest arc with `t` clamped to `[0, 1]`
    ///
    /// Rotations too close together to define an arc return the nearer endpoint.
    pub fn slerp_quat(from: &Quat, to: &Quat, t: f32) -> Quat {
        let t = clamp01(t);
        from.try_slerp(to, t, 1.0e-6).unwrap_or(if t < 0.5 { *from } else { *to })
    }

    /// Remove the twist about an object's forward axis
    ///
    /// Decomposes `q = Ry(yaw) * Rx(pitch) * Rz(roll)` and rebuilds it with
    /// `roll = 0`. The forward axis is preserved and the right axis ends up
    /// level with the horizon.
    pub fn strip_roll(rotation: &Quat) -> Quat {
        let forward = rotation * axes::FORWARD;
        let pitch = (-forward.y).clamp(-1.0, 1.0).asin();
        let yaw = forward.x.atan2(forward.z);

        Quat::from_axis_angle(&Vec3::y_axis(), yaw) * Quat::from_axis_angle(&Vec3::x_axis(), pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_relative_eq!(smoothstep(0.0, 1.0, 0.5), 0.5, epsilon = EPSILON);
        assert_relative_eq!(smoothstep(0.0, 1.0, 0.25), 0.156_25, epsilon = EPSILON);
    }

    #[test]
    fn test_smoothstep_is_monotonic() {
        let mut previous = 0.0;
        for i in 0..=100 {
            let value = smoothstep(0.0, 1.0, i as f32 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_lerp_clamps_parameter() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);

        assert_relative_eq!(lerp_vec3(&a, &b, 0.5), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(lerp_vec3(&a, &b, 3.0), b, epsilon = EPSILON);
        assert_relative_eq!(lerp_vec3(&a, &b, -1.0), a, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_identical_rotations() {
        let q = Quat::from_axis_angle(&Vec3::z_axis(), 0.3);
        let result = slerp_quat(&q, &q, 0.5);
        assert_relative_eq!(result, q, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_halfway() {
        let from = Quat::identity();
        let to = Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2);
        let half = slerp_quat(&from, &to, 0.5);
        assert_relative_eq!(half.angle(), FRAC_PI_4, epsilon = EPSILON);
    }

    #[test]
    fn test_strip_roll_removes_pure_twist() {
        let twisted = Quat::from_axis_angle(&Vec3::z_axis(), 1.2);
        let stripped = strip_roll(&twisted);
        assert_relative_eq!(stripped, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_strip_roll_keeps_yaw_and_pitch() {
        let yaw_pitch = Quat::from_axis_angle(&Vec3::y_axis(), 0.7)
            * Quat::from_axis_angle(&Vec3::x_axis(), -0.4);
        let with_roll = yaw_pitch * Quat::from_axis_angle(&Vec3::z_axis(), 0.9);

        let stripped = strip_roll(&with_roll);

        assert_relative_eq!(stripped, yaw_pitch, epsilon = EPSILON);
        assert_relative_eq!(stripped * axes::FORWARD, with_roll * axes::FORWARD, epsilon = EPSILON);
        assert_abs_diff_eq!((stripped * axes::RIGHT).y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_pose_forward() {
        let pose = Pose::new(Vec3::zeros(), Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2));
        assert_relative_eq!(pose.forward(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }
}
