//! Manipulation math collaborators
//!
//! Three independent capabilities turn raw contact positions into targets:
//! [`MoveLogic`] follows the centroid, [`RotateLogic`] derives a twist from two
//! contacts, and [`ScaleLogic`] derives a pinch ratio. Each is a pure function
//! of the snapshot taken in `setup` and the input handed to it afterwards.
//!
//! The driver calls `setup` on every gesture start and the update entry
//! point on every active frame. Stock implementations are provided; hosts
//! may plug in their own through the driver builder.

pub mod move_logic;
pub mod rotate_logic;
pub mod scale_logic;

pub use move_logic::CentroidMoveLogic;
pub use rotate_logic::TwoPointRotateLogic;
pub use scale_logic::PinchScaleLogic;

use crate::foundation::math::{Pose, Quat, Transform, Vec3};

/// Produces a target position that follows the contact centroid
pub trait MoveLogic {
    /// Snapshot the gesture's reference frame
    fn setup(&mut self, start_centroid: &Pose, object_start_pose: &Pose, object_scale: &Vec3);

    /// Target position for the current centroid
    ///
    /// With `use_constraint` the grab point stays rigidly attached to the
    /// object's current rotation and scale.
    fn update(
        &mut self,
        current_centroid: &Pose,
        current_rotation: &Quat,
        current_scale: &Vec3,
        use_constraint: bool,
    ) -> Vec3;
}

/// Produces a target rotation from the angular motion of two contacts
pub trait RotateLogic {
    /// Snapshot the starting contacts and object transform
    fn setup(&mut self, contacts: &[Vec3], object: &Transform);

    /// Target rotation for the current contacts
    fn update(&mut self, contacts: &[Vec3]) -> Quat;
}

/// Produces a dimensionless pinch ratio from inter-contact distance
pub trait ScaleLogic {
    /// Snapshot the starting contacts and object transform
    fn setup(&mut self, contacts: &[Vec3], object: &Transform);

    /// Current distance over start distance
    ///
    /// Greater than one when fingers spread, less than one when they pinch.
    /// Always finite and strictly positive.
    fn scale_ratio_multiplier(&self, contacts: &[Vec3]) -> f32;
}
