//! Centroid-following move logic

use super::MoveLogic;
use crate::foundation::math::{Pose, Quat, Vec3};

/// Keeps the object at a fixed offset from the contact centroid
#[derive(Debug, Clone, Default)]
pub struct CentroidMoveLogic {
    /// Object start position minus start centroid
    grab_to_object: Vec3,
    /// Start centroid in object-local space with scale divided out
    object_local_grab_point: Vec3,
}

impl CentroidMoveLogic {
    /// Create move logic with an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }
}

/// Component-wise division that treats degenerate scale axes as unit scale
fn divide_scale(value: Vec3, scale: &Vec3) -> Vec3 {
    value.zip_map(scale, |v, s| if s.abs() > f32::EPSILON { v / s } else { v })
}

impl MoveLogic for CentroidMoveLogic {
    fn setup(&mut self, start_centroid: &Pose, object_start_pose: &Pose, object_scale: &Vec3) {
        let grab_point = start_centroid.position;
        self.grab_to_object = object_start_pose.position - grab_point;

        let local = object_start_pose.rotation.inverse() * (grab_point - object_start_pose.position);
        self.object_local_grab_point = divide_scale(local, object_scale);
    }

    fn update(
        &mut self,
        current_centroid: &Pose,
        current_rotation: &Quat,
        current_scale: &Vec3,
        use_constraint: bool,
    ) -> Vec3 {
        if use_constraint {
            let scaled_grab_to_object =
                current_rotation * self.object_local_grab_point.component_mul(current_scale);
            current_centroid.position - scaled_grab_to_object
        } else {
            current_centroid.position + self.grab_to_object
        }
    }
}
