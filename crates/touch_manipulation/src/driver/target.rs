//! Driven-transform collaborator

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::{Pose, Quat, Transform, Vec3};

/// Host-owned transform the driver reads and writes once per frame
pub trait DrivenTransform {
    /// World position
    fn position(&self) -> Vec3;
    /// Set world position
    fn set_position(&mut self, position: Vec3);
    /// World rotation
    fn rotation(&self) -> Quat;
    /// Set world rotation
    fn set_rotation(&mut self, rotation: Quat);
    /// Local scale (read only for the driver)
    fn local_scale(&self) -> Vec3;
}

impl DrivenTransform for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn local_scale(&self) -> Vec3 {
        self.scale
    }
}

/// Shared handle to a driven transform
pub type SharedTransform = Rc<RefCell<dyn DrivenTransform>>;

/// Which transform a driver writes to
pub enum DriveTarget {
    /// A transform owned by the host
    External(SharedTransform),
    /// The driver's own transform, used when no target was given
    Owned(Transform),
}

impl std::fmt::Debug for DriveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::External(_) => f.write_str("DriveTarget::External"),
            Self::Owned(transform) => f.debug_tuple("DriveTarget::Owned").field(transform).finish(),
        }
    }
}

impl DriveTarget {
    /// Copy out the current transform
    ///
    /// Returns `None` if a shared target is mutably borrowed elsewhere.
    pub fn snapshot(&self) -> Option<Transform> {
        match self {
            Self::External(shared) => {
                let Ok(target) = shared.try_borrow() else {
                    log::warn!("Driven transform is borrowed elsewhere; skipping read");
                    return None;
                };
                Some(Transform {
                    position: target.position(),
                    rotation: target.rotation(),
                    scale: target.local_scale(),
                })
            }
            Self::Owned(transform) => Some(transform.clone()),
        }
    }

    /// Write position and rotation back; returns whether the write happened
    pub fn write(&mut self, pose: &Pose) -> bool {
        match self {
            Self::External(shared) => {
                let Ok(mut target) = shared.try_borrow_mut() else {
                    log::warn!("Driven transform is borrowed elsewhere; skipping write");
                    return false;
                };
                target.set_position(pose.position);
                target.set_rotation(pose.rotation);
                true
            }
            Self::Owned(transform) => {
                transform.position = pose.position;
                transform.rotation = pose.rotation;
                true
            }
        }
    }
}
