//! Two-contact twist logic

use std::f32::consts::PI;

use super::RotateLogic;
use crate::foundation::math::{Quat, Transform, Vec3};

/// Handlebars shorter than this cannot define a direction
pub const MIN_HANDLEBAR_LENGTH: f32 = 1.0e-4;

/// Rotates the object by the angle the contact "handlebar" has swept
///
/// The handlebar is the vector from the first contact to the second.
#[derive(Debug, Clone)]
pub struct TwoPointRotateLogic {
    start_handlebar: Vec3,
    start_rotation: Quat,
}

impl Default for TwoPointRotateLogic {
    fn default() -> Self {
        Self {
            start_handlebar: Vec3::zeros(),
            start_rotation: Quat::identity(),
        }
    }
}

impl TwoPointRotateLogic {
    /// Create rotate logic with an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    fn handlebar(contacts: &[Vec3]) -> Option<Vec3> {
        match contacts {
            [first, second, ..] => {
                let handlebar = second - first;
                (handlebar.norm() > MIN_HANDLEBAR_LENGTH).then_some(handlebar)
            }
            _ => None,
        }
    }
}

impl RotateLogic for TwoPointRotateLogic {
    fn setup(&mut self, contacts: &[Vec3], object: &Transform) {
        self.start_handlebar = Self::handlebar(contacts).unwrap_or_else(Vec3::zeros);
        self.start_rotation = object.rotation;
    }

    fn update(&mut self, contacts: &[Vec3]) -> Quat {
        if self.start_handlebar.norm() <= MIN_HANDLEBAR_LENGTH {
            return self.start_rotation;
        }
        let Some(current) = Self::handlebar(contacts) else {
            return self.start_rotation;
        };

        // Antiparallel handlebars have no unique arc; contacts lie in the XY
        // plane so a half turn about forward is the only sensible answer
        let swept = Quat::rotation_between(&self.start_handlebar, &current)
            .unwrap_or_else(|| Quat::from_axis_angle(&Vec3::z_axis(), PI));

        swept * self.start_rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn setup_with(contacts: &[Vec3], rotation: Quat) -> TwoPointRotateLogic {
        let mut logic = TwoPointRotateLogic::new();
        logic.setup(contacts, &Transform::from_position_rotation(Vec3::zeros(), rotation));
        logic
    }

    #[test]
    fn test_unchanged_contacts_keep_start_rotation() {
        let start = Quat::from_axis_angle(&Vec3::y_axis(), 0.4);
        let contacts = [Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)];
        let mut logic = setup_with(&contacts, start);

        assert_relative_eq!(logic.update(&contacts), start, epsilon = EPSILON);
    }

    #[test]
    fn test_quarter_turn_twist() {
        let mut logic = setup_with(
            &[Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)],
            Quat::identity(),
        );

        let twisted = logic.update(&[Vec3::new(0.0, -0.1, 0.0), Vec3::new(0.0, 0.1, 0.0)]);
        let expected = Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2);
        assert_relative_eq!(twisted, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_translation_alone_does_not_rotate() {
        let mut logic = setup_with(
            &[Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)],
            Quat::identity(),
        );

        let moved = logic.update(&[Vec3::new(0.3, 0.5, 0.0), Vec3::new(0.5, 0.5, 0.0)]);
        assert_relative_eq!(moved, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_antiparallel_is_half_turn() {
        let mut logic = setup_with(
            &[Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)],
            Quat::identity(),
        );

        let flipped = logic.update(&[Vec3::new(0.1, 0.0, 0.0), Vec3::new(-0.1, 0.0, 0.0)]);
        assert_relative_eq!(flipped.angle(), PI, epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_contacts_keep_start_rotation() {
        let start = Quat::from_axis_angle(&Vec3::x_axis(), 0.2);
        let mut logic = setup_with(&[Vec3::new(0.1, 0.1, 0.0), Vec3::new(0.1, 0.1, 0.0)], start);
        assert_relative_eq!(
            logic.update(&[Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)]),
            start,
            epsilon = EPSILON
        );

        let mut logic = setup_with(&[Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)], start);
        assert_relative_eq!(logic.update(&[Vec3::new(0.0, 0.0, 0.0)]), start, epsilon = EPSILON);
    }
}
