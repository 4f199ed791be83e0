//! Active contact points and centroid reduction

use crate::foundation::math::{Vec2, Vec3};

/// One active touch, normalized to `[-1, 1] x [-1, 1]` and embedded with `z = 0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactPoint(pub Vec3);

impl ContactPoint {
    /// Create a contact from normalized screen coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec3::new(x, y, 0.0))
    }

    /// Contact position in 3D (z is always zero)
    pub const fn position(&self) -> Vec3 {
        self.0
    }
}

/// All contacts active this frame, in device order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSet {
    points: Vec<ContactPoint>,
}

impl ContactSet {
    /// Create an empty contact set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a contact set from normalized points
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            points: points
                .into_iter()
                .map(|p| ContactPoint(Vec3::new(p.x, p.y, 0.0)))
                .collect(),
        }
    }

    /// Number of active contacts
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no contact is active
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Contacts in device order
    pub fn points(&self) -> &[ContactPoint] {
        &self.points
    }

    /// Contact positions in device order
    pub fn positions(&self) -> Vec<Vec3> {
        self.points.iter().map(ContactPoint::position).collect()
    }

    /// Reference point of the whole set, see [`compute_centroid`]
    pub fn centroid(&self) -> Vec3 {
        compute_centroid(&self.positions())
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }

    pub(crate) fn push(&mut self, point: ContactPoint) {
        self.points.push(point);
    }
}

/// Reduce contacts to a single reference point
///
/// No contacts yields the zero vector and a single contact is returned
/// verbatim. Larger sets use an incremental mean, which stays accurate
/// without accumulating a large running sum.
pub fn compute_centroid(points: &[Vec3]) -> Vec3 {
    match points {
        [] => Vec3::zeros(),
        [only] => *only,
        _ => {
            let mut mean = Vec3::zeros();
            for (i, point) in points.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let count = (i + 1) as f32;
                mean += (point - mean) / count;
            }
            mean
        }
    }
}

/// Map a raw pixel position to normalized contact space
///
/// The screen center maps to the origin, Y points up and X is mirrored so
/// that dragging right on screen yields negative X. A degenerate screen
/// maps everything to the origin.
pub fn normalize_screen_position(pixel: Vec2, screen_size: Vec2) -> Vec3 {
    let half_width = screen_size.x / 2.0;
    let half_height = screen_size.y / 2.0;
    if half_width <= 0.0 || half_height <= 0.0 {
        return Vec3::zeros();
    }

    let x = (pixel.x - half_width) / half_width;
    let y = (pixel.y - half_height) / half_height;
    Vec3::new(-x, y, 0.0)
}
