//! Specialized collection types

use crate::foundation::math::Vec3;

/// Fixed-capacity ring buffer of samples
///
/// Backed by an inline array; pushing onto a full ring evicts the oldest
/// sample. Never allocates.
#[derive(Debug, Clone)]
pub struct SampleRing<T, const N: usize> {
    items: [T; N],
    /// Index of the oldest sample
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> SampleRing<T, N> {
    /// Create an empty ring
    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of samples held
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of samples currently held
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the ring holds no samples
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Push a sample, evicting the oldest one when full
    pub fn push(&mut self, sample: T) {
        if N == 0 {
            return;
        }
        if self.len < N {
            self.items[(self.head + self.len) % N] = sample;
            self.len += 1;
        } else {
            self.items[self.head] = sample;
            self.head = (self.head + 1) % N;
        }
    }

    /// Drop every sample
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Most recently pushed sample
    pub fn latest(&self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            Some(self.items[(self.head + self.len - 1) % N])
        }
    }

    /// Iterate samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.items[(self.head + i) % N])
    }
}

impl<T: Copy + Default, const N: usize> Default for SampleRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Arithmetic mean of the samples in a ring, zero when empty
pub fn average_vec3<const N: usize>(ring: &SampleRing<Vec3, N>) -> Vec3 {
    if ring.is_empty() {
        return Vec3::zeros();
    }
    #[allow(clippy::cast_precision_loss)]
    let count = ring.len() as f32;
    ring.iter().fold(Vec3::zeros(), |sum, sample| sum + sample) / count
}
