//! Growth, shrink and layout policy of a container.

use spda_bytes::AlignedByteVec;
use spda_common::{Result, verify_arg};

/// Sizing policy of a [`RawArray`](crate::RawArray).
///
/// Fixed at creation; a copy travels with the container (and with its copies).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrayConfig {
    /// Smallest capacity a container is created with, in elements.
    ///
    /// Requests below it are rounded up. Must be at least 1.
    pub min_capacity: usize,

    /// Capacity multiplier applied when a full container must accept another element.
    ///
    /// Must be at least 2.
    pub growth_factor: usize,

    /// Utilization (`length / capacity`) below which
    /// [`RawArray::shrink`](crate::RawArray::shrink) reclaims space.
    ///
    /// Must be in `[0, 1)`. Zero disables shrinking.
    pub shrink_threshold: f64,

    /// Byte alignment of the element storage. Power of two, at most 4096.
    pub alignment: usize,
}

impl ArrayConfig {
    pub const DEFAULT_MIN_CAPACITY: usize = 8;
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;
    pub const DEFAULT_SHRINK_THRESHOLD: f64 = 0.25;
    pub const DEFAULT_ALIGNMENT: usize = AlignedByteVec::DEFAULT_ALIGNMENT;

    pub const fn new() -> ArrayConfig {
        ArrayConfig {
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            shrink_threshold: Self::DEFAULT_SHRINK_THRESHOLD,
            alignment: Self::DEFAULT_ALIGNMENT,
        }
    }

    pub fn with_min_capacity(mut self, min_capacity: usize) -> ArrayConfig {
        self.min_capacity = min_capacity;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> ArrayConfig {
        self.growth_factor = growth_factor;
        self
    }

    pub fn with_shrink_threshold(mut self, shrink_threshold: f64) -> ArrayConfig {
        self.shrink_threshold = shrink_threshold;
        self
    }

    pub fn with_alignment(mut self, alignment: usize) -> ArrayConfig {
        self.alignment = alignment;
        self
    }

    /// Checks that every field is within its documented range.
    pub fn validate(&self) -> Result<()> {
        verify_arg!(min_capacity, self.min_capacity >= 1);
        verify_arg!(growth_factor, self.growth_factor >= 2);
        verify_arg!(shrink_threshold, (0.0..1.0).contains(&self.shrink_threshold));
        verify_arg!(
            alignment,
            self.alignment.is_power_of_two() && self.alignment <= AlignedByteVec::MAX_ALIGNMENT
        );
        Ok(())
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new()
    }
}
