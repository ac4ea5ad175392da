use std::fmt;

/// Bookkeeping record of a container: how many element slots are allocated,
/// how many are live, and how wide one element is.
///
/// Invariant: `length <= capacity`, `capacity >= 1`, `stride >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArrayHeader {
    pub capacity: usize,
    pub length: usize,
    pub stride: usize,
}

impl ArrayHeader {
    /// Fraction of the allocated slots that hold live elements.
    #[inline]
    pub fn utilization(&self) -> f64 {
        self.length as f64 / self.capacity as f64
    }
}

impl fmt::Display for ArrayHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Capacity: {}, Length: {}, Stride (bits): {}",
            self.capacity,
            self.length,
            self.stride * 8
        )
    }
}
