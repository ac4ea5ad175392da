use std::ops::Range;

use spda_common::{Error, Result, verify_arg};

use crate::align::{is_aligned_ptr, padding_for};

/// A byte vector that maintains an alignment guarantee for the start of its data
/// and never aborts the process when memory cannot be obtained.
///
/// The vector never reallocates behind the caller's back: every allocation goes
/// through a fallible path ([`AlignedByteVec::try_reserve`] or
/// [`AlignedByteVec::try_relocate`]) that builds a fresh allocation, copies the
/// live bytes over and only then replaces `self`. When the allocation fails the
/// original bytes, length and capacity are left exactly as they were.
pub struct AlignedByteVec {
    /// The underlying byte vector, including the alignment padding at its start.
    inner: Vec<u8>,
    /// Offset from start of inner vec to the aligned data.
    start: u32,
    /// Required alignment, specified during vector creation.
    alignment: u32,
}

impl AlignedByteVec {
    /// Alignment used when none is specified.
    pub const DEFAULT_ALIGNMENT: usize = 16;
    /// Largest supported alignment.
    pub const MAX_ALIGNMENT: usize = 4096;

    /// Creates a new empty vector with no capacity allocation.
    pub fn new() -> AlignedByteVec {
        AlignedByteVec {
            inner: Vec::new(),
            start: 0,
            alignment: Self::DEFAULT_ALIGNMENT as u32,
        }
    }

    /// Creates a new vector able to hold at least `capacity` bytes, aligned to
    /// [`Self::DEFAULT_ALIGNMENT`].
    pub fn try_with_capacity(capacity: usize) -> Result<AlignedByteVec> {
        Self::make(capacity, Self::DEFAULT_ALIGNMENT)
    }

    /// Creates a new vector able to hold at least `capacity` bytes, with its data
    /// starting at an address that is a multiple of `alignment`.
    ///
    /// `alignment` must be a power of two no greater than [`Self::MAX_ALIGNMENT`].
    pub fn try_with_capacity_and_alignment(
        capacity: usize,
        alignment: usize,
    ) -> Result<AlignedByteVec> {
        Self::make(capacity, alignment)
    }

    /// Creates a new vector containing a copy of the provided slice.
    pub fn try_copy_from_slice(data: &[u8], alignment: usize) -> Result<AlignedByteVec> {
        let mut vec = Self::make(data.len(), alignment)?;
        vec.inner.extend_from_slice(data);
        Ok(vec)
    }

    /// Returns the number of bytes in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() - self.start_offset()
    }

    /// Returns true if the vector contains no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of bytes the vector can hold without relocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity() - self.start_offset()
    }

    /// Returns the number of bytes that can still be appended without relocating.
    #[inline]
    pub fn spare_capacity(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Returns the alignment of the data start.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment as usize
    }

    /// Returns a raw pointer to the vector's data.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.as_slice().as_ptr()
    }

    /// Returns a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner[self.start_offset()..]
    }

    /// Returns a mutable slice containing the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let start = self.start_offset();
        &mut self.inner[start..]
    }

    /// Reserves capacity for at least `additional` more bytes.
    ///
    /// When the spare capacity is insufficient, the vector is relocated to a new
    /// allocation of at least twice the current capacity.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        if self.spare_capacity() >= additional {
            return Ok(());
        }
        let required = self
            .len()
            .checked_add(additional)
            .ok_or_else(|| Error::allocation("aligned byte vector", usize::MAX))?;
        let new_cap = std::cmp::max(self.capacity().saturating_mul(2), required);
        self.try_relocate(new_cap)
    }

    /// Moves the live bytes into a fresh allocation of at least `new_capacity` bytes.
    ///
    /// This is the only way the vector changes its allocation, and it works in both
    /// directions (growing and shrinking). On failure `self` is left untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `new_capacity` is smaller than the current length.
    /// - `AllocationFailure` if the new allocation cannot be obtained.
    #[cold]
    pub fn try_relocate(&mut self, new_capacity: usize) -> Result<()> {
        verify_arg!(new_capacity, new_capacity >= self.len());
        let mut relocated = Self::make(new_capacity, self.alignment())?;
        relocated.inner.extend_from_slice(self.as_slice());
        log::trace!(
            "relocated {} bytes: capacity {} -> {}",
            self.len(),
            self.capacity(),
            relocated.capacity()
        );
        *self = relocated;
        Ok(())
    }

    /// Creates an independent copy with the same alignment and at least the same
    /// capacity as `self`.
    pub fn try_clone(&self) -> Result<AlignedByteVec> {
        let mut copy = Self::make(self.capacity(), self.alignment())?;
        copy.inner.extend_from_slice(self.as_slice());
        Ok(copy)
    }

    /// Appends a slice to the vector, reserving more space if needed.
    pub fn try_extend_from_slice(&mut self, s: &[u8]) -> Result<()> {
        self.try_reserve(s.len())?;
        self.inner.extend_from_slice(s);
        Ok(())
    }

    /// Inserts `s` at byte `offset`, shifting the bytes at `offset..` to the right.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is greater than the vector's length.
    pub fn try_insert_from_slice(&mut self, offset: usize, s: &[u8]) -> Result<()> {
        assert!(
            offset <= self.len(),
            "insert offset out of bounds: {offset} <= {}",
            self.len()
        );
        self.try_extend_from_slice(s)?;
        self.as_mut_slice()[offset..].rotate_right(s.len());
        Ok(())
    }

    /// Removes the bytes in `range`, shifting the tail to the left.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or extends past the vector's length.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let len = self.len();
        assert!(
            range.start <= range.end,
            "range start must not be greater than end: {:?} <= {:?}",
            range.start,
            range.end,
        );
        assert!(
            range.end <= len,
            "range end out of bounds: {:?} <= {:?}",
            range.end,
            len,
        );
        self.as_mut_slice().copy_within(range.end..len, range.start);
        self.truncate(len - range.len());
    }

    /// Truncates the vector to the specified length.
    ///
    /// Has no effect when `new_len` is not less than the current length. The
    /// capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        self.inner.truncate(self.start_offset() + new_len);
    }

    /// Clears the vector, removing all bytes but keeping the allocation.
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

impl AlignedByteVec {
    /// Returns the vector's data as a slice of `T`.
    ///
    /// # Panics
    ///
    /// Panics if the length is not a multiple of `size_of::<T>()` or the vector's
    /// alignment is insufficient for `T`.
    #[inline]
    pub fn typed_data<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        if self.is_empty() {
            return &[];
        }
        bytemuck::cast_slice(self.as_slice())
    }

    /// Returns the vector's data as a mutable slice of `T`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`AlignedByteVec::typed_data`].
    #[inline]
    pub fn typed_data_mut<T>(&mut self) -> &mut [T]
    where
        T: bytemuck::AnyBitPattern + bytemuck::NoUninit,
    {
        if self.is_empty() {
            return &mut [];
        }
        bytemuck::cast_slice_mut(self.as_mut_slice())
    }
}

impl AlignedByteVec {
    /// Allocates a vector with room for at least `capacity` bytes past the
    /// alignment padding.
    fn make(capacity: usize, alignment: usize) -> Result<AlignedByteVec> {
        let alignment = alignment.max(1);
        verify_arg!(
            alignment,
            alignment.is_power_of_two() && alignment <= Self::MAX_ALIGNMENT
        );

        if capacity == 0 {
            return Ok(AlignedByteVec {
                inner: Vec::new(),
                start: 0,
                alignment: alignment as u32,
            });
        }

        let vec_capacity = capacity
            .checked_add(alignment - 1)
            .ok_or_else(|| Error::allocation("aligned byte vector", usize::MAX))?;

        let mut vec = Vec::<u8>::new();
        vec.try_reserve_exact(vec_capacity)
            .map_err(|e| Error::try_reserve("aligned byte vector", vec_capacity, e))?;

        // Zero-filling the padding stays within the reserved capacity.
        let start = padding_for(vec.as_ptr(), alignment);
        vec.resize(start, 0);

        let res = AlignedByteVec {
            inner: vec,
            start: start as u32,
            alignment: alignment as u32,
        };
        debug_assert!(res.capacity() >= capacity);
        debug_assert!(is_aligned_ptr(res.as_ptr(), alignment));
        Ok(res)
    }

    #[inline]
    fn start_offset(&self) -> usize {
        self.start as usize
    }
}

impl std::ops::Deref for AlignedByteVec {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl std::ops::DerefMut for AlignedByteVec {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl std::fmt::Debug for AlignedByteVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedByteVec")
            .field("values", &self.as_slice())
            .field("len", &self.len())
            .field("cap", &self.capacity())
            .field("alignment", &self.alignment)
            .field("internal_offset", &self.start)
            .finish_non_exhaustive()
    }
}

impl Default for AlignedByteVec {
    fn default() -> Self {
        Self::new()
    }
}
