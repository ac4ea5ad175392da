//! Type-erased dynamic array: elements are opaque byte strings of a fixed width
//! ("stride") chosen at creation.

use std::cmp::Ordering;
use std::slice::{ChunksExact, ChunksExactMut};

use spda_bytes::AlignedByteVec;
use spda_common::{Error, Result, verify_arg};

use crate::{config::ArrayConfig, header::ArrayHeader};

/// A growable contiguous sequence of fixed-width elements.
///
/// The container owns an [`ArrayHeader`] (capacity, length, stride) next to the
/// element storage. Operations that change the capacity move the elements into a
/// fresh allocation; since they take `&mut self`, no reference into the old
/// storage can outlive the move.
///
/// Every fallible operation is all-or-nothing unless documented otherwise: when
/// it returns an error, the container is exactly as it was before the call. Errors
/// are also reported through the `log` facade at `warn` level.
pub struct RawArray {
    header: ArrayHeader,
    config: ArrayConfig,
    /// Live elements occupy `data[..length * stride]`; `data.capacity()` is at
    /// least `capacity * stride`.
    data: AlignedByteVec,
}

impl RawArray {
    /// Creates an empty container for elements of `element_size` bytes with the
    /// default capacity.
    pub fn new(element_size: usize) -> Result<RawArray> {
        Self::with_config(0, element_size, ArrayConfig::default())
    }

    /// Creates an empty container with room for at least `capacity` elements.
    ///
    /// A capacity below [`ArrayConfig::DEFAULT_MIN_CAPACITY`] is rounded up to it.
    pub fn with_capacity(capacity: usize, element_size: usize) -> Result<RawArray> {
        Self::with_config(capacity, element_size, ArrayConfig::default())
    }

    /// Creates an empty container governed by `config`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `element_size` is zero or `config` is invalid.
    /// - `AllocationFailure` if the storage cannot be obtained.
    pub fn with_config(
        capacity: usize,
        element_size: usize,
        config: ArrayConfig,
    ) -> Result<RawArray> {
        Self::make(capacity, element_size, config)
            .inspect_err(|e| log::warn!("spda create: {e}"))
    }

    /// Releases the container's storage.
    ///
    /// Equivalent to dropping it; the container cannot be used afterwards.
    pub fn destroy(self) {
        log::trace!("destroying array: {}", self.header);
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.header.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.header.length == 0
    }

    /// Number of elements the container can hold before it has to grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.header.capacity
    }

    /// Width of one element in bytes.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.header.stride
    }

    #[inline]
    pub fn header(&self) -> ArrayHeader {
        self.header
    }

    #[inline]
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Byte alignment of the element storage.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.data.alignment()
    }

    /// The live elements as one contiguous byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_slice()
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }

    /// Returns the bytes of the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index < self.len() {
            Some(self.element(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index < self.len() {
            let range = self.byte_range(index);
            Some(&mut self.data.as_mut_slice()[range])
        } else {
            None
        }
    }

    #[inline]
    pub fn first(&self) -> Option<&[u8]> {
        self.get(0)
    }

    #[inline]
    pub fn last(&self) -> Option<&[u8]> {
        self.len().checked_sub(1).map(|i| self.element(i))
    }

    /// Iterates over the live elements in index order.
    pub fn iter(&self) -> ChunksExact<'_, u8> {
        self.data.as_slice().chunks_exact(self.header.stride)
    }

    pub fn iter_mut(&mut self) -> ChunksExactMut<'_, u8> {
        let stride = self.header.stride;
        self.data.as_mut_slice().chunks_exact_mut(stride)
    }

    /// Views the live elements as a slice of `T`.
    ///
    /// # Panics
    ///
    /// Panics if `size_of::<T>()` is not the element size or the storage alignment
    /// is insufficient for `T`.
    pub fn typed_data<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        assert_eq!(std::mem::size_of::<T>(), self.header.stride);
        self.data.typed_data()
    }

    /// Mutable counterpart of [`RawArray::typed_data`].
    pub fn typed_data_mut<T>(&mut self) -> &mut [T]
    where
        T: bytemuck::AnyBitPattern + bytemuck::NoUninit,
    {
        assert_eq!(std::mem::size_of::<T>(), self.header.stride);
        self.data.typed_data_mut()
    }
}

impl RawArray {
    /// Appends one element, growing the capacity by the growth factor when full.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `value` is not exactly one element wide.
    /// - `AllocationFailure` if growing fails; nothing is appended.
    pub fn append(&mut self, value: &[u8]) -> Result<()> {
        self.append_element(value)
            .inspect_err(|e| log::warn!("spda append: {e}"))
    }

    /// Appends the consecutive elements packed in `values`, in order.
    ///
    /// Behaves like one [`RawArray::append`] per element: there is no batch
    /// atomicity, so on a failure the elements before the failing one remain
    /// appended.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `values.len()` is not a multiple of the element size
    ///   (checked before anything is appended).
    /// - `AllocationFailure` from the first append that fails.
    pub fn append_many(&mut self, values: &[u8]) -> Result<()> {
        let stride = self.header.stride;
        if values.len() % stride != 0 {
            let e = Error::invalid_arg(
                "values",
                format!("{} bytes is not a multiple of the stride {stride}", values.len()),
            );
            log::warn!("spda append_many: {e}");
            return Err(e);
        }
        for value in values.chunks_exact(stride) {
            self.append(value)?;
        }
        Ok(())
    }

    /// Inserts `value` at `index`, shifting the elements at `index..` one slot right.
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfBounds` if `index > len()`.
    /// - `InvalidArgument` if `value` is not exactly one element wide.
    /// - `AllocationFailure` if growing fails.
    pub fn insert(&mut self, index: usize, value: &[u8]) -> Result<()> {
        self.insert_element(index, value)
            .inspect_err(|e| log::warn!("spda insert: {e}"))
    }

    /// Removes the element at `index`, shifting the elements after it one slot left.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.remove_element(index, None)
            .inspect_err(|e| log::warn!("spda remove: {e}"))
    }

    /// Removes the element at `index` and copies its bytes into `dest`.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfBounds` if `index >= len()`.
    /// - `InvalidArgument` if `dest` is not exactly one element wide.
    pub fn remove_into(&mut self, index: usize, dest: &mut [u8]) -> Result<()> {
        self.remove_element(index, Some(dest))
            .inspect_err(|e| log::warn!("spda remove: {e}"))
    }

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if the container is empty.
    pub fn pop(&mut self) -> Result<()> {
        self.pop_element(None)
            .inspect_err(|e| log::warn!("spda pop: {e}"))
    }

    /// Removes the last element and copies its bytes into `dest`.
    pub fn pop_into(&mut self, dest: &mut [u8]) -> Result<()> {
        self.pop_element(Some(dest))
            .inspect_err(|e| log::warn!("spda pop: {e}"))
    }

    /// Removes all elements. The capacity is kept and the bytes are not zeroed.
    pub fn clear(&mut self) {
        self.data.clear();
        self.header.length = 0;
    }

    /// Shortens the container to `new_length` elements.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `new_length > len()`: the length can only be
    /// reduced, since slots past it hold no initialized elements.
    pub fn set_length(&mut self, new_length: usize) -> Result<()> {
        if new_length > self.len() {
            let e = Error::out_of_bounds("set_length", new_length, self.len());
            log::warn!("spda set_length: {e}");
            return Err(e);
        }
        self.data.truncate(new_length * self.header.stride);
        self.header.length = new_length;
        Ok(())
    }

    /// Reverses the order of the elements in place.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the one-element scratch buffer cannot be obtained;
    /// the order is then unchanged.
    pub fn reverse(&mut self) -> Result<()> {
        self.reverse_elements()
            .inspect_err(|e| log::warn!("spda reverse: {e}"))
    }

    /// Sorts the elements with `compare`, which must define a total order.
    ///
    /// The sort is not stable. It needs a temporary index permutation of
    /// `len()` entries plus a one-element scratch buffer.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the temporary buffers cannot be obtained; the order
    /// is then unchanged.
    pub fn sort_by<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        self.sort_elements(compare)
            .inspect_err(|e| log::warn!("spda sort: {e}"))
    }

    /// Returns the index of the first element whose bytes equal `target`.
    ///
    /// Linear scan, O(`len() * element_size()`). A `target` of the wrong width
    /// never matches.
    pub fn search(&self, target: &[u8]) -> Option<usize> {
        self.iter().position(|element| element == target)
    }

    /// Binary search for `target` in a container sorted by `compare`.
    ///
    /// Returns the index of some element comparing equal to `target`. The result
    /// is unspecified if the container is not sorted by `compare`.
    pub fn search_sorted<F>(&self, target: &[u8], mut compare: F) -> Option<usize>
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match compare(self.element(mid), target) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Some(mid),
            }
        }
        None
    }

    /// Creates an independent copy with the same capacity, stride, configuration
    /// and elements.
    pub fn try_clone(&self) -> Result<RawArray> {
        let data = self
            .data
            .try_clone()
            .inspect_err(|e| log::warn!("spda copy: {e}"))?;
        Ok(RawArray {
            header: self.header,
            config: self.config,
            data,
        })
    }
}

impl RawArray {
    /// Multiplies the capacity by the growth factor.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the larger storage cannot be obtained (or its size
    /// overflows); the container keeps its current storage.
    pub fn grow(&mut self) -> Result<()> {
        self.grown_capacity()
            .and_then(|capacity| self.relocate(capacity))
            .inspect_err(|e| log::warn!("spda grow: {e}"))
    }

    /// Resizes the storage to hold exactly `capacity` elements.
    ///
    /// Both growing and reducing are allowed, as long as the live elements fit.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `capacity` is zero or less than `len()`.
    /// - `AllocationFailure` if the new storage cannot be obtained.
    pub fn grow_to(&mut self, capacity: usize) -> Result<()> {
        self.resize_capacity(capacity)
            .inspect_err(|e| log::warn!("spda grow_to: {e}"))
    }

    /// Ensures room for at least `additional` more elements, multiplying the
    /// capacity by the growth factor until they fit.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.reserve_elements(additional)
            .inspect_err(|e| log::warn!("spda reserve: {e}"))
    }

    /// Reclaims space when the utilization is below the configured shrink threshold.
    ///
    /// The capacity is reduced to `max(len(), min_capacity)`, never below the
    /// length. Returns whether the storage was reduced.
    pub fn shrink(&mut self) -> Result<bool> {
        self.shrink_elements()
            .inspect_err(|e| log::warn!("spda shrink: {e}"))
    }

    /// Reduces the capacity to the length (at least one slot), regardless of the
    /// shrink threshold.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        let target = self.len().max(1);
        if target >= self.capacity() {
            return Ok(());
        }
        self.relocate(target)
            .inspect_err(|e| log::warn!("spda shrink_to_fit: {e}"))
    }
}

impl RawArray {
    fn make(capacity: usize, element_size: usize, config: ArrayConfig) -> Result<RawArray> {
        config.validate()?;
        verify_arg!(element_size, element_size > 0);
        let capacity = capacity.max(config.min_capacity);
        let bytes = Self::payload_size(capacity, element_size)?;
        let data = AlignedByteVec::try_with_capacity_and_alignment(bytes, config.alignment)?;
        let header = ArrayHeader {
            capacity,
            length: 0,
            stride: element_size,
        };
        log::trace!("created array: {header}");
        Ok(RawArray {
            header,
            config,
            data,
        })
    }

    fn append_element(&mut self, value: &[u8]) -> Result<()> {
        self.check_element_width("value", value.len())?;
        if self.header.length == self.header.capacity {
            self.relocate(self.grown_capacity()?)?;
        }
        self.data.try_extend_from_slice(value)?;
        self.header.length += 1;
        Ok(())
    }

    fn insert_element(&mut self, index: usize, value: &[u8]) -> Result<()> {
        if index > self.len() {
            return Err(Error::out_of_bounds("insert", index, self.len()));
        }
        self.check_element_width("value", value.len())?;
        if self.header.length == self.header.capacity {
            self.relocate(self.grown_capacity()?)?;
        }
        self.data.try_insert_from_slice(index * self.header.stride, value)?;
        self.header.length += 1;
        Ok(())
    }

    fn remove_element(&mut self, index: usize, dest: Option<&mut [u8]>) -> Result<()> {
        if index >= self.len() {
            return Err(Error::out_of_bounds("remove", index, self.len()));
        }
        if let Some(dest) = dest {
            self.check_element_width("dest", dest.len())?;
            dest.copy_from_slice(self.element(index));
        }
        let range = self.byte_range(index);
        self.data.remove_range(range);
        self.header.length -= 1;
        Ok(())
    }

    fn pop_element(&mut self, dest: Option<&mut [u8]>) -> Result<()> {
        let Some(index) = self.len().checked_sub(1) else {
            return Err(Error::out_of_bounds("pop", 0, 0));
        };
        if let Some(dest) = dest {
            self.check_element_width("dest", dest.len())?;
            dest.copy_from_slice(self.element(index));
        }
        self.data.truncate(index * self.header.stride);
        self.header.length = index;
        Ok(())
    }

    fn reverse_elements(&mut self) -> Result<()> {
        let len = self.len();
        let stride = self.header.stride;
        if len < 2 {
            return Ok(());
        }
        let mut scratch = Self::scratch(stride)?;
        let bytes = self.data.as_mut_slice();
        for i in 0..len / 2 {
            let front = i * stride;
            let back = (len - 1 - i) * stride;
            scratch.copy_from_slice(&bytes[front..front + stride]);
            bytes.copy_within(back..back + stride, front);
            bytes[back..back + stride].copy_from_slice(&scratch);
        }
        Ok(())
    }

    fn sort_elements<F>(&mut self, mut compare: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        let len = self.len();
        let stride = self.header.stride;
        if len < 2 {
            return Ok(());
        }

        // `order[k]` is the current index of the element that belongs at `k`.
        let mut order = Vec::<usize>::new();
        order
            .try_reserve_exact(len)
            .map_err(|e| Error::try_reserve("sort permutation", len * size_of::<usize>(), e))?;
        order.extend(0..len);
        let mut scratch = Self::scratch(stride)?;

        let bytes = self.data.as_mut_slice();
        order.sort_unstable_by(|&a, &b| {
            compare(
                &bytes[a * stride..(a + 1) * stride],
                &bytes[b * stride..(b + 1) * stride],
            )
        });

        // Apply the permutation cycle by cycle; a slot is settled once `order[k] == k`.
        for start in 0..len {
            if order[start] == start {
                continue;
            }
            scratch.copy_from_slice(&bytes[start * stride..(start + 1) * stride]);
            let mut k = start;
            loop {
                let src = order[k];
                order[k] = k;
                if src == start {
                    bytes[k * stride..(k + 1) * stride].copy_from_slice(&scratch);
                    break;
                }
                bytes.copy_within(src * stride..(src + 1) * stride, k * stride);
                k = src;
            }
        }
        Ok(())
    }

    fn resize_capacity(&mut self, capacity: usize) -> Result<()> {
        verify_arg!(capacity, capacity >= 1 && capacity >= self.len());
        if capacity == self.capacity() {
            return Ok(());
        }
        self.relocate(capacity)
    }

    fn reserve_elements(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len()
            .checked_add(additional)
            .ok_or_else(|| Error::allocation("array payload", usize::MAX))?;
        if required <= self.capacity() {
            return Ok(());
        }
        let mut capacity = self.capacity();
        while capacity < required {
            capacity = capacity
                .checked_mul(self.config.growth_factor)
                .unwrap_or(required);
        }
        self.relocate(capacity)
    }

    fn shrink_elements(&mut self) -> Result<bool> {
        if self.header.utilization() >= self.config.shrink_threshold {
            return Ok(false);
        }
        let target = self.len().max(self.config.min_capacity);
        if target >= self.capacity() {
            return Ok(false);
        }
        self.relocate(target)?;
        Ok(true)
    }

    fn grown_capacity(&self) -> Result<usize> {
        self.capacity()
            .checked_mul(self.config.growth_factor)
            .ok_or_else(|| Error::allocation("array payload", usize::MAX))
    }

    /// Moves the elements into fresh storage for exactly `capacity` elements.
    fn relocate(&mut self, capacity: usize) -> Result<()> {
        debug_assert!(capacity >= self.len());
        let bytes = Self::payload_size(capacity, self.header.stride)?;
        self.data.try_relocate(bytes)?;
        log::debug!(
            "relocated array: capacity {} -> {capacity} (length {}, stride {})",
            self.header.capacity,
            self.header.length,
            self.header.stride
        );
        self.header.capacity = capacity;
        Ok(())
    }

    fn payload_size(capacity: usize, stride: usize) -> Result<usize> {
        capacity
            .checked_mul(stride)
            .ok_or_else(|| Error::allocation("array payload", usize::MAX))
    }

    fn scratch(stride: usize) -> Result<Vec<u8>> {
        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(stride)
            .map_err(|e| Error::try_reserve("scratch element", stride, e))?;
        scratch.resize(stride, 0);
        Ok(scratch)
    }

    fn check_element_width(&self, name: &str, width: usize) -> Result<()> {
        if width == self.header.stride {
            Ok(())
        } else {
            Err(Error::invalid_arg(
                name,
                format!(
                    "{width} bytes does not match the element size {}",
                    self.header.stride
                ),
            ))
        }
    }

    #[inline]
    fn byte_range(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.header.stride;
        start..start + self.header.stride
    }

    #[inline]
    fn element(&self, index: usize) -> &[u8] {
        &self.data.as_slice()[self.byte_range(index)]
    }
}

impl Clone for RawArray {
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated; use [`RawArray::try_clone`] to
    /// handle that case.
    fn clone(&self) -> RawArray {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(e) => panic!("failed to copy array: {e}"),
        }
    }
}

impl std::fmt::Debug for RawArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawArray")
            .field("capacity", &self.header.capacity)
            .field("length", &self.header.length)
            .field("stride", &self.header.stride)
            .field("bytes", &self.as_bytes())
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a RawArray {
    type Item = &'a [u8];
    type IntoIter = ChunksExact<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u64_array(values: &[u64]) -> RawArray {
        let mut array = RawArray::new(8).unwrap();
        for v in values {
            array.append(&v.to_ne_bytes()).unwrap();
        }
        array
    }

    fn read_u64(element: &[u8]) -> u64 {
        u64::from_ne_bytes(element.try_into().unwrap())
    }

    fn to_u64s(array: &RawArray) -> Vec<u64> {
        array.iter().map(read_u64).collect()
    }

    #[test]
    fn test_create_defaults() {
        let array = RawArray::new(8).unwrap();
        assert_eq!(array.len(), 0);
        assert!(array.is_empty());
        assert_eq!(array.capacity(), ArrayConfig::DEFAULT_MIN_CAPACITY);
        assert_eq!(array.element_size(), 8);
        assert_eq!(array.alignment(), ArrayConfig::DEFAULT_ALIGNMENT);
        assert!(array.first().is_none());
        assert!(array.last().is_none());
    }

    #[test]
    fn test_create_capacity_rounding() {
        assert_eq!(RawArray::with_capacity(0, 4).unwrap().capacity(), 8);
        assert_eq!(RawArray::with_capacity(3, 4).unwrap().capacity(), 8);
        assert_eq!(RawArray::with_capacity(100, 4).unwrap().capacity(), 100);

        let config = ArrayConfig::new().with_min_capacity(1);
        assert_eq!(RawArray::with_config(0, 4, config).unwrap().capacity(), 1);
    }

    #[test]
    fn test_create_zero_stride_rejected() {
        let err = RawArray::new(0).unwrap_err();
        assert!(err.is_invalid_arg());
    }

    #[test]
    fn test_create_invalid_config_rejected() {
        let config = ArrayConfig::new().with_growth_factor(1);
        assert!(RawArray::with_config(8, 4, config).unwrap_err().is_invalid_arg());
    }

    #[test]
    fn test_create_oversized_rejected() {
        let err = RawArray::with_capacity(usize::MAX / 2, 4).unwrap_err();
        assert!(err.is_allocation_failure());
        let err = RawArray::with_capacity(usize::MAX / 8, 4).unwrap_err();
        assert!(err.is_allocation_failure());
    }

    #[test]
    fn test_append_and_grow() {
        let mut array = RawArray::new(8).unwrap();
        for i in 0..8u64 {
            array.append(&i.to_ne_bytes()).unwrap();
        }
        assert_eq!(array.capacity(), 8);
        array.append(&8u64.to_ne_bytes()).unwrap();
        assert_eq!(array.capacity(), 16);
        assert_eq!(to_u64s(&array), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_append_wrong_width_rejected() {
        let mut array = u64_array(&[1, 2]);
        let err = array.append(&[1, 2, 3]).unwrap_err();
        assert!(err.is_invalid_arg());
        assert_eq!(to_u64s(&array), vec![1, 2]);
    }

    #[test]
    fn test_append_many() {
        let mut array = RawArray::new(4).unwrap();
        let values = [2u32, 3, 10, 18, 19, 0, 1, 7, 9, 11];
        array.append_many(bytemuck::cast_slice(&values)).unwrap();
        assert_eq!(array.len(), 10);
        assert_eq!(array.capacity(), 16);
        assert_eq!(array.typed_data::<u32>(), &values);

        let err = array.append_many(&[0u8; 6]).unwrap_err();
        assert!(err.is_invalid_arg());
        assert_eq!(array.len(), 10);

        array.append_many(&[]).unwrap();
        assert_eq!(array.len(), 10);
    }

    #[test]
    fn test_insert_positions() {
        let mut array = u64_array(&[1, 2, 3]);
        array.insert(0, &0u64.to_ne_bytes()).unwrap();
        array.insert(4, &4u64.to_ne_bytes()).unwrap();
        array.insert(2, &100u64.to_ne_bytes()).unwrap();
        assert_eq!(to_u64s(&array), vec![0, 1, 100, 2, 3, 4]);
    }

    #[test]
    fn test_insert_grows_when_full() {
        let mut array = u64_array(&[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(array.capacity(), 8);
        array.insert(3, &42u64.to_ne_bytes()).unwrap();
        assert_eq!(array.capacity(), 16);
        assert_eq!(to_u64s(&array), vec![0, 1, 2, 42, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut array = u64_array(&[1, 2, 3]);
        let before = array.as_bytes().to_vec();
        let err = array.insert(4, &9u64.to_ne_bytes()).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(array.as_bytes(), before.as_slice());
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn test_remove_and_remove_into() {
        let mut array = u64_array(&[10, 20, 30, 40]);
        array.remove(0).unwrap();
        assert_eq!(to_u64s(&array), vec![20, 30, 40]);

        let mut dest = [0u8; 8];
        array.remove_into(1, &mut dest).unwrap();
        assert_eq!(u64::from_ne_bytes(dest), 30);
        assert_eq!(to_u64s(&array), vec![20, 40]);

        array.remove(1).unwrap();
        assert_eq!(to_u64s(&array), vec![20]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut array = u64_array(&[1, 2]);
        assert!(array.remove(2).unwrap_err().is_out_of_bounds());
        let mut empty = RawArray::new(8).unwrap();
        assert!(empty.remove(0).unwrap_err().is_out_of_bounds());
        assert_eq!(to_u64s(&array), vec![1, 2]);
    }

    #[test]
    fn test_remove_into_wrong_width_keeps_element() {
        let mut array = u64_array(&[1, 2]);
        let mut dest = [0u8; 4];
        assert!(array.remove_into(0, &mut dest).unwrap_err().is_invalid_arg());
        assert_eq!(to_u64s(&array), vec![1, 2]);
    }

    #[test]
    fn test_pop() {
        let mut array = u64_array(&[1, 2, 3]);
        let mut dest = [0u8; 8];
        array.pop_into(&mut dest).unwrap();
        assert_eq!(u64::from_ne_bytes(dest), 3);
        array.pop().unwrap();
        array.pop().unwrap();
        assert!(array.is_empty());
        let err = array.pop().unwrap_err();
        assert!(err.is_out_of_bounds());
        assert!(array.pop_into(&mut dest).unwrap_err().is_out_of_bounds());
        assert_eq!(array.len(), 0);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut array = u64_array(&(0..20).collect::<Vec<_>>());
        let capacity = array.capacity();
        array.clear();
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), capacity);
        array.append(&5u64.to_ne_bytes()).unwrap();
        assert_eq!(to_u64s(&array), vec![5]);
    }

    #[test]
    fn test_set_length() {
        let mut array = u64_array(&[1, 2, 3, 4]);
        array.set_length(2).unwrap();
        assert_eq!(to_u64s(&array), vec![1, 2]);
        assert!(array.set_length(3).unwrap_err().is_out_of_bounds());
        assert_eq!(array.len(), 2);
        array.set_length(0).unwrap();
        assert!(array.is_empty());
    }

    #[test]
    fn test_reverse() {
        for n in 0..12u64 {
            let values = (0..n).collect::<Vec<_>>();
            let mut array = u64_array(&values);
            array.reverse().unwrap();
            let mut expected = values.clone();
            expected.reverse();
            assert_eq!(to_u64s(&array), expected);
        }
    }

    #[test]
    fn test_reverse_odd_stride() {
        let mut array = RawArray::new(3).unwrap();
        array.append_many(b"abcdefghi").unwrap();
        array.reverse().unwrap();
        assert_eq!(array.as_bytes(), b"ghidefabc");
    }

    #[test]
    fn test_sort_by() {
        let mut array = RawArray::new(4).unwrap();
        let values = [2i32, 3, 10, 18, 19, 0, 1, -5, 10];
        array.append_many(bytemuck::cast_slice(&values)).unwrap();
        array
            .sort_by(|a, b| {
                let a: i32 = bytemuck::pod_read_unaligned(a);
                let b: i32 = bytemuck::pod_read_unaligned(b);
                a.cmp(&b)
            })
            .unwrap();
        assert_eq!(array.typed_data::<i32>(), &[-5, 0, 1, 2, 3, 10, 10, 18, 19]);
    }

    #[test]
    fn test_sort_odd_stride_descending() {
        let mut array = RawArray::new(3).unwrap();
        array.append_many(b"bbbaaacccaaa").unwrap();
        array.sort_by(|a, b| b.cmp(a)).unwrap();
        assert_eq!(array.as_bytes(), b"cccbbbaaaaaa");
    }

    #[test]
    fn test_search() {
        let array = u64_array(&[5, 7, 9, 7]);
        assert_eq!(array.search(&7u64.to_ne_bytes()), Some(1));
        assert_eq!(array.search(&8u64.to_ne_bytes()), None);
        assert_eq!(array.search(&[7]), None);
    }

    #[test]
    fn test_search_sorted() {
        let array = u64_array(&[1, 3, 5, 7, 9, 11]);
        let cmp = |a: &[u8], b: &[u8]| read_u64(a).cmp(&read_u64(b));
        for (i, v) in [1u64, 3, 5, 7, 9, 11].iter().enumerate() {
            assert_eq!(array.search_sorted(&v.to_ne_bytes(), cmp), Some(i));
        }
        assert_eq!(array.search_sorted(&4u64.to_ne_bytes(), cmp), None);
        assert_eq!(array.search_sorted(&12u64.to_ne_bytes(), cmp), None);
        let empty = RawArray::new(8).unwrap();
        assert_eq!(empty.search_sorted(&1u64.to_ne_bytes(), cmp), None);
    }

    #[test]
    fn test_grow_and_grow_to() {
        let mut array = u64_array(&[1, 2, 3]);
        array.grow().unwrap();
        assert_eq!(array.capacity(), 16);
        array.grow_to(40).unwrap();
        assert_eq!(array.capacity(), 40);
        array.grow_to(3).unwrap();
        assert_eq!(array.capacity(), 3);
        assert_eq!(to_u64s(&array), vec![1, 2, 3]);

        assert!(array.grow_to(2).unwrap_err().is_invalid_arg());
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn test_grow_to_zero_rejected() {
        let mut array = RawArray::new(8).unwrap();
        assert!(array.grow_to(0).unwrap_err().is_invalid_arg());
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn test_failed_growth_leaves_array_intact() {
        let mut array = u64_array(&[1, 2, 3]);
        let before = array.as_bytes().to_vec();
        let err = array.grow_to(usize::MAX / 16).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(array.capacity(), 8);
        assert_eq!(array.as_bytes(), before.as_slice());

        let err = array.grow_to(usize::MAX).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(array.capacity(), 8);

        let err = array.reserve(usize::MAX).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn test_failed_append_growth_leaves_array_intact() {
        let config = ArrayConfig::new()
            .with_min_capacity(1)
            .with_growth_factor(usize::MAX);
        let mut array = RawArray::with_config(2, 8, config).unwrap();
        array.append(&1u64.to_ne_bytes()).unwrap();
        array.append(&2u64.to_ne_bytes()).unwrap();
        let err = array.append(&3u64.to_ne_bytes()).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(to_u64s(&array), vec![1, 2]);
        assert_eq!(array.capacity(), 2);

        let err = array.insert(0, &3u64.to_ne_bytes()).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(to_u64s(&array), vec![1, 2]);
    }

    #[test]
    fn test_reserve() {
        let mut array = u64_array(&[1, 2, 3]);
        array.reserve(5).unwrap();
        assert_eq!(array.capacity(), 8);
        array.reserve(6).unwrap();
        assert_eq!(array.capacity(), 16);
        array.reserve(100).unwrap();
        assert_eq!(array.capacity(), 128);
        assert_eq!(to_u64s(&array), vec![1, 2, 3]);
    }

    #[test]
    fn test_shrink_threshold() {
        let mut array = RawArray::with_capacity(64, 8).unwrap();
        for i in 0..16u64 {
            array.append(&i.to_ne_bytes()).unwrap();
        }
        // Exactly 25% used: not below the threshold.
        assert!(!array.shrink().unwrap());
        assert_eq!(array.capacity(), 64);

        array.pop().unwrap();
        assert!(array.shrink().unwrap());
        assert_eq!(array.capacity(), 15);
        assert_eq!(to_u64s(&array), (0..15).collect::<Vec<_>>());

        // Fully used now.
        assert!(!array.shrink().unwrap());
    }

    #[test]
    fn test_shrink_respects_min_capacity() {
        let mut array = RawArray::with_capacity(100, 8).unwrap();
        array.append(&1u64.to_ne_bytes()).unwrap();
        assert!(array.shrink().unwrap());
        assert_eq!(array.capacity(), ArrayConfig::DEFAULT_MIN_CAPACITY);
        // 1/8 is below the threshold but the minimum is reached.
        assert!(!array.shrink().unwrap());
        assert_eq!(array.capacity(), ArrayConfig::DEFAULT_MIN_CAPACITY);
    }

    #[test]
    fn test_shrink_disabled() {
        let config = ArrayConfig::new().with_shrink_threshold(0.0);
        let mut array = RawArray::with_config(100, 8, config).unwrap();
        assert!(!array.shrink().unwrap());
        assert_eq!(array.capacity(), 100);
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut array = RawArray::with_capacity(100, 8).unwrap();
        array.shrink_to_fit().unwrap();
        assert_eq!(array.capacity(), 1);
        let mut array = u64_array(&[1, 2, 3]);
        array.shrink_to_fit().unwrap();
        assert_eq!(array.capacity(), 3);
        assert_eq!(to_u64s(&array), vec![1, 2, 3]);
        array.append(&4u64.to_ne_bytes()).unwrap();
        assert_eq!(array.capacity(), 6);
    }

    #[test]
    fn test_try_clone_independent() {
        let mut original = u64_array(&(0..10).collect::<Vec<_>>());
        let mut copy = original.try_clone().unwrap();
        assert_eq!(copy.header(), original.header());
        assert_eq!(copy.config(), original.config());
        assert_eq!(to_u64s(&copy), to_u64s(&original));

        copy.append(&99u64.to_ne_bytes()).unwrap();
        copy.get_mut(0).unwrap().copy_from_slice(&77u64.to_ne_bytes());
        assert_eq!(original.len(), 10);
        assert_eq!(to_u64s(&original), (0..10).collect::<Vec<_>>());

        original.clear();
        assert_eq!(copy.len(), 11);
        assert_eq!(to_u64s(&copy)[0], 77);

        let cloned = copy.clone();
        assert_eq!(to_u64s(&cloned), to_u64s(&copy));
    }

    #[test]
    fn test_element_access() {
        let mut array = u64_array(&[4, 5, 6]);
        assert_eq!(array.get(1), Some(&5u64.to_ne_bytes()[..]));
        assert_eq!(array.get(3), None);
        assert_eq!(array.first(), Some(&4u64.to_ne_bytes()[..]));
        assert_eq!(array.last(), Some(&6u64.to_ne_bytes()[..]));
        for element in array.iter_mut() {
            let v = u64::from_ne_bytes((&*element).try_into().unwrap());
            element.copy_from_slice(&(v + 1).to_ne_bytes());
        }
        assert_eq!(to_u64s(&array), vec![5, 6, 7]);
        assert_eq!((&array).into_iter().count(), 3);
        assert_eq!(array.as_bytes().len(), 24);
        array.as_bytes_mut()[..8].fill(0);
        assert_eq!(to_u64s(&array), vec![0, 6, 7]);
        assert!(array.get_mut(3).is_none());
    }

    #[test]
    fn test_debug_format() {
        let array = u64_array(&[1]);
        let s = format!("{array:?}");
        assert!(s.contains("capacity: 8"));
        assert!(s.contains("length: 1"));
        assert!(s.contains("stride: 8"));
    }
}
