//! Typed view over [`RawArray`]: the stride and alignment come from `T`.

use std::cmp::Ordering;
use std::marker::PhantomData;

use bytemuck::Pod;
use spda_common::{Error, Result};

use crate::{config::ArrayConfig, header::ArrayHeader, raw::RawArray};

/// A dynamic array of plain-old-data values.
///
/// Thin wrapper that forwards every operation to a [`RawArray`] whose element
/// size is `size_of::<T>()` and whose storage is aligned for `T`, so the live
/// elements can be viewed as a `&[T]` at any time.
pub struct DynArray<T> {
    raw: RawArray,
    _marker: PhantomData<T>,
}

impl<T: Pod> DynArray<T> {
    /// Creates an empty array with the default capacity.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `T` is zero-sized.
    pub fn new() -> Result<DynArray<T>> {
        Self::with_config(0, ArrayConfig::default())
    }

    /// Creates an empty array with room for at least `capacity` values.
    pub fn with_capacity(capacity: usize) -> Result<DynArray<T>> {
        Self::with_config(capacity, ArrayConfig::default())
    }

    /// Creates an empty array governed by `config`. The configured alignment is
    /// raised to `align_of::<T>()` when smaller.
    pub fn with_config(capacity: usize, config: ArrayConfig) -> Result<DynArray<T>> {
        let config = config.with_alignment(config.alignment.max(align_of::<T>()));
        let raw = RawArray::with_config(capacity, size_of::<T>(), config)?;
        Ok(DynArray {
            raw,
            _marker: PhantomData,
        })
    }

    /// Creates an array holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Result<DynArray<T>> {
        let mut array = Self::with_capacity(values.len())?;
        array.extend_from_slice(values)?;
        Ok(array)
    }

    /// Wraps a type-erased array whose element size and alignment fit `T`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the element size differs from `size_of::<T>()` or the
    /// storage is not aligned for `T`. The array is dropped in that case.
    pub fn try_from_raw(raw: RawArray) -> Result<DynArray<T>> {
        if raw.element_size() != size_of::<T>() {
            return Err(Error::invalid_arg(
                "raw",
                format!(
                    "element size {} does not match type size {}",
                    raw.element_size(),
                    size_of::<T>()
                ),
            ));
        }
        if raw.alignment() < align_of::<T>() {
            return Err(Error::invalid_arg(
                "raw",
                format!(
                    "alignment {} is insufficient for type alignment {}",
                    raw.alignment(),
                    align_of::<T>()
                ),
            ));
        }
        Ok(DynArray {
            raw,
            _marker: PhantomData,
        })
    }

    pub fn into_raw(self) -> RawArray {
        self.raw
    }

    pub fn as_raw(&self) -> &RawArray {
        &self.raw
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    #[inline]
    pub fn header(&self) -> ArrayHeader {
        self.raw.header()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.raw.typed_data()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.raw.typed_data_mut()
    }

    pub fn push(&mut self, value: T) -> Result<()> {
        self.raw.append(bytemuck::bytes_of(&value))
    }

    /// Appends `values` in order; see [`RawArray::append_many`] for the failure
    /// semantics.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()> {
        self.raw.append_many(bytemuck::cast_slice(values))
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.raw.insert(index, bytemuck::bytes_of(&value))
    }

    /// Removes and returns the value at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let mut value = T::zeroed();
        self.raw.remove_into(index, bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    /// Removes and returns the last value.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if the array is empty.
    pub fn pop(&mut self) -> Result<T> {
        let mut value = T::zeroed();
        self.raw.pop_into(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn truncate(&mut self, len: usize) -> Result<()> {
        self.raw.set_length(len)
    }

    pub fn reverse(&mut self) -> Result<()> {
        self.raw.reverse()
    }

    /// Sorts the values with `compare` (not stable).
    ///
    /// Works directly on the typed slice, so no temporary buffers are needed.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(compare);
    }

    /// Index of the first value whose bytes equal those of `target`.
    pub fn search(&self, target: &T) -> Option<usize> {
        self.raw.search(bytemuck::bytes_of(target))
    }

    /// Binary search in an array sorted by `compare`.
    pub fn search_sorted<F>(&self, target: &T, mut compare: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_slice()
            .binary_search_by(|probe| compare(probe, target))
            .ok()
    }

    pub fn grow(&mut self) -> Result<()> {
        self.raw.grow()
    }

    pub fn grow_to(&mut self, capacity: usize) -> Result<()> {
        self.raw.grow_to(capacity)
    }

    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.raw.reserve(additional)
    }

    pub fn shrink(&mut self) -> Result<bool> {
        self.raw.shrink()
    }

    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.raw.shrink_to_fit()
    }

    pub fn try_clone(&self) -> Result<DynArray<T>> {
        Ok(DynArray {
            raw: self.raw.try_clone()?,
            _marker: PhantomData,
        })
    }
}

impl<T: Pod> std::ops::Deref for DynArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Pod> std::ops::DerefMut for DynArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Pod> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        DynArray {
            raw: self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Pod + std::fmt::Debug> std::fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynArray")
            .field("values", &self.as_slice())
            .field("len", &self.len())
            .field("cap", &self.capacity())
            .finish()
    }
}

impl<'a, T: Pod> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
