/// Checks whether the pointer is aligned to the specified alignment.
///
/// # Examples
///
/// ```
/// use spda_bytes::align::is_aligned_ptr;
///
/// let x = 0u64;
/// assert!(is_aligned_ptr(&x as *const u64 as *const u8, 8));
/// ```
#[inline]
pub fn is_aligned_ptr(ptr: *const u8, alignment: usize) -> bool {
    alignment.is_power_of_two() && ((ptr as usize) & (alignment - 1)) == 0
}

/// Number of bytes between `ptr` and the next address aligned to `alignment`.
#[inline]
pub fn padding_for(ptr: *const u8, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    let p = ptr as usize;
    (alignment - (p & (alignment - 1))) & (alignment - 1)
}
