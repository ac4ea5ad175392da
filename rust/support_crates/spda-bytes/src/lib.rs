//! Byte storage for the spda containers: a growable byte vector with a
//! guaranteed start alignment whose every allocation is fallible.

pub mod align;
pub mod buffer;

pub use buffer::AlignedByteVec;
