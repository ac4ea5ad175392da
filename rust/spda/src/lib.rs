//! A generic dynamic array built on an explicit element size ("stride").
//!
//! [`RawArray`] stores elements as opaque, fixed-width byte strings, so a single
//! container implementation serves any element type without per-type code.
//! [`DynArray`] layers a typed API over it for plain-old-data types.
//!
//! The container keeps an [`ArrayHeader`] (capacity, length, stride) alongside an
//! aligned element buffer. Appending to a full container multiplies its capacity
//! by the configured growth factor; [`RawArray::shrink`] gives memory back once the
//! utilization falls below the configured threshold. All allocations are
//! fallible: an allocation failure is returned as an error and leaves the
//! container untouched.
//!
//! ```
//! use spda::RawArray;
//!
//! let mut array = RawArray::new(8)?;
//! for i in 0..10u64 {
//!     array.append(&i.to_ne_bytes())?;
//! }
//! assert_eq!(array.len(), 10);
//! assert_eq!(array.capacity(), 16);
//!
//! array.insert(5, &100u64.to_ne_bytes())?;
//! let mut removed = [0u8; 8];
//! array.remove_into(5, &mut removed)?;
//! assert_eq!(u64::from_ne_bytes(removed), 100);
//! # Ok::<(), spda::Error>(())
//! ```

pub mod config;
pub mod header;
pub mod print;
pub mod raw;
pub mod typed;


pub use config::ArrayConfig;
pub use header::ArrayHeader;
pub use raw::RawArray;
pub use spda_common::{Error, ErrorKind, Result};
pub use typed::DynArray;
