//! Core definitions (error type, result alias and argument checks) shared by all spda-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
