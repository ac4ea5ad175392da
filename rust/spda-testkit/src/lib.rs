//! Test utilities for the spda crates.
//!
//! This crate provides:
//! - Random value generation and container filling
//! - Sample plain-old-data element types
//!
//! It is intended for the workspace's tests and the `spda-cmd` demo tool.

pub mod rand;
pub mod types;

pub use rand::{fill_rand_f32, fill_rand_i32, get_rand, get_randf};
pub use types::{Color, Point3D};
