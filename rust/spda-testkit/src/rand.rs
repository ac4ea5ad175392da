//! Random value generation for filling containers with test data.
//!
//! The plain functions draw from the thread-local `fastrand` generator. The
//! `*_with` variants take an explicit [`fastrand::Rng`] so a test can reproduce
//! its data from a seed.

use spda::{DynArray, Result};

/// Returns a random integer in the inclusive range `min..=max`.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn get_rand(min: i32, max: i32) -> i32 {
    fastrand::i32(min..=max)
}

/// Returns a random float in the half-open range `min..max`.
///
/// Returns `min` when `min == max`.
pub fn get_randf(min: f32, max: f32) -> f32 {
    scale_unit(fastrand::f32(), min, max)
}

pub fn get_rand_with(rng: &mut fastrand::Rng, min: i32, max: i32) -> i32 {
    rng.i32(min..=max)
}

pub fn get_randf_with(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    scale_unit(rng.f32(), min, max)
}

/// Maps `unit` from `0..1` onto `min..max`. Rounding can land exactly on `max`,
/// which is pulled back to the largest float below it.
fn scale_unit(unit: f32, min: f32, max: f32) -> f32 {
    let value = min + unit * (max - min);
    if value < max || min >= max {
        value
    } else {
        max.next_down()
    }
}

/// Appends `count` random integers from `min..=max` to `array`.
///
/// Values are appended one at a time; on an error the values appended before
/// it remain.
pub fn fill_rand_i32(array: &mut DynArray<i32>, count: usize, min: i32, max: i32) -> Result<()> {
    fill_rand_i32_with(&mut fastrand::Rng::new(), array, count, min, max)
}

/// Appends `count` random floats from `min..max` to `array`.
pub fn fill_rand_f32(array: &mut DynArray<f32>, count: usize, min: f32, max: f32) -> Result<()> {
    fill_rand_f32_with(&mut fastrand::Rng::new(), array, count, min, max)
}

pub fn fill_rand_i32_with(
    rng: &mut fastrand::Rng,
    array: &mut DynArray<i32>,
    count: usize,
    min: i32,
    max: i32,
) -> Result<()> {
    for _ in 0..count {
        array.push(get_rand_with(rng, min, max))?;
    }
    Ok(())
}

pub fn fill_rand_f32_with(
    rng: &mut fastrand::Rng,
    array: &mut DynArray<f32>,
    count: usize,
    min: f32,
    max: f32,
) -> Result<()> {
    for _ in 0..count {
        array.push(get_randf_with(rng, min, max))?;
    }
    Ok(())
}
