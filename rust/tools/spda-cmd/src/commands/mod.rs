//! Command implementations for spda-cmd

use anyhow::{Context, Result};
use spda::RawArray;
use spda::print::ElementPrinter;

pub mod basic;
pub mod copy_sort;
pub mod random;

/// Prints the elements of `array` to stdout, one `printer` call per element.
pub fn print_array(array: &RawArray, printer: ElementPrinter) -> Result<()> {
    let mut out = String::new();
    array
        .write_elements(&mut out, printer)
        .context("Failed to format array elements")?;
    print!("{out}");
    Ok(())
}

pub fn print_metadata(array: &RawArray) {
    println!("{}", array.header());
}
