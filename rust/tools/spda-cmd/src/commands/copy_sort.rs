//! Copy-sort command implementation

use anyhow::Result;
use spda::{DynArray, RawArray, print};

use crate::commands::{print_array, print_metadata};

/// Width of one slot in the string array, including the terminating NUL.
const NAME_WIDTH: usize = 16;

pub fn run() -> Result<()> {
    println!("Testing copy and sorting ..");
    let mut numbers = DynArray::<i32>::new()?;
    numbers.extend_from_slice(&[2, 3, 10, 18, 19, 0, 1])?;

    print!("Original array: ");
    print_array(numbers.as_raw(), print::print_i32)?;

    let copy = numbers.try_clone()?;
    print!("Copied array: ");
    print_array(copy.as_raw(), print::print_i32)?;

    numbers.sort_by(|a, b| a.cmp(b));
    print!("Sorted array: ");
    print_array(numbers.as_raw(), print::print_i32)?;

    println!("\n\nTesting string array ..");
    let mut names = RawArray::new(NAME_WIDTH)?;
    for name in ["Apple", "Banana", "Cherry", "Dark Chocolate", "Eli Lilly"] {
        names.append(&name_slot(name)?)?;
    }
    names.pop()?;
    names.remove(1)?;
    print_metadata(&names);
    print_array(&names, print::print_str)?;
    names.destroy();
    Ok(())
}

fn name_slot(name: &str) -> Result<[u8; NAME_WIDTH]> {
    anyhow::ensure!(
        name.len() < NAME_WIDTH,
        "name {name:?} does not fit in {NAME_WIDTH} bytes"
    );
    let mut slot = [0u8; NAME_WIDTH];
    slot[..name.len()].copy_from_slice(name.as_bytes());
    Ok(slot)
}
