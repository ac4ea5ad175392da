//! Random command implementation

use anyhow::Result;
use spda::{DynArray, print};

use crate::commands::{print_array, print_metadata};

pub fn run(count: usize, min: i32, max: i32, float: bool, sort: bool) -> Result<()> {
    anyhow::ensure!(min <= max, "--min ({min}) must not exceed --max ({max})");
    log::debug!("generating {count} random values in [{min}, {max}]");

    if float {
        let mut values = DynArray::<f32>::with_capacity(count)?;
        spda_testkit::fill_rand_f32(&mut values, count, min as f32, max as f32)?;
        if sort {
            values.sort_by(|a, b| a.total_cmp(b));
        }
        print_array(values.as_raw(), print::print_f32)?;
        print_metadata(values.as_raw());
    } else {
        let mut values = DynArray::<i32>::with_capacity(count)?;
        spda_testkit::fill_rand_i32(&mut values, count, min, max)?;
        if sort {
            values.sort_by(|a, b| a.cmp(b));
        }
        print_array(values.as_raw(), print::print_i32)?;
        print_metadata(values.as_raw());
    }
    Ok(())
}
