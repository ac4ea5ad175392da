//! Basic command implementation

use anyhow::Result;
use spda::DynArray;
use spda_testkit::{Color, Point3D};

use crate::commands::{print_array, print_metadata};

pub fn run() -> Result<()> {
    let mut points = DynArray::<Point3D>::new()?;
    let mut colors = DynArray::<Color>::new()?;
    print_metadata(points.as_raw());
    print_metadata(colors.as_raw());

    points.extend_from_slice(&[
        Point3D::new(1.0, 3.0, 4.0),
        Point3D::new(2.0, 4.0, 4.0),
        Point3D::new(8.0, 1.0, 9.0),
    ])?;
    colors.extend_from_slice(&[
        Color::new(123.0, 105.0, 97.0, 69.0),
        Color::new(12.0, 11.0, 18.0, 143.0),
        Color::new(90.0, 10.0, 98.0, 42.0),
    ])?;

    println!("\nPoints:");
    print_array(points.as_raw(), Point3D::print)?;
    println!("\nColors:");
    print_array(colors.as_raw(), Color::print)?;

    print_metadata(points.as_raw());
    print_metadata(colors.as_raw());

    points.into_raw().destroy();
    colors.into_raw().destroy();
    Ok(())
}
