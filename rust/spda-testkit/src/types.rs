//! Sample multi-field element types.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Point3D {
        Point3D { x, y, z }
    }

    /// Element printer for a container of `Point3D`.
    pub fn print(element: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
        let p: Point3D = bytemuck::try_pod_read_unaligned(element).map_err(|_| fmt::Error)?;
        writeln!(out, "{p}")
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point3D({:.0}, {:.0}, {:.0})", self.x, self.y, self.z)
    }
}

/// RGBA color with one `f64` per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    pub fn print(element: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
        let c: Color = bytemuck::try_pod_read_unaligned(element).map_err(|_| fmt::Error)?;
        writeln!(out, "{c}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color({:.0}, {:.0}, {:.0}, {:.0})",
            self.r, self.g, self.b, self.a
        )
    }
}
