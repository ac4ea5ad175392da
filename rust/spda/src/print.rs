//! Rendering of container contents through per-element printer callbacks.
//!
//! A printer receives the raw bytes of one element and writes a human-readable
//! form of it. The default printers decode their element with
//! [`bytemuck::try_pod_read_unaligned`] and fail with [`fmt::Error`] when the
//! element width does not match their type.

use std::fmt;

use crate::raw::RawArray;

/// Signature shared by the default printers.
pub type ElementPrinter = fn(&[u8], &mut dyn fmt::Write) -> fmt::Result;

impl RawArray {
    /// Writes every live element through `printer`, in index order, followed by a
    /// trailing newline.
    pub fn write_elements<F>(&self, out: &mut dyn fmt::Write, mut printer: F) -> fmt::Result
    where
        F: FnMut(&[u8], &mut dyn fmt::Write) -> fmt::Result,
    {
        for element in self.iter() {
            printer(element, out)?;
        }
        out.write_char('\n')
    }

    /// Returns a [`fmt::Display`] adapter that renders the elements with `printer`.
    pub fn display_elements<F>(&self, printer: F) -> DisplayElements<'_, F>
    where
        F: Fn(&[u8], &mut dyn fmt::Write) -> fmt::Result,
    {
        DisplayElements {
            array: self,
            printer,
        }
    }
}

/// See [`RawArray::display_elements`].
pub struct DisplayElements<'a, F> {
    array: &'a RawArray,
    printer: F,
}

impl<F> fmt::Display for DisplayElements<'_, F>
where
    F: Fn(&[u8], &mut dyn fmt::Write) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.array.write_elements(f, &self.printer)
    }
}

fn read<T: bytemuck::AnyBitPattern>(element: &[u8]) -> Result<T, fmt::Error> {
    bytemuck::try_pod_read_unaligned(element).map_err(|_| fmt::Error)
}

pub fn print_i32(element: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
    write!(out, "{} ", read::<i32>(element)?)
}

pub fn print_f32(element: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
    write!(out, "{:.6} ", read::<f32>(element)?)
}

pub fn print_f64(element: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
    write!(out, "{:.6} ", read::<f64>(element)?)
}

/// Prints a one-byte element as an ASCII character.
pub fn print_char(element: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
    write!(out, "{} ", char::from(read::<u8>(element)?))
}

/// Prints a fixed-width, NUL-padded byte string on its own line.
///
/// Bytes after the first NUL are ignored; invalid UTF-8 is replaced.
pub fn print_str(element: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
    let end = element.iter().position(|&b| b == 0).unwrap_or(element.len());
    writeln!(out, "{}", String::from_utf8_lossy(&element[..end]))
}
