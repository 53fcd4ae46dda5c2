//! Unit conversion utilities.
//!
//! DrawingML positions and extents are expressed in English Metric Units
//! (EMU). These helpers convert common units into EMU.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_MM: i64 = 36_000;
pub const EMUS_PER_PT: i64 = 12_700;

/// Default resolution assumed for images that carry no DPI information.
pub const DEFAULT_DPI: u32 = 72;

#[inline]
pub fn inches(value: f64) -> i64 {
    (value * EMUS_PER_INCH as f64) as i64
}

#[inline]
pub fn cm(value: f64) -> i64 {
    (value * EMUS_PER_CM as f64) as i64
}

#[inline]
pub fn mm(value: f64) -> i64 {
    (value * EMUS_PER_MM as f64) as i64
}

#[inline]
pub fn pt(value: f64) -> i64 {
    (value * EMUS_PER_PT as f64) as i64
}

/// Convert a pixel count at `dpi` dots per inch to EMU.
///
/// A `dpi` of zero is treated as [`DEFAULT_DPI`].
#[inline]
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    let dpi = if dpi == 0 { DEFAULT_DPI } else { dpi };
    ((px as f64) * EMUS_PER_INCH as f64 / dpi as f64) as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}
