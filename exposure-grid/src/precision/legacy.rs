//! Schema-v1 integer prefix codec.
//!
//! The first storage schema quantized coordinates to whole degrees and then
//! masked off low bits of the magnitude. Precision runs from 0 (256° cells)
//! to 8 (1° cells), and the grid is mirrored about zero: `-37` and `37`
//! round to `-32` and `32` at precision 3.
//!
//! Records written under this schema are still addressed with these prefixes,
//! so the arithmetic must stay bit-for-bit compatible.

/// Finest legacy precision (1° cells).
pub const MAX_LEGACY_PRECISION: i32 = 8;

/// Returns the legacy cell size in whole degrees: `2^(8 - precision)`.
///
/// Precision is clamped to `[0, 8]`.
#[inline]
pub fn step(precision: i32) -> i32 {
    1 << (MAX_LEGACY_PRECISION - precision.clamp(0, MAX_LEGACY_PRECISION))
}

/// Returns the legacy prefix for `value`.
///
/// Truncates toward zero, clears the low `8 - precision` bits of the
/// magnitude and reapplies the sign.
#[inline]
pub fn round(value: f64, precision: i32) -> i32 {
    let magnitude = value.abs() as i32;
    let rounded = magnitude & !(step(precision) - 1);
    if value < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// Returns the legacy interval for `value`.
///
/// Non-negative values occupy `(low, low + step)`; negative values occupy the
/// mirrored interval `(low - step, low)`.
#[inline]
pub fn range(value: f64, precision: i32) -> (i32, i32) {
    let low = round(value, precision);
    let step = step(precision);
    if value < 0.0 {
        (low - step, low)
    } else {
        (low, low + step)
    }
}
