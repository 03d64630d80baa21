//! Quantization codec for the power-of-two region grid.
//!
//! Every grid coordinate is a multiple of a step `2^(-precision)`:
//!
//! | precision | step      | cell size (latitude) |
//! |-----------|-----------|----------------------|
//! | -2        | 4°        | ~445 km              |
//! | 0         | 1°        | ~111 km              |
//! | 4         | 1/16°     | ~6.9 km              |
//! | 8         | 1/256°    | ~430 m               |
//!
//! A value belongs to the cell whose half-open interval `[low, low + step)`
//! contains it. Because the step is an exact power of two, dividing by it and
//! multiplying back are exact in `f64`, so `round` is a true floor onto the
//! grid for negative and positive values alike.
//!
//! The schema-v1 integer prefix codec lives in [`legacy`].
//!
//! # Example
//!
//! ```
//! use exposure_grid::precision;
//!
//! assert_eq!(precision::step(4), 0.0625);
//! assert_eq!(precision::round(40.7306, 4), 40.6875);
//! assert_eq!(precision::round(-73.9352, 4), -73.9375);
//! assert_eq!(precision::range(-73.9352, 4), (-73.9375, -73.875));
//! ```

pub mod legacy;

/// Precision at which reports are stored unless configured otherwise.
pub const DEFAULT_STORAGE_PRECISION: i32 = 4;

/// Lowest precision accepted at the application boundary.
pub const MIN_PRECISION: i32 = 0;

/// Highest precision accepted at the application boundary.
pub const MAX_PRECISION: i32 = 8;

/// Returns the grid step for a precision.
///
/// `2^(-precision)`: finer than one degree for positive precisions, coarser
/// for negative ones. The result is an exact power of two while `|precision|`
/// stays within the `f64` exponent range (about 1022); beyond that it
/// underflows to `0` or overflows to infinity.
#[inline]
pub fn step(precision: i32) -> f64 {
    0.5_f64.powi(precision)
}

/// Returns the grid-aligned coordinate of the cell containing `value`.
///
/// Floors toward negative infinity, so `-37.3` at precision 0 lands on `-38`
/// rather than `-37`. Exact boundary values map to themselves.
///
/// Containment of `value` in `range` only holds while the step is coarser
/// than the `f64` resolution of `value`, which fails from about precision 52
/// for mid-latitude values. Application precisions are bounded by
/// [`MIN_PRECISION`] and [`MAX_PRECISION`].
#[inline]
pub fn round(value: f64, precision: i32) -> f64 {
    let step = step(precision);
    // Adding 0.0 turns a -0.0 result into 0.0 so that identifiers never read "-0".
    (value / step).floor() * step + 0.0
}

/// Returns the half-open interval `(low, low + step)` containing `value`.
#[inline]
pub fn range(value: f64, precision: i32) -> (f64, f64) {
    let low = round(value, precision);
    (low, low + step(precision))
}

/// Returns the index of the cell containing `value`, counted in steps from zero.
///
/// Used for drift-free enumeration: `cell_index(v, p) as f64 * step(p)`
/// reproduces `round(v, p)` exactly.
#[inline]
pub(crate) fn cell_index(value: f64, precision: i32) -> i64 {
    (value / step(precision)).floor() as i64
}

#[cfg(test)]
mod tests;
