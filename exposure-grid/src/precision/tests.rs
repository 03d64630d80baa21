//! Tests for the quantization codec

use super::*;

#[test]
fn test_step_is_power_of_two() {
    assert_eq!(step(0), 1.0);
    assert_eq!(step(1), 0.5);
    assert_eq!(step(4), 0.0625);
    assert_eq!(step(8), 0.00390625);
    assert_eq!(step(-1), 2.0);
    assert_eq!(step(-3), 8.0);
}

#[test]
fn test_round_zero_at_every_precision() {
    for precision in 0..=8 {
        assert_eq!(round(0.0, precision), 0.0, "precision {}", precision);
    }
}

#[test]
fn test_round_never_returns_negative_zero() {
    let rounded = round(-0.0, 4);
    assert_eq!(rounded, 0.0);
    assert!(rounded.is_sign_positive());
}

#[test]
fn test_round_floors_positive_values() {
    assert_eq!(round(40.7306, 0), 40.0);
    assert_eq!(round(40.7306, 4), 40.6875);
    assert_eq!(round(179.999, 0), 179.0);
}

#[test]
fn test_round_floors_negative_values() {
    // Truncation would give -73; floor gives the enclosing cell.
    assert_eq!(round(-73.9352, 0), -74.0);
    assert_eq!(round(-73.9352, 4), -73.9375);
    assert_eq!(round(-0.001, 8), -0.00390625);
}

#[test]
fn test_round_exact_boundaries_map_to_themselves() {
    assert_eq!(round(-74.0, 0), -74.0);
    assert_eq!(round(40.75, 4), 40.75);
    assert_eq!(round(-180.0, 8), -180.0);
    assert_eq!(round(90.0, 3), 90.0);
}

#[test]
fn test_round_coarse_precision() {
    assert_eq!(round(37.0, -3), 32.0);
    assert_eq!(round(-37.0, -3), -40.0);
}

#[test]
fn test_round_is_idempotent() {
    let values = [-179.99, -90.0, -45.3, -0.2, 0.0, 0.2, 12.34567, 89.999, 179.999];
    for precision in -4..=12 {
        for value in values {
            let once = round(value, precision);
            assert_eq!(
                round(once, precision),
                once,
                "value {} precision {}",
                value,
                precision
            );
        }
    }
}

#[test]
fn test_round_is_monotonic() {
    for precision in [0, 2, 4, 8] {
        let mut previous = f64::NEG_INFINITY;
        let mut value = -180.0;
        while value <= 180.0 {
            let rounded = round(value, precision);
            assert!(rounded >= previous, "value {} precision {}", value, precision);
            previous = rounded;
            value += 0.013;
        }
    }
}

#[test]
fn test_range_contains_value() {
    let values = [-179.999, -73.9352, -1e-9, 0.0, 1e-9, 40.7306, 179.999];
    for precision in -2..=10 {
        for value in values {
            let (low, high) = range(value, precision);
            assert!(low <= value, "low {} > value {}", low, value);
            assert!(value < high, "value {} >= high {}", value, high);
            assert_eq!(high - low, step(precision));
        }
    }
}

#[test]
fn test_range_integer_values() {
    assert_eq!(range(7.0, 0), (7.0, 8.0));
    assert_eq!(range(-7.0, 0), (-7.0, -6.0));
    assert_eq!(range(-7.5, 0), (-8.0, -7.0));
}

#[test]
fn test_cell_index_matches_round() {
    for precision in [0, 4, 8] {
        for value in [-73.9352, 40.7306, -0.5, 0.5] {
            let index = cell_index(value, precision);
            assert_eq!(index as f64 * step(precision), round(value, precision));
        }
    }
}

#[test]
fn test_step_outside_exponent_range() {
    assert_eq!(step(1100), 0.0);
    assert!(step(-1100).is_infinite());
    assert_eq!(step(1022), f64::MIN_POSITIVE);
}

#[test]
fn test_range_contains_value_at_application_bounds() {
    for value in [-179.999_999, -37.3, 0.0, 40.730_6, 89.999_999] {
        for precision in [MIN_PRECISION, MAX_PRECISION] {
            let (low, high) = range(value, precision);
            assert!(low <= value && value < high, "{} at {}", value, precision);
        }
    }
}
