//! Aperture range and rounding helpers shared by the estimator and arbiter.

use std::ops::RangeInclusive;

/// Fully closed.
pub const APERTURE_MIN: f64 = 0.0;

/// Fully open.
pub const APERTURE_MAX: f64 = 100.0;

/// Valid range of an aperture position, in percent open.
pub const APERTURE_RANGE: RangeInclusive<f64> = APERTURE_MIN..=APERTURE_MAX;

/// Round to two decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether `position` can be applied to the actuator.
///
/// NaN is never in range.
pub fn in_range(position: f64) -> bool {
    APERTURE_RANGE.contains(&position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-4.004), -4.0);
        assert_eq!(round2(50.0), 50.0);
    }

    #[test]
    fn in_range_is_inclusive_and_rejects_nan() {
        assert!(in_range(0.0));
        assert!(in_range(100.0));
        assert!(!in_range(100.01));
        assert!(!in_range(-0.01));
        assert!(!in_range(f64::NAN));
    }
}
