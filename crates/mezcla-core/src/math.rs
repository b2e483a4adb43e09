//! Level conversion and normalized-control helpers.
//!
//! Allocation-free math used across the console's gain staging, suitable for
//! `no_std`.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`clamp01`] - Clamp a normalized control value into [0, 1]

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use mezcla_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are floored to avoid `-inf`.
///
/// # Example
/// ```rust
/// use mezcla_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Clamp a normalized control value into [0, 1].
///
/// NaN maps to 0.0 so a bad control read can never inject NaN into an audio
/// parameter.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_linear_roundtrip() {
        for db in [-20.0, -6.0, 0.0, 6.0, 20.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 0.01, "Expected {db}, got {back}");
        }
    }

    #[test]
    fn linear_to_db_floors_at_zero() {
        assert!(linear_to_db(0.0).is_finite());
        assert!(linear_to_db(-1.0).is_finite());
    }

    #[test]
    fn clamp01_in_range_passthrough() {
        assert_eq!(clamp01(0.0), 0.0);
        assert_eq!(clamp01(0.5), 0.5);
        assert_eq!(clamp01(1.0), 1.0);
    }

    #[test]
    fn clamp01_out_of_range() {
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(7.5), 1.0);
        assert_eq!(clamp01(f32::INFINITY), 1.0);
        assert_eq!(clamp01(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn clamp01_nan_is_zero() {
        assert_eq!(clamp01(f32::NAN), 0.0);
    }
}
