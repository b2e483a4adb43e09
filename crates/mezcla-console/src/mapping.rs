//! Normalized-control-to-parameter mapping.
//!
//! Every console control is a normalized scalar in [0, 1]; these functions
//! map it to the physical unit its target node consumes. All functions are
//! pure, total over [0, 1] (inputs outside are clamped first, NaN maps to
//! the lower bound), monotonically non-decreasing, and can never produce a
//! NaN or infinite output.
//!
//! The numeric curves are the console's gain-staging contract; tests target
//! them directly rather than inferring intent from inline arithmetic.

use mezcla_core::clamp01;

/// Trim gain: [0, 1] → [0, 4] linear gain.
///
/// Allows boost to 4x above unity at the top of the control.
#[inline]
pub fn trim_gain(value: f32) -> f32 {
    clamp01(value) * 4.0
}

/// Fader gain: [0, 1] → [0, 2] linear gain.
#[inline]
pub fn fader_gain(value: f32) -> f32 {
    clamp01(value) * 2.0
}

/// Pan position: [0, 1] → [-1, 1] (full left to full right).
#[inline]
pub fn pan_position(value: f32) -> f32 {
    clamp01(value) * 2.0 - 1.0
}

/// Shelving EQ gain: [0, 1] → [-20, +20] dB.
#[inline]
pub fn shelf_gain_db(value: f32) -> f32 {
    clamp01(value) * 40.0 - 20.0
}

/// Master bus gain: [0, 1] → [0, 2] linear gain.
#[inline]
pub fn master_gain(value: f32) -> f32 {
    clamp01(value) * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_gain_endpoints() {
        assert_eq!(trim_gain(0.0), 0.0);
        assert_eq!(trim_gain(1.0), 4.0);
        assert_eq!(trim_gain(0.25), 1.0); // unity at a quarter turn
    }

    #[test]
    fn fader_gain_endpoints() {
        assert_eq!(fader_gain(0.0), 0.0);
        assert_eq!(fader_gain(0.5), 1.0);
        assert_eq!(fader_gain(1.0), 2.0);
    }

    #[test]
    fn pan_position_bipolar() {
        assert_eq!(pan_position(0.0), -1.0);
        assert_eq!(pan_position(0.5), 0.0);
        assert_eq!(pan_position(1.0), 1.0);
    }

    #[test]
    fn shelf_gain_bipolar() {
        assert_eq!(shelf_gain_db(0.0), -20.0);
        assert_eq!(shelf_gain_db(0.5), 0.0);
        assert_eq!(shelf_gain_db(1.0), 20.0);
    }

    #[test]
    fn master_gain_endpoints() {
        assert_eq!(master_gain(0.0), 0.0);
        assert_eq!(master_gain(0.25), 0.5); // the power-on default position
        assert_eq!(master_gain(1.0), 2.0);
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(trim_gain(-1.0), 0.0);
        assert_eq!(trim_gain(2.0), 4.0);
        assert_eq!(pan_position(-0.5), -1.0);
        assert_eq!(shelf_gain_db(1.5), 20.0);
        assert_eq!(master_gain(f32::INFINITY), 2.0);
    }

    #[test]
    fn nan_maps_to_lower_bound() {
        assert_eq!(trim_gain(f32::NAN), 0.0);
        assert_eq!(fader_gain(f32::NAN), 0.0);
        assert_eq!(pan_position(f32::NAN), -1.0);
        assert_eq!(shelf_gain_db(f32::NAN), -20.0);
        assert_eq!(master_gain(f32::NAN), 0.0);
    }
}
