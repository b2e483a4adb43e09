//! Stereo pan/balance stage.
//!
//! Two pan laws, chosen once at construction to match the channel's program
//! material:
//!
//! - [`PanLaw::EqualPower`] - for mono material: the (duplicated) mono sample
//!   is placed in the field with cos/sin gains, so perceived loudness stays
//!   constant across the sweep.
//! - [`PanLaw::Balance`] - for pre-mixed stereo material: panning away from
//!   center folds the far channel into the near one and attenuates it,
//!   acting as a balance control rather than a re-pan.
//!
//! The pan position is a bipolar value in [-1, 1] (full left to full right)
//! and is smoothed like every other console control.

use core::f32::consts::FRAC_PI_2;
use libm::{cosf, sinf};

use crate::frame::{Frame, mono_sum};
use crate::node::AudioNode;
use crate::param::SmoothedParam;

/// How the panner treats its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanLaw {
    /// Equal-power placement of mono material.
    EqualPower,
    /// Balance control over pre-mixed stereo material.
    Balance,
}

/// Pan/balance stage with a smoothed bipolar position.
#[derive(Debug, Clone)]
pub struct StereoPanner {
    law: PanLaw,
    pan: SmoothedParam,
}

impl StereoPanner {
    /// Create a panner resting at center.
    pub fn new(law: PanLaw, sample_rate: f32) -> Self {
        Self {
            law,
            pan: SmoothedParam::standard(0.0, sample_rate),
        }
    }

    /// Set the pan position target in [-1, 1]; values outside are clamped.
    pub fn set_pan(&mut self, pan: f32) {
        self.pan.set_target(pan.clamp(-1.0, 1.0));
    }

    /// The pan position the control surface last asked for.
    pub fn pan_target(&self) -> f32 {
        self.pan.target()
    }

    /// The pan law this panner was built with.
    pub fn law(&self) -> PanLaw {
        self.law
    }
}

impl AudioNode for StereoPanner {
    #[inline]
    fn process(&mut self, input: Frame) -> Frame {
        let pan = self.pan.advance().clamp(-1.0, 1.0);
        match self.law {
            PanLaw::EqualPower => {
                // x in [0, 1]: 0 = full left, 1 = full right
                let x = (pan + 1.0) * 0.5;
                let sample = mono_sum(input);
                [
                    sample * cosf(x * FRAC_PI_2),
                    sample * sinf(x * FRAC_PI_2),
                ]
            }
            PanLaw::Balance => {
                let x = if pan <= 0.0 { pan + 1.0 } else { pan };
                let gain_l = cosf(x * FRAC_PI_2);
                let gain_r = sinf(x * FRAC_PI_2);
                if pan <= 0.0 {
                    [input[0] + input[1] * gain_l, input[1] * gain_r]
                } else {
                    [input[0] * gain_l, input[1] + input[0] * gain_r]
                }
            }
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.pan.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.pan.snap_to_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(panner: &mut StereoPanner, input: Frame) -> Frame {
        // Run past the smoothing window so the position is settled
        let mut out = [0.0, 0.0];
        for _ in 0..4800 {
            out = panner.process(input);
        }
        out
    }

    #[test]
    fn equal_power_center() {
        let mut panner = StereoPanner::new(PanLaw::EqualPower, 48000.0);
        let out = settled(&mut panner, [1.0, 1.0]);
        // cos(pi/4) == sin(pi/4) == 1/sqrt(2)
        let expected = core::f32::consts::FRAC_1_SQRT_2;
        assert!((out[0] - expected).abs() < 1e-3, "Left: {}", out[0]);
        assert!((out[1] - expected).abs() < 1e-3, "Right: {}", out[1]);
    }

    #[test]
    fn equal_power_hard_left() {
        let mut panner = StereoPanner::new(PanLaw::EqualPower, 48000.0);
        panner.set_pan(-1.0);
        let out = settled(&mut panner, [1.0, 1.0]);
        assert!((out[0] - 1.0).abs() < 1e-3, "Left: {}", out[0]);
        assert!(out[1].abs() < 1e-3, "Right should be silent: {}", out[1]);
    }

    #[test]
    fn equal_power_hard_right() {
        let mut panner = StereoPanner::new(PanLaw::EqualPower, 48000.0);
        panner.set_pan(1.0);
        let out = settled(&mut panner, [1.0, 1.0]);
        assert!(out[0].abs() < 1e-3, "Left should be silent: {}", out[0]);
        assert!((out[1] - 1.0).abs() < 1e-3, "Right: {}", out[1]);
    }

    #[test]
    fn balance_center_is_passthrough() {
        let mut panner = StereoPanner::new(PanLaw::Balance, 48000.0);
        let out = settled(&mut panner, [0.3, -0.7]);
        assert!((out[0] - 0.3).abs() < 1e-3, "Left: {}", out[0]);
        assert!((out[1] + 0.7).abs() < 1e-3, "Right: {}", out[1]);
    }

    #[test]
    fn balance_hard_left_folds_right_channel() {
        let mut panner = StereoPanner::new(PanLaw::Balance, 48000.0);
        panner.set_pan(-1.0);
        let out = settled(&mut panner, [0.25, 0.5]);
        assert!((out[0] - 0.75).abs() < 1e-3, "Left: {}", out[0]);
        assert!(out[1].abs() < 1e-3, "Right should be silent: {}", out[1]);
    }

    #[test]
    fn pan_target_is_clamped() {
        let mut panner = StereoPanner::new(PanLaw::EqualPower, 48000.0);
        panner.set_pan(5.0);
        assert_eq!(panner.pan_target(), 1.0);
        panner.set_pan(-5.0);
        assert_eq!(panner.pan_target(), -1.0);
    }
}
