//! Smoothed linear gain stage.
//!
//! The console's trim, fader, and master stages are all [`GainNode`]s: a
//! single smoothed multiplier applied to both channels. Trim and fader are
//! constructed [`silent`](GainNode::silent) — a channel contributes nothing
//! to the bus until a control is raised.

use crate::frame::Frame;
use crate::node::AudioNode;
use crate::param::SmoothedParam;

/// A linear gain stage with smoothed parameter changes.
#[derive(Debug, Clone)]
pub struct GainNode {
    gain: SmoothedParam,
}

impl GainNode {
    /// Create a gain stage with an explicit initial gain.
    ///
    /// The initial value is applied without a ramp.
    pub fn new(initial_gain: f32, sample_rate: f32) -> Self {
        Self {
            gain: SmoothedParam::standard(initial_gain, sample_rate),
        }
    }

    /// Create a gain stage at exactly zero gain.
    ///
    /// This is the default staging for trim and fader: silence until a
    /// control is moved.
    pub fn silent(sample_rate: f32) -> Self {
        Self::new(0.0, sample_rate)
    }

    /// Set the gain target; the audible value ramps over the smoothing time.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain.set_target(gain);
    }

    /// The gain the control surface last asked for.
    pub fn gain_target(&self) -> f32 {
        self.gain.target()
    }

    /// The currently audible (smoothed) gain.
    pub fn current_gain(&self) -> f32 {
        self.gain.get()
    }
}

impl AudioNode for GainNode {
    #[inline]
    fn process(&mut self, input: Frame) -> Frame {
        let g = self.gain.advance();
        [input[0] * g, input[1] * g]
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.gain.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.gain.snap_to_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_by_default() {
        let mut node = GainNode::silent(48000.0);
        assert_eq!(node.gain_target(), 0.0);
        assert_eq!(node.process([1.0, -1.0]), [0.0, 0.0]);
    }

    #[test]
    fn gain_applies_after_settling() {
        let mut node = GainNode::silent(48000.0);
        node.set_gain(2.0);

        // Let the 10ms ramp settle (100ms worth of samples)
        let mut out = [0.0, 0.0];
        for _ in 0..4800 {
            out = node.process([0.5, -0.5]);
        }
        assert!((out[0] - 1.0).abs() < 0.01, "Left: {}", out[0]);
        assert!((out[1] + 1.0).abs() < 0.01, "Right: {}", out[1]);
    }

    #[test]
    fn initial_gain_needs_no_ramp() {
        let mut node = GainNode::new(0.5, 48000.0);
        assert_eq!(node.process([1.0, 1.0]), [0.5, 0.5]);
    }

    #[test]
    fn reset_snaps_ramp() {
        let mut node = GainNode::silent(48000.0);
        node.set_gain(1.0);
        node.reset();
        assert_eq!(node.process([1.0, 1.0]), [1.0, 1.0]);
    }
}
