//! Shelving equalizer stage.
//!
//! A [`ShelfFilter`] wraps one [`Biquad`] per channel with RBJ shelf
//! coefficients at a corner frequency fixed at construction. Only the shelf
//! gain moves at runtime; setting it recomputes coefficients in place.
//! Mono console channels carry a high shelf at 12 kHz and a low shelf at
//! 80 Hz between trim and pan.

use crate::biquad::{Biquad, highshelf_coefficients, lowshelf_coefficients};
use crate::frame::Frame;
use crate::node::AudioNode;

/// Which side of the corner frequency the shelf acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfKind {
    /// Boost/cut above the corner frequency.
    High,
    /// Boost/cut below the corner frequency.
    Low,
}

/// Shelving EQ stage with a fixed corner frequency and settable dB gain.
#[derive(Debug, Clone)]
pub struct ShelfFilter {
    kind: ShelfKind,
    frequency: f32,
    gain_db: f32,
    sample_rate: f32,
    left: Biquad,
    right: Biquad,
}

impl ShelfFilter {
    /// Create a shelf at the given corner frequency, flat (0 dB).
    pub fn new(kind: ShelfKind, frequency: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            kind,
            frequency,
            gain_db: 0.0,
            sample_rate,
            left: Biquad::new(),
            right: Biquad::new(),
        };
        filter.update_coefficients();
        filter
    }

    /// Set the shelf gain in decibels and recompute coefficients.
    ///
    /// Takes effect on the next processed frame. Filter history is kept, so
    /// gain moves do not click.
    pub fn set_gain_db(&mut self, gain_db: f32) {
        self.gain_db = gain_db;
        self.update_coefficients();
    }

    /// The current shelf gain in decibels.
    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    /// The fixed corner frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// The shelf kind (high or low).
    pub fn kind(&self) -> ShelfKind {
        self.kind
    }

    fn update_coefficients(&mut self) {
        let (b0, b1, b2, a0, a1, a2) = match self.kind {
            ShelfKind::High => {
                highshelf_coefficients(self.frequency, self.gain_db, self.sample_rate)
            }
            ShelfKind::Low => {
                lowshelf_coefficients(self.frequency, self.gain_db, self.sample_rate)
            }
        };
        self.left.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.right.set_coefficients(b0, b1, b2, a0, a1, a2);
    }
}

impl AudioNode for ShelfFilter {
    #[inline]
    fn process(&mut self, input: Frame) -> Frame {
        [self.left.process(input[0]), self.right.process(input[1])]
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_shelf_is_passthrough() {
        let mut shelf = ShelfFilter::new(ShelfKind::High, 12000.0, 48000.0);
        for i in 0..100 {
            let sample = (i as f32 * 0.21).sin();
            let out = shelf.process([sample, sample]);
            assert!((out[0] - sample).abs() < 1e-4);
            assert!((out[1] - sample).abs() < 1e-4);
        }
    }

    #[test]
    fn low_shelf_boost_raises_dc() {
        let mut shelf = ShelfFilter::new(ShelfKind::Low, 80.0, 48000.0);
        shelf.set_gain_db(20.0);

        let mut out = [0.0, 0.0];
        for _ in 0..20000 {
            out = shelf.process([0.1, 0.1]);
        }
        // +20 dB == 10x
        assert!((out[0] - 1.0).abs() < 0.02, "Left: {}", out[0]);
        assert!((out[1] - 1.0).abs() < 0.02, "Right: {}", out[1]);
    }

    #[test]
    fn channels_filter_independently() {
        let mut shelf = ShelfFilter::new(ShelfKind::Low, 80.0, 48000.0);
        shelf.set_gain_db(20.0);

        let mut out = [0.0, 0.0];
        for _ in 0..20000 {
            out = shelf.process([0.1, 0.0]);
        }
        assert!((out[0] - 1.0).abs() < 0.02, "Left: {}", out[0]);
        assert!(out[1].abs() < 1e-4, "Right should stay silent: {}", out[1]);
    }

    #[test]
    fn reset_clears_history_keeps_gain() {
        let mut shelf = ShelfFilter::new(ShelfKind::Low, 80.0, 48000.0);
        shelf.set_gain_db(12.0);
        for _ in 0..100 {
            shelf.process([1.0, 1.0]);
        }
        shelf.reset();
        assert_eq!(shelf.gain_db(), 12.0);
        // First frame after reset behaves like a cold start
        let out = shelf.process([0.0, 0.0]);
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn kind_and_frequency_are_fixed() {
        let shelf = ShelfFilter::new(ShelfKind::High, 12000.0, 48000.0);
        assert_eq!(shelf.kind(), ShelfKind::High);
        assert_eq!(shelf.frequency(), 12000.0);
    }
}
