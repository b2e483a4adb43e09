//! Stereo sample frames.
//!
//! Everything downstream of a channel's source node is stereo: mono program
//! material is carried as a duplicated pair until the panner places it in the
//! field. A [`Frame`] is one sample instant, `[left, right]`.

/// One stereo sample instant: `[left, right]`.
pub type Frame = [f32; 2];

/// The silent frame.
pub const SILENCE: Frame = [0.0, 0.0];

/// Duplicate a mono sample into both channels of a frame.
#[inline]
pub fn mono(sample: f32) -> Frame {
    [sample, sample]
}

/// Sum a frame down to mono with equal weighting.
#[inline]
pub fn mono_sum(frame: Frame) -> f32 {
    (frame[0] + frame[1]) * 0.5
}
