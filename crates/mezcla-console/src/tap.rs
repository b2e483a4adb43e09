//! Master-bus analyser tap.
//!
//! The tap sits after the master gain stage and keeps the most recent
//! [`FFT_SIZE`] mono samples of bus output. On demand it produces
//! [`BIN_COUNT`] frequency-bin amplitudes on a 0-255 scale: Blackman window,
//! forward FFT, magnitude normalization, time smoothing against the previous
//! frame, then dB mapped from [-100, -30] dB onto [0, 255]. The 0-255 scale
//! is what the [`Meter`](crate::Meter)'s sensitivity constant is calibrated
//! against.

use std::sync::Arc;

use mezcla_core::linear_to_db;
use rustfft::{FftPlanner, num_complex::Complex};

/// Analysis window length in samples.
pub const FFT_SIZE: usize = 64;

/// Number of frequency bins produced per analysis frame.
pub const BIN_COUNT: usize = FFT_SIZE / 2;

/// Time-smoothing constant between analysis frames (share of the previous
/// frame kept).
const SMOOTHING: f32 = 0.8;

/// Bin amplitude floor in dB (maps to 0).
const MIN_DB: f32 = -100.0;

/// Bin amplitude ceiling in dB (maps to 255).
const MAX_DB: f32 = -30.0;

/// Rolling FFT tap over the master bus output.
pub struct AnalyserTap {
    /// Most recent bus samples, written circularly.
    ring: [f32; FFT_SIZE],
    write: usize,
    /// Precomputed Blackman window coefficients.
    window: [f32; FFT_SIZE],
    fft: Arc<dyn rustfft::Fft<f32>>,
    /// Smoothed linear magnitudes from the previous analysis frame.
    smoothed: [f32; BIN_COUNT],
    /// Scratch buffer for the in-place FFT.
    scratch: [Complex<f32>; FFT_SIZE],
}

impl AnalyserTap {
    /// Create a tap with an empty (silent) window.
    pub fn new() -> Self {
        let mut window = [0.0; FFT_SIZE];
        for (i, w) in window.iter_mut().enumerate() {
            let x = 2.0 * core::f32::consts::PI * i as f32 / FFT_SIZE as f32;
            *w = 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos();
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        Self {
            ring: [0.0; FFT_SIZE],
            write: 0,
            window,
            fft,
            smoothed: [0.0; BIN_COUNT],
            scratch: [Complex::new(0.0, 0.0); FFT_SIZE],
        }
    }

    /// Push one mono bus sample. Called from the audio timeline.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.ring[self.write] = sample;
        self.write = (self.write + 1) % FFT_SIZE;
    }

    /// Compute the current bin amplitudes on the 0-255 scale.
    ///
    /// Called from the metering tick; also advances the time smoothing.
    pub fn bins(&mut self) -> [f32; BIN_COUNT] {
        // Unroll the ring into time order and window it
        for i in 0..FFT_SIZE {
            let sample = self.ring[(self.write + i) % FFT_SIZE];
            self.scratch[i] = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let mut out = [0.0; BIN_COUNT];
        for (k, bin) in out.iter_mut().enumerate() {
            let magnitude = self.scratch[k].norm() / FFT_SIZE as f32;
            self.smoothed[k] = SMOOTHING * self.smoothed[k] + (1.0 - SMOOTHING) * magnitude;
            let db = linear_to_db(self.smoothed[k]);
            *bin = ((db - MIN_DB) / (MAX_DB - MIN_DB) * 255.0).clamp(0.0, 255.0);
        }
        out
    }

    /// Clear the window and smoothing history.
    pub fn reset(&mut self) {
        self.ring = [0.0; FFT_SIZE];
        self.write = 0;
        self.smoothed = [0.0; BIN_COUNT];
    }
}

impl Default for AnalyserTap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnalyserTap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyserTap")
            .field("fft_size", &FFT_SIZE)
            .field("write", &self.write)
            .finish_non_exhaustive()
    }
}
