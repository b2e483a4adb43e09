//! Parameter smoothing for zipper-free control moves.
//!
//! Console controls (trim, fader, pan) change in coarse steps as the operator
//! drags a knob; applying those steps directly to the audio path produces
//! audible "zipper noise". [`SmoothedParam`] interposes a one-pole lowpass
//! between the control value and the value the audio path reads.
//!
//! ## Usage
//!
//! ```rust
//! use mezcla_core::SmoothedParam;
//!
//! let mut gain = SmoothedParam::with_config(0.0, 48000.0, 10.0);
//!
//! // Control timeline: set new target, smoothing happens automatically
//! gain.set_target(0.5);
//!
//! // Audio timeline: advance once per sample
//! for _ in 0..480 {
//!     let smoothed = gain.advance();
//!     // multiply samples by `smoothed`...
//! }
//! ```

use libm::expf;

/// Smoothing time used for console gain and pan stages, in milliseconds.
pub const CONTROL_SMOOTHING_MS: f32 = 10.0;

/// A parameter with built-in exponential smoothing.
///
/// Uses a one-pole lowpass, which gives natural-sounding transitions for
/// gain-like parameters. The parameter exposes two views: the `target` (what
/// the control surface last asked for) and the `current` smoothed value (what
/// the audio path multiplies by).
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value.
    current: f32,
    /// Target value we're smoothing towards.
    target: f32,
    /// Smoothing coefficient (1 = instant, ~0 = very slow).
    coeff: f32,
    /// Sample rate in Hz.
    sample_rate: f32,
    /// Smoothing time in milliseconds.
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a new smoothed parameter with an initial value.
    ///
    /// Smoothing is disabled until [`set_sample_rate`](Self::set_sample_rate)
    /// and [`set_smoothing_time_ms`](Self::set_smoothing_time_ms) are called.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0, // Instant until configured
            sample_rate: 44100.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a smoothed parameter with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    /// Create a parameter with the standard console smoothing time
    /// ([`CONTROL_SMOOTHING_MS`]).
    pub fn standard(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, CONTROL_SMOOTHING_MS)
    }

    /// Set the target value; the parameter smooths towards it.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and immediately snap to it (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Set smoothing time in milliseconds.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.smoothing_time_ms = time_ms;
        self.recalculate_coeff();
    }

    /// Get the next smoothed value (advances by one sample).
    #[inline]
    pub fn advance(&mut self) -> f32 {
        // One-pole lowpass: y[n] = y[n-1] + coeff * (target - y[n-1])
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Get the current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get the target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if the parameter has reached its target (within epsilon).
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Skip ahead to the target value immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Recalculate the smoothing coefficient from sample rate and time.
    ///
    /// A one-pole lowpass `y[n] = y[n-1] + coeff * (target - y[n-1])` has a
    /// pole at `(1 - coeff)`; the time constant tau (time to 63.2% of target)
    /// relates to the coefficient by `coeff = 1 - exp(-1 / (tau * fs))` with
    /// `tau = smoothing_time_ms / 1000`. After 5*tau the parameter is within
    /// 0.7% of the target, settled for audio purposes.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0; // Instant (no smoothing)
        } else {
            let samples = self.smoothing_time_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
