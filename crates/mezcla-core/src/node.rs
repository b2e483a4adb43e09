//! Core AudioNode trait and chaining combinator.
//!
//! Every stage in a channel strip (trim, EQ shelves, panner, fader) is an
//! [`AudioNode`]: it consumes one stereo [`Frame`] and produces one. The
//! console wires nodes into a fixed order at construction; the trait exists
//! so the strip can treat stages uniformly for sample-rate changes and
//! resets, and so adjacent stages can be fused with [`Chain`].
//!
//! ## Design Decisions
//!
//! - **Frame processing**: Stereo `[f32; 2]` in/out. Mono program material
//!   rides as a duplicated pair until the panner places it.
//!
//! - **Object-safe**: `dyn AudioNode` is possible, but the console prefers
//!   concrete fields — the topology is fixed per channel kind and never
//!   rewired at runtime.
//!
//! - **No allocations**: All methods are callable from the audio timeline.

use crate::frame::Frame;

/// Core trait for all signal-chain nodes.
pub trait AudioNode {
    /// Process a single stereo frame.
    ///
    /// Advances any internal state (smoothing ramps, filter history) by one
    /// sample.
    fn process(&mut self, input: Frame) -> Frame;

    /// Process a buffer of frames in place.
    ///
    /// Default implementation calls [`process`](Self::process) per frame.
    fn process_block(&mut self, buffer: &mut [Frame]) {
        for frame in buffer.iter_mut() {
            *frame = self.process(*frame);
        }
    }

    /// Update the sample rate.
    ///
    /// Nodes recalculate any rate-dependent state (filter coefficients,
    /// smoothing coefficients).
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state (filter history, smoothing ramps snapped to
    /// target) without changing parameters.
    fn reset(&mut self);
}

/// Extension trait for chaining nodes.
pub trait NodeExt: AudioNode + Sized {
    /// Chain this node with another; the output of `self` feeds `next`.
    fn chain<N: AudioNode>(self, next: N) -> Chain<Self, N> {
        Chain {
            first: self,
            second: next,
        }
    }
}

// Blanket implementation for all nodes
impl<T: AudioNode> NodeExt for T {}

/// Two nodes in series, created by [`NodeExt::chain`].
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: AudioNode, B: AudioNode> AudioNode for Chain<A, B> {
    #[inline]
    fn process(&mut self, input: Frame) -> Frame {
        let mid = self.first.process(input);
        self.second.process(mid)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.first.set_sample_rate(sample_rate);
        self.second.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}

impl<A, B> Chain<A, B> {
    /// Get a reference to the first node in the chain.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Get a mutable reference to the first node in the chain.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Get a reference to the second node in the chain.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Get a mutable reference to the second node in the chain.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }
}
