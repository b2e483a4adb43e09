//! Audio source collaborator interface.
//!
//! A source is the opaque decoded-audio handle a channel plays from. The
//! console only needs start/stop semantics and one frame per sample tick;
//! decoding, file formats, and looping policy belong to the implementor
//! (see `mezcla-io`'s WAV-backed source).

use mezcla_core::Frame;

/// An opaque decoded-audio source feeding one channel strip.
///
/// Implementations must return [`SILENCE`](mezcla_core::SILENCE)-equivalent
/// frames while stopped so a strip can always pull a frame unconditionally.
pub trait AudioSource: Send {
    /// Begin producing audio from the current position.
    fn start(&mut self);

    /// Halt audio output. Position is kept; idempotent.
    fn stop(&mut self);

    /// Whether the source is currently producing audio.
    fn is_active(&self) -> bool;

    /// Pull the next stereo frame. Silence while stopped.
    fn next_frame(&mut self) -> Frame;
}
