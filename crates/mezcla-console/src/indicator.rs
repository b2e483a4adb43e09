//! Channel indicator collaborator interface.
//!
//! The console emits boolean lamp states (source loaded, playing) and never
//! reads them back; rendering LEDs belongs to the front end. The sink is
//! shared across channels, so implementations take `&self` and must be
//! `Send + Sync`.

use crate::channel::ChannelId;

/// Receives per-channel lamp states from the console.
pub trait IndicatorSink: Send + Sync {
    /// A source was loaded into (or cleared from) the channel.
    fn source_loaded(&self, channel: ChannelId, lit: bool);

    /// The channel started or stopped playing.
    fn playing(&self, channel: ChannelId, lit: bool);
}

/// Indicator sink that discards all signals.
///
/// The default when no front end is attached (headless operation, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIndicator;

impl IndicatorSink for NullIndicator {
    fn source_loaded(&self, _channel: ChannelId, _lit: bool) {}
    fn playing(&self, _channel: ChannelId, _lit: bool) {}
}
