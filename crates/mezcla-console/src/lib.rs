//! Mezcla Console - routing graph and parameter-mapping engine for a
//! virtual multi-channel mixing console.
//!
//! A fixed set of input channels is routed through per-channel signal chains
//! (gain trim, optional shelving EQ, pan, fader level) into a shared master
//! bus, with live normalized-control mapping and level metering.
//!
//! # Components
//!
//! - [`mapping`] - pure functions from normalized control values (0.0-1.0)
//!   to physical audio parameters (linear gain, pan position, shelf dB)
//! - [`ChannelStrip`] - one channel's fixed node chain and its source slot
//! - [`MixConsole`] - power lifecycle, the channel set, the master bus, and
//!   the public control surface
//! - [`Meter`] - reduces the master-bus analyser tap to six discrete level
//!   segments with clip/caution/normal bands
//! - [`AnalyserTap`] - 64-point FFT tap on the master bus output
//!
//! # Control flow
//!
//! The control surface (a UI, a CLI, test code) calls [`MixConsole`]
//! operations with a channel id, a control name, and a normalized value.
//! The console forwards to the owning [`ChannelStrip`], which applies the
//! [`mapping`] function and updates the target node. Audio flows on its own
//! timeline through [`MixConsole::render_block`]; parameter writes are
//! fire-and-forget and become audible at the next buffer boundary.
//!
//! # Gain staging
//!
//! A freshly built channel is silent: trim and fader start at exactly zero
//! gain, so nothing reaches the bus until a control is raised. The master
//! bus starts at 0.5. Control values survive power cycles because the rig is
//! built exactly once, on first power-on.
//!
//! # Example
//!
//! ```rust
//! use mezcla_console::{ChannelId, ConsoleConfig, MixConsole};
//!
//! let mut console = MixConsole::new(ConsoleConfig::default());
//! console.power_on();
//! console.set_channel_control(ChannelId::new(1), "gain", 0.5)?;
//! console.set_channel_control(ChannelId::new(1), "level", 0.75)?;
//! console.set_master_control("main", 0.25)?;
//! # Ok::<(), mezcla_console::ConsoleError>(())
//! ```

pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod mapping;
pub mod meter;
pub mod source;
pub mod tap;

pub use channel::{ChannelId, ChannelLayout, ChannelStrip, HIGH_SHELF_HZ, LOW_SHELF_HZ};
pub use config::{ChannelConfig, ConfigError, ConsoleConfig, MeterConfig};
pub use engine::{DEFAULT_MASTER_GAIN, MixConsole};
pub use error::ConsoleError;
pub use indicator::{IndicatorSink, NullIndicator};
pub use meter::{Band, Meter, MeterFrame, MeterRenderer, Segment};
pub use source::AudioSource;
pub use tap::{AnalyserTap, BIN_COUNT, FFT_SIZE};
