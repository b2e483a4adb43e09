//! Audio I/O layer for the mezcla mixing console.
//!
//! This crate provides:
//!
//! - **WAV sources**: [`read_wav_frames`] and [`WavSource`] for loading files
//!   into channel strips
//! - **Device output**: [`ConsoleOutput`] for driving a [`MixConsole`]
//!   through a live output stream
//! - **Backend abstraction**: [`AudioBackend`] so the output path can run on
//!   cpal or a deterministic test backend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use mezcla_console::{ChannelId, ConsoleConfig, MixConsole};
//! use mezcla_io::{ConsoleOutput, CpalBackend, WavSource};
//!
//! let console = Arc::new(Mutex::new(MixConsole::new(ConsoleConfig::default())));
//! let mut output = ConsoleOutput::new(Arc::clone(&console), Box::new(CpalBackend::new()));
//!
//! // Power switch: builds the device stream and powers the console
//! output.power_on()?;
//!
//! let source = WavSource::open("loop.wav", 48000)?;
//! let mut desk = console.lock().unwrap();
//! desk.load_channel_source(ChannelId::new(1), Box::new(source))?;
//! desk.play_channel(ChannelId::new(1))?;
//! ```
//!
//! [`MixConsole`]: mezcla_console::MixConsole

pub mod backend;
mod console_output;
mod cpal_backend;
mod wav;
mod wav_source;

pub use backend::{AudioBackend, AudioDevice, BackendStreamConfig, StreamHandle};
pub use console_output::ConsoleOutput;
pub use cpal_backend::CpalBackend;
pub use wav::read_wav_frames;
pub use wav_source::WavSource;

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio output device available on the system.
    #[error("No audio output device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
