//! Pluggable audio output backend.
//!
//! [`AudioBackend`] decouples the console's output path from any specific
//! platform audio API. The default implementation wraps cpal (ALSA,
//! CoreAudio, WASAPI); tests substitute a deterministic backend that calls
//! the output callback synchronously.
//!
//! The trait uses boxed closures for callbacks rather than generic
//! parameters, keeping it object-safe so the backend can be chosen at
//! runtime via `Box<dyn AudioBackend>`. Stream handles are type-erased
//! [`StreamHandle`]s that stop the stream on drop, keeping platform types
//! out of application code.

use crate::Result;

/// Audio output device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// Configuration for building an output stream.
#[derive(Debug, Clone)]
pub struct BackendStreamConfig {
    /// Requested sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Number of audio channels.
    pub channels: u16,
    /// Optional device name (uses system default if `None`).
    pub device_name: Option<String>,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 256,
            channels: 2,
            device_name: None,
        }
    }
}

/// Type-erased audio stream handle.
///
/// The stream is active while this handle exists; dropping it stops
/// playback regardless of which backend produced it.
pub struct StreamHandle {
    /// The backend-specific stream object, kept alive via RAII.
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Wrap a backend-specific stream object. The wrapped value is kept
    /// alive until this handle is dropped.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Audio output callback signature.
///
/// Called by the backend on the audio thread with a mutable buffer of
/// interleaved f32 samples (`[L0, R0, L1, R1, ...]` for stereo) that it
/// must fill. The buffer length is `frames * channels`.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Error callback signature.
///
/// Called with a human-readable message when the backend encounters an
/// error during streaming.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Pluggable audio output backend trait.
///
/// Abstracts over platform audio APIs for device enumeration and output
/// stream construction. The console never captures input, so there is no
/// input half.
pub trait AudioBackend: Send {
    /// Human-readable name of this backend (e.g., "cpal", "mock").
    fn name(&self) -> &str;

    /// List all available output devices.
    fn list_output_devices(&self) -> Result<Vec<AudioDevice>>;

    /// Get the default output device, if any.
    fn default_output_device(&self) -> Result<Option<AudioDevice>>;

    /// Build an output stream.
    ///
    /// The `callback` is invoked on the audio thread with a buffer of
    /// interleaved f32 samples to fill. The returned [`StreamHandle`] keeps
    /// the stream alive; dropping it stops playback.
    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// Query the actual sample rate the backend will use for the given
    /// config. Backends that cannot honor the exact requested rate report
    /// the closest available one. Defaults to the requested rate.
    fn actual_sample_rate(&self, config: &BackendStreamConfig) -> u32 {
        config.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BackendStreamConfig::default();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.buffer_size, 256);
        assert_eq!(config.channels, 2);
        assert!(config.device_name.is_none());
    }

    #[test]
    fn stream_handle_debug() {
        let handle = StreamHandle::new(42u32);
        let debug_str = format!("{handle:?}");
        assert!(debug_str.contains("StreamHandle"));
    }
}
