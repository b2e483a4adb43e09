//! Device output for a shared console.
//!
//! [`ConsoleOutput`] is the console's physical power switch: powering on
//! initializes the audio subsystem (builds the device stream, exactly once)
//! and powers the console; powering off powers the console down while the
//! stream keeps running and renders silence. Stream construction is the one
//! operation here that can fail, and the console is left powered off when
//! it does.

use std::sync::{Arc, Mutex};

use mezcla_console::MixConsole;
use mezcla_core::Frame;

use crate::backend::{AudioBackend, BackendStreamConfig, StreamHandle};
use crate::Result;

fn lock_console(console: &Mutex<MixConsole>) -> std::sync::MutexGuard<'_, MixConsole> {
    // A panic while holding the lock leaves valid console state behind
    console
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Drives a shared [`MixConsole`] through a backend output stream.
pub struct ConsoleOutput {
    console: Arc<Mutex<MixConsole>>,
    backend: Box<dyn AudioBackend>,
    config: BackendStreamConfig,
    stream: Option<StreamHandle>,
}

impl ConsoleOutput {
    /// Tie a console to an output backend with the default stream config.
    pub fn new(console: Arc<Mutex<MixConsole>>, backend: Box<dyn AudioBackend>) -> Self {
        Self::with_config(console, backend, BackendStreamConfig::default())
    }

    /// Tie a console to an output backend with an explicit stream config.
    pub fn with_config(
        console: Arc<Mutex<MixConsole>>,
        backend: Box<dyn AudioBackend>,
        config: BackendStreamConfig,
    ) -> Self {
        Self {
            console,
            backend,
            config,
            stream: None,
        }
    }

    /// The shared console handle, for the control surface.
    pub fn console(&self) -> Arc<Mutex<MixConsole>> {
        Arc::clone(&self.console)
    }

    /// Whether the device stream is up.
    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Switch on: build the device stream if needed and power the console.
    ///
    /// Fails if the audio subsystem cannot start; the console stays off in
    /// that case. Idempotent once streaming.
    pub fn power_on(&mut self) -> Result<()> {
        if self.stream.is_none() {
            let console = Arc::clone(&self.console);
            let channels = self.config.channels as usize;
            let mut scratch: Vec<Frame> = Vec::new();

            let stream = self.backend.build_output_stream(
                &self.config,
                Box::new(move |data: &mut [f32]| {
                    let frames = data.len() / channels;
                    scratch.resize(frames, [0.0, 0.0]);
                    lock_console(&console).render_block(&mut scratch);
                    for (chunk, frame) in data.chunks_mut(channels).zip(scratch.iter()) {
                        chunk[0] = frame[0];
                        if let Some(right) = chunk.get_mut(1) {
                            *right = frame[1];
                        }
                        for extra in chunk.iter_mut().skip(2) {
                            *extra = 0.0;
                        }
                    }
                }),
                Box::new(|err| {
                    tracing::error!(error = err, "output stream error");
                }),
            )?;
            self.stream = Some(stream);
        }
        lock_console(&self.console).power_on();
        Ok(())
    }

    /// Switch off: power the console down.
    ///
    /// The device stream stays up and renders silence, so a later power-on
    /// is instant. Control positions survive; see the console's power
    /// semantics.
    pub fn power_off(&mut self) {
        lock_console(&self.console).power_off();
    }
}

impl std::fmt::Debug for ConsoleOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleOutput")
            .field("backend", &self.backend.name())
            .field("streaming", &self.is_streaming())
            .finish_non_exhaustive()
    }
}
