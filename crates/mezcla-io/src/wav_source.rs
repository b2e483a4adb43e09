//! WAV-backed channel source.

use std::path::Path;

use mezcla_console::AudioSource;
use mezcla_core::{Frame, SILENCE};

use crate::Result;
use crate::wav::read_wav_frames;

/// An in-memory WAV clip playable by a channel strip.
///
/// The clip loops by default, the natural behavior for a console channel
/// fed from a file. Stopping keeps the playback position, so starting
/// again resumes rather than rewinds.
pub struct WavSource {
    frames: Vec<Frame>,
    position: usize,
    active: bool,
    looping: bool,
}

impl WavSource {
    /// Load a WAV file into memory.
    ///
    /// `expected_sample_rate` is the console's rate; a mismatched file is
    /// still accepted (it plays pitched) but logged, since the console does
    /// no resampling.
    pub fn open<P: AsRef<Path>>(path: P, expected_sample_rate: u32) -> Result<Self> {
        let path = path.as_ref();
        let (frames, sample_rate) = read_wav_frames(path)?;
        if sample_rate != expected_sample_rate {
            tracing::warn!(
                file_rate = sample_rate,
                console_rate = expected_sample_rate,
                path = %path.display(),
                "sample rate mismatch, clip will play pitched"
            );
        }
        tracing::debug!(frames = frames.len(), path = %path.display(), "clip loaded");
        Ok(Self::from_frames(frames))
    }

    /// Wrap already-decoded frames.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            position: 0,
            active: false,
            looping: true,
        }
    }

    /// Set whether playback wraps at the end of the clip. A non-looping
    /// source stops itself when it runs off the end.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Clip length in frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the clip holds no audio.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl AudioSource for WavSource {
    fn start(&mut self) {
        if !self.frames.is_empty() {
            self.active = true;
        }
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn next_frame(&mut self) -> Frame {
        if !self.active {
            return SILENCE;
        }
        let frame = self.frames[self.position];
        self.position += 1;
        if self.position >= self.frames.len() {
            self.position = 0;
            if !self.looping {
                self.active = false;
            }
        }
        frame
    }
}
