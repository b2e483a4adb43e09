//! Segmented level meter over the master bus.
//!
//! The meter reduces an analysis frame from the
//! [`AnalyserTap`](crate::AnalyserTap) to a short
//! vertical ladder of lit/dark segments, the way hardware consoles show bus
//! level. Segment 0 is the top of the ladder (the clip lamp); segments light
//! from the bottom up as the average bin amplitude rises.

use crate::config::MeterConfig;
use crate::engine::MixConsole;

/// Colour band a meter segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Topmost segment, lit only when the bus is near clipping.
    Clip,
    /// Second segment from the top.
    Caution,
    /// Everything below the caution segment.
    Normal,
}

/// One lamp in the meter ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Position in the ladder, 0 at the top.
    pub index: usize,
    /// Whether the lamp is lit.
    pub lit: bool,
    /// Colour band of this lamp.
    pub band: Band,
}

/// A complete meter reading, top segment first.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterFrame {
    segments: Vec<Segment>,
}

impl MeterFrame {
    /// A frame with every segment dark (powered-off display).
    pub fn cleared(count: usize) -> Self {
        let segments = (0..count)
            .map(|index| Segment {
                index,
                lit: false,
                band: band_for(index),
            })
            .collect();
        Self { segments }
    }

    /// Whether no segment is lit.
    pub fn is_clear(&self) -> bool {
        self.segments.iter().all(|s| !s.lit)
    }

    /// The segments, top first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Receives meter readings on every metering tick.
pub trait MeterRenderer {
    /// Display one reading. Called at the metering rate, not the sample rate.
    fn render(&mut self, frame: &MeterFrame);
}

fn band_for(index: usize) -> Band {
    match index {
        0 => Band::Clip,
        1 => Band::Caution,
        _ => Band::Normal,
    }
}

/// Converts analyser frames into segment ladders.
#[derive(Debug, Clone)]
pub struct Meter {
    segments: usize,
    sensitivity: f32,
}

impl Meter {
    /// Create a meter with the given ladder height and sensitivity.
    ///
    /// Sensitivity is the average bin amplitude (0-255 scale) that lights
    /// the full ladder.
    pub fn new(segments: usize, sensitivity: f32) -> Self {
        Self {
            segments,
            sensitivity,
        }
    }

    /// Create a meter from a loaded configuration.
    pub fn from_config(config: &MeterConfig) -> Self {
        Self::new(config.segments, config.sensitivity)
    }

    /// Number of segments in the ladder.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Reduce one analyser frame to a ladder of segments.
    pub fn measure(&self, bins: &[f32]) -> MeterFrame {
        if bins.is_empty() {
            return MeterFrame::cleared(self.segments);
        }
        let mean = bins.iter().sum::<f32>() / bins.len() as f32;
        let level = mean / self.sensitivity * self.segments as f32;

        let segments = (0..self.segments)
            .map(|index| Segment {
                index,
                // Index 0 is the top lamp, so its threshold is the highest
                lit: ((self.segments - 1 - index) as f32) < level,
                band: band_for(index),
            })
            .collect();
        MeterFrame { segments }
    }

    /// Run one metering tick against the console and hand the reading to the
    /// renderer. A powered-off console renders a cleared ladder.
    pub fn tick(&self, console: &mut MixConsole, renderer: &mut dyn MeterRenderer) {
        let frame = match console.bus_levels() {
            Some(bins) => self.measure(&bins),
            None => MeterFrame::cleared(self.segments),
        };
        renderer.render(&frame);
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::from_config(&MeterConfig::default())
    }
}
