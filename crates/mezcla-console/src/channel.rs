//! Per-channel signal chain.
//!
//! A [`ChannelStrip`] owns one input's ordered node chain and its source
//! slot. The topology is fixed by the channel's layout at construction and
//! never rewired; only node parameter values change at runtime:
//!
//! - mono:   source → trim → high shelf (12 kHz) → low shelf (80 Hz) → pan → fader → bus
//! - stereo: source → trim → pan (balance) → fader → bus
//!
//! Shelving EQ is only meaningful for mono program material routed through a
//! pan stage; stereo sources are assumed pre-mixed and only need balance
//! control. This is a deliberate, fixed design simplification.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mezcla_core::{
    AudioNode, Chain, Frame, GainNode, NodeExt, PanLaw, SILENCE, ShelfFilter, ShelfKind,
    StereoPanner, clamp01,
};
use serde::{Deserialize, Serialize};

use crate::indicator::IndicatorSink;
use crate::mapping;
use crate::source::AudioSource;

/// Corner frequency of the mono channel's high shelf, in Hz.
pub const HIGH_SHELF_HZ: f32 = 12_000.0;

/// Corner frequency of the mono channel's low shelf, in Hz.
pub const LOW_SHELF_HZ: f32 = 80.0;

/// Stable channel identifier, assigned at construction (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u32);

impl ChannelId {
    /// Create a channel id from its 1-based console position.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw numeric identifier.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-channel topology kind, immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelLayout {
    /// Mono program material; chain includes both EQ shelves.
    Mono,
    /// Pre-mixed stereo material; no EQ, pan acts as balance.
    Stereo,
}

/// High shelf then low shelf, the mono channel's EQ section.
type EqSection = Chain<ShelfFilter, ShelfFilter>;

/// One channel's fixed node chain, source slot, and control positions.
pub struct ChannelStrip {
    id: ChannelId,
    layout: ChannelLayout,
    source: Option<Box<dyn AudioSource>>,
    trim: GainNode,
    eq: Option<EqSection>,
    pan: StereoPanner,
    fader: GainNode,
    /// Last normalized value set per control name, for surface readback.
    controls: BTreeMap<String, f32>,
    indicator: Arc<dyn IndicatorSink>,
}

impl ChannelStrip {
    /// Build a strip with the given layout's fixed topology.
    ///
    /// Trim and fader start at exactly zero gain: the strip contributes
    /// nothing to the bus until a control is raised. Pan rests centered,
    /// shelves flat.
    pub fn new(
        id: ChannelId,
        layout: ChannelLayout,
        sample_rate: f32,
        indicator: Arc<dyn IndicatorSink>,
    ) -> Self {
        let (eq, pan_law) = match layout {
            ChannelLayout::Mono => (
                Some(
                    ShelfFilter::new(ShelfKind::High, HIGH_SHELF_HZ, sample_rate)
                        .chain(ShelfFilter::new(ShelfKind::Low, LOW_SHELF_HZ, sample_rate)),
                ),
                PanLaw::EqualPower,
            ),
            ChannelLayout::Stereo => (None, PanLaw::Balance),
        };

        Self {
            id,
            layout,
            source: None,
            trim: GainNode::silent(sample_rate),
            eq,
            pan: StereoPanner::new(pan_law, sample_rate),
            fader: GainNode::silent(sample_rate),
            controls: BTreeMap::new(),
            indicator,
        }
    }

    /// This strip's stable identifier.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// The topology kind fixed at construction.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Whether the chain carries an EQ section (mono layout only).
    pub fn has_eq(&self) -> bool {
        self.eq.is_some()
    }

    /// Whether a source is loaded.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Whether the loaded source is currently producing audio.
    pub fn is_playing(&self) -> bool {
        self.source.as_ref().is_some_and(|s| s.is_active())
    }

    /// Load a source, replacing (and dropping) any previous handle.
    ///
    /// Control values are untouched and playback does not start; the
    /// loaded lamp is signalled.
    pub fn load_source(&mut self, source: Box<dyn AudioSource>) {
        self.source = Some(source);
        self.indicator.source_loaded(self.id, true);
        tracing::debug!(channel = %self.id, "source loaded");
    }

    /// Begin playback if a source is loaded.
    ///
    /// No source is a reachable steady state, not an error: the call is a
    /// no-op and the playing lamp stays dark.
    pub fn play(&mut self) {
        if let Some(source) = self.source.as_mut() {
            source.start();
            self.indicator.playing(self.id, true);
            tracing::debug!(channel = %self.id, "playing");
        }
    }

    /// Halt playback. Idempotent; the playing lamp always goes dark.
    pub fn pause(&mut self) {
        if let Some(source) = self.source.as_mut() {
            source.stop();
        }
        self.indicator.playing(self.id, false);
    }

    /// Apply a normalized control value to its target node.
    ///
    /// `gain`, `level`, and `pan` are valid on every layout; `high` and
    /// `low` only on mono — on stereo they are a silent no-op, since the
    /// control surface may not know the topology. Unknown names are logged
    /// and ignored. The clamped value is recorded for readback.
    pub fn set_control(&mut self, name: &str, value: f32) {
        let value = clamp01(value);
        match name {
            "gain" => self.trim.set_gain(mapping::trim_gain(value)),
            "level" => self.fader.set_gain(mapping::fader_gain(value)),
            "pan" => self.pan.set_pan(mapping::pan_position(value)),
            "high" => match self.eq.as_mut() {
                Some(eq) => eq.first_mut().set_gain_db(mapping::shelf_gain_db(value)),
                None => return,
            },
            "low" => match self.eq.as_mut() {
                Some(eq) => eq.second_mut().set_gain_db(mapping::shelf_gain_db(value)),
                None => return,
            },
            other => {
                tracing::warn!(channel = %self.id, control = other, "unknown channel control");
                return;
            }
        }
        self.controls.insert(name.to_owned(), value);
    }

    /// The last normalized value set for a control, if any.
    pub fn control(&self, name: &str) -> Option<f32> {
        self.controls.get(name).copied()
    }

    /// The trim stage's target linear gain.
    pub fn trim_gain_target(&self) -> f32 {
        self.trim.gain_target()
    }

    /// The fader stage's target linear gain.
    pub fn fader_gain_target(&self) -> f32 {
        self.fader.gain_target()
    }

    /// The panner's target position in [-1, 1].
    pub fn pan_target(&self) -> f32 {
        self.pan.pan_target()
    }

    /// The EQ section's (high, low) shelf gains in dB; `None` on stereo.
    pub fn shelf_gains_db(&self) -> Option<(f32, f32)> {
        self.eq
            .as_ref()
            .map(|eq| (eq.first().gain_db(), eq.second().gain_db()))
    }

    /// Pull one frame from the source and run it through the chain.
    pub fn render_next(&mut self) -> Frame {
        let input = match self.source.as_mut() {
            Some(source) => source.next_frame(),
            None => SILENCE,
        };
        self.render(input)
    }

    /// Run one input frame through the fixed chain.
    pub fn render(&mut self, input: Frame) -> Frame {
        let mut frame = self.trim.process(input);
        if let Some(eq) = self.eq.as_mut() {
            frame = eq.process(frame);
        }
        let frame = self.pan.process(frame);
        self.fader.process(frame)
    }

    /// Propagate a sample-rate change to every node in the chain.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.trim.set_sample_rate(sample_rate);
        if let Some(eq) = self.eq.as_mut() {
            eq.set_sample_rate(sample_rate);
        }
        self.pan.set_sample_rate(sample_rate);
        self.fader.set_sample_rate(sample_rate);
    }

    /// Signal both lamps dark. Used when the console powers off; the
    /// source's own playback state is not touched.
    pub fn clear_indicators(&self) {
        self.indicator.source_loaded(self.id, false);
        self.indicator.playing(self.id, false);
    }
}

impl fmt::Debug for ChannelStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelStrip")
            .field("id", &self.id)
            .field("layout", &self.layout)
            .field("has_source", &self.has_source())
            .finish_non_exhaustive()
    }
}
