//! The mixing console itself.
//!
//! [`MixConsole`] owns the channel strips, the master gain stage, and the
//! analyser tap, and gates every control operation on the power switch.
//! The signal rig is built once, on the first power-on, and survives power
//! cycles: switching the console off silences the bus and darkens the lamps
//! but keeps every fader, pan, and EQ position where the operator left it.

use std::sync::Arc;

use mezcla_core::{AudioNode, Frame, GainNode, SILENCE, mono_sum};

use crate::channel::{ChannelId, ChannelStrip};
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::indicator::{IndicatorSink, NullIndicator};
use crate::mapping;
use crate::source::AudioSource;
use crate::tap::{AnalyserTap, BIN_COUNT};

/// Master gain position after the first power-on, before any adjustment.
pub const DEFAULT_MASTER_GAIN: f32 = 0.5;

/// The built signal path: strips into the master stage into the tap.
struct Rig {
    channels: Vec<ChannelStrip>,
    master: GainNode,
    tap: AnalyserTap,
}

/// A virtual mixing desk: channel strips summed through a master stage,
/// with an analyser tap feeding the bus meter.
pub struct MixConsole {
    config: ConsoleConfig,
    indicator: Arc<dyn IndicatorSink>,
    rig: Option<Rig>,
    powered: bool,
}

impl MixConsole {
    /// Create a console from a layout description, with no front end
    /// attached. The rig is not built until the first power-on.
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_indicator(config, Arc::new(NullIndicator))
    }

    /// Create a console that signals lamp states to the given sink.
    pub fn with_indicator(config: ConsoleConfig, indicator: Arc<dyn IndicatorSink>) -> Self {
        Self {
            config,
            indicator,
            rig: None,
            powered: false,
        }
    }

    /// The layout this console was built from.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Whether the power switch is on.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Number of channel strips in the layout.
    pub fn channel_count(&self) -> usize {
        self.config.channels.len()
    }

    /// Switch the console on.
    ///
    /// The first power-on builds the signal rig from the layout; later
    /// power-ons reuse it, so control positions set before a power-off are
    /// still in effect. Idempotent.
    pub fn power_on(&mut self) {
        if self.rig.is_none() {
            let sample_rate = self.config.sample_rate as f32;
            let channels = self
                .config
                .channels
                .iter()
                .enumerate()
                .map(|(slot, channel)| {
                    ChannelStrip::new(
                        ChannelId::new(slot as u32 + 1),
                        channel.layout,
                        sample_rate,
                        Arc::clone(&self.indicator),
                    )
                })
                .collect();
            self.rig = Some(Rig {
                channels,
                master: GainNode::new(DEFAULT_MASTER_GAIN, sample_rate),
                tap: AnalyserTap::new(),
            });
            tracing::info!(
                channels = self.config.channels.len(),
                sample_rate = self.config.sample_rate,
                "console rig built"
            );
        }
        self.powered = true;
        tracing::info!("console powered on");
    }

    /// Switch the console off.
    ///
    /// The bus renders silence and every lamp goes dark, but control
    /// positions and loaded sources are kept. Idempotent.
    pub fn power_off(&mut self) {
        self.powered = false;
        if let Some(rig) = self.rig.as_ref() {
            for channel in &rig.channels {
                channel.clear_indicators();
            }
        }
        tracing::info!("console powered off");
    }

    /// Inspect a channel strip regardless of power state.
    ///
    /// `None` before the first power-on or for an unknown id.
    pub fn channel(&self, id: ChannelId) -> Option<&ChannelStrip> {
        let rig = self.rig.as_ref()?;
        let slot = id.index().checked_sub(1)? as usize;
        rig.channels.get(slot)
    }

    /// The master stage's target linear gain, once the rig exists.
    pub fn master_gain_target(&self) -> Option<f32> {
        self.rig.as_ref().map(|rig| rig.master.gain_target())
    }

    /// Load a source into a channel.
    pub fn load_channel_source(
        &mut self,
        id: ChannelId,
        source: Box<dyn AudioSource>,
    ) -> Result<(), ConsoleError> {
        self.channel_mut(id)?.load_source(source);
        Ok(())
    }

    /// Begin playback on a channel. A channel with no source stays idle.
    pub fn play_channel(&mut self, id: ChannelId) -> Result<(), ConsoleError> {
        self.channel_mut(id)?.play();
        Ok(())
    }

    /// Halt playback on a channel.
    pub fn pause_channel(&mut self, id: ChannelId) -> Result<(), ConsoleError> {
        self.channel_mut(id)?.pause();
        Ok(())
    }

    /// Apply a normalized control value on a channel strip.
    pub fn set_channel_control(
        &mut self,
        id: ChannelId,
        name: &str,
        value: f32,
    ) -> Result<(), ConsoleError> {
        self.channel_mut(id)?.set_control(name, value);
        Ok(())
    }

    /// Apply a normalized control value on the master section.
    ///
    /// Only `main` exists today; unknown names are logged and ignored, the
    /// same policy the channel surface uses.
    pub fn set_master_control(&mut self, name: &str, value: f32) -> Result<(), ConsoleError> {
        let rig = self.powered_rig()?;
        match name {
            "main" => rig.master.set_gain(mapping::master_gain(value)),
            other => tracing::warn!(control = other, "unknown master control"),
        }
        Ok(())
    }

    /// Render one block of bus output.
    ///
    /// Powered off, the bus is silence and the analyser window is not fed.
    /// Powered on, each frame is the sum of every strip's output through the
    /// master stage, and its mono fold is pushed into the analyser tap.
    pub fn render_block(&mut self, out: &mut [Frame]) {
        let rig = match (self.powered, self.rig.as_mut()) {
            (true, Some(rig)) => rig,
            _ => {
                out.fill(SILENCE);
                return;
            }
        };
        for frame in out.iter_mut() {
            let mut mix = SILENCE;
            for channel in rig.channels.iter_mut() {
                let rendered = channel.render_next();
                mix[0] += rendered[0];
                mix[1] += rendered[1];
            }
            let mastered = rig.master.process(mix);
            rig.tap.push(mono_sum(mastered));
            *frame = mastered;
        }
    }

    /// Current analyser bins on the 0-255 scale, or `None` when powered off.
    pub fn bus_levels(&mut self) -> Option<[f32; BIN_COUNT]> {
        if !self.powered {
            return None;
        }
        self.rig.as_mut().map(|rig| rig.tap.bins())
    }

    fn channel_mut(&mut self, id: ChannelId) -> Result<&mut ChannelStrip, ConsoleError> {
        let rig = self.powered_rig()?;
        let slot = id
            .index()
            .checked_sub(1)
            .ok_or(ConsoleError::UnknownChannel(id))? as usize;
        rig.channels
            .get_mut(slot)
            .ok_or(ConsoleError::UnknownChannel(id))
    }

    fn powered_rig(&mut self) -> Result<&mut Rig, ConsoleError> {
        if !self.powered {
            return Err(ConsoleError::NotPowered);
        }
        // power_on always builds the rig before setting the flag
        self.rig.as_mut().ok_or(ConsoleError::NotPowered)
    }
}

impl std::fmt::Debug for MixConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixConsole")
            .field("powered", &self.powered)
            .field("channels", &self.config.channels.len())
            .field("sample_rate", &self.config.sample_rate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelLayout;
    use mezcla_core::Frame;

    fn console() -> MixConsole {
        MixConsole::new(ConsoleConfig::default())
    }

    struct ConstSource {
        frame: Frame,
        active: bool,
    }

    impl AudioSource for ConstSource {
        fn start(&mut self) {
            self.active = true;
        }
        fn stop(&mut self) {
            self.active = false;
        }
        fn is_active(&self) -> bool {
            self.active
        }
        fn next_frame(&mut self) -> Frame {
            if self.active { self.frame } else { SILENCE }
        }
    }

    fn const_source(value: f32) -> Box<dyn AudioSource> {
        Box::new(ConstSource {
            frame: [value, value],
            active: false,
        })
    }

    #[test]
    fn starts_powered_off_with_no_rig() {
        let console = console();
        assert!(!console.is_powered());
        assert!(console.channel(ChannelId::new(1)).is_none());
        assert!(console.master_gain_target().is_none());
    }

    #[test]
    fn controls_refused_while_off() {
        let mut console = console();
        let err = console.set_channel_control(ChannelId::new(1), "gain", 1.0);
        assert_eq!(err, Err(ConsoleError::NotPowered));
        assert_eq!(
            console.set_master_control("main", 1.0),
            Err(ConsoleError::NotPowered)
        );
        assert_eq!(
            console.play_channel(ChannelId::new(1)),
            Err(ConsoleError::NotPowered)
        );
    }

    #[test]
    fn unknown_channel_is_reported() {
        let mut console = console();
        console.power_on();
        assert_eq!(
            console.set_channel_control(ChannelId::new(3), "gain", 1.0),
            Err(ConsoleError::UnknownChannel(ChannelId::new(3)))
        );
        assert_eq!(
            console.play_channel(ChannelId::new(0)),
            Err(ConsoleError::UnknownChannel(ChannelId::new(0)))
        );
    }

    #[test]
    fn rig_matches_layout() {
        let mut console = console();
        console.power_on();
        let one = console.channel(ChannelId::new(1)).unwrap();
        assert_eq!(one.layout(), ChannelLayout::Mono);
        assert!(one.has_eq());
        let two = console.channel(ChannelId::new(2)).unwrap();
        assert_eq!(two.layout(), ChannelLayout::Stereo);
        assert!(!two.has_eq());
        assert_eq!(console.master_gain_target(), Some(DEFAULT_MASTER_GAIN));
    }

    #[test]
    fn power_cycle_preserves_control_positions() {
        let mut console = console();
        console.power_on();
        console
            .set_channel_control(ChannelId::new(1), "gain", 0.75)
            .unwrap();
        console.set_master_control("main", 0.9).unwrap();
        console.power_off();
        console.power_on();

        let strip = console.channel(ChannelId::new(1)).unwrap();
        assert_eq!(strip.control("gain"), Some(0.75));
        assert_eq!(strip.trim_gain_target(), 3.0);
        assert_eq!(console.master_gain_target(), Some(1.8));
    }

    #[test]
    fn fresh_console_renders_silence_even_powered() {
        let mut console = console();
        console.power_on();
        let mut block = [[1.0, 1.0]; 256];
        console.render_block(&mut block);
        // Strips default to zero trim and fader, so the bus stays silent
        assert!(block.iter().all(|f| *f == SILENCE));
    }

    #[test]
    fn powered_off_bus_is_silent() {
        let mut console = console();
        console.power_on();
        console
            .load_channel_source(ChannelId::new(1), const_source(0.5))
            .unwrap();
        console
            .set_channel_control(ChannelId::new(1), "gain", 0.25)
            .unwrap();
        console
            .set_channel_control(ChannelId::new(1), "level", 0.5)
            .unwrap();
        console.play_channel(ChannelId::new(1)).unwrap();
        console.power_off();

        let mut block = [[1.0, 1.0]; 64];
        console.render_block(&mut block);
        assert!(block.iter().all(|f| *f == SILENCE));
        assert!(console.bus_levels().is_none());
    }

    #[test]
    fn raised_channel_reaches_the_bus() {
        let mut console = console();
        console.power_on();
        console
            .load_channel_source(ChannelId::new(1), const_source(0.25))
            .unwrap();
        console
            .set_channel_control(ChannelId::new(1), "gain", 0.25)
            .unwrap();
        console
            .set_channel_control(ChannelId::new(1), "level", 0.5)
            .unwrap();
        console.set_master_control("main", 0.5).unwrap();
        console.play_channel(ChannelId::new(1)).unwrap();

        let mut block = [SILENCE; 4096];
        // Two blocks so the smoothing ramps settle
        console.render_block(&mut block);
        console.render_block(&mut block);

        let last = block[block.len() - 1];
        let expected = 0.25 * core::f32::consts::FRAC_1_SQRT_2;
        assert!((last[0] - expected).abs() < 1e-3, "Left: {}", last[0]);
        assert!((last[1] - expected).abs() < 1e-3, "Right: {}", last[1]);
    }

    #[test]
    fn bus_levels_track_rendered_audio() {
        let mut console = console();
        console.power_on();
        assert!(console.bus_levels().is_some());

        console
            .load_channel_source(ChannelId::new(1), const_source(0.5))
            .unwrap();
        console
            .set_channel_control(ChannelId::new(1), "gain", 0.25)
            .unwrap();
        console
            .set_channel_control(ChannelId::new(1), "level", 0.5)
            .unwrap();
        console.play_channel(ChannelId::new(1)).unwrap();

        let mut block = [SILENCE; 4096];
        console.render_block(&mut block);
        let bins = console.bus_levels().unwrap();
        // DC program material lands in the lowest bin
        assert!(bins[0] > 0.0, "Bin 0: {}", bins[0]);
    }
}
