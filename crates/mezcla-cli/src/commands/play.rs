//! Live playback command: load WAV files into channels and mix them through
//! the console, with terminal channel lamps and a ~30 Hz bus meter.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clap::Args;
use mezcla_console::{
    Band, ChannelId, ConsoleConfig, IndicatorSink, Meter, MeterFrame, MeterRenderer, MixConsole,
};
use mezcla_io::backend::BackendStreamConfig;
use mezcla_io::{ConsoleOutput, CpalBackend, WavSource};

/// Meter refresh interval (roughly 30 Hz, like a hardware ladder).
const METER_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Args)]
pub struct PlayArgs {
    /// WAV files to load, one per channel in slot order
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Console layout TOML (defaults to one mono and one stereo channel)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output device (partial name match)
    #[arg(short, long)]
    output: Option<String>,

    /// Input trim for every loaded channel, 0.0-1.0 (0.25 is unity)
    #[arg(long, default_value_t = 0.25)]
    gain: f32,

    /// Fader level for every loaded channel, 0.0-1.0 (0.5 is unity)
    #[arg(long, default_value_t = 0.5)]
    level: f32,

    /// Pan for every loaded channel, 0.0 (left) to 1.0 (right)
    #[arg(long, default_value_t = 0.5)]
    pan: f32,

    /// High shelf for every loaded channel, 0.0-1.0 (0.5 is flat; mono only)
    #[arg(long)]
    high: Option<f32>,

    /// Low shelf for every loaded channel, 0.0-1.0 (0.5 is flat; mono only)
    #[arg(long)]
    low: Option<f32>,

    /// Master level, 0.0-1.0 (console default is 0.25)
    #[arg(long)]
    main: Option<f32>,

    /// Per-channel control override, e.g. "1:high=0.8" (repeatable)
    #[arg(long, value_parser = parse_control, number_of_values = 1)]
    set: Vec<(u32, String, f32)>,

    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(short, long)]
    duration: Option<f64>,
}

/// Parse a `CHANNEL:CONTROL=VALUE` override.
fn parse_control(s: &str) -> Result<(u32, String, f32), String> {
    let (channel, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid override '{s}' (expected CHANNEL:CONTROL=VALUE)"))?;
    let (name, value) = rest
        .split_once('=')
        .ok_or_else(|| format!("invalid override '{s}' (expected CHANNEL:CONTROL=VALUE)"))?;
    let channel: u32 = channel
        .parse()
        .map_err(|_| format!("invalid channel number '{channel}'"))?;
    let value: f32 = value
        .parse()
        .map_err(|_| format!("invalid control value '{value}'"))?;
    Ok((channel, name.to_string(), value))
}

/// Prints lamp transitions instead of lighting LEDs.
struct TerminalLamps;

impl IndicatorSink for TerminalLamps {
    fn source_loaded(&self, channel: ChannelId, lit: bool) {
        if lit {
            println!("channel {channel}: source loaded");
        }
    }

    fn playing(&self, channel: ChannelId, lit: bool) {
        if lit {
            println!("channel {channel}: playing");
        }
    }
}

/// Draws the bus meter as a single terminal line, bottom segment leftmost.
struct TerminalMeter;

impl MeterRenderer for TerminalMeter {
    fn render(&mut self, frame: &MeterFrame) {
        let mut line = String::from("\rbus [");
        for segment in frame.segments().iter().rev() {
            line.push(if !segment.lit {
                ' '
            } else {
                match segment.band {
                    Band::Clip => '!',
                    Band::Caution => '+',
                    Band::Normal => '=',
                }
            });
        }
        line.push(']');
        print!("{line}");
        let _ = std::io::stdout().flush();
    }
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::default(),
    };
    if args.files.len() > config.channels.len() {
        anyhow::bail!(
            "{} file(s) given but the console has {} channel(s)",
            args.files.len(),
            config.channels.len()
        );
    }

    let sample_rate = config.sample_rate;
    let meter = Meter::from_config(&config.meter);
    let console = Arc::new(std::sync::Mutex::new(MixConsole::with_indicator(
        config,
        Arc::new(TerminalLamps),
    )));

    let stream_config = BackendStreamConfig {
        sample_rate,
        device_name: args.output.clone(),
        ..BackendStreamConfig::default()
    };
    let mut output = ConsoleOutput::with_config(
        Arc::clone(&console),
        Box::new(CpalBackend::new()),
        stream_config,
    );
    output.power_on()?;

    {
        let mut desk = console
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        for (slot, file) in args.files.iter().enumerate() {
            let id = ChannelId::new(slot as u32 + 1);
            println!("Loading {} into channel {id}...", file.display());
            let source = WavSource::open(file, sample_rate)?;
            desk.load_channel_source(id, Box::new(source))?;
            desk.set_channel_control(id, "gain", args.gain)?;
            desk.set_channel_control(id, "level", args.level)?;
            desk.set_channel_control(id, "pan", args.pan)?;
            if let Some(high) = args.high {
                desk.set_channel_control(id, "high", high)?;
            }
            if let Some(low) = args.low {
                desk.set_channel_control(id, "low", low)?;
            }
        }

        if let Some(main) = args.main {
            desk.set_master_control("main", main)?;
        }

        for (channel, name, value) in &args.set {
            desk.set_channel_control(ChannelId::new(*channel), name, *value)?;
        }

        for slot in 0..args.files.len() {
            desk.play_channel(ChannelId::new(slot as u32 + 1))?;
        }
    }

    match args.duration {
        Some(secs) => println!("\nMixing for {secs}s...\n"),
        None => println!("\nMixing... Press Ctrl+C to stop.\n"),
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let deadline = args
        .duration
        .map(|secs| Instant::now() + Duration::from_secs_f64(secs));
    let mut renderer = TerminalMeter;
    while running.load(Ordering::Relaxed) {
        if let Some(deadline) = deadline
            && Instant::now() >= deadline
        {
            break;
        }
        {
            let mut desk = console
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            meter.tick(&mut desk, &mut renderer);
        }
        std::thread::sleep(METER_INTERVAL);
    }

    output.power_off();
    println!("\nStopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_control_override() {
        assert_eq!(
            parse_control("1:high=0.8"),
            Ok((1, "high".to_string(), 0.8))
        );
        assert_eq!(parse_control("2:pan=0"), Ok((2, "pan".to_string(), 0.0)));
    }

    #[test]
    fn rejects_malformed_overrides() {
        assert!(parse_control("high=0.8").is_err());
        assert!(parse_control("1:high").is_err());
        assert!(parse_control("x:high=0.8").is_err());
        assert!(parse_control("1:high=loud").is_err());
    }
}
