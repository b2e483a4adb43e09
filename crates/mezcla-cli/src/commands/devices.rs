//! Audio output device management command.

use clap::{Args, Subcommand};
use mezcla_io::{AudioBackend, CpalBackend};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all available output devices
    List,

    /// Show default output device information
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    let backend = CpalBackend::new();

    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = backend.list_output_devices()?;

            if devices.is_empty() {
                println!("No audio output devices found.");
                return Ok(());
            }

            println!("Available Output Devices");
            println!("========================\n");

            for (idx, device) in devices.iter().enumerate() {
                println!(
                    "  [{}] {} ({} Hz)",
                    idx, device.name, device.default_sample_rate
                );
            }

            println!("\nTip: pick a device by partial name with --output:");
            println!("  mezcla play track.wav --output \"USB\"");
        }

        DevicesCommand::Info => match backend.default_output_device()? {
            Some(device) => {
                println!("Default Output:");
                println!("  Name: {}", device.name);
                println!("  Sample Rate: {} Hz", device.default_sample_rate);
            }
            None => println!("Default Output: None"),
        },
    }

    Ok(())
}
