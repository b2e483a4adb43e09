//! Mezcla CLI - command-line front end for the mezcla mixing console.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mezcla")]
#[command(author, version, about = "Virtual mixing console CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load WAV files into channels and mix them live
    Play(commands::play::PlayArgs),

    /// List available audio output devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
