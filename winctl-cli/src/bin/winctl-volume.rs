//! Standalone CLI tool for master volume control.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "winctl-volume",
    about = "Control the default playback device's master volume"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current volume scalar (0.0 to 1.0)
    Get,
    /// Set the volume scalar
    Set {
        /// Volume level between 0.0 and 1.0
        level: f32,
    },
    /// Mute the device
    Mute,
    /// Unmute the device
    Unmute,
    /// Print volume and mute state
    Status,
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Get => {
            winctl_core::audio::get_master_volume().map(|level| println!("{level:.2}"))
        }
        Command::Set { level } => winctl_core::audio::set_master_volume(level)
            .map(|()| println!("Volume set to {level:.2}")),
        Command::Mute => winctl_core::audio::set_mute(true).map(|()| println!("Muted")),
        Command::Unmute => winctl_core::audio::set_mute(false).map(|()| println!("Unmuted")),
        Command::Status => winctl_core::audio::get_master_volume().and_then(|level| {
            winctl_core::audio::get_mute().map(|muted| {
                println!("volume: {:.0}%  muted: {muted}", level * 100.0);
            })
        }),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
