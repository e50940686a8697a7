//! Standalone CLI tool for window enumeration and focus.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "winctl-window", about = "List and focus top-level windows")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List visible windows in enumeration order
    List {
        /// Emit JSON instead of one title per line
        #[arg(long)]
        json: bool,
    },
    /// Focus the first window whose title contains SUBSTRING
    Focus {
        /// Title substring to search for
        substring: String,
        /// Match case exactly
        #[arg(short, long)]
        case_sensitive: bool,
    },
    /// Show the currently focused window
    Foreground,
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::List { json } => winctl_core::window::enumerate_windows().map(|windows| {
            if json {
                match serde_json::to_string_pretty(&windows) {
                    Ok(out) => println!("{out}"),
                    Err(e) => eprintln!("JSON serialization failed: {e}"),
                }
            } else {
                for window in &windows {
                    println!("{}  [{}]", window.title, window.class_name);
                }
            }
        }),
        Command::Focus {
            substring,
            case_sensitive,
        } => winctl_core::window::focus_window_by_title(&substring, case_sensitive).map(
            |focused| {
                if focused {
                    println!("Focused window matching {substring:?}");
                } else {
                    println!("No window matching {substring:?} could be focused");
                    std::process::exit(2);
                }
            },
        ),
        Command::Foreground => winctl_core::window::foreground_window().map(|window| {
            println!("{}  [{}]", window.title, window.class_name);
        }),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
