//! Headless driver for the dungeon crawler.
//!
//! Plays runs with a simple pilot, inspects save slots and checks content
//! files. Run with: `cargo run -p crawl-sim -- <command>`

mod commands;
mod logging;
mod pilot;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Play, Slots, Validate};

/// Headless dungeon crawler driver
#[derive(Parser)]
#[command(name = "crawl-sim")]
#[command(about = "Plays and inspects dungeon crawler runs", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for log files (defaults to platform-specific location)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Auto-play encounters until the run ends
    Play(Play),

    /// Print the contents of a save slot
    Inspect(Inspect),

    /// List save slots
    Slots(Slots),

    /// Load content files and report cross-reference problems
    Validate(Validate),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(cli.log_dir)?;

    match cli.command {
        Command::Play(cmd) => cmd.execute().await,
        Command::Inspect(cmd) => cmd.execute(),
        Command::Slots(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
    }
}
