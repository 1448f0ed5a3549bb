//! Cadence CLI - Host frame-loop driver for the Cadence scheduler

mod commands;
mod units;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{profiles, run};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Priority-ordered per-frame update scheduler", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo frame loop
    Run {
        /// How long to run, in seconds
        #[arg(long, default_value_t = 3.0)]
        seconds: f64,

        /// Frames per second for the host loop
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Path to a timing profile directory
        #[arg(long, default_value = "profiles")]
        profiles: String,
    },

    /// List timing profiles in a directory
    Profiles {
        /// Path to a timing profile directory
        #[arg(default_value = "profiles")]
        dir: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seconds,
            fps,
            profiles,
        } => run::execute(seconds, fps, &profiles),
        Commands::Profiles { dir } => profiles::execute(&dir),
    }
}
