//! Command-line interface for the trainer
//!
//! The binary runs scripted drills headlessly; a windowed front end embeds
//! [`crate::trainer::TrainerPlugin`] directly.

use clap::Parser;
use std::path::PathBuf;

/// Windup, dash-cancel and rend execution trainer
#[derive(Parser, Debug)]
#[command(name = "hoptrainer")]
#[command(about = "Windup, dash-cancel and rend execution trainer")]
#[command(version)]
pub struct Args {
    /// Run the drill in the specified JSON config file (built-in drill if omitted)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the session log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Override the drill length in seconds
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// RON tuning table to use instead of assets/config/trainer.ron
    #[arg(long, value_name = "TUNING_FILE")]
    pub tuning: Option<PathBuf>,

    /// Suppress engine log output
    #[arg(long)]
    pub quiet: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
