//! hoptrainer - Windup, dash-cancel and rend execution trainer
//!
//! Runs a scripted drill headlessly and prints the session summary.

use std::process::ExitCode;

use hoptrainer::cli;
use hoptrainer::combat::log::DEFAULT_LOG_PATH;
use hoptrainer::headless::{run_headless_session, HeadlessDrillConfig};

fn main() -> ExitCode {
    let args = cli::parse_args();

    let mut config = match &args.headless {
        Some(path) => match HeadlessDrillConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => HeadlessDrillConfig::built_in(),
    };

    if let Some(output) = &args.output {
        config.output_path = Some(output.display().to_string());
    } else if config.output_path.is_none() {
        config.output_path = Some(DEFAULT_LOG_PATH.to_string());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }
    if let Some(tuning) = &args.tuning {
        config.tuning_path = Some(tuning.display().to_string());
    }
    config.log_to_console = !args.quiet;

    println!("Starting headless drill...");
    println!("  Settings: {:?}", config.settings);
    println!("  Scripted orders: {}", config.script.len());
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    match run_headless_session(config) {
        Ok(result) => {
            println!(
                "Hits: {}  Misses: {}  Hit rate: {:.0}%",
                result.hits,
                result.misses,
                result.hit_rate * 100.0
            );
            println!(
                "Damage: {:.0}  DPS: {:.1}  Minions killed: {}  Deaths: {}",
                result.total_damage, result.dps, result.minions_killed, result.player_deaths
            );
            if result.rejected_intents > 0 || result.skipped_intents > 0 {
                println!(
                    "Refused orders: {}  Skipped orders: {}",
                    result.rejected_intents, result.skipped_intents
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
