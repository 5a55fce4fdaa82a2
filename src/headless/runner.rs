//! Headless drill execution
//!
//! Runs a scripted drill through the same Bevy systems a windowed front end
//! would use, on a fixed manual time step so results are reproducible.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use crate::trainer::systems::TrainerSystemPhase;
use crate::trainer::{Simulation, TrainerIntent, TrainerPlugin, Tuning};

use super::config::{HeadlessDrillConfig, ScriptedIntent};

/// Result of a completed headless drill
///
/// This struct provides programmatic access to drill results for testing and analysis.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    /// Simulated seconds the drill ran for
    pub duration_secs: f32,
    /// Dash-cancelled attacks since the last full reset
    pub hits: u32,
    /// Attacks that finished without a dash
    pub misses: u32,
    pub hit_rate: f32,
    pub total_damage: f32,
    pub dps: f32,
    pub minions_killed: u32,
    pub player_deaths: u32,
    /// Scripted orders the trainer refused
    pub rejected_intents: usize,
    /// Scripted attacks skipped because the target had died
    pub skipped_intents: usize,
    /// Where the combat log was written, if anywhere
    pub log_path: Option<String>,
}

/// Resource to track headless drill state
#[derive(Resource)]
pub struct HeadlessDrillState {
    /// Simulation seconds before the drill stops
    pub max_duration: f32,
    /// Orders not yet fired, earliest first
    pub pending: VecDeque<ScriptedIntent>,
    pub skipped: usize,
    /// Custom output path for the combat log
    pub output_path: Option<String>,
    /// Whether the drill has completed
    pub complete: bool,
    /// Drill result (populated when the drill completes)
    pub result: Option<SessionResult>,
}

impl HeadlessDrillState {
    fn new(config: &HeadlessDrillConfig) -> Self {
        let mut script = config.script.clone();
        script.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Self {
            max_duration: config.max_duration_secs,
            pending: script.into(),
            skipped: 0,
            output_path: config.output_path.clone(),
            complete: false,
            result: None,
        }
    }
}

/// Plugin for headless drill execution
pub struct HeadlessPlugin {
    pub config: HeadlessDrillConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HeadlessDrillState::new(&self.config))
            .add_plugins(TrainerPlugin);

        app.add_systems(
            Update,
            headless_feed_script.before(TrainerSystemPhase::Input),
        )
        .add_systems(
            Update,
            headless_check_session_end.after(TrainerSystemPhase::Output),
        )
        .add_systems(PostUpdate, headless_exit_on_complete);
    }
}

/// Send every scripted order whose time has come.
fn headless_feed_script(
    simulation: Res<Simulation>,
    mut drill: ResMut<HeadlessDrillState>,
    mut intents: EventWriter<TrainerIntent>,
) {
    if drill.complete {
        return;
    }
    let now = simulation.clock();
    while drill.pending.front().is_some_and(|step| step.at_secs <= now) {
        let Some(step) = drill.pending.pop_front() else {
            break;
        };
        match step.action.to_intent(&simulation) {
            Some(intent) => {
                debug!("[{:.2}s] {:?}", now, intent);
                intents.send(intent);
            }
            None => {
                debug!("[{:.2}s] skipping {:?}: target is dead", now, step.action);
                drill.skipped += 1;
            }
        }
    }
}

/// Stop once the simulation clock passes the drill length.
fn headless_check_session_end(simulation: Res<Simulation>, mut drill: ResMut<HeadlessDrillState>) {
    if drill.complete || simulation.clock() < drill.max_duration {
        return;
    }

    info!("Drill finished after {:.1}s", simulation.clock());
    let log_path = drill
        .output_path
        .as_deref()
        .and_then(|path| save_session_log(&simulation, path));

    drill.result = Some(build_session_result(&simulation, drill.skipped, log_path));
    drill.complete = true;
}

/// Build the SessionResult from the current trainer state
pub fn build_session_result(simulation: &Simulation, skipped: usize, log_path: Option<String>) -> SessionResult {
    let score = simulation.score();
    SessionResult {
        duration_secs: simulation.clock(),
        hits: score.hits,
        misses: score.misses,
        hit_rate: score.hit_rate(),
        total_damage: score.total_damage,
        dps: score.dps(),
        minions_killed: score.minions_killed,
        player_deaths: simulation.player_deaths(),
        rejected_intents: simulation.log().rejections().values().sum(),
        skipped_intents: skipped,
        log_path,
    }
}

/// Save the combat log to a file
fn save_session_log(simulation: &Simulation, path: &str) -> Option<String> {
    match simulation
        .log()
        .save_to_file(&simulation.session_metadata(), Some(path))
    {
        Ok(filename) => {
            println!("Drill complete. Log saved to: {}", filename);
            Some(filename)
        }
        Err(e) => {
            eprintln!("Failed to save combat log: {}", e);
            None
        }
    }
}

/// Exit the app when the drill is complete
fn headless_exit_on_complete(drill: Res<HeadlessDrillState>, mut exit: EventWriter<AppExit>) {
    if drill.complete {
        exit.send(AppExit::Success);
    }
}

/// Run a headless drill with the given configuration
pub fn run_headless_session(config: HeadlessDrillConfig) -> Result<SessionResult, String> {
    config.validate()?;

    let tuning = match &config.tuning_path {
        Some(path) => Tuning::load_from_file(Path::new(path)).map_err(|e| e.to_string())?,
        None => Tuning::load_or_default(None),
    };

    let mut simulation = Simulation::new(tuning, config.settings.clone());
    if config.hostile {
        simulation
            .apply(TrainerIntent::ToggleHostile)
            .map_err(|e| e.to_string())?;
    }

    let step = Duration::from_secs_f32(1.0 / config.tick_rate);
    // Room for the first zero-length frame and float drift in the clock
    let max_frames = (config.max_duration_secs * config.tick_rate).ceil() as u64 + 10;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    if config.log_to_console {
        app.add_plugins(LogPlugin::default());
    }
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(simulation)
        .add_plugins(HeadlessPlugin {
            config: config.clone(),
        });
    app.finish();
    app.cleanup();

    for _ in 0..max_frames {
        app.update();
        if let Some(result) = app.world().resource::<HeadlessDrillState>().result.clone() {
            return Ok(result);
        }
    }

    Err(format!(
        "Drill did not finish within {} frames ({:.1}s simulated)",
        max_frames,
        app.world().resource::<Simulation>().clock()
    ))
}
