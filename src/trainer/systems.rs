//! Trainer Systems API
//!
//! Bevy glue around [`Simulation`]. Both the headless runner and any windowed
//! front end add the trainer through [`TrainerPlugin`] or
//! [`add_trainer_systems`].
//!
//! ## System Phases
//!
//! 1. **Input** - `TrainerIntent` events are applied to the simulation
//! 2. **Simulation** - the clock advances by the scaled frame delta
//! 3. **Output** - raised cues are published as `TrainerCue` events
//!
//! Renderers and audio should run after `TrainerSystemPhase::Output`.

use bevy::prelude::*;

use super::events::{TrainerCue, TrainerIntent};
use super::simulation::Simulation;
use super::tuning::{TrainerSettings, Tuning};
use crate::combat::SimulationSpeed;

/// System set labels for trainer ordering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrainerSystemPhase {
    /// Phase 1: apply queued intents
    Input,
    /// Phase 2: advance the clock
    Simulation,
    /// Phase 3: publish cues
    Output,
}

/// Plugin for the trainer. Uses an existing [`Simulation`] resource when one
/// was inserted beforehand, otherwise builds one from the default tuning file.
pub struct TrainerPlugin;

impl Plugin for TrainerPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<Simulation>() {
            let tuning = Tuning::load_or_default(None);
            app.insert_resource(Simulation::new(tuning, TrainerSettings::default()));
        }

        app.add_event::<TrainerIntent>()
            .add_event::<TrainerCue>()
            .init_resource::<SimulationSpeed>();

        configure_trainer_system_ordering(app);
        add_trainer_systems(app, || true);
    }
}

/// Configures the ordering between trainer phases.
pub fn configure_trainer_system_ordering(app: &mut App) {
    app.configure_sets(
        Update,
        (
            TrainerSystemPhase::Input,
            TrainerSystemPhase::Simulation,
            TrainerSystemPhase::Output,
        )
            .chain(),
    );
}

/// Adds the three trainer systems, gated by `run_condition`.
pub fn add_trainer_systems<M>(app: &mut App, run_condition: impl Condition<M> + Clone)
where
    M: 'static,
{
    app.add_systems(
        Update,
        apply_intents
            .in_set(TrainerSystemPhase::Input)
            .run_if(run_condition.clone()),
    );
    app.add_systems(
        Update,
        tick_simulation
            .in_set(TrainerSystemPhase::Simulation)
            .run_if(run_condition.clone()),
    );
    app.add_systems(
        Update,
        publish_cues
            .in_set(TrainerSystemPhase::Output)
            .run_if(run_condition),
    );
}

pub fn apply_intents(mut intents: EventReader<TrainerIntent>, mut simulation: ResMut<Simulation>) {
    for intent in intents.read() {
        // Refusals are logged and labelled inside the simulation
        let _ = simulation.apply(*intent);
    }
}

pub fn tick_simulation(time: Res<Time>, speed: Res<SimulationSpeed>, mut simulation: ResMut<Simulation>) {
    simulation.advance(time.delta_secs() * speed.multiplier);
}

pub fn publish_cues(mut simulation: ResMut<Simulation>, mut cues: EventWriter<TrainerCue>) {
    for cue in simulation.drain_cues() {
        cues.send(cue);
    }
}
