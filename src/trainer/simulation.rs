//! Simulation Clock
//!
//! [`Simulation`] owns the whole trainer state and is the only thing that
//! advances time. Front ends feed it intents, call [`Simulation::advance`]
//! once per frame, and read back a [`TrainerSnapshot`] and the cue buffer.

use bevy::prelude::*;

use super::actor::{self, Actor, ActorState};
use super::constants::*;
use super::enemy;
use super::events::{IntentRejection, TrainerCue, TrainerIntent};
use super::floating_text::{decay_floating_texts, FloatingText};
use super::projectiles::{self, BasicBolt, PierceBolt};
use super::rend;
use super::score::Scoreboard;
use super::snapshot::TrainerSnapshot;
use super::tuning::{TrainerSettings, Tuning};
use super::units::{spawn_wave, Unit, UnitHandle, UnitKind, UnitStore};
use super::utils::unit_id;
use crate::combat::log::{CombatLog, CombatLogEventType, SessionMetadata, PLAYER_ID};

/// Everything that changes while the trainer runs.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub actor: Actor,
    pub units: UnitStore,
    pub basic_bolts: Vec<BasicBolt>,
    pub pierce_bolts: Vec<PierceBolt>,
    pub pierce_cooldown: f32,
    pub rend_cooldown: f32,
    pub score: Scoreboard,
    pub floating_texts: Vec<FloatingText>,
    pub hostile: bool,
    /// Survives full resets
    pub player_deaths: u32,
    /// Cues raised since the last drain
    pub cues: Vec<TrainerCue>,
    pub log: CombatLog,
    /// Simulation seconds since the trainer was created
    pub clock: f32,
    pub player_spawn: Vec2,
    pub champion_spawn: Vec2,
}

impl SimulationState {
    fn new(tuning: &Tuning) -> Self {
        let player_spawn = Vec2::new(
            ARENA_WIDTH * PLAYER_SPAWN_FRACTION.0,
            ARENA_HEIGHT * PLAYER_SPAWN_FRACTION.1,
        );
        let champion_spawn = Vec2::new(
            ARENA_WIDTH * CHAMPION_SPAWN_FRACTION.0,
            ARENA_HEIGHT * CHAMPION_SPAWN_FRACTION.1,
        );
        let mut units = UnitStore::new(champion_spawn);
        units.champion_mut().attack_timer = tuning.enemy_attack_interval;
        spawn_wave(&mut units);

        Self {
            actor: Actor::new(player_spawn, tuning),
            units,
            basic_bolts: Vec::new(),
            pierce_bolts: Vec::new(),
            pierce_cooldown: 0.0,
            rend_cooldown: 0.0,
            score: Scoreboard::default(),
            floating_texts: Vec::new(),
            hostile: false,
            player_deaths: 0,
            cues: Vec::new(),
            log: CombatLog::default(),
            clock: 0.0,
            player_spawn,
            champion_spawn,
        }
    }

    pub(crate) fn push_cue(&mut self, cue: TrainerCue) {
        self.cues.push(cue);
    }

    /// Spawn a label `offset_y` above `anchor`.
    pub(crate) fn float_text(&mut self, text: impl Into<String>, anchor: Vec2, offset_y: f32, color: [u8; 3]) {
        self.floating_texts
            .push(FloatingText::new(text, anchor + Vec2::new(0.0, offset_y), color));
    }

    /// Write a player hit (and the kill, if any) to the combat log.
    pub(crate) fn record_hit(&mut self, ability: &str, handle: UnitHandle, kind: UnitKind, amount: f32, killed: bool) {
        let target = unit_id(handle, kind);
        let verb = if killed { "kills" } else { "hits" };
        let message = format!(
            "{}'s {} {} {} for {:.0} damage",
            PLAYER_ID, ability, verb, target, amount
        );
        self.log.log_damage(
            PLAYER_ID.to_string(),
            target.clone(),
            ability.to_string(),
            amount,
            killed,
            message,
        );
        if killed {
            let message = format!("{} dies", target);
            self.log.log_death(target, Some(PLAYER_ID.to_string()), message);
        }
    }

    /// Remove a dead minion. Handles still pointing at it stop resolving.
    pub(crate) fn kill_unit(&mut self, handle: UnitHandle) {
        if self.units.remove(handle).is_some() {
            self.score.minions_killed += 1;
        }
    }
}

/// The trainer: tuning, player settings and live state.
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    tuning: Tuning,
    settings: TrainerSettings,
    state: SimulationState,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Tuning::default(), TrainerSettings::default())
    }
}

impl Simulation {
    pub fn new(tuning: Tuning, settings: TrainerSettings) -> Self {
        settings.debug_check();
        let state = SimulationState::new(&tuning);
        Self {
            tuning,
            settings,
            state,
        }
    }

    // ========================================================================
    // Intents
    // ========================================================================

    /// Apply one order. Refused orders raise a floating label and land in the
    /// combat log before the reason is returned.
    pub fn apply(&mut self, intent: TrainerIntent) -> Result<(), IntentRejection> {
        let (state, tuning, settings) = (&mut self.state, &self.tuning, &self.settings);
        let result = match intent {
            TrainerIntent::MoveTo(point) => {
                actor::move_to(state, tuning, point);
                Ok(())
            }
            TrainerIntent::Attack(target) => {
                actor::start_attack(state, tuning, settings, target);
                Ok(())
            }
            TrainerIntent::AttackMove(point) => {
                actor::attack_move(state, tuning, point);
                Ok(())
            }
            TrainerIntent::Stop => {
                actor::stop(state);
                Ok(())
            }
            TrainerIntent::CastPierce { aim } => actor::cast_pierce(state, tuning, settings, aim),
            TrainerIntent::CastBurst => rend::cast_rend(state, tuning, settings),
            TrainerIntent::ToggleHostile => {
                self.toggle_hostile();
                Ok(())
            }
            TrainerIntent::Reset => {
                self.reset(true);
                Ok(())
            }
        };

        if let Err(reason) = result {
            self.reject(intent, reason);
        }
        result
    }

    fn reject(&mut self, intent: TrainerIntent, reason: IntentRejection) {
        debug!("{:?} rejected: {}", intent, reason);
        let label = match reason {
            IntentRejection::OnCooldown => "Cooldown",
            IntentRejection::OutOfRange => "Out of range",
            IntentRejection::NoStacks => "No stacks",
            IntentRejection::NoTarget => "No target",
            IntentRejection::Busy => "Busy",
        };
        let anchor = self.state.actor.position;
        self.state.float_text(label, anchor, FCT_NOTICE_OFFSET, TEXT_SLATE);
        self.state
            .log
            .log_rejection(reason, format!("{:?} rejected: {}", intent, reason));
    }

    fn toggle_hostile(&mut self) {
        let state = &mut self.state;
        state.hostile = !state.hostile;
        if state.hostile {
            state.units.champion_mut().attack_timer = self.tuning.enemy_attack_interval;
        } else {
            enemy::snap_home(state, &self.tuning);
        }

        let label = if state.hostile { "Hostile ON" } else { "Hostile OFF" };
        let anchor = state.units.champion().position;
        state.float_text(label, anchor, FCT_ALERT_OFFSET, TEXT_SOFT_RED);
        state.log.log(CombatLogEventType::SessionEvent, label.to_string());
        info!("{}", label);
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Advance the simulation by a frame delta in seconds.
    ///
    /// Negative or non-finite deltas do nothing. Long frames are clamped and
    /// split into equal sub-steps so fast bolts cannot tunnel through units.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME_DELTA);
        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let step = dt / steps as f32;
        for _ in 0..steps {
            self.step(step);
        }
    }

    fn step(&mut self, dt: f32) {
        let tuning = &self.tuning;
        let settings = &self.settings;
        let state = &mut self.state;

        state.clock += dt;
        state.log.match_time = state.clock;

        tick_cooldown(&mut state.pierce_cooldown, dt);
        tick_cooldown(&mut state.rend_cooldown, dt);
        rend::decay_stacks(state, dt);

        if enemy::step_enemy(state, tuning, settings, dt) {
            self.on_player_death();
            return;
        }

        actor::step_actor(state, tuning, settings, dt);
        projectiles::advance_basic_bolts(state, tuning, dt);
        projectiles::advance_pierce_bolts(state, tuning, settings, dt);
        decay_floating_texts(&mut state.floating_texts, dt);
        state.score.tick(dt);
    }

    fn on_player_death(&mut self) {
        self.state.player_deaths += 1;
        info!("Player died ({} total)", self.state.player_deaths);
        self.reset(true);
        let anchor = self.state.actor.position;
        self.state.float_text("DIED!", anchor, FCT_ALERT_OFFSET, TEXT_RED);
    }

    // ========================================================================
    // Reset & configuration
    // ========================================================================

    /// Put everything back on its spawn point and rebuild the minion wave.
    /// A full reset also clears the scoreboard and heals the player.
    pub fn reset(&mut self, full: bool) {
        let tuning = &self.tuning;
        let state = &mut self.state;

        let actor = &mut state.actor;
        actor.position = state.player_spawn;
        actor.destination = state.player_spawn;
        actor.state = ActorState::Idle;
        actor.timer = 0.0;
        actor.queued_dash = None;
        actor.attack_target = None;
        actor.attack_moving = false;
        actor.dash_velocity = Vec2::ZERO;

        let champion = state.units.champion_mut();
        champion.position = state.champion_spawn;
        champion.attack_timer = tuning.enemy_attack_interval;
        champion.damage_taken = 0.0;
        champion.rend.clear();

        state.basic_bolts.clear();
        state.pierce_bolts.clear();
        state.floating_texts.clear();
        state.pierce_cooldown = 0.0;
        state.rend_cooldown = 0.0;
        spawn_wave(&mut state.units);

        if full {
            state.score = Scoreboard::default();
            state.actor.health = state.actor.max_health;
            state.actor.mana = state.actor.max_mana;
            state.push_cue(TrainerCue::Reset);
            state
                .log
                .log(CombatLogEventType::SessionEvent, "Session reset".to_string());
            info!("Trainer reset");
        }
    }

    /// Swap in new player settings. Derived values are recomputed on use.
    pub fn configure(&mut self, settings: TrainerSettings) {
        settings.debug_check();
        self.settings = settings;
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn snapshot(&self) -> TrainerSnapshot {
        TrainerSnapshot::capture(&self.state)
    }

    /// Take every cue raised since the last call.
    pub fn drain_cues(&mut self) -> Vec<TrainerCue> {
        std::mem::take(&mut self.state.cues)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn score(&self) -> &Scoreboard {
        &self.state.score
    }

    pub fn actor(&self) -> &Actor {
        &self.state.actor
    }

    /// Direct access for drills and tests that need to stage a position.
    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.state.actor
    }

    pub fn units(&self) -> &UnitStore {
        &self.state.units
    }

    pub fn unit(&self, handle: UnitHandle) -> Option<&Unit> {
        self.state.units.get(handle)
    }

    pub fn unit_mut(&mut self, handle: UnitHandle) -> Option<&mut Unit> {
        self.state.units.get_mut(handle)
    }

    /// Handle of a minion by its place in the reset formation.
    pub fn formation_unit(&self, kind: UnitKind, index: usize) -> Option<UnitHandle> {
        self.state.units.formation_unit(kind, index)
    }

    pub fn is_hostile(&self) -> bool {
        self.state.hostile
    }

    pub fn pierce_cooldown(&self) -> f32 {
        self.state.pierce_cooldown
    }

    pub fn rend_cooldown(&self) -> f32 {
        self.state.rend_cooldown
    }

    pub fn player_deaths(&self) -> u32 {
        self.state.player_deaths
    }

    /// Seconds simulated since creation.
    pub fn clock(&self) -> f32 {
        self.state.clock
    }

    pub fn log(&self) -> &CombatLog {
        &self.state.log
    }

    /// Summary block for an exported combat log.
    pub fn session_metadata(&self) -> SessionMetadata {
        let score = &self.state.score;
        SessionMetadata {
            duration_secs: self.state.clock,
            hits: score.hits,
            misses: score.misses,
            total_damage: score.total_damage,
            dps: score.dps(),
            minions_killed: score.minions_killed,
            player_deaths: self.state.player_deaths,
        }
    }
}

fn tick_cooldown(cooldown: &mut f32, dt: f32) {
    if *cooldown > 0.0 {
        *cooldown = (*cooldown - dt).max(0.0);
    }
}
