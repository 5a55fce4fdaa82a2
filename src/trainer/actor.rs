//! Actor State Machine
//!
//! The player character: orders, the windup/cast timers, dash-cancels and
//! walking. Every function here takes the whole [`SimulationState`] because a
//! finished cast spawns projectiles and touches the scoreboard.

use bevy::math::Vec2;
use serde::Serialize;

use super::constants::*;
use super::events::{IntentRejection, TrainerCue};
use super::formulas::{self, DashDirection};
use super::projectiles::{BasicBolt, PierceBolt};
use super::simulation::SimulationState;
use super::tuning::{TrainerSettings, Tuning};
use super::units::UnitHandle;
use super::utils::{angle_between, direction_from_angle};
use crate::combat::log::{CombatLogEventType, PLAYER_ID};

pub const PIERCE_NAME: &str = "Pierce";

/// Which timed cast the actor is committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CastKind {
    /// Basic attack windup
    BasicAttack,
    Pierce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorState {
    Idle,
    Walking,
    Casting(CastKind),
    Dashing,
    /// Attack recovery after an un-cancelled basic attack
    Cooldown,
}

impl ActorState {
    /// Display name used by the HUD and exported snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            ActorState::Idle => "IDLE",
            ActorState::Walking => "WALKING",
            ActorState::Casting(CastKind::BasicAttack) => "WINDUP",
            ActorState::Casting(CastKind::Pierce) => "CASTING_PIERCE",
            ActorState::Dashing => "DASHING",
            ActorState::Cooldown => "COOLDOWN",
        }
    }

    /// States that take new move and attack orders.
    pub fn accepts_orders(&self) -> bool {
        matches!(self, ActorState::Idle | ActorState::Walking | ActorState::Cooldown)
    }

    pub fn is_casting(&self) -> bool {
        matches!(self, ActorState::Casting(_))
    }
}

/// A dash queued during a cast, taken when the cast completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueuedDash {
    pub point: Vec2,
    pub direction: DashDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    pub position: Vec2,
    /// Radians
    pub facing: f32,
    pub state: ActorState,
    /// Remaining time in the current timed state
    pub timer: f32,
    pub queued_dash: Option<QueuedDash>,
    /// Last unit ordered to attack; stops resolving once it dies
    pub attack_target: Option<UnitHandle>,
    pub destination: Vec2,
    pub attack_moving: bool,
    pub dash_velocity: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub radius: f32,
}

impl Actor {
    pub fn new(position: Vec2, tuning: &Tuning) -> Self {
        Self {
            position,
            facing: 0.0,
            state: ActorState::Idle,
            timer: 0.0,
            queued_dash: None,
            attack_target: None,
            destination: position,
            attack_moving: false,
            dash_velocity: Vec2::ZERO,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            mana: tuning.player_max_mana,
            max_mana: tuning.player_max_mana,
            radius: PLAYER_RADIUS,
        }
    }

    fn face(&mut self, point: Vec2) {
        if point != self.position {
            self.facing = angle_between(self.position, point);
        }
    }

    fn go_idle(&mut self) {
        self.state = ActorState::Idle;
        self.timer = 0.0;
        self.attack_moving = false;
    }
}

// ============================================================================
// Orders
// ============================================================================

/// Ground click. Walks when the actor takes orders, queues a dash during a
/// cast, and is dropped mid-dash.
pub(crate) fn move_to(state: &mut SimulationState, tuning: &Tuning, point: Vec2) {
    match state.actor.state {
        s if s.accepts_orders() => walk_to(state, point),
        ActorState::Casting(_) => queue_dash(state, tuning, point),
        _ => {}
    }
}

/// Attack-move click on the ground.
pub(crate) fn attack_move(state: &mut SimulationState, tuning: &Tuning, point: Vec2) {
    match state.actor.state {
        s if s.accepts_orders() => {
            walk_to(state, point);
            state.actor.attack_moving = true;
        }
        ActorState::Casting(_) => queue_dash(state, tuning, point),
        _ => {}
    }
}

fn walk_to(state: &mut SimulationState, point: Vec2) {
    let actor = &mut state.actor;
    actor.destination = point;
    actor.state = ActorState::Walking;
    actor.timer = 0.0;
    actor.attack_moving = false;
    actor.face(point);
}

/// Attack order on a unit. Dead or stale handles are ignored.
pub(crate) fn start_attack(
    state: &mut SimulationState,
    tuning: &Tuning,
    settings: &TrainerSettings,
    target: UnitHandle,
) {
    if !state.actor.state.accepts_orders() {
        return;
    }
    let Some(unit) = state.units.get(target) else {
        return;
    };
    let target_position = unit.position;

    let distance = target_position.distance(state.actor.position);
    if distance > tuning.attack_range + tuning.attack_range_tolerance {
        walk_to(state, target_position);
        state.actor.attack_moving = true;
        let anchor = state.actor.position;
        state.float_text("Approaching...", anchor, FCT_NOTICE_OFFSET, TEXT_SLATE);
        return;
    }

    if !state.score.in_combat {
        state.score.start_combat();
        state
            .log
            .log(CombatLogEventType::SessionEvent, "Combat started".to_string());
    }

    let actor = &mut state.actor;
    actor.state = ActorState::Casting(CastKind::BasicAttack);
    actor.timer = formulas::windup_time(tuning, settings.attack_speed);
    actor.queued_dash = None;
    actor.attack_target = Some(target);
    actor.attack_moving = false;
    actor.face(target_position);
}

/// Record a dash to take once the current cast completes.
fn queue_dash(state: &mut SimulationState, tuning: &Tuning, point: Vec2) {
    let position = state.actor.position;
    let to_champion = state.units.champion().position - position;
    let direction = formulas::classify_dash(tuning, point - position, to_champion);

    state.actor.queued_dash = Some(QueuedDash { point, direction });

    let (label, color) = match direction {
        DashDirection::Forward => ("Short", TEXT_GOLD),
        DashDirection::Backward => ("Long", TEXT_SKY),
    };
    state.float_text(label, position, FCT_DASH_OFFSET, color);
}

pub(crate) fn stop(state: &mut SimulationState) {
    match state.actor.state {
        ActorState::Casting(CastKind::Pierce) | ActorState::Dashing => return,
        _ => {}
    }
    let actor = &mut state.actor;
    actor.destination = actor.position;
    actor.queued_dash = None;
    actor.go_idle();
    let anchor = actor.position;
    state.float_text("Stop", anchor, FCT_NOTICE_OFFSET, TEXT_SLATE);
}

/// Start the Pierce cast towards `aim`.
pub(crate) fn cast_pierce(
    state: &mut SimulationState,
    tuning: &Tuning,
    settings: &TrainerSettings,
    aim: Vec2,
) -> Result<(), IntentRejection> {
    if state.pierce_cooldown > 0.0 {
        return Err(IntentRejection::OnCooldown);
    }
    if matches!(state.actor.state, ActorState::Casting(_) | ActorState::Dashing) {
        return Err(IntentRejection::Busy);
    }
    // Aiming at the actor's own feet gives the spear no direction
    if aim.distance_squared(state.actor.position) < f32::EPSILON {
        return Err(IntentRejection::NoTarget);
    }

    let actor = &mut state.actor;
    actor.state = ActorState::Casting(CastKind::Pierce);
    actor.timer = formulas::cast_time(tuning, tuning.pierce.cast_time, settings.attack_speed);
    actor.queued_dash = None;
    actor.attack_moving = false;
    actor.face(aim);
    let anchor = actor.position;

    state.float_text("Pierce!", anchor, FCT_CAST_OFFSET, TEXT_GOLD);
    state
        .log
        .log_ability(PLAYER_ID.to_string(), PIERCE_NAME.to_string());
    Ok(())
}

// ============================================================================
// Per-tick step
// ============================================================================

pub(crate) fn step_actor(state: &mut SimulationState, tuning: &Tuning, settings: &TrainerSettings, dt: f32) {
    match state.actor.state {
        ActorState::Idle => {}
        ActorState::Walking => step_walking(state, tuning, settings, dt),
        ActorState::Casting(kind) => {
            if kind == CastKind::BasicAttack {
                if let Some(target) = state.actor.attack_target.and_then(|h| state.units.get(h)) {
                    let target_position = target.position;
                    state.actor.face(target_position);
                }
            }
            state.actor.timer -= dt;
            if state.actor.timer <= 0.0 {
                state.actor.timer = 0.0;
                match kind {
                    CastKind::BasicAttack => finish_windup(state, tuning, settings),
                    CastKind::Pierce => finish_pierce(state, tuning, settings),
                }
            }
        }
        ActorState::Dashing => {
            let actor = &mut state.actor;
            actor.position = clamp_to_arena(actor.position + actor.dash_velocity * dt, actor.radius);
            actor.timer -= dt;
            if actor.timer <= 0.0 {
                actor.dash_velocity = Vec2::ZERO;
                actor.destination = actor.position;
                actor.go_idle();
            }
        }
        ActorState::Cooldown => {
            state.actor.timer -= dt;
            if state.actor.timer <= 0.0 {
                state.actor.go_idle();
            }
        }
    }
}

fn step_walking(state: &mut SimulationState, tuning: &Tuning, settings: &TrainerSettings, dt: f32) {
    if state.actor.attack_moving {
        if let Some(target) = nearest_unit_in_range(state, tuning.attack_range) {
            start_attack(state, tuning, settings, target);
            return;
        }
    }

    let actor = &mut state.actor;
    let to_destination = actor.destination - actor.position;
    let distance = to_destination.length();
    if distance < ARRIVAL_THRESHOLD {
        actor.go_idle();
        return;
    }

    let step = formulas::move_speed(tuning, settings.boots_tier) * dt;
    if distance <= step {
        actor.position = actor.destination;
        actor.go_idle();
    } else {
        actor.position += to_destination / distance * step;
        actor.facing = to_destination.y.atan2(to_destination.x);
    }
}

/// Closest live unit within `range` of the actor. Champion is scanned first
/// and ties keep the earlier unit.
fn nearest_unit_in_range(state: &SimulationState, range: f32) -> Option<UnitHandle> {
    let origin = state.actor.position;
    let mut best: Option<(UnitHandle, f32)> = None;
    for (handle, unit) in state.units.iter() {
        let distance = unit.distance_to(origin);
        if distance > range {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((handle, distance));
        }
    }
    best.map(|(handle, _)| handle)
}

fn finish_windup(state: &mut SimulationState, tuning: &Tuning, settings: &TrainerSettings) {
    // A bolt aimed at a minion that died mid-windup fizzles on its first step
    let target = state.actor.attack_target.unwrap_or(UnitHandle::Champion);
    state
        .basic_bolts
        .push(BasicBolt::new(state.actor.position, target, tuning));
    state.push_cue(TrainerCue::BoltLaunched);

    match state.actor.queued_dash.take() {
        Some(dash) => {
            let distance = formulas::dash_distance(tuning, settings.boots_tier, dash.direction);
            begin_dash(state, tuning, dash.point, distance);
            state.score.hits += 1;
        }
        None => {
            let actor = &mut state.actor;
            actor.state = ActorState::Cooldown;
            actor.timer = formulas::attack_recovery_time(tuning, settings.attack_speed);
            state.score.misses += 1;
            let anchor = state.actor.position;
            state.float_text("No Hop", anchor, FCT_NOTICE_OFFSET, TEXT_SOFT_RED);
        }
    }
}

fn finish_pierce(state: &mut SimulationState, tuning: &Tuning, settings: &TrainerSettings) {
    let scale = tuning.scale_ratio();
    let velocity = direction_from_angle(state.actor.facing) * tuning.pierce.speed * scale;
    let lifetime = tuning.pierce.range / tuning.pierce.speed;
    state
        .pierce_bolts
        .push(PierceBolt::new(state.actor.position, velocity, lifetime));
    state.pierce_cooldown = tuning.pierce.cooldown;
    state.push_cue(TrainerCue::PierceCast);

    match state.actor.queued_dash.take() {
        // Pierce always hops the long way
        Some(dash) => {
            let distance = formulas::dash_distance(tuning, settings.boots_tier, DashDirection::Backward);
            begin_dash(state, tuning, dash.point, distance);
            state.score.hits += 1;
        }
        None => state.actor.go_idle(),
    }
}

fn begin_dash(state: &mut SimulationState, tuning: &Tuning, point: Vec2, distance: f32) {
    let actor = &mut state.actor;
    let direction = (point - actor.position).normalize_or_zero();
    actor.dash_velocity = direction * (distance / tuning.dash_duration);
    actor.state = ActorState::Dashing;
    actor.timer = tuning.dash_duration;
    actor.attack_moving = false;
    state.push_cue(TrainerCue::Dash);
}

/// Keep a point inside the arena, inset by `inset` on every side.
pub fn clamp_to_arena(point: Vec2, inset: f32) -> Vec2 {
    point.clamp(
        Vec2::splat(inset),
        Vec2::new(ARENA_WIDTH - inset, ARENA_HEIGHT - inset),
    )
}
