//! Projectile Subsystem
//!
//! Homing basic bolts and linear Pierce spears. Both lists are advanced once
//! per tick after the actor has stepped.

use bevy::math::Vec2;
use serde::Serialize;

use super::actor::PIERCE_NAME;
use super::constants::*;
use super::events::TrainerCue;
use super::formulas;
use super::rend::detonate_unit;
use super::simulation::SimulationState;
use super::tuning::{TrainerSettings, Tuning};
use super::units::UnitHandle;

pub const BASIC_ATTACK_NAME: &str = "Basic Attack";

/// Homing bolt fired when a windup completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicBolt {
    pub position: Vec2,
    /// World units per second
    pub speed: f32,
    pub lifetime: f32,
    pub target: UnitHandle,
}

impl BasicBolt {
    pub fn new(position: Vec2, target: UnitHandle, tuning: &Tuning) -> Self {
        Self {
            position,
            speed: tuning.bolt_speed,
            lifetime: tuning.bolt_lifetime,
            target,
        }
    }
}

/// Linear spear that passes through the minions it kills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PierceBolt {
    pub position: Vec2,
    pub velocity: Vec2,
    pub lifetime: f32,
    /// Stacks carried over from minions this spear killed
    pub transferred_stacks: u32,
    /// Rend was cast while this spear was in flight
    pub rend_pending: bool,
}

impl PierceBolt {
    pub fn new(position: Vec2, velocity: Vec2, lifetime: f32) -> Self {
        Self {
            position,
            velocity,
            lifetime,
            transferred_stacks: 0,
            rend_pending: false,
        }
    }
}

// ============================================================================
// Basic bolts
// ============================================================================

pub(crate) fn advance_basic_bolts(state: &mut SimulationState, tuning: &Tuning, dt: f32) {
    let mut bolts = std::mem::take(&mut state.basic_bolts);
    bolts.retain_mut(|bolt| step_basic_bolt(state, tuning, bolt, dt));
    state.basic_bolts = bolts;
}

/// Returns false once the bolt is spent.
fn step_basic_bolt(state: &mut SimulationState, tuning: &Tuning, bolt: &mut BasicBolt, dt: f32) -> bool {
    let Some(target) = state.units.get(bolt.target) else {
        return false;
    };
    let target_position = target.position;
    let target_radius = target.radius;

    let to_target = target_position - bolt.position;
    let distance = to_target.length();
    let step = bolt.speed * dt;
    if distance <= step {
        bolt.position = target_position;
    } else {
        bolt.position += to_target / distance * step;
    }
    bolt.lifetime -= dt;

    if bolt.position.distance(target_position) <= target_radius {
        land_basic_bolt(state, tuning, bolt.target);
        return false;
    }
    bolt.lifetime > 0.0
}

fn land_basic_bolt(state: &mut SimulationState, tuning: &Tuning, handle: UnitHandle) {
    let damage = formulas::basic_attack_damage(tuning);
    let Some(unit) = state.units.get_mut(handle) else {
        return;
    };
    let killed = unit.apply_damage(damage);
    unit.rend.add(1, tuning);
    let position = unit.position;
    let kind = unit.kind;

    state.score.record_damage(damage);
    state.push_cue(TrainerCue::Hit);
    state.float_text(format!("{:.0}", damage), position, FCT_DAMAGE_OFFSET, TEXT_GOLD);
    state.record_hit(BASIC_ATTACK_NAME, handle, kind, damage, killed);

    if killed {
        state.float_text("Kill", position, FCT_ALERT_OFFSET, TEXT_GREEN);
        state.kill_unit(handle);
    }
}

// ============================================================================
// Pierce bolts
// ============================================================================

pub(crate) fn advance_pierce_bolts(
    state: &mut SimulationState,
    tuning: &Tuning,
    settings: &TrainerSettings,
    dt: f32,
) {
    let mut bolts = std::mem::take(&mut state.pierce_bolts);
    bolts.retain_mut(|bolt| step_pierce_bolt(state, tuning, settings, bolt, dt));
    state.pierce_bolts = bolts;
}

/// Move the spear and resolve at most one collision. Returns false once the
/// spear is spent.
fn step_pierce_bolt(
    state: &mut SimulationState,
    tuning: &Tuning,
    settings: &TrainerSettings,
    bolt: &mut PierceBolt,
    dt: f32,
) -> bool {
    bolt.position += bolt.velocity * dt;
    bolt.lifetime -= dt;

    // Latest-spawned minion wins when two overlap the spear
    let struck_minion = state
        .units
        .minions()
        .rev()
        .find(|(_, unit)| unit.distance_to(bolt.position) <= unit.radius + tuning.pierce.minion_hit_allowance)
        .map(|(handle, _)| handle);

    if let Some(handle) = struck_minion {
        return strike_minion(state, tuning, settings, bolt, handle) && bolt.lifetime > 0.0;
    }

    let champion = state.units.champion();
    if champion.distance_to(bolt.position) <= champion.radius + tuning.pierce.champion_hit_allowance {
        strike_champion(state, tuning, settings, bolt);
        return false;
    }

    bolt.lifetime > 0.0
}

/// Returns true when the spear killed the minion and flies on.
fn strike_minion(
    state: &mut SimulationState,
    tuning: &Tuning,
    settings: &TrainerSettings,
    bolt: &mut PierceBolt,
    handle: UnitHandle,
) -> bool {
    let damage = formulas::pierce_damage(tuning, settings.pierce_level);
    let Some(unit) = state.units.get_mut(handle) else {
        return true;
    };
    let position = unit.position;
    let kind = unit.kind;

    if damage >= unit.health {
        let carried = unit.rend.take();
        unit.apply_damage(damage);
        bolt.transferred_stacks = bolt.transferred_stacks.saturating_add(carried + 1);

        state.score.record_damage(damage);
        state.push_cue(TrainerCue::Hit);
        state.float_text("Kill", position, FCT_ALERT_OFFSET, TEXT_GREEN);
        state.record_hit(PIERCE_NAME, handle, kind, damage, true);
        state.kill_unit(handle);
        return true;
    }

    unit.apply_damage(damage);
    unit.rend.add(1, tuning);

    state.score.record_damage(damage);
    state.push_cue(TrainerCue::Hit);
    state.float_text(format!("{:.0}", damage), position, FCT_DAMAGE_OFFSET, TEXT_GOLD);
    state.record_hit(PIERCE_NAME, handle, kind, damage, false);

    if bolt.rend_pending {
        detonate_pending(state, tuning, settings, handle);
    }
    false
}

fn strike_champion(state: &mut SimulationState, tuning: &Tuning, settings: &TrainerSettings, bolt: &PierceBolt) {
    let damage = formulas::pierce_damage(tuning, settings.pierce_level);
    let champion = state.units.champion_mut();
    champion.apply_damage(damage);
    champion.rend.add(1 + bolt.transferred_stacks, tuning);
    let position = champion.position;
    let kind = champion.kind;

    state.score.record_damage(damage);
    state.push_cue(TrainerCue::Hit);
    state.float_text(format!("{:.0}", damage), position, FCT_DAMAGE_OFFSET, TEXT_GOLD);
    state.record_hit(PIERCE_NAME, UnitHandle::Champion, kind, damage, false);

    if bolt.rend_pending {
        detonate_pending(state, tuning, settings, UnitHandle::Champion);
    }
}

/// Late Rend on the unit a pending spear just struck.
fn detonate_pending(state: &mut SimulationState, tuning: &Tuning, settings: &TrainerSettings, handle: UnitHandle) {
    let Some(outcome) = detonate_unit(state, tuning, settings, handle) else {
        return;
    };
    if outcome.killed {
        state.rend_cooldown = 0.0;
        let anchor = state.actor.position;
        state.float_text("Reset!", anchor, FCT_ALERT_OFFSET, TEXT_GREEN);
    }
}
