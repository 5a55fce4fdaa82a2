//! Rend: stacking debuff and its detonation
//!
//! Every bolt that lands leaves a spear in the target. Spears expire all at
//! once when their shared timer lapses, and Rend rips out every spear on
//! every unit at the same time.

use serde::Serialize;
use smallvec::SmallVec;

use super::constants::{FCT_ALERT_OFFSET, FCT_CAST_OFFSET, FCT_NOTICE_OFFSET, TEXT_GREEN, TEXT_RED, TEXT_SLATE};
use super::events::{IntentRejection, TrainerCue};
use super::formulas;
use super::simulation::SimulationState;
use super::tuning::{TrainerSettings, Tuning};
use super::units::{Unit, UnitHandle};
use crate::combat::log::PLAYER_ID;

pub const REND_NAME: &str = "Rend";

/// Per-unit stack counter with a shared decay timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RendStacks {
    count: u32,
    timer: f32,
}

impl RendStacks {
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Seconds until every stack falls off.
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Add stacks, saturating at the cap, and refresh the decay timer.
    pub fn add(&mut self, stacks: u32, tuning: &Tuning) {
        self.count = self.count.saturating_add(stacks).min(tuning.rend.max_stacks);
        self.timer = tuning.rend.stack_duration;
    }

    /// Count the timer down. Returns true when the stacks just expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.count == 0 {
            return false;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.clear();
            return true;
        }
        false
    }

    /// Remove every stack, returning how many there were.
    pub fn take(&mut self) -> u32 {
        let count = self.count;
        self.clear();
        count
    }

    pub fn clear(&mut self) {
        self.count = 0;
        self.timer = 0.0;
    }
}

/// Result of ripping the spears out of one unit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Detonation {
    pub damage: f32,
    pub killed: bool,
}

/// Detonate the stacks on a single unit. Returns `None` if it has none.
pub(crate) fn detonate(unit: &mut Unit, tuning: &Tuning, level: usize) -> Option<Detonation> {
    let stacks = unit.rend.take();
    if stacks == 0 {
        return None;
    }
    let damage = formulas::rend_damage(tuning, level, stacks);
    let killed = unit.apply_damage(damage);
    Some(Detonation { damage, killed })
}

/// Tick every unit's stacks.
pub(crate) fn decay_stacks(state: &mut SimulationState, dt: f32) {
    for (_, unit) in state.units.iter_mut() {
        unit.rend.tick(dt);
    }
}

/// Pick the unit Rend is aimed at: the current attack target while it lives,
/// the champion otherwise.
fn primary_target(state: &SimulationState) -> UnitHandle {
    state
        .actor
        .attack_target
        .filter(|handle| state.units.contains(*handle))
        .unwrap_or(UnitHandle::Champion)
}

/// Cast Rend.
pub(crate) fn cast_rend(
    state: &mut SimulationState,
    tuning: &Tuning,
    settings: &TrainerSettings,
) -> Result<(), IntentRejection> {
    if state.rend_cooldown > 0.0 {
        return Err(IntentRejection::OnCooldown);
    }

    let primary = primary_target(state);
    let Some(primary_unit) = state.units.get(primary) else {
        return Err(IntentRejection::NoTarget);
    };
    if primary_unit.rend.is_empty() {
        return Err(IntentRejection::NoStacks);
    }
    let range = tuning.rend.range * tuning.scale_ratio();
    if primary_unit.position.distance(state.actor.position) > range {
        return Err(IntentRejection::OutOfRange);
    }

    state.push_cue(TrainerCue::Burst);
    state.rend_cooldown = formulas::rend_cooldown(tuning, settings.rend_level);
    state.log.log_ability(PLAYER_ID.to_string(), REND_NAME.to_string());

    let stacked: SmallVec<[UnitHandle; 8]> = state
        .units
        .iter()
        .filter(|(_, unit)| !unit.rend.is_empty())
        .map(|(handle, _)| handle)
        .collect();

    let mut detonated = 0;
    let mut killed_any = false;
    for handle in stacked {
        if let Some(outcome) = detonate_unit(state, tuning, settings, handle) {
            detonated += 1;
            killed_any |= outcome.killed;
        }
    }

    if killed_any {
        state.rend_cooldown = 0.0;
        let anchor = state.actor.position;
        state.float_text("Reset!", anchor, FCT_ALERT_OFFSET, TEXT_GREEN);
    }

    for bolt in state.pierce_bolts.iter_mut() {
        bolt.rend_pending = true;
    }

    if detonated == 0 && state.pierce_bolts.is_empty() {
        let anchor = state.actor.position;
        state.float_text("Miss", anchor, FCT_NOTICE_OFFSET, TEXT_SLATE);
    }

    Ok(())
}

/// Detonate one unit's stacks, record the damage, and remove the unit if the
/// detonation killed a minion.
pub(crate) fn detonate_unit(
    state: &mut SimulationState,
    tuning: &Tuning,
    settings: &TrainerSettings,
    handle: UnitHandle,
) -> Option<Detonation> {
    let unit = state.units.get_mut(handle)?;
    let outcome = detonate(unit, tuning, settings.rend_level)?;
    let position = unit.position;
    let kind = unit.kind;

    state.score.record_damage(outcome.damage);
    state.float_text(format!("{:.0}!", outcome.damage.floor()), position, FCT_CAST_OFFSET, TEXT_RED);
    state.record_hit(REND_NAME, handle, kind, outcome.damage, outcome.killed);

    if outcome.killed {
        state.kill_unit(handle);
    }
    Some(outcome)
}
