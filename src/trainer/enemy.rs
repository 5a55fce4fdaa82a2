//! Enemy Behavior
//!
//! In hostile mode the champion chases the player until it is in range, then
//! swings on a fixed interval.

use super::constants::*;
use super::events::TrainerCue;
use super::formulas;
use super::simulation::SimulationState;
use super::tuning::{TrainerSettings, Tuning};
use super::units::{UnitHandle, UnitKind};
use super::utils::unit_id;
use crate::combat::log::PLAYER_ID;

pub const ENEMY_ATTACK_NAME: &str = "Auto Attack";

/// Chase or attack. Returns true when this step killed the player.
pub(crate) fn step_enemy(state: &mut SimulationState, tuning: &Tuning, settings: &TrainerSettings, dt: f32) -> bool {
    if !state.hostile {
        return false;
    }

    let scale = tuning.scale_ratio();
    let player_position = state.actor.position;
    let player_radius = state.actor.radius;
    let champion = state.units.champion_mut();

    let engage_distance = settings.enemy_range * scale + champion.radius + player_radius;
    let to_player = player_position - champion.position;
    let distance = to_player.length();

    if distance > engage_distance {
        let step = (settings.enemy_speed * scale * dt).min(distance - engage_distance);
        champion.position += to_player / distance * step;
        return false;
    }

    champion.attack_timer -= dt;
    if champion.attack_timer > 0.0 {
        return false;
    }
    champion.attack_timer = tuning.enemy_attack_interval;

    let damage = formulas::mitigate(settings.enemy_ad, tuning.player_armor);
    state.actor.health -= damage;
    let died = state.actor.health <= 0.0;

    state.push_cue(TrainerCue::PlayerHurt);
    state.float_text(format!("-{:.0}", damage), player_position, FCT_DAMAGE_OFFSET, TEXT_SOFT_RED);

    let attacker = unit_id(UnitHandle::Champion, UnitKind::Champion);
    state.log.log_damage(
        attacker.clone(),
        PLAYER_ID.to_string(),
        ENEMY_ATTACK_NAME.to_string(),
        damage,
        died,
        format!("{}'s {} hits {} for {:.0} damage", attacker, ENEMY_ATTACK_NAME, PLAYER_ID, damage),
    );

    if died {
        state.push_cue(TrainerCue::PlayerDied);
        state
            .log
            .log_death(PLAYER_ID.to_string(), Some(attacker), format!("{} dies", PLAYER_ID));
    }
    died
}

/// Put the champion back on its spawn point with a fresh swing timer.
pub(crate) fn snap_home(state: &mut SimulationState, tuning: &Tuning) {
    let home = state.champion_spawn;
    let champion = state.units.champion_mut();
    champion.position = home;
    champion.attack_timer = tuning.enemy_attack_interval;
}
