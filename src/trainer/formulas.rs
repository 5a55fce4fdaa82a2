//! Formula Library
//!
//! Pure functions that turn the tuning table and the player's settings into
//! timings, speeds, distances and damage numbers. Nothing here touches the
//! simulation state.

use serde::{Deserialize, Serialize};

use super::tuning::Tuning;

/// Which dash table a queued dash draws its distance from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashDirection {
    /// Towards the target: short dash
    Forward,
    /// Away from or across the target: long dash
    Backward,
}

/// Seconds between committing to a basic attack and the bolt leaving.
///
/// Bonus attack speed only shortens the windup by `windup_modifier` of its
/// value, so the windup shrinks slower than the attack period does.
/// Precondition: `attack_speed > 0`.
pub fn windup_time(tuning: &Tuning, attack_speed: f32) -> f32 {
    debug_assert!(attack_speed > 0.0, "attack speed must be positive");
    let base_windup = (1.0 / tuning.base_attack_speed) * tuning.base_windup_fraction;
    let bonus = (attack_speed / tuning.base_attack_speed - 1.0).max(0.0);
    base_windup / (1.0 + bonus * tuning.windup_modifier)
}

/// Time left in the attack period after the windup.
pub fn attack_recovery_time(tuning: &Tuning, attack_speed: f32) -> f32 {
    (1.0 / attack_speed - windup_time(tuning, attack_speed)).max(0.0)
}

/// Movement speed in world units per second. Precondition: `boots_tier < 3`.
pub fn move_speed(tuning: &Tuning, boots_tier: usize) -> f32 {
    (tuning.base_move_speed + tuning.boots_move_speed[boots_tier]) * tuning.scale_ratio()
}

/// Dash length in world units for the boots tier and dash direction.
pub fn dash_distance(tuning: &Tuning, boots_tier: usize, direction: DashDirection) -> f32 {
    let table = match direction {
        DashDirection::Forward => &tuning.dash_forward,
        DashDirection::Backward => &tuning.dash_backward,
    };
    table[boots_tier] * tuning.scale_ratio()
}

/// Damage of one basic bolt. Targets are treated as unarmored.
pub fn basic_attack_damage(tuning: &Tuning) -> f32 {
    tuning.base_ad * tuning.damage_modifier
}

/// Apply armor mitigation to incoming damage.
pub fn mitigate(raw_damage: f32, armor: f32) -> f32 {
    raw_damage * 100.0 / (100.0 + armor)
}

/// Cast time scaled by attack speed: faster attacks mean faster casts.
pub fn cast_time(tuning: &Tuning, base_cast_time: f32, attack_speed: f32) -> f32 {
    base_cast_time / (attack_speed / tuning.base_attack_speed)
}

/// Flat Pierce damage at `level` (1-based).
pub fn pierce_damage(tuning: &Tuning, level: usize) -> f32 {
    tuning.pierce.base_damage[level - 1] + tuning.base_ad * tuning.pierce.ad_ratio
}

/// Rend damage against a unit holding `stacks` stacks. The first stack deals
/// the rank's base damage, every further stack adds a fixed AD share.
pub fn rend_damage(tuning: &Tuning, level: usize, stacks: u32) -> f32 {
    if stacks == 0 {
        return 0.0;
    }
    let first = tuning.rend.base_damage[level - 1] + tuning.base_ad * tuning.rend.ad_ratio;
    let per_stack = tuning.base_ad * tuning.rend.per_stack_ad_ratio;
    first + (stacks - 1) as f32 * per_stack
}

/// Rend cooldown at `level` (1-based).
pub fn rend_cooldown(tuning: &Tuning, level: usize) -> f32 {
    tuning.rend.cooldown[level - 1]
}

/// Classify a dash click against the direction of the current target.
///
/// Degenerate vectors (click on the actor, actor on the target) count as
/// backward.
pub fn classify_dash(
    tuning: &Tuning,
    to_click: bevy::math::Vec2,
    to_target: bevy::math::Vec2,
) -> DashDirection {
    let similarity = to_click
        .normalize_or_zero()
        .dot(to_target.normalize_or_zero());
    if similarity > tuning.forward_dash_threshold {
        DashDirection::Forward
    } else {
        DashDirection::Backward
    }
}
