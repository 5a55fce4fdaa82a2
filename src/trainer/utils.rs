//! Shared Utility Functions
//!
//! Small helpers used by several trainer modules.

use bevy::math::Vec2;

use super::units::{UnitHandle, UnitKind};
use crate::combat::log::CombatantId;

/// Helper to generate a consistent unit ID for the combat log.
///
/// Format: "Champion" or "{kind} #{slot}" e.g. "Caster Minion #4"
pub fn unit_id(handle: UnitHandle, kind: UnitKind) -> CombatantId {
    match handle {
        UnitHandle::Champion => kind.name().to_string(),
        UnitHandle::Minion { index, .. } => format!("{} #{}", kind.name(), index + 1),
    }
}

/// Angle in radians of the vector from `from` to `to`.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Unit vector for an angle in radians.
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
