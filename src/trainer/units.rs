//! Unit Store
//!
//! Owns the champion/dummy and the minion wave. Minions live in a
//! generational slot arena so projectiles and the actor can hold a
//! [`UnitHandle`] that simply stops resolving once the minion dies or the
//! wave is rebuilt.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::constants::*;
use super::rend::RendStacks;

/// Kinds of damageable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Champion,
    MeleeMinion,
    CasterMinion,
}

impl UnitKind {
    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Champion => "Champion",
            UnitKind::MeleeMinion => "Melee Minion",
            UnitKind::CasterMinion => "Caster Minion",
        }
    }

    pub fn base_health(&self) -> f32 {
        match self {
            UnitKind::Champion => CHAMPION_HEALTH,
            UnitKind::MeleeMinion => MELEE_MINION_HEALTH,
            UnitKind::CasterMinion => CASTER_MINION_HEALTH,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            UnitKind::Champion => CHAMPION_RADIUS,
            UnitKind::MeleeMinion | UnitKind::CasterMinion => MINION_RADIUS,
        }
    }

    pub fn is_minion(&self) -> bool {
        !matches!(self, UnitKind::Champion)
    }
}

/// Stable reference to a unit. The champion handle always resolves; minion
/// handles carry the slot generation they were issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitHandle {
    Champion,
    Minion { index: u32, generation: u32 },
}

/// A damageable unit.
#[derive(Debug, Clone)]
pub struct Unit {
    pub kind: UnitKind,
    pub position: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub rend: RendStacks,
    /// Damage received since the last reset
    pub damage_taken: f32,
    /// Hostile-mode swing timer (champion only)
    pub attack_timer: f32,
}

impl Unit {
    pub fn new(kind: UnitKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            radius: kind.radius(),
            health: kind.base_health(),
            max_health: kind.base_health(),
            rend: RendStacks::default(),
            damage_taken: 0.0,
            attack_timer: 0.0,
        }
    }

    pub fn is_champion(&self) -> bool {
        self.kind == UnitKind::Champion
    }

    /// Apply damage and report whether the unit died.
    ///
    /// The champion is a training dummy: it records the damage but never loses
    /// health.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        debug_assert!(amount >= 0.0, "damage cannot be negative, got {}", amount);
        self.damage_taken += amount;
        if self.is_champion() {
            return false;
        }
        self.health -= amount;
        self.health <= 0.0
    }

    /// Distance from `point` to this unit's centre.
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    unit: Option<Unit>,
}

/// Arena of units.
#[derive(Debug, Clone)]
pub struct UnitStore {
    champion: Unit,
    minions: Vec<Slot>,
}

impl UnitStore {
    pub fn new(champion_position: Vec2) -> Self {
        Self {
            champion: Unit::new(UnitKind::Champion, champion_position),
            minions: Vec::new(),
        }
    }

    pub fn champion(&self) -> &Unit {
        &self.champion
    }

    pub fn champion_mut(&mut self) -> &mut Unit {
        &mut self.champion
    }

    pub fn get(&self, handle: UnitHandle) -> Option<&Unit> {
        match handle {
            UnitHandle::Champion => Some(&self.champion),
            UnitHandle::Minion { index, generation } => self
                .minions
                .get(index as usize)
                .filter(|slot| slot.generation == generation)
                .and_then(|slot| slot.unit.as_ref()),
        }
    }

    pub fn get_mut(&mut self, handle: UnitHandle) -> Option<&mut Unit> {
        match handle {
            UnitHandle::Champion => Some(&mut self.champion),
            UnitHandle::Minion { index, generation } => self
                .minions
                .get_mut(index as usize)
                .filter(|slot| slot.generation == generation)
                .and_then(|slot| slot.unit.as_mut()),
        }
    }

    pub fn contains(&self, handle: UnitHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Place a minion in the first free slot.
    pub fn spawn_minion(&mut self, unit: Unit) -> UnitHandle {
        debug_assert!(unit.kind.is_minion(), "only minions live in slots");
        let index = match self.minions.iter().position(|slot| slot.unit.is_none()) {
            Some(index) => index,
            None => {
                self.minions.push(Slot::default());
                self.minions.len() - 1
            }
        };
        let slot = &mut self.minions[index];
        slot.unit = Some(unit);
        UnitHandle::Minion {
            index: index as u32,
            generation: slot.generation,
        }
    }

    /// Remove a minion. Its slot generation advances so outstanding handles
    /// stop resolving. The champion cannot be removed.
    pub fn remove(&mut self, handle: UnitHandle) -> Option<Unit> {
        let UnitHandle::Minion { index, generation } = handle else {
            return None;
        };
        let slot = self.minions.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        let unit = slot.unit.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        Some(unit)
    }

    /// Remove every minion.
    pub fn clear_minions(&mut self) {
        for slot in self.minions.iter_mut() {
            if slot.unit.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
    }

    /// Live minion count.
    pub fn minion_count(&self) -> usize {
        self.minions.iter().filter(|slot| slot.unit.is_some()).count()
    }

    /// Champion first, then minions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitHandle, &Unit)> {
        std::iter::once((UnitHandle::Champion, &self.champion)).chain(self.minions())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (UnitHandle, &mut Unit)> {
        let minions = self.minions.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.unit.as_mut().map(|unit| {
                (
                    UnitHandle::Minion {
                        index: index as u32,
                        generation,
                    },
                    unit,
                )
            })
        });
        std::iter::once((UnitHandle::Champion, &mut self.champion)).chain(minions)
    }

    /// Live minions in slot order.
    pub fn minions(&self) -> impl DoubleEndedIterator<Item = (UnitHandle, &Unit)> {
        self.minions.iter().enumerate().filter_map(|(index, slot)| {
            slot.unit.as_ref().map(|unit| {
                (
                    UnitHandle::Minion {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    unit,
                )
            })
        })
    }

    /// Look a unit up by its place in the reset formation: melee `0..3`,
    /// casters `0..3`. Returns `None` once that minion has died.
    pub fn formation_unit(&self, kind: UnitKind, index: usize) -> Option<UnitHandle> {
        let slot_index = match kind {
            UnitKind::Champion => return Some(UnitHandle::Champion),
            UnitKind::MeleeMinion if index < MINIONS_PER_ROW => index,
            UnitKind::CasterMinion if index < MINIONS_PER_ROW => MINIONS_PER_ROW + index,
            _ => return None,
        };
        let slot = self.minions.get(slot_index)?;
        let unit = slot.unit.as_ref()?;
        (unit.kind == kind).then_some(UnitHandle::Minion {
            index: slot_index as u32,
            generation: slot.generation,
        })
    }
}

/// Rebuild the minion wave in front of the champion: a melee row nearer the
/// player and a caster row behind it.
pub fn spawn_wave(store: &mut UnitStore) -> SmallVec<[UnitHandle; 6]> {
    store.clear_minions();
    let anchor = store.champion().position;
    let mut handles = SmallVec::new();

    for i in 0..MINIONS_PER_ROW {
        let position = Vec2::new(
            anchor.x + MELEE_ROW_OFFSET_X,
            anchor.y - MINION_ROW_SPACING + i as f32 * MINION_ROW_SPACING,
        );
        handles.push(store.spawn_minion(Unit::new(UnitKind::MeleeMinion, position)));
    }

    for i in 0..MINIONS_PER_ROW {
        let position = Vec2::new(
            anchor.x + CASTER_ROW_OFFSET_X,
            anchor.y - MINION_ROW_SPACING + i as f32 * MINION_ROW_SPACING + CASTER_ROW_OFFSET_Y,
        );
        handles.push(store.spawn_minion(Unit::new(UnitKind::CasterMinion, position)));
    }

    handles
}
