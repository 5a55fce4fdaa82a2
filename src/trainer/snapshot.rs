//! Read-only view of the trainer for renderers and exported drills.

use bevy::math::Vec2;
use serde::Serialize;

use super::floating_text::FloatingText;
use super::formulas::DashDirection;
use super::simulation::SimulationState;
use super::score::Scoreboard;
use super::units::{UnitHandle, UnitKind};

#[derive(Debug, Clone, Serialize)]
pub struct ActorSnapshot {
    pub position: Vec2,
    pub facing: f32,
    /// `IDLE`, `WALKING`, `WINDUP`, `CASTING_PIERCE`, `DASHING` or `COOLDOWN`
    pub state: &'static str,
    pub timer: f32,
    pub queued_dash: Option<DashDirection>,
    pub attack_target: Option<UnitHandle>,
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitSnapshot {
    pub handle: UnitHandle,
    pub kind: UnitKind,
    pub position: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub stacks: u32,
    pub stack_timer: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoltSnapshot {
    pub position: Vec2,
    /// Heading for Pierce spears, zero for homing bolts
    pub velocity: Vec2,
    pub rend_pending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainerSnapshot {
    pub time: f32,
    pub actor: ActorSnapshot,
    pub units: Vec<UnitSnapshot>,
    pub basic_bolts: Vec<BoltSnapshot>,
    pub pierce_bolts: Vec<BoltSnapshot>,
    pub floating_texts: Vec<FloatingText>,
    pub pierce_cooldown: f32,
    pub rend_cooldown: f32,
    pub hostile: bool,
    pub score: Scoreboard,
    pub dps: f32,
}

impl TrainerSnapshot {
    pub(crate) fn capture(state: &SimulationState) -> Self {
        let actor = &state.actor;
        Self {
            time: state.clock,
            actor: ActorSnapshot {
                position: actor.position,
                facing: actor.facing,
                state: actor.state.label(),
                timer: actor.timer,
                queued_dash: actor.queued_dash.map(|dash| dash.direction),
                attack_target: actor.attack_target.filter(|handle| state.units.contains(*handle)),
                health: actor.health,
                max_health: actor.max_health,
                mana: actor.mana,
                max_mana: actor.max_mana,
                radius: actor.radius,
            },
            units: state
                .units
                .iter()
                .map(|(handle, unit)| UnitSnapshot {
                    handle,
                    kind: unit.kind,
                    position: unit.position,
                    radius: unit.radius,
                    health: unit.health,
                    max_health: unit.max_health,
                    stacks: unit.rend.count(),
                    stack_timer: unit.rend.remaining(),
                })
                .collect(),
            basic_bolts: state
                .basic_bolts
                .iter()
                .map(|bolt| BoltSnapshot {
                    position: bolt.position,
                    velocity: Vec2::ZERO,
                    rend_pending: false,
                })
                .collect(),
            pierce_bolts: state
                .pierce_bolts
                .iter()
                .map(|bolt| BoltSnapshot {
                    position: bolt.position,
                    velocity: bolt.velocity,
                    rend_pending: bolt.rend_pending,
                })
                .collect(),
            floating_texts: state.floating_texts.clone(),
            pierce_cooldown: state.pierce_cooldown,
            rend_cooldown: state.rend_cooldown,
            hostile: state.hostile,
            score: state.score.clone(),
            dps: state.score.dps(),
        }
    }
}
