//! Trainer events
//!
//! Intents flow into the simulation, cues flow out of it. Both are plain
//! enums so any front end (a window, a test, the headless runner) can drive
//! and observe the trainer.

use bevy::math::Vec2;
use bevy::prelude::Event;
use serde::Serialize;
use thiserror::Error;

use super::units::UnitHandle;

/// Orders from the input layer.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum TrainerIntent {
    /// Right click on the ground. Walks, or queues a dash during a cast.
    MoveTo(Vec2),
    /// Right click on a unit.
    Attack(UnitHandle),
    /// Attack-move click on the ground.
    AttackMove(Vec2),
    Stop,
    /// Fire Pierce towards the aim point.
    CastPierce { aim: Vec2 },
    CastBurst,
    ToggleHostile,
    /// Full session reset.
    Reset,
}

/// Why an intent was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
pub enum IntentRejection {
    #[error("on cooldown")]
    OnCooldown,
    #[error("out of range")]
    OutOfRange,
    #[error("no stacks")]
    NoStacks,
    #[error("no target")]
    NoTarget,
    /// Another cast or a dash is in progress
    #[error("busy")]
    Busy,
}

/// Fire-and-forget notifications for audio and UI feedback.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrainerCue {
    BoltLaunched,
    Dash,
    Hit,
    /// The Pierce spear left the actor's hand
    PierceCast,
    Burst,
    PlayerHurt,
    PlayerDied,
    Reset,
}
