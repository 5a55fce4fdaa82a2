//! Trainer
//!
//! Continuous-time simulation of one ranged champion's attack-cancel kit:
//! windup-gated basic attacks that can be cancelled into a dash, the Pierce
//! skillshot and the Rend stack detonation, played against a dummy champion
//! and a minion wave.

pub mod actor;
pub mod constants;
pub mod enemy;
pub mod events;
pub mod floating_text;
pub mod formulas;
pub mod projectiles;
pub mod rend;
pub mod score;
pub mod simulation;
pub mod snapshot;
pub mod systems;
pub mod tuning;
pub mod units;
pub mod utils;

pub use actor::{Actor, ActorState, CastKind, QueuedDash};
pub use events::{IntentRejection, TrainerCue, TrainerIntent};
pub use formulas::DashDirection;
pub use simulation::{Simulation, SimulationState};
pub use snapshot::TrainerSnapshot;
pub use systems::{TrainerPlugin, TrainerSystemPhase};
pub use tuning::{TrainerSettings, Tuning, TuningError};
pub use units::{Unit, UnitHandle, UnitKind, UnitStore};
