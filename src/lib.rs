//! hoptrainer - Windup, dash-cancel and rend execution trainer
//!
//! A continuous-time simulation of one ranged champion's attack-cancel kit,
//! with a Bevy plugin for front ends and a headless drill runner.
//!
//! This library exposes the core trainer modules for testing and reuse.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod trainer;

// Re-export commonly used types
pub use combat::log::{CombatLog, CombatLogEventType};
pub use headless::HeadlessDrillConfig;
pub use trainer::{Simulation, TrainerIntent, TrainerSettings, Tuning};
