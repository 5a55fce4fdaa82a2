//! Headless mode for scripted drills
//!
//! Runs the trainer without any graphical output, driven by a JSON drill,
//! suitable for automated testing and practice-plan checks.
//!
//! ## Usage
//!
//! ```bash
//! # Run a drill
//! cargo run --release -- --headless drill.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "settings": { "attack_speed": 0.9, "boots_tier": 2 },
//!   "max_duration_secs": 10,
//!   "script": [
//!     { "at_secs": 0.0, "action": "Attack", "target": "Champion" },
//!     { "at_secs": 1.6, "action": "MoveTo", "x": 520, "y": 450 },
//!     { "at_secs": 3.0, "action": "CastBurst" }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{HeadlessDrillConfig, ScriptAction, ScriptedIntent, UnitRef};
pub use runner::{run_headless_session, SessionResult};
