//! Scoreboard
//!
//! Running totals shown by the trainer's score widget.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scoreboard {
    /// Attacks that were dash-cancelled
    pub hits: u32,
    /// Attacks that finished without a dash
    pub misses: u32,
    pub total_damage: f32,
    pub minions_killed: u32,
    /// Set by the first attack order of a session
    pub in_combat: bool,
    /// Seconds of simulation time since combat started
    pub combat_time: f32,
}

impl Scoreboard {
    pub fn start_combat(&mut self) {
        self.in_combat = true;
    }

    pub fn record_damage(&mut self, amount: f32) {
        self.total_damage += amount;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.in_combat {
            self.combat_time += dt;
        }
    }

    /// Damage per second, never dividing by less than one second.
    pub fn dps(&self) -> f32 {
        self.total_damage / self.combat_time.max(1.0)
    }

    /// Fraction of finished attacks that were dash-cancelled.
    pub fn hit_rate(&self) -> f32 {
        let attempts = self.hits + self.misses;
        if attempts == 0 {
            return 0.0;
        }
        self.hits as f32 / attempts as f32
    }
}
