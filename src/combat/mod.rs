//! Combat bookkeeping shared by every front end
//!
//! - Combat logging and session export
//! - Simulation speed control

use bevy::prelude::*;

pub mod log;

/// Controls the speed of the trainer clock
#[derive(Resource)]
pub struct SimulationSpeed {
    /// Speed multiplier (0.0 = paused, 0.5 = half speed, 1.0 = normal, 2.0 = double)
    pub multiplier: f32,
}

impl Default for SimulationSpeed {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

impl SimulationSpeed {
    pub fn pause(&mut self) {
        self.multiplier = 0.0;
    }

    pub fn half_speed(&mut self) {
        self.multiplier = 0.5;
    }

    pub fn normal_speed(&mut self) {
        self.multiplier = 1.0;
    }

    pub fn double_speed(&mut self) {
        self.multiplier = 2.0;
    }

    pub fn is_paused(&self) -> bool {
        self.multiplier == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_presets() {
        let mut speed = SimulationSpeed::default();
        assert_eq!(speed.multiplier, 1.0);

        speed.pause();
        assert!(speed.is_paused());

        speed.half_speed();
        assert_eq!(speed.multiplier, 0.5);

        speed.double_speed();
        assert_eq!(speed.multiplier, 2.0);
    }
}
