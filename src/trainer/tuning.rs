//! Data-Driven Trainer Tuning
//!
//! Every number that shapes the drill (attack timings, ranges, ability
//! tables) is defined in `assets/config/trainer.ron`. A built-in copy of the
//! same table is used when the file is missing so tests and the headless
//! runner never depend on the working directory.
//!
//! ## Usage
//! ```ignore
//! let tuning = Tuning::load_or_default(None);
//! let windup = formulas::windup_time(&tuning, 0.8);
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::constants::REFERENCE_ATTACK_RANGE;

/// Default location of the tuning table, relative to the working directory.
pub const DEFAULT_TUNING_PATH: &str = "assets/config/trainer.ron";

/// Highest ability rank.
pub const MAX_ABILITY_LEVEL: usize = 5;

/// Number of boots tiers (no boots, tier 1, tier 2).
pub const BOOTS_TIERS: usize = 3;

/// Errors raised while loading a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Pierce (linear skillshot) parameters. Distances are in game units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PierceTuning {
    pub cooldown: f32,
    /// Cast time at base attack speed
    pub cast_time: f32,
    pub range: f32,
    pub speed: f32,
    /// Extra hit radius added to a minion's collision radius
    pub minion_hit_allowance: f32,
    /// Extra hit radius added to the champion's collision radius
    pub champion_hit_allowance: f32,
    /// Flat damage per rank
    pub base_damage: Vec<f32>,
    pub ad_ratio: f32,
}

/// Rend (stack detonation) parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RendTuning {
    /// Cooldown per rank
    pub cooldown: Vec<f32>,
    pub range: f32,
    /// Flat damage per rank for the first stack
    pub base_damage: Vec<f32>,
    pub ad_ratio: f32,
    /// AD ratio for every stack after the first
    pub per_stack_ad_ratio: f32,
    /// Seconds a stack survives without being refreshed
    pub stack_duration: f32,
    pub max_stacks: u32,
}

/// The complete constant table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Basic attack ===
    pub base_attack_speed: f32,
    /// Fraction of the base attack period spent winding up
    pub base_windup_fraction: f32,
    /// How strongly bonus attack speed shortens the windup
    pub windup_modifier: f32,
    /// Attack range in world units
    pub attack_range: f32,
    /// Slack added to the attack range when an attack order is issued
    pub attack_range_tolerance: f32,
    pub base_ad: f32,
    pub damage_modifier: f32,
    /// Basic bolt speed in world units per second
    pub bolt_speed: f32,
    pub bolt_lifetime: f32,

    // === Movement ===
    pub base_move_speed: f32,
    /// Flat move speed bonus per boots tier
    pub boots_move_speed: Vec<f32>,
    /// Short dash distance per boots tier (game units)
    pub dash_forward: Vec<f32>,
    /// Long dash distance per boots tier (game units)
    pub dash_backward: Vec<f32>,
    pub dash_duration: f32,
    /// Cosine similarity above which a dash counts as forward
    pub forward_dash_threshold: f32,

    // === Player ===
    pub player_max_health: f32,
    pub player_max_mana: f32,
    pub player_armor: f32,

    // === Abilities ===
    pub pierce: PierceTuning,
    pub rend: RendTuning,

    // === Hostile champion ===
    pub enemy_attack_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_attack_speed: 0.694,
            base_windup_fraction: 0.36,
            windup_modifier: 0.75,
            attack_range: 250.0,
            attack_range_tolerance: 20.0,
            base_ad: 100.0,
            damage_modifier: 0.9,
            bolt_speed: 1400.0,
            bolt_lifetime: 2.0,
            base_move_speed: 325.0,
            boots_move_speed: vec![0.0, 25.0, 45.0],
            dash_forward: vec![150.0, 165.0, 180.0],
            dash_backward: vec![250.0, 265.0, 280.0],
            dash_duration: 0.25,
            forward_dash_threshold: 0.3,
            player_max_health: 1000.0,
            player_max_mana: 300.0,
            player_armor: 24.0,
            pierce: PierceTuning {
                cooldown: 1.0,
                cast_time: 0.25,
                range: 1200.0,
                speed: 2400.0,
                minion_hit_allowance: 10.0,
                champion_hit_allowance: 20.0,
                base_damage: vec![10.0, 75.0, 140.0, 205.0, 270.0],
                ad_ratio: 1.05,
            },
            rend: RendTuning {
                cooldown: vec![10.0, 9.5, 9.0, 8.5, 8.0],
                range: 1100.0,
                base_damage: vec![5.0, 15.0, 25.0, 35.0, 45.0],
                ad_ratio: 0.7,
                per_stack_ad_ratio: 0.3,
                stack_duration: 4.0,
                max_stacks: 254,
            },
            enemy_attack_interval: 1.0,
        }
    }
}

impl Tuning {
    /// Conversion factor from game units to world units.
    pub fn scale_ratio(&self) -> f32 {
        self.attack_range / REFERENCE_ATTACK_RANGE
    }

    /// Load and validate a tuning table from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self, TuningError> {
        let path_str = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path_str.clone(),
            source,
        })?;
        let tuning: Tuning = ron::from_str(&contents).map_err(|source| TuningError::Parse {
            path: path_str.clone(),
            source,
        })?;
        tuning.validate()?;
        info!("Loaded trainer tuning from {}", path_str);
        Ok(tuning)
    }

    /// Load `path` (or [`DEFAULT_TUNING_PATH`] when it exists), falling back to
    /// the built-in table on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_TUNING_PATH).exists() => Path::new(DEFAULT_TUNING_PATH),
            None => {
                debug!("No tuning file found, using built-in table");
                return Self::default();
            }
        };

        match Self::load_from_file(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                warn!("{}; using built-in table", e);
                Self::default()
            }
        }
    }

    /// Check table shapes and signs.
    pub fn validate(&self) -> Result<(), TuningError> {
        let per_tier = [
            ("boots_move_speed", &self.boots_move_speed),
            ("dash_forward", &self.dash_forward),
            ("dash_backward", &self.dash_backward),
        ];
        for (name, table) in per_tier {
            if table.len() != BOOTS_TIERS {
                return Err(TuningError::Invalid(format!(
                    "{} needs {} entries, found {}",
                    name,
                    BOOTS_TIERS,
                    table.len()
                )));
            }
        }

        let per_rank = [
            ("pierce.base_damage", &self.pierce.base_damage),
            ("rend.cooldown", &self.rend.cooldown),
            ("rend.base_damage", &self.rend.base_damage),
        ];
        for (name, table) in per_rank {
            if table.len() != MAX_ABILITY_LEVEL {
                return Err(TuningError::Invalid(format!(
                    "{} needs {} entries, found {}",
                    name,
                    MAX_ABILITY_LEVEL,
                    table.len()
                )));
            }
        }

        let positive = [
            ("base_attack_speed", self.base_attack_speed),
            ("attack_range", self.attack_range),
            ("bolt_speed", self.bolt_speed),
            ("bolt_lifetime", self.bolt_lifetime),
            ("dash_duration", self.dash_duration),
            ("pierce.speed", self.pierce.speed),
            ("pierce.range", self.pierce.range),
            ("rend.stack_duration", self.rend.stack_duration),
            ("enemy_attack_interval", self.enemy_attack_interval),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.rend.max_stacks == 0 {
            return Err(TuningError::Invalid("rend.max_stacks must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// Player-adjustable settings (the sliders of the trainer).
///
/// Preconditions, not checked by the simulation: `attack_speed > 0`,
/// `boots_tier < 3`, ability levels in `1..=5`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerSettings {
    pub attack_speed: f32,
    pub boots_tier: usize,
    pub pierce_level: usize,
    pub rend_level: usize,
    /// Hostile champion move speed (game units per second)
    pub enemy_speed: f32,
    /// Hostile champion attack damage before mitigation
    pub enemy_ad: f32,
    /// Hostile champion attack range (game units)
    pub enemy_range: f32,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            attack_speed: 0.694,
            boots_tier: 2,
            pierce_level: 1,
            rend_level: 1,
            enemy_speed: 340.0,
            enemy_ad: 60.0,
            enemy_range: 150.0,
        }
    }
}

impl TrainerSettings {
    pub(crate) fn debug_check(&self) {
        debug_assert!(self.attack_speed > 0.0, "attack speed must be positive");
        debug_assert!(self.boots_tier < BOOTS_TIERS, "boots tier out of range");
        debug_assert!(
            (1..=MAX_ABILITY_LEVEL).contains(&self.pierce_level),
            "pierce level out of range"
        );
        debug_assert!(
            (1..=MAX_ABILITY_LEVEL).contains(&self.rend_level),
            "rend level out of range"
        );
    }
}
