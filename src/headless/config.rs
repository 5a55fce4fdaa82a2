//! JSON configuration parsing for headless mode
//!
//! A drill is a list of timestamped orders plus the player settings they run
//! under. Unit targets are given by formation slot so a drill file never has
//! to know about handles.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::trainer::constants::MINIONS_PER_ROW;
use crate::trainer::tuning::{BOOTS_TIERS, MAX_ABILITY_LEVEL};
use crate::trainer::{Simulation, TrainerIntent, TrainerSettings, UnitHandle, UnitKind};
use bevy::math::Vec2;

/// Headless drill configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessDrillConfig {
    /// Player settings (attack speed, boots, ability levels, enemy stats)
    #[serde(default)]
    pub settings: TrainerSettings,
    /// Start with the champion hunting the player
    #[serde(default)]
    pub hostile: bool,
    /// RON tuning table to load instead of the default one
    #[serde(default)]
    pub tuning_path: Option<String>,
    /// Write the combat log here when the drill ends
    #[serde(default)]
    pub output_path: Option<String>,
    /// Simulation seconds before the drill stops (default: 30)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Fixed updates per simulated second (default: 60)
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
    /// Route Bevy's log output to the console
    #[serde(default)]
    pub log_to_console: bool,
    /// Orders, fired once the simulation clock reaches `at_secs`
    #[serde(default)]
    pub script: Vec<ScriptedIntent>,
}

fn default_max_duration() -> f32 {
    30.0
}

fn default_tick_rate() -> f32 {
    60.0
}

/// One timestamped order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedIntent {
    pub at_secs: f32,
    #[serde(flatten)]
    pub action: ScriptAction,
}

/// Drill-file form of a [`TrainerIntent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ScriptAction {
    MoveTo { x: f32, y: f32 },
    Attack { target: UnitRef },
    AttackMove { x: f32, y: f32 },
    Stop,
    CastPierce { x: f32, y: f32 },
    CastBurst,
    ToggleHostile,
    Reset,
}

/// A unit named by its place in the reset formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitRef {
    Champion,
    /// Melee row slot, 0-based
    Melee(usize),
    /// Caster row slot, 0-based
    Caster(usize),
}

impl UnitRef {
    /// Resolve against the live wave. `None` once that minion has died.
    pub fn resolve(&self, simulation: &Simulation) -> Option<UnitHandle> {
        match *self {
            UnitRef::Champion => Some(UnitHandle::Champion),
            UnitRef::Melee(slot) => simulation.formation_unit(UnitKind::MeleeMinion, slot),
            UnitRef::Caster(slot) => simulation.formation_unit(UnitKind::CasterMinion, slot),
        }
    }
}

impl ScriptAction {
    /// Convert to an intent. Attacks on dead minions resolve to `None`.
    pub fn to_intent(&self, simulation: &Simulation) -> Option<TrainerIntent> {
        let intent = match *self {
            ScriptAction::MoveTo { x, y } => TrainerIntent::MoveTo(Vec2::new(x, y)),
            ScriptAction::Attack { target } => TrainerIntent::Attack(target.resolve(simulation)?),
            ScriptAction::AttackMove { x, y } => TrainerIntent::AttackMove(Vec2::new(x, y)),
            ScriptAction::Stop => TrainerIntent::Stop,
            ScriptAction::CastPierce { x, y } => TrainerIntent::CastPierce { aim: Vec2::new(x, y) },
            ScriptAction::CastBurst => TrainerIntent::CastBurst,
            ScriptAction::ToggleHostile => TrainerIntent::ToggleHostile,
            ScriptAction::Reset => TrainerIntent::Reset,
        };
        Some(intent)
    }

    fn point(&self) -> Option<(f32, f32)> {
        match *self {
            ScriptAction::MoveTo { x, y }
            | ScriptAction::AttackMove { x, y }
            | ScriptAction::CastPierce { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

impl Default for HeadlessDrillConfig {
    fn default() -> Self {
        Self {
            settings: TrainerSettings::default(),
            hostile: false,
            tuning_path: None,
            output_path: None,
            max_duration_secs: default_max_duration(),
            tick_rate: default_tick_rate(),
            log_to_console: false,
            script: Vec::new(),
        }
    }
}

impl HeadlessDrillConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessDrillConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// The drill used when no file is given: walk in, hop off a minion,
    /// Pierce through the wave and Rend.
    pub fn built_in() -> Self {
        let at = |at_secs: f32, action: ScriptAction| ScriptedIntent { at_secs, action };
        Self {
            max_duration_secs: 8.0,
            script: vec![
                at(0.0, ScriptAction::Attack { target: UnitRef::Champion }),
                at(1.4, ScriptAction::MoveTo { x: 560.0, y: 450.0 }),
                at(2.5, ScriptAction::Attack { target: UnitRef::Melee(1) }),
                at(2.9, ScriptAction::MoveTo { x: 600.0, y: 380.0 }),
                at(4.0, ScriptAction::CastPierce { x: 1120.0, y: 450.0 }),
                at(4.1, ScriptAction::MoveTo { x: 500.0, y: 450.0 }),
                at(5.0, ScriptAction::CastBurst),
            ],
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let settings = &self.settings;
        if !(settings.attack_speed > 0.0) {
            return Err(format!(
                "settings.attack_speed must be positive, got {}",
                settings.attack_speed
            ));
        }
        if settings.boots_tier >= BOOTS_TIERS {
            return Err(format!(
                "settings.boots_tier {} is out of range (0-{})",
                settings.boots_tier,
                BOOTS_TIERS - 1
            ));
        }
        for (name, level) in [
            ("pierce_level", settings.pierce_level),
            ("rend_level", settings.rend_level),
        ] {
            if !(1..=MAX_ABILITY_LEVEL).contains(&level) {
                return Err(format!(
                    "settings.{} {} is out of range (1-{})",
                    name, level, MAX_ABILITY_LEVEL
                ));
            }
        }
        for (name, value) in [
            ("enemy_speed", settings.enemy_speed),
            ("enemy_ad", settings.enemy_ad),
            ("enemy_range", settings.enemy_range),
        ] {
            if !(value >= 0.0) {
                return Err(format!("settings.{} must not be negative, got {}", name, value));
            }
        }

        if !(self.max_duration_secs > 0.0) {
            return Err("max_duration_secs must be positive".to_string());
        }
        if !(self.tick_rate > 0.0 && self.tick_rate <= 1000.0) {
            return Err(format!("tick_rate must be in (0, 1000], got {}", self.tick_rate));
        }

        for (i, step) in self.script.iter().enumerate() {
            if !(step.at_secs >= 0.0) || !step.at_secs.is_finite() {
                return Err(format!("script[{}].at_secs must be a non-negative number", i));
            }
            if let Some((x, y)) = step.action.point() {
                if !x.is_finite() || !y.is_finite() {
                    return Err(format!("script[{}] has a non-finite point", i));
                }
            }
            if let ScriptAction::Attack {
                target: UnitRef::Melee(slot) | UnitRef::Caster(slot),
            } = step.action
            {
                if slot >= MINIONS_PER_ROW {
                    return Err(format!(
                        "script[{}] targets slot {} (rows have {} minions)",
                        i, slot, MINIONS_PER_ROW
                    ));
                }
            }
        }

        Ok(())
    }
}
