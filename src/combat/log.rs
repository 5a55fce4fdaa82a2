//! Combat logging
//!
//! Records every hit, kill, cast and refused order for display and
//! post-session analysis.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::trainer::IntentRejection;

/// Identifier used for sources and targets in the log ("Player",
/// "Champion", "Melee Minion #2").
pub type CombatantId = String;

pub const PLAYER_ID: &str = "Player";

/// Where an exported session log goes when no path is given.
pub const DEFAULT_LOG_PATH: &str = "hoptrainer_session.json";

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Timestamp in simulation seconds since the trainer was created
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Machine-readable payload for queries
    pub data: Option<StructuredEventData>,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// Damage dealt
    Damage,
    /// Ability used
    AbilityUsed,
    /// Unit died
    Death,
    /// An order was refused
    Rejected,
    /// Session event (start, reset, hostile toggle)
    SessionEvent,
}

/// Structured payload attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StructuredEventData {
    Damage {
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
        is_killing_blow: bool,
    },
    Death {
        victim: CombatantId,
        killer: Option<CombatantId>,
    },
    AbilityUsed {
        caster: CombatantId,
        ability: String,
    },
    Rejected {
        reason: IntentRejection,
    },
}

/// Summary written at the top of an exported log.
#[derive(Debug, Clone, Serialize)]
pub struct SessionMetadata {
    pub duration_secs: f32,
    pub hits: u32,
    pub misses: u32,
    pub total_damage: f32,
    pub dps: f32,
    pub minions_killed: u32,
    pub player_deaths: u32,
}

#[derive(Serialize)]
struct ExportedLog<'a> {
    session: &'a SessionMetadata,
    entries: &'a [CombatLogEntry],
}

/// The combat log storing all events
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current session time
    pub match_time: f32,
}

impl CombatLog {
    /// Add a new unstructured entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.push(event_type, message, None);
    }

    fn push(&mut self, event_type: CombatLogEventType, message: String, data: Option<StructuredEventData>) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            data,
        });
    }

    /// Record damage with structured data
    pub fn log_damage(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
        is_killing_blow: bool,
        message: String,
    ) {
        self.push(
            CombatLogEventType::Damage,
            message,
            Some(StructuredEventData::Damage {
                source,
                target,
                ability,
                amount,
                is_killing_blow,
            }),
        );
    }

    /// Record a death with optional killer
    pub fn log_death(&mut self, victim: CombatantId, killer: Option<CombatantId>, message: String) {
        self.push(
            CombatLogEventType::Death,
            message,
            Some(StructuredEventData::Death { victim, killer }),
        );
    }

    /// Record an ability activation
    pub fn log_ability(&mut self, caster: CombatantId, ability: String) {
        let message = format!("{} casts {}", caster, ability);
        self.push(
            CombatLogEventType::AbilityUsed,
            message,
            Some(StructuredEventData::AbilityUsed { caster, ability }),
        );
    }

    /// Record a refused order
    pub fn log_rejection(&mut self, reason: IntentRejection, message: String) {
        self.push(
            CombatLogEventType::Rejected,
            message,
            Some(StructuredEventData::Rejected { reason }),
        );
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get only HP-changing events
    pub fn hp_changes_only(&self) -> Vec<&CombatLogEntry> {
        self.filter_by_type(CombatLogEventType::Damage)
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Total damage dealt by `source`, keyed by ability name
    pub fn damage_by_ability(&self, source: &str) -> HashMap<String, f32> {
        let mut totals = HashMap::new();
        for entry in &self.entries {
            if let Some(StructuredEventData::Damage {
                source: entry_source,
                ability,
                amount,
                ..
            }) = &entry.data
            {
                if entry_source == source {
                    *totals.entry(ability.clone()).or_insert(0.0) += amount;
                }
            }
        }
        totals
    }

    /// Total damage received by `target`
    pub fn damage_taken_by(&self, target: &str) -> f32 {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.data {
                Some(StructuredEventData::Damage {
                    target: entry_target,
                    amount,
                    ..
                }) if entry_target == target => Some(*amount),
                _ => None,
            })
            .sum()
    }

    /// Number of killing blows landed by `source`
    pub fn killing_blows(&self, source: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| {
                matches!(
                    &entry.data,
                    Some(StructuredEventData::Damage { source: s, is_killing_blow: true, .. }) if s == source
                )
            })
            .count()
    }

    /// How often each rejection reason was hit
    pub fn rejections(&self) -> HashMap<IntentRejection, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            if let Some(StructuredEventData::Rejected { reason }) = &entry.data {
                *counts.entry(*reason).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Export the log as pretty JSON. Returns the path written.
    pub fn save_to_file(&self, metadata: &SessionMetadata, path: Option<&str>) -> Result<String, String> {
        let path = path.unwrap_or(DEFAULT_LOG_PATH);
        let exported = ExportedLog {
            session: metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&exported)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;

        Ok(path.to_string())
    }
}
