//! Combat logging
//!
//! Records duel lifecycle and state-transition events for display and
//! post-run analysis.

use bevy::prelude::*;
use serde::Serialize;

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Timestamp in simulation time (seconds since run start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// Damage dealt
    Damage,
    /// Ability used
    AbilityUsed,
    /// Cooldowns saved, reset or restored
    Cooldowns,
    /// Health or mana saved, reset or restored
    Vitals,
    /// Duel lifecycle event (start, end, outcome)
    DuelEvent,
}

/// The combat log resource storing all events
#[derive(Resource, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current simulation time
    pub sim_time: f32,
}

/// Metadata describing a completed duel, written alongside the log.
#[derive(Debug, Clone, Serialize)]
pub struct DuelMetadata {
    pub challenger: String,
    pub opponent: String,
    pub outcome: String,
    /// Winning team (1 or 2), None for interrupted/fled duels
    pub winner: Option<u8>,
}

#[derive(Serialize)]
struct DuelLogFile<'a> {
    metadata: &'a DuelMetadata,
    entries: &'a [CombatLogEntry],
}

impl CombatLog {
    /// Clear the log for a new run
    pub fn clear(&mut self) {
        self.entries.clear();
        self.sim_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.sim_time,
            event_type,
            message,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Save the log as a JSON report.
    ///
    /// Writes to `output_path` when given, otherwise to a timestamped
    /// file in the working directory. Returns the file name written.
    pub fn save_to_file(
        &self,
        metadata: &DuelMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        let filename = match output_path {
            Some(path) => path.to_string(),
            None => format!(
                "duel_log_{}.json",
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0)
            ),
        };

        let file = DuelLogFile {
            metadata,
            entries: &self.entries,
        };
        let contents = serde_json::to_string_pretty(&file)
            .map_err(|e| format!("Failed to serialize duel log: {}", e))?;
        std::fs::write(&filename, contents)
            .map_err(|e| format!("Failed to write {}: {}", filename, e))?;

        Ok(filename)
    }
}
