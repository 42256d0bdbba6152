//! Duel settings and configuration
//!
//! Manages the server-style toggles governing duel state handling.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configurable duel behavior toggles.
///
/// The two flags are independent: either category of state handling can
/// be switched off without affecting the other.
#[derive(Resource, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelSettings {
    /// Snapshot, reset and restore ability cooldowns around duels
    pub reset_duel_cooldowns: bool,
    /// Snapshot, reset and restore health and mana around duels
    pub reset_duel_health_mana: bool,
}

impl Default for DuelSettings {
    fn default() -> Self {
        Self {
            reset_duel_cooldowns: true,
            reset_duel_health_mana: true,
        }
    }
}

impl DuelSettings {
    /// Get the path to the settings file
    fn settings_path() -> PathBuf {
        PathBuf::from("settings.ron")
    }

    /// Load settings from file, or return default if file doesn't exist
    pub fn load() -> Self {
        let path = Self::settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str(&contents) {
                    Ok(settings) => {
                        info!("Loaded settings from {:?}", path);
                        settings
                    }
                    Err(e) => {
                        warn!("Failed to parse settings file: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read settings file: {}", e);
                    Self::default()
                }
            }
        } else {
            info!("No settings file found, using defaults");
            Self::default()
        }
    }
}

/// Plugin for managing duel settings
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DuelSettings::load());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_both_resets() {
        let settings = DuelSettings::default();
        assert!(settings.reset_duel_cooldowns);
        assert!(settings.reset_duel_health_mana);
    }

    #[test]
    fn test_settings_ron_round_trip() {
        let settings = DuelSettings {
            reset_duel_cooldowns: false,
            reset_duel_health_mana: true,
        };
        let text = ron::ser::to_string(&settings).unwrap();
        let parsed: DuelSettings = ron::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
